use thiserror::Error;

/// Failures surfaced to the user through the wizard's status line.
///
/// The display text of each variant is exactly what the status line shows.
/// Transport causes are logged where they happen and never carried here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Error fetching form data.")]
    FieldFetch,
    #[error("Error: Invalid PIN code.")]
    PostalInvalid,
    #[error("Error: Could not fetch PIN code data.")]
    PostalFetch,
    #[error("Error: Please enter a valid 12-digit Aadhaar number.")]
    AadhaarFormat,
    #[error("Error: Please enter a valid PAN number.")]
    PanFormat,
    #[error("Error submitting form.")]
    Submission,
}

impl RegistrationError {
    pub fn kind_name(&self) -> &'static str {
        match self {
            RegistrationError::FieldFetch => "field_fetch",
            RegistrationError::PostalInvalid => "postal_invalid",
            RegistrationError::PostalFetch => "postal_fetch",
            RegistrationError::AadhaarFormat => "aadhaar_format",
            RegistrationError::PanFormat => "pan_format",
            RegistrationError::Submission => "submission",
        }
    }
}
