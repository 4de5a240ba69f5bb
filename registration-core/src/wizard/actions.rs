use super::state::{FieldDescriptor, PostalResolution, SubmissionRecord};
use crate::util::errors::RegistrationError;

/// Inputs to the wizard: user edits and completions of outbound calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    // Lifecycle
    Initialize,
    FieldsLoaded(Result<Vec<FieldDescriptor>, RegistrationError>),

    // User input
    FieldChanged { name: String, value: String },
    PostalCodeChanged(String),
    AdvanceRequested,
    SubmitRequested,

    // Outbound call completions
    PostalLookupCompleted {
        seq: u64,
        result: Result<PostalResolution, RegistrationError>,
    },
    SubmissionCompleted(Result<(), RegistrationError>),
}

impl WizardEvent {
    pub fn description(&self) -> &'static str {
        match self {
            WizardEvent::Initialize => "Loading form fields",
            WizardEvent::FieldsLoaded(_) => "Form fields received",
            WizardEvent::FieldChanged { .. } => "Updating form field",
            WizardEvent::PostalCodeChanged(_) => "Updating PIN code",
            WizardEvent::AdvanceRequested => "Advancing to step 2",
            WizardEvent::SubmitRequested => "Submitting registration",
            WizardEvent::PostalLookupCompleted { .. } => "PIN code lookup finished",
            WizardEvent::SubmissionCompleted(_) => "Submission finished",
        }
    }
}

/// Outbound work requested by a transition. Running one yields exactly one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchFields,
    LookupPostal { seq: u64, code: String },
    Submit(SubmissionRecord),
}

impl Effect {
    pub fn description(&self) -> &'static str {
        match self {
            Effect::FetchFields => "GET form fields",
            Effect::LookupPostal { .. } => "GET PIN code details",
            Effect::Submit(_) => "POST registration",
        }
    }
}
