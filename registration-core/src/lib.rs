//! Two-step Udyam registration wizard: field metadata from the backend,
//! PIN code resolution, Aadhaar/PAN checks and final submission.

pub mod config;
pub mod http_client;
pub mod services;
pub mod util;
pub mod validation;
pub mod wizard;

pub use config::{ConfigError, RegistrationConfig};
pub use services::{
    BackendClient, FormFieldService, PostalClient, PostalLookupService, Services,
    SubmissionService,
};
pub use util::errors::RegistrationError;
pub use validation::{is_valid_aadhaar, is_valid_pan};
pub use wizard::{
    execute_effect, transition, Effect, FieldDescriptor, FormState, PostalResolution,
    RegistrationWizard, StatusKind, StatusMessage, StepAction, SubmissionRecord, WizardEvent,
    WizardState, WizardStep,
};
