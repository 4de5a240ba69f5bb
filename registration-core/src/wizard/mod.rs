pub mod actions;
pub mod manager;
pub mod state;
pub mod transition;
pub mod view;


pub use actions::{Effect, WizardEvent};
pub use manager::{execute_effect, RegistrationWizard};
pub use state::{
    FieldDescriptor, FormState, PostalResolution, StatusKind, StatusMessage, SubmissionRecord,
    WizardState, WizardStep,
};
pub use transition::{transition, Transition};
pub use view::{progress_markers, visible_fields, ProgressMarker, StepAction, StepView};
