//! What each step renders, derived from state and never stored.

use super::state::{
    FieldDescriptor, WizardState, WizardStep, AADHAAR_FIELD, NAME_AS_PER_AADHAAR_FIELD, PAN_FIELD,
};

pub const STEP_ONE_FIELDS: &[&str] = &[AADHAAR_FIELD, NAME_AS_PER_AADHAAR_FIELD];
pub const STEP_TWO_FIELDS: &[&str] = &[PAN_FIELD];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Next,
    Submit,
}

impl StepAction {
    pub fn label(self) -> &'static str {
        match self {
            StepAction::Next => "Next",
            StepAction::Submit => "Submit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressMarker {
    pub index: u8,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView<'a> {
    pub step: WizardStep,
    /// Descriptor-list order is preserved.
    pub fields: Vec<&'a FieldDescriptor>,
    /// PIN code input plus read-only city and state.
    pub shows_postal_controls: bool,
    pub action: StepAction,
}

pub fn fields_for_step(step: WizardStep) -> &'static [&'static str] {
    match step {
        WizardStep::One => STEP_ONE_FIELDS,
        WizardStep::Two => STEP_TWO_FIELDS,
    }
}

pub fn visible_fields(fields: &[FieldDescriptor], step: WizardStep) -> Vec<&FieldDescriptor> {
    let names = fields_for_step(step);
    fields
        .iter()
        .filter(|field| names.contains(&field.name.as_str()))
        .collect()
}

pub fn progress_markers(step: WizardStep) -> [ProgressMarker; 2] {
    [WizardStep::One, WizardStep::Two].map(|marker| ProgressMarker {
        index: marker.index(),
        active: step >= marker,
    })
}

impl WizardState {
    pub fn view(&self) -> StepView<'_> {
        StepView {
            step: self.step,
            fields: visible_fields(&self.fields, self.step),
            shows_postal_controls: self.step == WizardStep::One,
            action: match self.step {
                WizardStep::One => StepAction::Next,
                WizardStep::Two => StepAction::Submit,
            },
        }
    }

    pub fn progress(&self) -> [ProgressMarker; 2] {
        progress_markers(self.step)
    }
}
