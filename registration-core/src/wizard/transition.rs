//! Pure state transitions: old state plus one event gives the new state and
//! the outbound calls to make. Nothing here performs I/O.

use super::actions::{Effect, WizardEvent};
use super::state::{
    StatusMessage, WizardState, WizardStep, AADHAAR_FIELD, PAN_FIELD, POSTAL_CODE_LEN,
    SUBMISSION_SUCCESS_MESSAGE,
};
use crate::util::errors::RegistrationError;
use crate::validation::{is_valid_aadhaar, is_valid_pan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: WizardState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn failed(mut state: WizardState, error: RegistrationError) -> Self {
        tracing::warn!("Wizard error [{}]: {}", error.kind_name(), error);
        state.status = Some(StatusMessage::error(&error));
        Self::unchanged(state)
    }

    fn unchanged(state: WizardState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with_effect(state: WizardState, effect: Effect) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

pub fn transition(mut state: WizardState, event: WizardEvent) -> Transition {
    tracing::debug!("Wizard event: {}", event.description());

    match event {
        WizardEvent::Initialize => {
            state.fields_loading = true;
            Transition::with_effect(state, Effect::FetchFields)
        }

        WizardEvent::FieldsLoaded(result) => {
            state.fields_loading = false;
            match result {
                Ok(fields) => {
                    tracing::info!("Loaded {} form field descriptors", fields.len());
                    state.fields = fields;
                    Transition::unchanged(state)
                }
                Err(error) => Transition::failed(state, error),
            }
        }

        WizardEvent::FieldChanged { name, value } => {
            state.form.set(name, value);
            Transition::unchanged(state)
        }

        WizardEvent::PostalCodeChanged(value) => {
            state.postal_code = value;
            if state.postal_code.chars().count() != POSTAL_CODE_LEN {
                return Transition::unchanged(state);
            }

            state.lookup_seq += 1;
            state.lookup_pending = true;
            let effect = Effect::LookupPostal {
                seq: state.lookup_seq,
                code: state.postal_code.clone(),
            };
            Transition::with_effect(state, effect)
        }

        WizardEvent::PostalLookupCompleted { seq, result } => {
            if seq < state.lookup_seq {
                tracing::debug!(
                    "Discarding stale PIN code response #{} (latest is #{})",
                    seq,
                    state.lookup_seq
                );
                return Transition::unchanged(state);
            }

            state.lookup_pending = false;
            match result {
                Ok(resolution) => {
                    state.resolution = resolution;
                    Transition::unchanged(state)
                }
                Err(error) => {
                    state.resolution = Default::default();
                    Transition::failed(state, error)
                }
            }
        }

        WizardEvent::AdvanceRequested => {
            if !state.form.get(AADHAAR_FIELD).is_some_and(is_valid_aadhaar) {
                return Transition::failed(state, RegistrationError::AadhaarFormat);
            }

            state.status = None;
            state.step = WizardStep::Two;
            Transition::unchanged(state)
        }

        WizardEvent::SubmitRequested => {
            if !state.form.get(PAN_FIELD).is_some_and(is_valid_pan) {
                return Transition::failed(state, RegistrationError::PanFormat);
            }

            state.submitting = true;
            let record = state.submission_record();
            Transition::with_effect(state, Effect::Submit(record))
        }

        WizardEvent::SubmissionCompleted(result) => {
            state.submitting = false;
            match result {
                Ok(()) => {
                    state.status = Some(StatusMessage::success(SUBMISSION_SUCCESS_MESSAGE));
                    Transition::unchanged(state)
                }
                Err(error) => Transition::failed(state, error),
            }
        }
    }
}
