use std::collections::VecDeque;

use super::actions::{Effect, WizardEvent};
use super::state::WizardState;
use super::transition::transition;
use crate::config::RegistrationConfig;
use crate::services::Services;

/// Runs one effect against the services and reports its completion.
pub async fn execute_effect(services: &Services, effect: Effect) -> WizardEvent {
    tracing::debug!("Executing effect: {}", effect.description());

    match effect {
        Effect::FetchFields => WizardEvent::FieldsLoaded(services.fields.fetch_fields().await),
        Effect::LookupPostal { seq, code } => WizardEvent::PostalLookupCompleted {
            seq,
            result: services.postal.lookup(&code).await,
        },
        Effect::Submit(record) => {
            WizardEvent::SubmissionCompleted(services.submission.submit(&record).await.map(|_| ()))
        }
    }
}

/// Controller owning the wizard state and driving its outbound calls.
pub struct RegistrationWizard {
    // Single source of truth
    state: WizardState,

    services: Services,

    // Queue for frame-driven callers
    pending_actions: VecDeque<WizardEvent>,
}

impl RegistrationWizard {
    pub fn new(services: Services) -> Self {
        Self {
            state: WizardState::default(),
            services,
            pending_actions: VecDeque::new(),
        }
    }

    pub fn from_config(config: &RegistrationConfig) -> Self {
        Self::new(Services::from_config(config))
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    // === Operations ===

    /// Fetches field descriptors once; failure leaves the list empty.
    pub async fn initialize(&mut self) {
        self.handle_event(WizardEvent::Initialize).await;
    }

    /// Stores the code and looks it up once it is exactly 6 characters long.
    pub async fn on_postal_code_change(&mut self, value: impl Into<String>) {
        self.handle_event(WizardEvent::PostalCodeChanged(value.into())).await;
    }

    pub fn on_field_change(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.apply_local(WizardEvent::FieldChanged {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn advance_to_step2(&mut self) {
        self.apply_local(WizardEvent::AdvanceRequested);
    }

    /// Validates the PAN and, if it passes, posts the merged record.
    pub async fn submit(&mut self) {
        self.handle_event(WizardEvent::SubmitRequested).await;
    }

    // === Queued processing ===

    /// Queues an event; nothing runs until `update`.
    pub fn dispatch(&mut self, event: WizardEvent) {
        tracing::debug!("Dispatching event: {}", event.description());
        self.pending_actions.push_back(event);
    }

    /// Processes one queued event together with the effects it triggers.
    pub async fn update(&mut self) {
        if let Some(event) = self.pending_actions.pop_front() {
            self.handle_event(event).await;
        }
    }

    pub fn has_pending_actions(&self) -> bool {
        !self.pending_actions.is_empty()
    }

    // === Internals ===

    fn apply(&mut self, event: WizardEvent) -> Vec<Effect> {
        let outcome = transition(std::mem::take(&mut self.state), event);
        self.state = outcome.state;
        outcome.effects
    }

    fn apply_local(&mut self, event: WizardEvent) {
        let effects = self.apply(event);
        debug_assert!(effects.is_empty(), "local events never trigger outbound calls");
    }

    async fn handle_event(&mut self, event: WizardEvent) {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            for effect in self.apply(event) {
                let completion = execute_effect(&self.services, effect).await;
                queue.push_back(completion);
            }
        }

        // Errors are already logged by the transition that raised them
        if let Some(status) = self.state.status.as_ref().filter(|s| !s.is_error()) {
            tracing::info!("Wizard status: {}", status.text);
        }
    }
}
