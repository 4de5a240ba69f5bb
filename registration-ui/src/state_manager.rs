use std::sync::{Arc, Mutex};

use registration_core::{
    execute_effect, transition, Effect, Services, WizardEvent, WizardState,
};

/// Frame-driven wrapper around the wizard state.
///
/// Outbound calls run as spawned tasks; their completions land in `inbox`
/// and are folded into the state by `update_from_async` on the next frame.
pub struct RegistrationStateManager {
    services: Services,
    state: WizardState,
    fields_requested: bool,

    // Async bridge (Arc<Mutex<>> for completions from spawned tasks)
    inbox: Arc<Mutex<Vec<WizardEvent>>>,
}

impl RegistrationStateManager {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: WizardState::default(),
            fields_requested: false,
            inbox: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.fields_loading || self.state.lookup_pending || self.state.submitting
    }

    // === Operations ===

    /// Requests field descriptors on the first frame only.
    pub fn ensure_fields_loaded(&mut self) {
        if self.fields_requested {
            return;
        }
        self.fields_requested = true;
        self.reload_fields();
    }

    pub fn reload_fields(&mut self) {
        if self.state.fields_loading {
            log::warn!("⚠️ [STATE] Field reload requested while already loading - ignoring");
            return;
        }
        log::info!("🔄 [STATE] Loading form fields");
        self.apply(WizardEvent::Initialize);
    }

    pub fn on_field_change(&mut self, name: &str, value: String) {
        self.apply(WizardEvent::FieldChanged {
            name: name.to_string(),
            value,
        });
    }

    pub fn on_postal_code_change(&mut self, value: String) {
        self.apply(WizardEvent::PostalCodeChanged(value));
    }

    pub fn advance_to_step2(&mut self) {
        self.apply(WizardEvent::AdvanceRequested);
    }

    pub fn submit(&mut self) {
        self.apply(WizardEvent::SubmitRequested);
    }

    // === Async Result Processing ===

    /// Applies every completion received since the last frame. Returns whether any arrived.
    pub fn update_from_async(&mut self) -> bool {
        let completed: Vec<WizardEvent> = match self.inbox.lock() {
            Ok(mut guard) => guard.drain(..).collect(),
            Err(_) => {
                log::error!("❌ [STATE] Failed to lock completion inbox");
                return false;
            }
        };

        let received = !completed.is_empty();
        for event in completed {
            log::debug!("🎉 [STATE] {}", event.description());
            self.apply(event);
        }
        received
    }

    fn apply(&mut self, event: WizardEvent) {
        let outcome = transition(std::mem::take(&mut self.state), event);
        self.state = outcome.state;
        for effect in outcome.effects {
            self.spawn_effect(effect);
        }
    }

    fn spawn_effect(&self, effect: Effect) {
        log::info!("📡 [STATE] {}", effect.description());
        let services = self.services.clone();
        let inbox = self.inbox.clone();

        tokio::spawn(async move {
            let event = execute_effect(&services, effect).await;
            match inbox.lock() {
                Ok(mut queue) => queue.push(event),
                Err(_) => log::error!("❌ [STATE] Failed to lock completion inbox"),
            }
        });
    }
}
