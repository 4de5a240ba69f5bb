use eframe::egui;
use registration_core::wizard::view::ProgressMarker;
use registration_core::{
    FieldDescriptor, RegistrationConfig, Services, StatusKind, StepAction, WizardStep,
};

use crate::state_manager::RegistrationStateManager;

const ACTIVE_MARKER: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);
const INACTIVE_MARKER: egui::Color32 = egui::Color32::from_rgb(156, 163, 175);
const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);

/// Udyam registration form window
pub struct RegistrationApp {
    state: RegistrationStateManager,
}

impl RegistrationApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: RegistrationConfig) -> Self {
        log::info!(
            "🚀 Starting Udyam registration (backend: {}, PIN lookup: {})",
            config.backend_url,
            config.postal_lookup_url
        );

        Self {
            state: RegistrationStateManager::new(Services::from_config(&config)),
        }
    }
}

impl eframe::App for RegistrationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.update_from_async();
        self.state.ensure_fields_loaded();

        if self.state.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Reload form fields").clicked() {
                        self.state.reload_fields();
                        ui.close_menu();
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Udyam Registration Form");
                });
                ui.add_space(10.0);

                self.render_progress(ui);
                ui.add_space(10.0);
                self.render_status(ui);

                match self.state.state().step {
                    WizardStep::One => self.render_step_one(ui),
                    WizardStep::Two => self.render_step_two(ui),
                }
            });
        });
    }
}

impl RegistrationApp {
    fn render_progress(&self, ui: &mut egui::Ui) {
        let [first, second] = self.state.state().progress();

        ui.horizontal(|ui| {
            render_marker(ui, first);
            ui.label(egui::RichText::new("────────").color(INACTIVE_MARKER));
            render_marker(ui, second);
        });
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        let Some(status) = &self.state.state().status else {
            return;
        };

        let color = match status.kind {
            StatusKind::Error => egui::Color32::RED,
            StatusKind::Success => SUCCESS_TEXT,
        };
        ui.colored_label(color, status.text.as_str());
        ui.add_space(5.0);
    }

    fn render_step_one(&mut self, ui: &mut egui::Ui) {
        let fields = self.visible_fields();

        ui.group(|ui| {
            egui::Grid::new("step_one_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    for field in &fields {
                        self.render_field(ui, field);
                    }

                    ui.label("PIN Code");
                    let mut pin_code = self.state.state().postal_code.clone();
                    let response =
                        ui.add(egui::TextEdit::singleline(&mut pin_code).hint_text("PIN Code"));
                    if response.changed() {
                        self.state.on_postal_code_change(pin_code);
                    }
                    ui.end_row();

                    let resolution = self.state.state().resolution.clone();

                    ui.label("City");
                    ui.add(
                        egui::TextEdit::singleline(&mut resolution.city.as_str()).hint_text("City"),
                    );
                    ui.end_row();

                    ui.label("State");
                    ui.add(
                        egui::TextEdit::singleline(&mut resolution.state.as_str())
                            .hint_text("State"),
                    );
                    ui.end_row();
                });
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button(StepAction::Next.label()).clicked() {
                self.state.advance_to_step2();
            }
            if self.state.state().lookup_pending {
                ui.spinner();
                ui.label("Looking up PIN code...");
            }
            if self.state.state().fields_loading {
                ui.spinner();
                ui.label("Loading form...");
            }
        });
    }

    fn render_step_two(&mut self, ui: &mut egui::Ui) {
        let fields = self.visible_fields();

        ui.group(|ui| {
            egui::Grid::new("step_two_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    for field in &fields {
                        self.render_field(ui, field);
                    }
                });
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            let submitting = self.state.state().submitting;
            if ui
                .add_enabled(!submitting, egui::Button::new(StepAction::Submit.label()))
                .clicked()
            {
                self.state.submit();
            }
            if submitting {
                ui.spinner();
                ui.label("Submitting...");
            }
        });
    }

    fn render_field(&mut self, ui: &mut egui::Ui, field: &FieldDescriptor) {
        ui.label(field.display_label());
        let mut value = self.state.state().field_value(&field.name).to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut value).hint_text(field.placeholder_text()),
        );
        if response.changed() {
            self.state.on_field_change(&field.name, value);
        }
        ui.end_row();
    }

    fn visible_fields(&self) -> Vec<FieldDescriptor> {
        self.state
            .state()
            .view()
            .fields
            .into_iter()
            .cloned()
            .collect()
    }
}

fn render_marker(ui: &mut egui::Ui, marker: ProgressMarker) {
    let color = if marker.active { ACTIVE_MARKER } else { INACTIVE_MARKER };
    ui.label(
        egui::RichText::new(format!("( {} )", marker.index))
            .color(color)
            .strong(),
    );
}
