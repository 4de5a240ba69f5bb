// Desktop entry point for the registration form
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod state_manager;

use registration_core::RegistrationConfig;

#[tokio::main]
async fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = RegistrationConfig::from_env().unwrap_or_else(|e| {
        log::error!("Invalid registration config, using defaults: {}", e);
        RegistrationConfig::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 420.0])
            .with_title("Udyam Registration"),
        ..Default::default()
    };

    eframe::run_native(
        "Udyam Registration",
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(app::RegistrationApp::new(cc, config)))
        }),
    )
}
