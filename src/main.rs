use inkboard::app::InkboardApp;
use inkboard::logging;
use inkboard::settings::Settings;

use eframe::egui;

fn main() -> anyhow::Result<()> {
    let settings_path = Settings::config_path();
    let settings = match Settings::load(&settings_path) {
        Ok(settings) => settings,
        Err(err) => {
            // A corrupt settings file should not keep the window from
            // opening; start from defaults and say so.
            eprintln!("failed to load settings: {err:#}");
            Settings::default()
        }
    };

    logging::init(settings.debug_logging, settings.log_file.clone());
    tracing::info!(settings = %settings_path.display(), "inkboard starting");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([480.0, 320.0])
            .with_maximized(true),
        ..Default::default()
    };

    eframe::run_native(
        "Inkboard",
        native_options,
        Box::new(move |_cc| Box::new(InkboardApp::new(settings, settings_path))),
    )
    .map_err(|err| anyhow::anyhow!("start drawing window: {err}"))
}
