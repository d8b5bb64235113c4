mod app;
mod state;
mod ui;

use app::CensusPreviewApp;
use census_preview::config::PreviewConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = PreviewConfig::default();
    let title = config.page_title.clone();

    // The CSV is read exactly once, before the window opens.
    let state = AppState::load(config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([1400.0, 860.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(CensusPreviewApp::new(state)))),
    )
}
