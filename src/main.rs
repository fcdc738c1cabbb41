mod app;
mod color;
mod data;
mod state;
mod ui;
mod views;

use app::StayLensApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Load failure is fatal: no view can be served without the dataset.
    let table = match data::loader::load() {
        Ok(table) => table,
        Err(err) => {
            log::error!("Failed to load listings: {err:#}");
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "StayLens – Airbnb Data Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(StayLensApp::new(table)))),
    )
}
