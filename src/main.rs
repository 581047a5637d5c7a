mod app;
mod cli;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::AnimeLensApp;
use clap::Parser;
use cli::Args;
use config::ViewerConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::from(Args::parse());
    log::debug!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Anime Lens – Catalog Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(AnimeLensApp::new(config)))),
    )
}
