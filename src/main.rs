//! Channel Insight - YouTube Channel Statistics Explorer
//!
//! Loads a CSV of channel statistics, lets the user filter and export rows,
//! and charts channel rankings and category distribution.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::anyhow;
use config::{DashboardConfig, CONFIG_FILE_NAME};
use eframe::egui;
use gui::{DashboardApp, APP_TITLE};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load(Path::new(CONFIG_FILE_NAME))?;
    log::info!("Using data file {}", config.data_path.display());

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("failed to start the dashboard window: {e}"))
}
