//! Titanic Insights - Passenger Statistics Dashboard
//!
//! Loads the manifest once at startup, then opens the chart dashboard.

use anyhow::{anyhow, Context};
use eframe::egui;
use std::time::Duration;
use titanic_insights::gui::DashboardApp;
use titanic_insights::{AppConfig, DataLoader};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // An unreachable dataset aborts startup
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let table = DataLoader::load_passengers(&config.dataset_source, timeout)
        .with_context(|| format!("Failed to load dataset from {}", config.dataset_source))?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 850.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Titanic Insights"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Titanic Insights",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config, table)))),
    )
    .map_err(|e| anyhow!("Dashboard failed: {}", e))
}
