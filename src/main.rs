mod app;
mod charts;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;
mod view;

use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use eframe::egui;

use app::DiabetesDashboardApp;
use config::{Cli, DashboardConfig};
use state::Control;
use view::Dashboard;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.mode.default_log_filter()),
    )
    .init();

    let config = DashboardConfig::from(&cli);
    let dataset = data::loader::load_file(&cli.data)
        .with_context(|| format!("loading dataset from {}", cli.data.display()))?;
    log::info!(
        "Loaded {} rows with columns {:?}",
        dataset.len(),
        dataset.column_names()
    );
    if dataset.is_empty() {
        log::warn!("Dataset has no rows; every chart will be empty");
    }

    let dashboard = Dashboard::new(Arc::new(dataset), config)
        .inspect_err(|e| {
            let category = if e.is_config() { "Configuration" } else { "Dataset" };
            log::error!("{category} error: {e}");
        })
        .context("validating dataset schema")?;

    match &cli.export {
        Some(tab_id) => export(&dashboard, tab_id, &cli),
        None => run_window(dashboard),
    }
}

/// Print one tab's view as JSON instead of opening a window.
fn export(dashboard: &Dashboard, tab_id: &str, cli: &Cli) -> anyhow::Result<()> {
    let mut state = dashboard.initial_state();
    if let Some(column) = &cli.numeric {
        state.set_field(Control::UniNumeric, column.as_str());
        state.set_field(Control::BivNumeric, column.as_str());
    }
    if let Some(column) = &cli.categorical {
        state.set_field(Control::UniCategorical, column.as_str());
        state.set_field(Control::BivCategorical, column.as_str());
    }

    let view = dashboard.render_tab_id(tab_id, &state);
    let json = serde_json::to_string_pretty(&view).context("serialising view")?;
    println!("{json}");
    Ok(())
}

fn run_window(dashboard: Dashboard) -> anyhow::Result<()> {
    let mode = dashboard.config().mode;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Diabetes – Análisis Exploratorio",
        options,
        Box::new(move |_cc| Ok(Box::new(DiabetesDashboardApp::new(dashboard, mode)))),
    )
    .map_err(|e| anyhow!("window closed with error: {e}"))
}
