mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::HappinessApp;
use clap::Parser;
use data::model::Metric;
use eframe::egui;
use state::AppState;

/// World happiness dashboard.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Dataset to load (.csv, .json or .parquet).
    #[arg(long, default_value = "world_happiness_dataset.csv")]
    data: PathBuf,

    /// Region selected at startup.
    #[arg(long, default_value = "North America")]
    region: String,

    /// Metric plotted at startup: happiness_score or happiness_rank.
    #[arg(long, default_value = "happiness_score")]
    metric: Metric,

    /// Verbose logging and a selection readout in the top bar.
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // A dataset that cannot be loaded at startup is fatal.
    let dataset = data::loader::load_file(&args.data)
        .with_context(|| format!("failed to load dataset {}", args.data.display()))?;

    let mut state = AppState::new(dataset, args.data, &args.region, args.metric);
    state.debug = args.debug;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "World Happiness Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(HappinessApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
