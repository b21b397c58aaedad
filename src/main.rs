mod app;
mod color;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::BillionaireApp;
use billionaire_os::data::filter::FilterSelection;
use billionaire_os::state::AppState;

#[derive(Parser)]
#[command(
    name = "billionaire-os",
    about = "Billionaire OS – filterable net-worth dashboard"
)]
struct Cli {
    /// CSV with at least personName, country, category and finalWorth columns.
    #[arg(
        long,
        env = "BILLIONAIRE_OS_DATA",
        default_value = "data/Billionaires Statistics Dataset.csv"
    )]
    data: PathBuf,

    /// Print the computed view as JSON instead of opening a window.
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// Initial country filter (repeatable).
    #[arg(long = "country")]
    countries: Vec<String>,

    /// Initial industry filter (repeatable).
    #[arg(long = "category")]
    categories: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState::default();
    let opened = state.open(&cli.data);
    if opened.is_ok() {
        state.set_selection(FilterSelection::new(cli.countries, cli.categories));
    }

    if cli.headless {
        opened.with_context(|| format!("loading {}", cli.data.display()))?;
        let json = serde_json::to_string_pretty(&state.view)
            .context("serializing view model")?;
        println!("{json}");
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Billionaire OS",
        options,
        Box::new(|_cc| Ok(Box::new(BillionaireApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
