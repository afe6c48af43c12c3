// In app/src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;

mod display;
mod pipeline;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Generates BUY/SELL/HOLD signals for a target asset from anchor asset moves.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the configured strategy over a market CSV and writes the signal table.
    Generate {
        /// Market data CSV (defaults to `data.input_path`).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output CSV (defaults to `data.output_path`).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Runs the strategy and prints the signal table with a summary.
    Show {
        /// Market data CSV (defaults to `data.input_path`).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Only print the last N rows of the table.
        #[arg(long)]
        tail: Option<usize>,
    },

    /// Prints the strategy's required targets and anchors as JSON.
    Metadata,

    /// Checks that a market CSV has every column the strategy needs.
    Validate {
        /// Market data CSV (defaults to `data.input_path`).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Accepts the `tracing` level names (`trace` .. `error`) in any case.
fn parse_log_level(raw: &str) -> Option<tracing::Level> {
    raw.trim().parse().ok()
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings().context("Failed to load settings from config/")?;

    let configured_level = parse_log_level(&settings.app.log_level);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            tracing_subscriber::filter::Targets::new()
                .with_default(configured_level.unwrap_or(tracing::Level::INFO)),
        );
    tracing_subscriber::registry().with(fmt_layer).init();
    if configured_level.is_none() {
        tracing::warn!(log_level = %settings.app.log_level, "Unrecognised app.log_level; logging at INFO");
    }

    let strategy = strategies::factory::create_strategy(&settings.strategy)?;
    tracing::info!(strategy = strategy.name(), "Strategy loaded");

    // Match on the parsed command and call the appropriate handler.
    match cli.command {
        Commands::Generate { input, output } => {
            let input = input.unwrap_or(settings.data.input_path);
            let output = output.unwrap_or(settings.data.output_path);
            let rows = pipeline::generate(&*strategy, &input)?;
            market_data::save_signals_csv(&output, &rows)
                .with_context(|| format!("Failed to write signals to {}", output.display()))?;
            println!("Signals generated and saved to {}", output.display());
        }
        Commands::Show { input, tail } => {
            let input = input.unwrap_or(settings.data.input_path);
            let rows = pipeline::generate(&*strategy, &input)?;
            let summary = analytics::AnalyticsEngine::new().summarize(&rows);
            print!("{}", display::render_table(&rows, tail));
            println!();
            print!("{}", display::render_summary(&summary));
        }
        Commands::Metadata => {
            println!("{}", serde_json::to_string_pretty(&strategy.metadata())?);
        }
        Commands::Validate { input } => {
            let input = input.unwrap_or(settings.data.input_path);
            pipeline::validate(&*strategy, &input)?;
            println!("{} provides every column {} needs", input.display(), strategy.name());
        }
    }

    tracing::info!("Finished successfully.");

    Ok(())
}
