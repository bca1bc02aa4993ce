// In app/src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use core_types::IndicatorSnapshot;
use std::path::PathBuf;
use std::time::Instant;
use strategies::factory::create_strategy;
use strategies::Strategy;
use tracing_subscriber::prelude::*;

mod report;
mod runner;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "RSI Bull/Bear + ADX trend advisor.")]
struct Cli {
    /// Log at debug level regardless of the configured level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replays recorded indicator snapshots through the configured advisors.
    Replay {
        /// The run file to use instead of the configured one.
        #[arg(short, long)]
        run_file: Option<PathBuf>,

        /// Only replay this pair (e.g., "BTCUSDT").
        #[arg(short, long)]
        symbol: Option<String>,

        /// Print the results as JSON instead of a text report.
        #[arg(long)]
        json: bool,
    },

    /// Validates a run file and every strategy configured in it.
    Check {
        #[arg(short, long)]
        run_file: Option<PathBuf>,
    },

    /// Evaluates a single snapshot with a pair's first configured advisor.
    Advise {
        #[arg(short, long)]
        run_file: Option<PathBuf>,

        /// The pair whose advisor settings to use.
        #[arg(short, long)]
        symbol: String,

        /// The snapshot as JSON, e.g. '{"maSlow":20,"maFast":10,"bullRsi":50,"bearRsi":90,"adx":30}'.
        snapshot: String,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();
    let settings = app_config::load_settings()?;

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        settings.app.log_level.parse().unwrap_or(tracing::Level::INFO)
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::info!(environment = %settings.app.environment, "Starting advisor application");

    match cli.command {
        Commands::Replay { run_file, symbol, json } => {
            handle_replay(&settings, run_file, symbol, json)?;
        }
        Commands::Check { run_file } => {
            handle_check(&settings, run_file)?;
        }
        Commands::Advise { run_file, symbol, snapshot } => {
            handle_advise(&settings, run_file, &symbol, &snapshot)?;
        }
    }

    tracing::info!("Advisor application has finished successfully.");

    Ok(())
}

fn load_run(settings: &app_config::Settings, run_file: Option<PathBuf>) -> Result<app_config::RunConfig> {
    let path = run_file.unwrap_or_else(|| settings.replay.run_file.clone());
    tracing::info!(path = %path.display(), "Loading run file.");
    Ok(app_config::load_run_config(&path)?)
}

/// Handles the logic for the `replay` subcommand.
fn handle_replay(
    settings: &app_config::Settings,
    run_file: Option<PathBuf>,
    symbol: Option<String>,
    json: bool,
) -> Result<()> {
    let start_time = Instant::now();
    let run = load_run(settings, run_file)?;

    let reports = runner::run_replay(settings, &run, symbol.as_deref())?;

    if json {
        println!("{}", report::to_json(&reports)?);
    } else {
        report::print_replay_report(&reports);
    }

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    tracing::info!(duration = ?start_time.elapsed(), replays = reports.len(), failed, "Replay finished.");
    if failed > 0 {
        anyhow::bail!("{failed} of {} replays failed.", reports.len());
    }
    Ok(())
}

/// Handles the logic for the `check` subcommand.
fn handle_check(settings: &app_config::Settings, run_file: Option<PathBuf>) -> Result<()> {
    let run = load_run(settings, run_file)?;
    let count = runner::check_run(settings, &run)?;
    println!("Run file OK: {count} advisor(s) across {} enabled pair(s).", run.enabled_pairs().count());
    Ok(())
}

/// Handles the logic for the `advise` subcommand.
fn handle_advise(
    settings: &app_config::Settings,
    run_file: Option<PathBuf>,
    symbol: &str,
    snapshot: &str,
) -> Result<()> {
    let run = load_run(settings, run_file)?;
    let pair = run
        .pair_configs
        .iter()
        .find(|p| p.symbol == symbol)
        .with_context(|| format!("Pair {symbol} is not in the run file"))?;
    let strategy_config = pair
        .strategies
        .first()
        .with_context(|| format!("Pair {symbol} has no strategies"))?;

    let snapshot: IndicatorSnapshot = serde_json::from_str(snapshot).context("Failed to parse snapshot")?;
    let mut strategy = create_strategy(strategy_config)?;

    // Evaluate as if the warm-up were already behind us.
    let age = strategy.required_history();
    let advice = strategy.on_candle(age, &snapshot);

    let output = serde_json::json!({
        "strategy": strategy.name(),
        "evaluation": strategy.last_evaluation(),
        "advice": advice,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
