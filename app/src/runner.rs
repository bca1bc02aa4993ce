// In app/src/runner.rs

use anyhow::{Context, Result};
use app_config::{PairConfig, RunConfig, Settings};
use backtester::{Backtester, JsonLinesProvider, RunLogger, RunStats};
use core_types::Advice;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use std::path::{Path, PathBuf};
use strategies::factory::create_strategy;
use strategies::Strategy;

/// The result of replaying one strategy over one pair.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub symbol: String,
    pub strategy: &'static str,
    pub candles: u64,
    pub advices: Vec<Advice>,
    pub stats: RunStats,
    pub elapsed_secs: f64,
    /// Set when the replay stopped early. Other pairs are unaffected.
    pub error: Option<String>,
}

/// One unit of parallel work. Each job owns its strategy outright.
struct ReplayJob {
    symbol: String,
    snapshots: PathBuf,
    strategy: Box<dyn Strategy + Send>,
}

/// Resolves a pair's snapshot file against the data directory unless it is
/// already absolute.
pub fn snapshot_path(data_dir: &Path, pair: &PairConfig) -> PathBuf {
    if pair.snapshots.is_absolute() {
        pair.snapshots.clone()
    } else {
        data_dir.join(&pair.snapshots)
    }
}

/// Builds every configured strategy up front so a bad parameter set fails
/// the whole run before any replay starts.
fn plan_jobs(settings: &Settings, run: &RunConfig, only: Option<&str>) -> Result<Vec<ReplayJob>> {
    let mut jobs = Vec::new();
    for pair in run.enabled_pairs() {
        if only.is_some_and(|symbol| symbol != pair.symbol) {
            continue;
        }
        for strategy_config in &pair.strategies {
            let strategy = create_strategy(strategy_config).with_context(|| {
                format!("Invalid `{}` configuration for {}", strategy_config.name, pair.symbol)
            })?;
            jobs.push(ReplayJob {
                symbol: pair.symbol.clone(),
                snapshots: snapshot_path(&settings.replay.data_dir, pair),
                strategy,
            });
        }
    }
    Ok(jobs)
}

/// Checks a run file without replaying anything. Returns how many strategy
/// instances it would create.
pub fn check_run(settings: &Settings, run: &RunConfig) -> Result<usize> {
    let jobs = plan_jobs(settings, run, None)?;
    for job in &jobs {
        if !job.snapshots.exists() {
            tracing::warn!(symbol = %job.symbol, path = %job.snapshots.display(), "Snapshot file does not exist yet.");
        }
    }
    Ok(jobs.len())
}

fn replay_one(job: ReplayJob) -> ReplayReport {
    let ReplayJob { symbol, snapshots, strategy } = job;
    let name = strategy.name();
    let mut backtester = Backtester::new(symbol.clone(), strategy);
    let mut logger = RunLogger::new();

    let result = JsonLinesProvider::open(&snapshots)
        .with_context(|| format!("Failed to open {}", snapshots.display()))
        .and_then(|mut provider| backtester.run(&mut provider, &mut logger));

    match result {
        Ok(summary) => ReplayReport {
            symbol,
            strategy: name,
            candles: summary.candles,
            stats: logger.stats().clone(),
            advices: logger.advices,
            elapsed_secs: summary.elapsed.as_secs_f64(),
            error: None,
        },
        Err(e) => {
            tracing::error!(symbol = %symbol, error = %e, "A single replay failed.");
            ReplayReport {
                symbol,
                strategy: name,
                candles: 0,
                stats: logger.stats().clone(),
                advices: logger.advices,
                elapsed_secs: 0.0,
                error: Some(format!("{e:#}")),
            }
        }
    }
}

/// Replays every enabled pair, each with its own advisor, in parallel.
pub fn run_replay(settings: &Settings, run: &RunConfig, only: Option<&str>) -> Result<Vec<ReplayReport>> {
    let jobs = plan_jobs(settings, run, only)?;
    if jobs.is_empty() {
        anyhow::bail!("No enabled pairs to replay.");
    }

    tracing::info!(
        jobs = jobs.len(),
        threads = settings.app.replay_threads,
        "Configuring Rayon thread pool."
    );
    let pool = ThreadPoolBuilder::new()
        .num_threads(settings.app.replay_threads)
        .build()
        .context("Failed to build Rayon thread pool")?;

    let mut reports: Vec<ReplayReport> =
        pool.install(|| jobs.into_par_iter().map(replay_one).collect());
    reports.sort_by(|a, b| a.symbol.cmp(&b.symbol).then(a.strategy.cmp(b.strategy)));

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: &str = r#"{ SMA_long = 2, SMA_short = 1, BULL_RSI = 10, BULL_RSI_high = 80.0, BULL_RSI_low = 60.0, BEAR_RSI = 15, BEAR_RSI_high = 50.0, BEAR_RSI_low = 20.0, ADX = 3, ADX_high = 70.0, ADX_low = 50.0, debug = false }"#;

    fn settings(data_dir: &Path) -> Settings {
        let mut settings = app_config::settings_from_toml(
            r#"
            [app]
            environment = "test"
            replay_threads = 2
            "#,
        )
        .unwrap();
        settings.replay.data_dir = data_dir.to_path_buf();
        settings
    }

    fn run_file(pairs: &[(&str, &str)]) -> RunConfig {
        let mut content = String::new();
        for (symbol, file) in pairs {
            content.push_str(&format!(
                "[[pairs]]\nsymbol = \"{symbol}\"\nsnapshots = \"{file}\"\n\n[[pairs.strategies]]\nname = \"rsi_bull_bear_adx\"\nparams = {PARAMS}\n\n"
            ));
        }
        app_config::parse_run_config(&content).unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rsi-advisor-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn relative_snapshot_paths_use_data_dir() {
        let run = run_file(&[("BTCUSDT", "btc.jsonl")]);
        let path = snapshot_path(Path::new("/data"), &run.pair_configs[0]);
        assert_eq!(path, PathBuf::from("/data/btc.jsonl"));
    }

    #[test]
    fn pairs_replay_independently() {
        let dir = scratch_dir("replay");
        std::fs::write(
            dir.join("btc.jsonl"),
            "{\"maSlow\":10,\"maFast\":11,\"bullRsi\":40,\"bearRsi\":50,\"adx\":60}\n\
             {\"maSlow\":11,\"maFast\":10,\"bullRsi\":50,\"bearRsi\":60,\"adx\":60}\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("eth.jsonl"),
            "{\"maSlow\":10,\"maFast\":11,\"bullRsi\":70,\"bearRsi\":50,\"adx\":60}\n",
        )
        .unwrap();

        let run = run_file(&[("BTCUSDT", "btc.jsonl"), ("ETHUSDT", "eth.jsonl"), ("SOLUSDT", "missing.jsonl")]);
        let reports = run_replay(&settings(&dir), &run, None).unwrap();

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].symbol, "BTCUSDT");
        assert_eq!(reports[0].advices.len(), 2);
        assert_eq!(reports[1].symbol, "ETHUSDT");
        assert!(reports[1].advices.is_empty());
        assert_eq!(reports[1].candles, 1);
        assert_eq!(reports[2].symbol, "SOLUSDT");
        assert!(reports[2].error.is_some());

        let only = run_replay(&settings(&dir), &run, Some("ETHUSDT")).unwrap();
        assert_eq!(only.len(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn shipped_run_file_is_valid() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
        let run = app_config::load_run_config(root.join("config/run.toml")).unwrap();

        let count = check_run(&settings(&root.join("data")), &run).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn bad_parameters_fail_before_replaying() {
        let content = "[[pairs]]\nsymbol = \"BTCUSDT\"\nsnapshots = \"btc.jsonl\"\n\n[[pairs.strategies]]\nname = \"rsi_bull_bear_adx\"\nparams = { SMA_long = 2 }\n";
        let run = app_config::parse_run_config(content).unwrap();

        let err = check_run(&settings(Path::new("data")), &run).unwrap_err();
        assert!(err.to_string().contains("BTCUSDT"));
    }
}
