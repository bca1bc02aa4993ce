// In app/src/report.rs

use crate::runner::ReplayReport;
use backtester::MinMax;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The machine-readable form of a replay, printed with `--json`.
#[derive(Debug, Serialize)]
pub struct ReplayDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub reports: &'a [ReplayReport],
}

pub fn to_json(reports: &[ReplayReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ReplayDocument {
        generated_at: Utc::now(),
        reports,
    })
}

fn range(m: &MinMax) -> String {
    match m.range() {
        Some((min, max)) => format!("{min:.2} / {max:.2}"),
        None => "n/a".to_string(),
    }
}

/// Helper function to print the replay summary in a readable format.
pub fn print_replay_report(reports: &[ReplayReport]) {
    println!("\n--- Replay Complete ---");
    println!("-----------------------------------");

    for report in reports {
        println!("\n[{} | {}]", report.symbol, report.strategy);
        if let Some(error) = &report.error {
            println!("  - FAILED: {error}");
            continue;
        }
        let stats = &report.stats;
        println!(
            "  - Candles: {} (BULL {}, BEAR {}) | Advice: {} long / {} short | Longest trend: {} candles",
            report.candles,
            stats.bull_candles,
            stats.bear_candles,
            stats.long_advices,
            stats.short_advices,
            stats.longest_trend
        );
        println!("  - BEAR RSI low/high: {}", range(&stats.bear_rsi));
        println!("  - BULL RSI low/high: {}", range(&stats.bull_rsi));
        println!("  - ADX min/max:       {}", range(&stats.adx));
        if let Some(last) = report.advices.last() {
            println!("  - Last advice: {} at candle {}", last.side, last.candle);
        }
    }
    println!("\n-----------------------------------");
}
