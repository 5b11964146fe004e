//! Plain-text an' JSON renderings o' a round.

use std::fmt::Write as _;

use serde_json::{json, Value as JsonValue};

use crate::harness::Measurement;
use crate::session::Round;
use crate::sorting::SortStats;

pub fn format_array(seq: &[i32]) -> String {
    seq.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_measurement(measurement: &Measurement) -> String {
    format!(
        "Time: {:.6} s | Memory: {:.6} MB",
        measurement.elapsed_seconds, measurement.estimated_memory_mb
    )
}

pub fn format_stats(stats: &SortStats) -> String {
    format!(
        "Comparisons: {} | Swaps: {} | Writes: {}",
        stats.comparisons, stats.swaps, stats.writes
    )
}

/// The round as the interactive session prints it. Arrays are only shown
/// when `round.size <= display_limit`.
pub fn render_text(round: &Round, display_limit: usize) -> String {
    let show = round.size <= display_limit;
    let mut out = String::new();

    let _ = writeln!(out, "\nOriginal Array:");
    if show {
        let _ = writeln!(out, "{}", format_array(&round.original));
    } else {
        let _ = writeln!(out, "(Array too large to display)");
    }

    for run in &round.runs {
        let m = &run.measurement;
        let _ = writeln!(out, "\n{} Sort:", m.algorithm);
        if show {
            let _ = writeln!(out, "{}", format_array(&run.output));
        }
        let _ = writeln!(out, "{}", format_measurement(m));
        if let Some(stats) = &m.stats {
            let _ = writeln!(out, "{}", format_stats(stats));
        }
        if !m.sorted {
            let _ = writeln!(out, "WARNING: output is no' sorted!");
        }
    }
    out
}

pub fn render_json(round: &Round, display_limit: usize) -> JsonValue {
    let show = round.size <= display_limit;
    let runs: Vec<JsonValue> = round
        .runs
        .iter()
        .map(|run| {
            let mut value = json!(run.measurement);
            if show {
                value["output"] = json!(run.output);
            }
            value
        })
        .collect();

    let mut value = json!({
        "round": round.number,
        "distribution": round.distribution,
        "size": round.size,
        "results": runs,
    });
    if show {
        value["original"] = json!(round.original);
    }
    value
}
