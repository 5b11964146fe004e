//! Timing an' memory estimates fer a single sort.
//!
//! The memory figure is an estimate fae a fixed formula, no' a reading
//! fae the allocator.

use std::time::Instant;

use serde::Serialize;
use serde_json::json;

use crate::logging::{self, LogLevel};
use crate::sorting::{is_sorted, Algorithm, SortStats};

/// Bytes per element o' the sequence.
pub const ELEMENT_SIZE: usize = std::mem::size_of::<i32>();

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

const TARGET: &str = "sortbench::harness";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub algorithm: Algorithm,
    pub n: usize,
    pub elapsed_seconds: f64,
    pub estimated_memory_mb: f64,
    /// Whether the output came back non-decreasing.
    pub sorted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SortStats>,
}

/// Estimated bytes fer running `algorithm` on `n` elements: the array
/// itsel', doubled fer merge's scratch, plus a log2(n) stack fer quick.
pub fn estimate_memory_bytes(algorithm: Algorithm, n: usize) -> f64 {
    let n_f = n as f64;
    let element = ELEMENT_SIZE as f64;
    match algorithm {
        Algorithm::Bubble | Algorithm::Selection | Algorithm::Insertion => n_f * element,
        Algorithm::Merge => n_f * element * 2.0,
        Algorithm::Quick => {
            let depth = if n > 1 { n_f.log2() } else { 0.0 };
            (n_f + depth) * element
        }
    }
}

pub fn estimate_memory_mb(algorithm: Algorithm, n: usize) -> f64 {
    estimate_memory_bytes(algorithm, n) / BYTES_PER_MB
}

/// Time one sort o' `seq` in place.
pub fn measure(algorithm: Algorithm, seq: &mut [i32]) -> Measurement {
    let start = Instant::now();
    algorithm.sort(seq);
    let elapsed = start.elapsed();
    finish(algorithm, seq, elapsed.as_secs_f64(), None)
}

/// Like [`measure`], but counts comparisons, swaps an' writes as well.
/// The countin' costs a wee bit, so times run slightly high.
pub fn measure_counted(algorithm: Algorithm, seq: &mut [i32]) -> Measurement {
    let start = Instant::now();
    let stats = algorithm.sort_counted(seq);
    let elapsed = start.elapsed();
    finish(algorithm, seq, elapsed.as_secs_f64(), Some(stats))
}

fn finish(
    algorithm: Algorithm,
    seq: &[i32],
    elapsed_seconds: f64,
    stats: Option<SortStats>,
) -> Measurement {
    let n = seq.len();
    let sorted = is_sorted(seq);
    if !sorted {
        logging::log(
            LogLevel::Error,
            TARGET,
            "sort output is oot o' order",
            vec![("algorithm".to_string(), json!(algorithm.name()))],
        );
    }

    let measurement = Measurement {
        algorithm,
        n,
        elapsed_seconds,
        estimated_memory_mb: estimate_memory_mb(algorithm, n),
        sorted,
        stats,
    };
    logging::log(
        LogLevel::Debug,
        TARGET,
        "measured",
        vec![
            ("algorithm".to_string(), json!(algorithm.name())),
            ("n".to_string(), json!(n)),
            ("elapsed_s".to_string(), json!(elapsed_seconds)),
            ("memory_mb".to_string(), json!(measurement.estimated_memory_mb)),
        ],
    );
    measurement
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_formula_at_1000() {
        let base = 1000.0 * 4.0 / BYTES_PER_MB;
        assert_eq!(estimate_memory_mb(Algorithm::Bubble, 1000), base);
        assert_eq!(estimate_memory_mb(Algorithm::Selection, 1000), base);
        assert_eq!(estimate_memory_mb(Algorithm::Insertion, 1000), base);
        assert_eq!(estimate_memory_mb(Algorithm::Merge, 1000), base * 2.0);
        let quick = (1000.0 + 1000f64.log2()) * 4.0 / BYTES_PER_MB;
        assert_eq!(estimate_memory_mb(Algorithm::Quick, 1000), quick);
    }

    #[test]
    fn test_memory_estimate_small_sizes() {
        for alg in Algorithm::ALL {
            assert_eq!(estimate_memory_bytes(alg, 0), 0.0);
        }
        assert_eq!(estimate_memory_bytes(Algorithm::Quick, 1), 4.0);
    }

    #[test]
    fn test_measure_sorts_in_place() {
        let mut data = vec![5, 3, 1, 4, 2];
        let m = measure(Algorithm::Insertion, &mut data);
        assert_eq!(data, vec![1, 2, 3, 4, 5]);
        assert!(m.sorted);
        assert!(m.elapsed_seconds >= 0.0);
        assert_eq!(m.n, 5);
        assert!(m.stats.is_none());
    }

    #[test]
    fn test_measure_counted_reports_stats() {
        let mut data = vec![1, 2, 3, 4, 5];
        let m = measure_counted(Algorithm::Insertion, &mut data);
        let stats = m.stats.unwrap();
        assert_eq!(stats.writes, 0);
        assert_eq!(stats.comparisons, 4);
    }

    #[test]
    fn test_measurement_serializes() {
        let mut data = vec![2, 1];
        let m = measure(Algorithm::Merge, &mut data);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["algorithm"], "Merge");
        assert_eq!(json["n"], 2);
        assert!(json.get("stats").is_none());
    }
}
