use serde::Serialize;
use serde_json::json;

use crate::config::Config;
use crate::error::SortResult;
use crate::generator::{generate, Distribution};
use crate::harness::{measure, measure_counted, Measurement};
use crate::logging::{self, LogLevel};
use crate::rng::{RandomSource, SeededSource};
use crate::sorting::Algorithm;

const TARGET: &str = "sortbench::session";

/// One algorithm's share o' a round.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmRun {
    pub measurement: Measurement,
    pub output: Vec<i32>,
}

/// A generated base sequence an' every algorithm's go at it.
#[derive(Debug, Clone, Serialize)]
pub struct Round {
    pub number: usize,
    pub distribution: Distribution,
    pub size: usize,
    pub original: Vec<i32>,
    pub runs: Vec<AlgorithmRun>,
}

/// Drives rounds: generate once, then sort an independent copy per
/// algorithm.
pub struct Session<S: RandomSource = SeededSource> {
    config: Config,
    source: S,
    rounds_run: usize,
}

impl Session<SeededSource> {
    /// Seeded fae `config.seed`, or the clock if there isnae one.
    pub fn new(config: Config) -> Self {
        let source = match config.seed {
            Some(seed) => SeededSource::with_seed(seed),
            None => SeededSource::from_clock(),
        };
        logging::log(
            LogLevel::Debug,
            TARGET,
            "session started",
            vec![("seed".to_string(), json!(source.seed()))],
        );
        Session::with_source(config, source)
    }

    pub fn seed(&self) -> u64 {
        self.source.seed()
    }
}

impl<S: RandomSource> Session<S> {
    pub fn with_source(config: Config, source: S) -> Self {
        Session {
            config,
            source,
            rounds_run: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rounds_run(&self) -> usize {
        self.rounds_run
    }

    pub fn run_round(&mut self, size: usize, distribution: Distribution) -> SortResult<Round> {
        let size = self.config.check_size(size)?;
        let number = self.rounds_run + 1;
        let _span = logging::span_enter(format!("round{}", number));
        logging::log(
            LogLevel::Info,
            TARGET,
            "round starting",
            vec![
                ("size".to_string(), json!(size)),
                ("distribution".to_string(), json!(distribution.name())),
            ],
        );

        let original = generate(distribution, size, self.config.fill, &mut self.source)?;

        let runs = Algorithm::ALL
            .into_iter()
            .filter(|algorithm| self.config.algorithms.contains(algorithm))
            .map(|algorithm| {
                let mut output = original.clone();
                let measurement = if self.config.count_operations {
                    measure_counted(algorithm, &mut output)
                } else {
                    measure(algorithm, &mut output)
                };
                logging::log(
                    LogLevel::Info,
                    TARGET,
                    format!("{} sort done", algorithm),
                    vec![
                        ("elapsed_s".to_string(), json!(measurement.elapsed_seconds)),
                        ("memory_mb".to_string(), json!(measurement.estimated_memory_mb)),
                    ],
                );
                AlgorithmRun {
                    measurement,
                    output,
                }
            })
            .collect();

        self.rounds_run = number;
        Ok(Round {
            number,
            distribution,
            size,
            original,
            runs,
        })
    }
}
