//! sortbench - five classic sorts, timed an' measured
//!
//! Generates integer arrays (random, sorted or reversed), runs bubble,
//! selection, insertion, merge an' quick sort on independent copies, and
//! reports the wall-clock time plus an estimated memory cost fer each.

pub mod config;
pub mod error;
pub mod generator;
pub mod harness;
pub mod logging;
pub mod report;
pub mod rng;
pub mod session;
pub mod sorting;

// Re-export commonly used types
pub use config::Config;
pub use error::{SortError, SortResult};
pub use generator::{generate, Distribution, RandomFill};
pub use harness::{measure, Measurement};
pub use session::{Round, Session};
pub use sorting::Algorithm;

/// Run a single round wi' a fixed seed an' default settings.
///
/// # Example
/// ```
/// use sortbench::{run_round, Distribution};
///
/// let round = run_round(5, Distribution::Reverse, 42).unwrap();
/// assert_eq!(round.original, vec![5, 4, 3, 2, 1]);
/// for run in &round.runs {
///     assert_eq!(run.output, vec![1, 2, 3, 4, 5]);
/// }
/// ```
pub fn run_round(size: usize, distribution: Distribution, seed: u64) -> SortResult<Round> {
    let config = Config {
        seed: Some(seed),
        ..Config::default()
    };
    Session::new(config).run_round(size, distribution)
}
