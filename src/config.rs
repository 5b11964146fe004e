use std::str::FromStr;

use crate::error::{SortError, SortResult};
use crate::generator::RandomFill;
use crate::sorting::Algorithm;

/// Sizes at or below this get their arrays printed.
pub const DEFAULT_DISPLAY_LIMIT: usize = 50;
/// Biggest array a round will generate unless told otherwise.
pub const DEFAULT_MAX_SIZE: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings that hold fer a whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub display_limit: usize,
    pub max_size: usize,
    pub fill: RandomFill,
    /// Fixed RNG seed; `None` seeds fae the clock.
    pub seed: Option<u64>,
    pub count_operations: bool,
    pub output: OutputFormat,
    /// Algorithms a round runs. Always run in [`Algorithm::ALL`] order.
    pub algorithms: Vec<Algorithm>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            display_limit: DEFAULT_DISPLAY_LIMIT,
            max_size: DEFAULT_MAX_SIZE,
            fill: RandomFill::Permutation,
            seed: None,
            count_operations: false,
            output: OutputFormat::Text,
            algorithms: Algorithm::ALL.to_vec(),
        }
    }
}

impl Config {
    /// Defaults overlaid wi' `SORTBENCH_SEED`, `SORTBENCH_DISPLAY_LIMIT`
    /// an' `SORTBENCH_MAX_SIZE`.
    pub fn from_env() -> SortResult<Config> {
        Config::default().with_env(|key| std::env::var(key).ok())
    }

    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> SortResult<Config> {
        if let Some(seed) = parse_env(&lookup, "SORTBENCH_SEED")? {
            self.seed = Some(seed);
        }
        if let Some(limit) = parse_env(&lookup, "SORTBENCH_DISPLAY_LIMIT")? {
            self.display_limit = limit;
        }
        if let Some(max) = parse_env(&lookup, "SORTBENCH_MAX_SIZE")? {
            self.max_size = max;
        }
        Ok(self)
    }

    pub fn check_size(&self, size: usize) -> SortResult<usize> {
        if size > self.max_size {
            return Err(SortError::SizeTooLarge {
                size,
                max: self.max_size,
            });
        }
        Ok(size)
    }

    pub fn shows_arrays(&self, size: usize) -> bool {
        size <= self.display_limit
    }
}

fn parse_env<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> SortResult<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(SortError::InvalidEnv {
                key: key.to_string(),
                value: raw,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.display_limit, 50);
        assert_eq!(config.max_size, 100_000);
        assert_eq!(config.fill, RandomFill::Permutation);
        assert!(config.seed.is_none());
        assert_eq!(config.algorithms, Algorithm::ALL.to_vec());
    }

    #[test]
    fn test_env_overlay() {
        let config = Config::default()
            .with_env(env(&[
                ("SORTBENCH_SEED", "1234"),
                ("SORTBENCH_DISPLAY_LIMIT", " 10 "),
            ]))
            .unwrap();
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.display_limit, 10);
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
    }

    #[test]
    fn test_env_rejects_junk() {
        let err = Config::default()
            .with_env(env(&[("SORTBENCH_MAX_SIZE", "loads")]))
            .unwrap_err();
        assert_eq!(
            err,
            SortError::InvalidEnv {
                key: "SORTBENCH_MAX_SIZE".to_string(),
                value: "loads".to_string()
            }
        );
    }

    #[test]
    fn test_check_size() {
        let config = Config {
            max_size: 100,
            ..Config::default()
        };
        assert_eq!(config.check_size(100).unwrap(), 100);
        assert!(matches!(
            config.check_size(101),
            Err(SortError::SizeTooLarge { size: 101, max: 100 })
        ));
        assert!(config.shows_arrays(50));
        assert!(!config.shows_arrays(51));
    }
}
