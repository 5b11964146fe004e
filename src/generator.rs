use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{SortError, SortResult};
use crate::rng::RandomSource;

/// Shape o' the generated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    Random,
    Sorted,
    Reverse,
}

impl Distribution {
    pub const ALL: [Distribution; 3] = [
        Distribution::Random,
        Distribution::Sorted,
        Distribution::Reverse,
    ];

    /// Map the menu choice (1, 2 or 3) tae a distribution.
    pub fn from_choice(input: &str) -> SortResult<Distribution> {
        match input.trim() {
            "1" => Ok(Distribution::Random),
            "2" => Ok(Distribution::Sorted),
            "3" => Ok(Distribution::Reverse),
            other => Err(SortError::InvalidDistribution {
                input: other.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Random => "Random",
            Distribution::Sorted => "Sorted",
            Distribution::Reverse => "Reverse",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Distribution {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" | "1" => Ok(Distribution::Random),
            "sorted" | "2" => Ok(Distribution::Sorted),
            "reverse" | "reversed" | "3" => Ok(Distribution::Reverse),
            _ => Err(SortError::InvalidDistribution {
                input: s.to_string(),
            }),
        }
    }
}

/// How the Random distribution is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RandomFill {
    /// A shuffled `1..=n`.
    #[default]
    Permutation,
    /// `n` independent values ower the full `i32` range.
    Values,
}

/// Parse a size typed at the prompt. Negative numbers an' junk are rejected
/// here, so the generator only ever sees a `usize`.
pub fn parse_size(input: &str) -> SortResult<usize> {
    let trimmed = input.trim();
    let invalid = || SortError::InvalidSize {
        input: trimmed.to_string(),
    };
    let size: i64 = trimmed.parse().map_err(|_| invalid())?;
    if size < 0 || size > i32::MAX as i64 {
        return Err(invalid());
    }
    Ok(size as usize)
}

/// Build a sequence o' `size` integers wi' the given shape.
pub fn generate(
    distribution: Distribution,
    size: usize,
    fill: RandomFill,
    source: &mut dyn RandomSource,
) -> SortResult<Vec<i32>> {
    let top = i32::try_from(size).map_err(|_| SortError::InvalidSize {
        input: size.to_string(),
    })?;

    let data = match distribution {
        Distribution::Sorted => (1..=top).collect(),
        Distribution::Reverse => (1..=top).rev().collect(),
        Distribution::Random => match fill {
            RandomFill::Permutation => {
                let mut data: Vec<i32> = (1..=top).collect();
                source.shuffle(&mut data);
                data
            }
            RandomFill::Values => (0..size).map(|_| source.next_value()).collect(),
        },
    };
    Ok(data)
}
