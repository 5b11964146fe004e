//! The five sorts, an' the enum that picks between them.
//!
//! Each algorithm is written once, generic ower a [`Probe`]. The plain
//! entry points pass `()` which compiles tae nothing; counted runs pass a
//! [`SortStats`].

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{SortError, SortResult};

pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

pub use bubble::bubble_sort;
pub use insertion::insertion_sort;
pub use merge::{merge_sort, merge_sort_by_key};
pub use quick::quick_sort;
pub use selection::selection_sort;

/// Hook fer counting the work a sort does.
pub trait Probe {
    fn compare(&mut self);
    fn swap(&mut self);
    fn write(&mut self);
}

impl Probe for () {
    #[inline(always)]
    fn compare(&mut self) {}
    #[inline(always)]
    fn swap(&mut self) {}
    #[inline(always)]
    fn write(&mut self) {}
}

/// Operation counts fae one counted run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SortStats {
    pub comparisons: u64,
    pub swaps: u64,
    /// Single-element stores: insertion shifts an' merge copy-backs.
    pub writes: u64,
}

impl Probe for SortStats {
    fn compare(&mut self) {
        self.comparisons += 1;
    }
    fn swap(&mut self) {
        self.swaps += 1;
    }
    fn write(&mut self) {
        self.writes += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
}

impl Algorithm {
    /// Every algorithm, in display order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble",
            Algorithm::Selection => "Selection",
            Algorithm::Insertion => "Insertion",
            Algorithm::Merge => "Merge",
            Algorithm::Quick => "Quick",
        }
    }

    /// Whether equal elements keep their order. Bubble an' insertion only
    /// move past strictly greater neighbours; merge takes the left front
    /// on ties.
    pub fn is_stable(&self) -> bool {
        matches!(
            self,
            Algorithm::Bubble | Algorithm::Insertion | Algorithm::Merge
        )
    }

    pub fn sort(&self, seq: &mut [i32]) {
        self.sort_probed(seq, &mut ());
    }

    pub fn sort_counted(&self, seq: &mut [i32]) -> SortStats {
        let mut stats = SortStats::default();
        self.sort_probed(seq, &mut stats);
        stats
    }

    /// Sort only `seq[range]`, rejecting a malformed range before touching
    /// anything.
    pub fn sort_range(&self, seq: &mut [i32], range: Range<usize>) -> SortResult<()> {
        if range.start > range.end || range.end > seq.len() {
            return Err(SortError::InvalidRange {
                start: range.start,
                end: range.end,
                len: seq.len(),
            });
        }
        self.sort(&mut seq[range]);
        Ok(())
    }

    fn sort_probed<P: Probe>(&self, seq: &mut [i32], probe: &mut P) {
        match self {
            Algorithm::Bubble => bubble::sort_probed(seq, probe),
            Algorithm::Selection => selection::sort_probed(seq, probe),
            Algorithm::Insertion => insertion::sort_probed(seq, probe),
            Algorithm::Merge => merge::sort_probed(seq, probe),
            Algorithm::Quick => quick::sort_probed(seq, probe),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unkent algorithm '{}'", s))
    }
}

pub fn is_sorted(seq: &[i32]) -> bool {
    seq.windows(2).all(|w| w[0] <= w[1])
}
