//! Range reduction logic for engine constraints
//!
//! This module provides:
//! - Comparator-group ordering and range rebuilding
//! - Minimum-version alignment of two ranges
//! - The most-restrictive reduction of two ranges
//! - Aggregation of every dependency's constraint for one engine
//! - Humanized rendering of a reduced range

mod aggregate;
mod align;
mod humanize;
mod normalize;
mod restrictive;

pub use aggregate::{aggregate, Aggregation, ConstraintOutcome};
pub use align::align_to_minimum;
pub use humanize::humanize;
pub use normalize::{sort_groups, to_range};
pub use restrictive::most_restrictive;

/// Raw texts of ranges already proven to be subsumed by the accumulator
///
/// Owned by a single aggregation run; never share one between engines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredRanges {
    raw: Vec<String>,
}

impl IgnoredRanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers `raw` (duplicates are kept once)
    pub fn record(&mut self, raw: &str) {
        if !self.contains(raw) {
            self.raw.push(raw.to_string());
        }
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.raw.iter().any(|r| r == raw)
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
