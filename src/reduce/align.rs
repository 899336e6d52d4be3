//! Minimum-version alignment
//!
//! Before two ranges with different minimums can be merged group by group,
//! both are restated as if neither could go below the higher minimum.

use super::sort_groups;
use crate::domain::{ComparatorGroup, Interval, LowerBound, UpperBound};

/// Clips the union of `groups` at `floor`
///
/// Groups entirely below the floor are dropped, a group straddling it gets
/// its lower bound replaced by the floor (keeping the floor's inclusive or
/// exclusive kind), and groups starting at or above it are kept as-is.
pub fn align_to_minimum(groups: &[ComparatorGroup], floor: &LowerBound) -> Vec<ComparatorGroup> {
    let at_or_above = Interval {
        lower: floor.clone(),
        upper: UpperBound::Unbounded,
    };

    sort_groups(groups)
        .into_iter()
        .filter_map(|group| {
            let interval = group.interval();
            if interval.intersect(&at_or_above).is_empty() {
                None
            } else if interval.lower < *floor {
                Some(group.with_lower_bound(floor))
            } else {
                Some(group)
            }
        })
        .collect()
}
