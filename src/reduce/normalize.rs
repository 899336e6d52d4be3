//! Comparator-group ordering

use crate::domain::{ComparatorGroup, Range};

/// Groups sorted by ascending lower bound
///
/// Stable: groups sharing a lower bound keep their input order. Groups
/// without a lower bound sort first. The input is left untouched.
pub fn sort_groups(groups: &[ComparatorGroup]) -> Vec<ComparatorGroup> {
    let mut sorted = groups.to_vec();
    sorted.sort_by_key(ComparatorGroup::lower_bound);
    sorted
}

/// Rebuilds a range whose raw text is the `||`-join of the groups
pub fn to_range(groups: Vec<ComparatorGroup>) -> Range {
    Range::from_groups(groups)
}
