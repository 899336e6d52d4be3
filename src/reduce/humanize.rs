//! Compact display form of a reduced range

use super::sort_groups;
use crate::domain::{ComparatorGroup, Operator, Range};

/// Renders `range` for people
///
/// `>=lo <hi` where `hi` is in the next major collapses to `^lo`, a lone
/// `>=` keeps its value, and every other group is printed as its
/// comparators. Absent and universal ranges render as `*`.
///
/// # Examples
/// ```
/// use enginup::domain::Range;
/// use enginup::reduce::humanize;
///
/// let range = Range::parse(">=14.17.0 <15.0.0-0 || >=16.10.0 <17.0.0-0").unwrap();
/// assert_eq!(humanize(Some(&range)), "^14.17.0 || ^16.10.0");
/// assert_eq!(humanize(None), "*");
/// ```
pub fn humanize(range: Option<&Range>) -> String {
    let Some(range) = range.filter(|r| !r.is_any()) else {
        return "*".to_string();
    };

    sort_groups(range.groups())
        .iter()
        .map(humanize_group)
        .collect::<Vec<_>>()
        .join(" || ")
}

fn humanize_group(group: &ComparatorGroup) -> String {
    match group.comparators() {
        [lower, upper]
            if lower.op == Operator::Gte
                && upper.op == Operator::Lt
                && lower.version.major.checked_add(1) == Some(upper.version.major) =>
        {
            format!("^{}", lower.version)
        }
        [only] if only.op == Operator::Gte => only.value(),
        comparators => comparators
            .iter()
            .map(|c| c.value())
            .collect::<Vec<_>>()
            .join(" "),
    }
}
