//! Most-restrictive reduction of two ranges
//!
//! Precedence:
//! 1. Full containment: the contained range wins outright.
//! 2. Different minimums: both ranges are aligned to the higher minimum and
//!    reduced again.
//! 3. Equal minimums: the lowest groups are taken as the head (the first
//!    range wins ties) and the remaining groups are reduced recursively.

use super::{align_to_minimum, sort_groups, to_range, IgnoredRanges};
use crate::domain::Range;
use crate::error::ReduceError;

/// Returns the more restrictive of `r1` and `r2`
///
/// When one range contains the other, the raw text of the wider one is
/// recorded in `ignored` so later occurrences of that exact text can be
/// skipped. Shapes the reduction does not resolve (ranges that become
/// disjoint once aligned, or two exhausted group lists) fail with
/// [`ReduceError::Unimplemented`] instead of guessing.
pub fn most_restrictive(
    r1: &Range,
    r2: &Range,
    ignored: &mut IgnoredRanges,
) -> Result<Range, ReduceError> {
    if r1.is_subset_of(r2) {
        tracing::trace!("'{}' is contained in '{}'", r1, r2);
        ignored.record(r2.raw());
        return Ok(r1.clone());
    }
    if r2.is_subset_of(r1) {
        tracing::trace!("'{}' is contained in '{}'", r2, r1);
        ignored.record(r1.raw());
        return Ok(r2.clone());
    }

    let (min1, min2) = match (r1.min_bound(), r2.min_bound()) {
        (Some(min1), Some(min2)) => (min1, min2),
        _ => {
            return Err(ReduceError::unimplemented(
                r1.raw(),
                r2.raw(),
                "a range has no comparator groups",
            ))
        }
    };

    if min1 != min2 {
        let floor = min1.max(min2);
        let aligned1 = to_range(align_to_minimum(r1.groups(), &floor));
        let aligned2 = to_range(align_to_minimum(r2.groups(), &floor));
        tracing::trace!(
            "aligned to {}: '{}' and '{}'",
            floor,
            aligned1,
            aligned2
        );

        if aligned1.is_empty() || aligned2.is_empty() || !aligned1.intersects(&aligned2) {
            return Err(ReduceError::unimplemented(
                r1.raw(),
                r2.raw(),
                format!("ranges are disjoint once aligned to {}", floor),
            ));
        }
        return most_restrictive(&aligned1, &aligned2, ignored);
    }

    let mut rest1 = sort_groups(r1.groups()).into_iter();
    let mut rest2 = sort_groups(r2.groups()).into_iter();
    let (head1, head2) = (rest1.next(), rest2.next());
    let head = head1.or(head2).ok_or_else(|| {
        ReduceError::unimplemented(r1.raw(), r2.raw(), "both ranges are exhausted")
    })?;

    let rest1: Vec<_> = rest1.collect();
    let rest2: Vec<_> = rest2.collect();
    let mut merged = vec![head];

    // An exhausted side admits nothing past its head; appending the other
    // side's remaining groups would widen the result beyond r1
    if !rest1.is_empty() && !rest2.is_empty() {
        let rest = most_restrictive(&to_range(rest1), &to_range(rest2), ignored)?;
        merged.extend(rest.groups().iter().cloned());
    }

    Ok(to_range(merged))
}
