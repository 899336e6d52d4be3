//! Interval bounds over semantic versions
//!
//! Every comparator group denotes one interval on the total semver order.
//! Subset and overlap questions between ranges are answered on these
//! intervals rather than on the comparator text.

use semver::Version;
use std::cmp::Ordering;
use std::fmt;

/// Lower edge of a version interval
///
/// `Unbounded` sorts below every real version; at equal versions an
/// inclusive bound sorts before an exclusive one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LowerBound {
    /// No lower limit (`*`)
    Unbounded,
    /// `>=version`
    Inclusive(Version),
    /// `>version`
    Exclusive(Version),
}

impl LowerBound {
    /// Returns the bounding version, if any
    pub fn version(&self) -> Option<&Version> {
        match self {
            LowerBound::Unbounded => None,
            LowerBound::Inclusive(v) | LowerBound::Exclusive(v) => Some(v),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            LowerBound::Unbounded => 0,
            LowerBound::Inclusive(_) => 1,
            LowerBound::Exclusive(_) => 2,
        }
    }
}

impl Ord for LowerBound {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.version(), other.version()) {
            (Some(a), Some(b)) => a.cmp(b).then_with(|| self.rank().cmp(&other.rank())),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for LowerBound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LowerBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LowerBound::Unbounded => write!(f, "*"),
            LowerBound::Inclusive(v) => write!(f, ">={}", v),
            LowerBound::Exclusive(v) => write!(f, ">{}", v),
        }
    }
}

/// Upper edge of a version interval
///
/// `Unbounded` sorts above every real version; at equal versions an
/// exclusive bound sorts before an inclusive one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpperBound {
    /// `<version`
    Exclusive(Version),
    /// `<=version`
    Inclusive(Version),
    /// No upper limit
    Unbounded,
}

impl UpperBound {
    /// Returns the bounding version, if any
    pub fn version(&self) -> Option<&Version> {
        match self {
            UpperBound::Unbounded => None,
            UpperBound::Inclusive(v) | UpperBound::Exclusive(v) => Some(v),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            UpperBound::Exclusive(_) => 0,
            UpperBound::Inclusive(_) => 1,
            UpperBound::Unbounded => 2,
        }
    }
}

impl Ord for UpperBound {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.version(), other.version()) {
            (Some(a), Some(b)) => a.cmp(b).then_with(|| self.rank().cmp(&other.rank())),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for UpperBound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A contiguous span of versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub lower: LowerBound,
    pub upper: UpperBound,
}

impl Interval {
    /// The interval containing every version
    pub fn all() -> Self {
        Self {
            lower: LowerBound::Unbounded,
            upper: UpperBound::Unbounded,
        }
    }

    /// Returns true if no version lies inside the interval
    pub fn is_empty(&self) -> bool {
        match (&self.lower, &self.upper) {
            (LowerBound::Unbounded, UpperBound::Exclusive(hi)) => is_minimum(hi),
            (LowerBound::Unbounded, _) | (_, UpperBound::Unbounded) => false,
            (lower, upper) => {
                let (lo, hi) = match (lower.version(), upper.version()) {
                    (Some(lo), Some(hi)) => (lo, hi),
                    _ => return false,
                };
                match lo.cmp(hi) {
                    Ordering::Less => false,
                    Ordering::Greater => true,
                    Ordering::Equal => !matches!(
                        (lower, upper),
                        (LowerBound::Inclusive(_), UpperBound::Inclusive(_))
                    ),
                }
            }
        }
    }

    /// Returns true if every version of `other` lies inside this interval
    pub fn contains(&self, other: &Interval) -> bool {
        other.is_empty() || (self.lower <= other.lower && other.upper <= self.upper)
    }

    /// Overlap of two intervals (possibly empty)
    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval {
            lower: self.lower.clone().max(other.lower.clone()),
            upper: self.upper.clone().min(other.upper.clone()),
        }
    }

    /// Returns true if `next` (which must not start before `self`) leaves no
    /// gap after `self`
    fn joins(&self, next: &Interval) -> bool {
        match (&self.upper, &next.lower) {
            (UpperBound::Unbounded, _) | (_, LowerBound::Unbounded) => true,
            (upper, lower) => match (upper.version(), lower.version()) {
                (Some(hi), Some(lo)) => match lo.cmp(hi) {
                    Ordering::Less => true,
                    Ordering::Greater => false,
                    Ordering::Equal => !matches!(
                        (upper, lower),
                        (UpperBound::Exclusive(_), LowerBound::Exclusive(_))
                    ),
                },
                _ => true,
            },
        }
    }
}

/// Merge a set of intervals into a sorted list of disjoint intervals
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.retain(|i| !i.is_empty());
    intervals.sort_by(|a, b| a.lower.cmp(&b.lower));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if last.joins(&interval) {
                if interval.upper > last.upper {
                    last.upper = interval.upper;
                }
                continue;
            }
        }
        merged.push(interval);
    }
    merged
}

/// `0.0.0-0` is the smallest version there is
fn is_minimum(version: &Version) -> bool {
    version.major == 0 && version.minor == 0 && version.patch == 0 && version.pre.as_str() == "0"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn interval(lower: LowerBound, upper: UpperBound) -> Interval {
        Interval { lower, upper }
    }

    #[test]
    fn test_lower_bound_ordering() {
        assert!(LowerBound::Unbounded < LowerBound::Inclusive(v("0.0.0")));
        assert!(LowerBound::Inclusive(v("1.2.3")) < LowerBound::Exclusive(v("1.2.3")));
        assert!(LowerBound::Exclusive(v("1.2.3")) < LowerBound::Inclusive(v("1.2.4")));
        assert!(LowerBound::Inclusive(v("15.0.0-0")) < LowerBound::Inclusive(v("15.0.0")));
    }

    #[test]
    fn test_upper_bound_ordering() {
        assert!(UpperBound::Exclusive(v("2.0.0")) < UpperBound::Inclusive(v("2.0.0")));
        assert!(UpperBound::Inclusive(v("99.0.0")) < UpperBound::Unbounded);
    }

    #[test]
    fn test_interval_empty() {
        assert!(!Interval::all().is_empty());
        assert!(interval(
            LowerBound::Inclusive(v("2.0.0")),
            UpperBound::Exclusive(v("1.0.0"))
        )
        .is_empty());
        assert!(interval(
            LowerBound::Inclusive(v("1.0.0")),
            UpperBound::Exclusive(v("1.0.0"))
        )
        .is_empty());
        assert!(!interval(
            LowerBound::Inclusive(v("1.0.0")),
            UpperBound::Inclusive(v("1.0.0"))
        )
        .is_empty());
        assert!(interval(LowerBound::Unbounded, UpperBound::Exclusive(v("0.0.0-0"))).is_empty());
    }

    #[test]
    fn test_interval_contains() {
        let outer = interval(
            LowerBound::Inclusive(v("14.0.0")),
            UpperBound::Exclusive(v("15.0.0-0")),
        );
        let inner = interval(
            LowerBound::Inclusive(v("14.17.0")),
            UpperBound::Exclusive(v("15.0.0-0")),
        );
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(Interval::all().contains(&outer));
    }

    #[test]
    fn test_intersect() {
        let a = interval(LowerBound::Inclusive(v("12.0.0")), UpperBound::Unbounded);
        let b = interval(LowerBound::Unbounded, UpperBound::Exclusive(v("14.0.0")));
        let both = a.intersect(&b);
        assert_eq!(both.lower, LowerBound::Inclusive(v("12.0.0")));
        assert_eq!(both.upper, UpperBound::Exclusive(v("14.0.0")));
    }

    #[test]
    fn test_merge_adjacent_intervals() {
        let merged = merge_intervals(vec![
            interval(
                LowerBound::Inclusive(v("2.0.0")),
                UpperBound::Exclusive(v("3.0.0")),
            ),
            interval(
                LowerBound::Inclusive(v("1.0.0")),
                UpperBound::Exclusive(v("2.0.0")),
            ),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].lower, LowerBound::Inclusive(v("1.0.0")));
        assert_eq!(merged[0].upper, UpperBound::Exclusive(v("3.0.0")));
    }

    #[test]
    fn test_merge_keeps_gaps() {
        let merged = merge_intervals(vec![
            interval(
                LowerBound::Inclusive(v("1.0.0")),
                UpperBound::Exclusive(v("2.0.0")),
            ),
            interval(LowerBound::Exclusive(v("2.0.0")), UpperBound::Unbounded),
        ]);
        assert_eq!(merged.len(), 2);
    }
}
