//! Folding every declared constraint for one engine into a single range

use super::{most_restrictive, IgnoredRanges};
use crate::domain::Range;
use crate::error::{RangeParseError, ReduceError};

/// What the aggregator did with one declared constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintOutcome {
    /// Nothing declared for the engine
    Absent,
    /// The declared text is not a valid range
    Invalid(RangeParseError),
    /// Skipped because the same raw text was already proven subsumed
    Subsumed,
    /// First usable constraint; became the accumulator
    Adopted,
    /// Reduced against the accumulator
    Reduced,
}

/// Result of aggregating one engine
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// The most restrictive range found (`*` when nothing was declared)
    pub range: Range,
    /// Raw texts skipped or subsumed during the run
    pub ignored: IgnoredRanges,
    /// Outcome per input entry, in input order
    pub outcomes: Vec<(String, ConstraintOutcome)>,
}

impl Aggregation {
    /// Number of entries that contributed to the range
    pub fn contributors(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| {
                matches!(outcome, ConstraintOutcome::Adopted | ConstraintOutcome::Reduced)
            })
            .count()
    }
}

/// Aggregates `(name, constraint)` pairs for `engine`, in order
///
/// Absent and invalid constraints are skipped. A [`ReduceError`] from the
/// reducer aborts the whole run and is tagged with the engine name.
pub fn aggregate<'a, I>(engine: &str, constraints: I) -> Result<Aggregation, ReduceError>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut acc = Range::any();
    let mut adopted = false;
    let mut ignored = IgnoredRanges::new();
    let mut outcomes = Vec::new();

    for (name, declared) in constraints {
        let Some(text) = declared else {
            tracing::debug!("{}: no {} constraint", name, engine);
            outcomes.push((name.to_string(), ConstraintOutcome::Absent));
            continue;
        };

        let range = match Range::parse(text) {
            Ok(range) => range,
            Err(e) => {
                tracing::warn!("{}: ignoring {} constraint: {}", name, engine, e);
                outcomes.push((name.to_string(), ConstraintOutcome::Invalid(e)));
                continue;
            }
        };

        if ignored.contains(range.raw()) {
            tracing::debug!("{}: '{}' already covered", name, range);
            outcomes.push((name.to_string(), ConstraintOutcome::Subsumed));
            continue;
        }

        let outcome = if adopted {
            acc = most_restrictive(&acc, &range, &mut ignored).map_err(|e| e.for_engine(engine))?;
            ConstraintOutcome::Reduced
        } else {
            acc = range.clone();
            adopted = true;
            ConstraintOutcome::Adopted
        };
        ignored.record(range.raw());
        tracing::debug!("{}: {} {} -> '{}'", name, engine, range, acc);
        outcomes.push((name.to_string(), outcome));
    }

    Ok(Aggregation {
        range: acc,
        ignored,
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(entries: &[(&'static str, Option<&'static str>)]) -> Aggregation {
        aggregate("node", entries.iter().copied()).unwrap()
    }

    #[test]
    fn test_invalid_constraint_is_skipped() {
        let result = node(&[
            ("a", Some(">=12.22.0")),
            ("b", Some(">=a.b.c")),
            ("c", Some(">=14.17.0")),
        ]);
        assert_eq!(result.range.raw(), ">=14.17.0");
        assert!(matches!(
            result.outcomes[1].1,
            ConstraintOutcome::Invalid(RangeParseError::Invalid { .. })
        ));
    }

    #[test]
    fn test_duplicates_are_skipped() {
        let result = node(&[
            ("a", Some(">=12.22.0")),
            ("b", Some(">=14.17.0")),
            ("c", Some(">=12.22.0")),
            ("d", Some(">=14.17.0")),
        ]);
        assert_eq!(result.range.raw(), ">=14.17.0");
        assert_eq!(result.outcomes[0].1, ConstraintOutcome::Adopted);
        assert_eq!(result.outcomes[1].1, ConstraintOutcome::Reduced);
        assert_eq!(result.outcomes[2].1, ConstraintOutcome::Subsumed);
        assert_eq!(result.outcomes[3].1, ConstraintOutcome::Subsumed);
        assert_eq!(result.contributors(), 2);
    }

    #[test]
    fn test_nothing_declared() {
        let result = node(&[("a", None), ("b", None)]);
        assert!(result.range.is_any());
        assert_eq!(result.range.raw(), "*");
        assert!(result.ignored.is_empty());
        assert_eq!(result.contributors(), 0);
    }

    #[test]
    fn test_empty_input() {
        let result = node(&[]);
        assert!(result.range.is_any());
        assert!(result.outcomes.is_empty());
    }

    #[test]
    fn test_first_usable_is_adopted_verbatim() {
        let result = node(&[("a", None), ("b", Some("^14.17.0 || ^16.10.0"))]);
        assert_eq!(result.range.raw(), "^14.17.0 || ^16.10.0");
        assert_eq!(result.outcomes[1].1, ConstraintOutcome::Adopted);
    }

    #[test]
    fn test_star_declaration_is_absorbed() {
        let result = node(&[("a", Some("*")), ("b", Some(">=16.0.0"))]);
        assert_eq!(result.range.raw(), ">=16.0.0");
    }

    #[test]
    fn test_caret_unions_narrow() {
        let result = node(&[
            ("a", Some("^12.22.0 || ^14.17.0 || >=16.0.0")),
            ("b", Some("^14.17.0 || >=16.10.0")),
            ("c", Some(">=14.18.0")),
        ]);
        assert_eq!(result.range.to_string(), ">=14.18.0 <15.0.0-0 || >=16.10.0");
    }

    #[test]
    fn test_error_is_tagged_with_engine() {
        let err = aggregate(
            "node",
            [("a", Some("^14.0.0")), ("b", Some("^16.0.0"))],
        )
        .unwrap_err();
        assert!(matches!(err, ReduceError::Engine { ref engine, .. } if engine == "node"));
        assert!(format!("{}", err).contains("node"));
    }
}
