//! Property-based tests for range reduction

use enginup::domain::Range;
use enginup::reduce::{aggregate, humanize, most_restrictive, IgnoredRanges};
use proptest::prelude::*;

fn caret() -> impl Strategy<Value = String> {
    (0u64..30, 0u64..20).prop_map(|(major, minor)| format!("^{}.{}.0", major, minor))
}

/// Caret unions and open lower bounds, the shapes engines are written in
fn constraint() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec(caret(), 1..4).prop_map(|parts| parts.join(" || ")),
        (0u64..30, 0u64..20).prop_map(|(major, minor)| format!(">={}.{}.0", major, minor)),
    ]
}

fn range(text: &str) -> Range {
    Range::parse(text).expect("generated ranges are valid")
}

proptest! {
    #[test]
    fn test_reducing_a_range_with_itself_is_identity(text in constraint()) {
        let r = range(&text);
        let mut ignored = IgnoredRanges::new();
        let result = most_restrictive(&r, &r, &mut ignored).unwrap();
        prop_assert_eq!(result.raw(), r.raw());
    }

    #[test]
    fn test_contained_range_wins(a in constraint(), b in constraint()) {
        let (a, b) = (range(&a), range(&b));
        if !a.is_subset_of(&b) {
            return Ok(());
        }

        let mut ignored = IgnoredRanges::new();
        let result = most_restrictive(&a, &b, &mut ignored).unwrap();
        prop_assert_eq!(result.raw(), a.raw());
        prop_assert!(ignored.contains(b.raw()));
    }

    #[test]
    fn test_reduction_is_order_independent(a in constraint(), b in constraint()) {
        let (a, b) = (range(&a), range(&b));
        let ab = most_restrictive(&a, &b, &mut IgnoredRanges::new());
        let ba = most_restrictive(&b, &a, &mut IgnoredRanges::new());

        match (ab, ba) {
            (Ok(ab), Ok(ba)) => {
                prop_assert!(ab.is_subset_of(&ba) && ba.is_subset_of(&ab), "{} vs {}", ab, ba);
            }
            (Err(_), Err(_)) => {}
            (ab, ba) => prop_assert!(false, "only one order failed: {:?} / {:?}", ab, ba),
        }
    }

    #[test]
    fn test_result_is_within_first_range(a in constraint(), b in constraint()) {
        let (a, b) = (range(&a), range(&b));
        if let Ok(result) = most_restrictive(&a, &b, &mut IgnoredRanges::new()) {
            prop_assert!(result.is_subset_of(&a), "{} not within {}", result, a);
        }
    }

    #[test]
    fn test_aggregation_never_widens(constraints in prop::collection::vec(constraint(), 1..6)) {
        let mut previous: Option<Range> = None;

        for n in 1..=constraints.len() {
            let entries = constraints[..n].iter().map(|c| ("dep", Some(c.as_str())));
            let Ok(result) = aggregate("node", entries) else {
                break;
            };
            if let Some(prev) = &previous {
                prop_assert!(
                    result.range.is_subset_of(prev),
                    "{} widened {}",
                    result.range,
                    prev
                );
            }
            previous = Some(result.range);
        }
    }

    #[test]
    fn test_humanize_caret_round_trip(major in 0u64..10_000) {
        let r = range(&format!(">={}.0.0 <{}.0.0-0", major, major + 1));
        prop_assert_eq!(humanize(Some(&r)), format!("^{}.0.0", major));
    }

    #[test]
    fn test_parse_never_panics(text in "[0-9xX*^~<>=|. v-]{0,24}") {
        let _ = Range::parse(&text);
    }
}
