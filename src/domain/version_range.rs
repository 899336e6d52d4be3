//! npm-style version ranges
//!
//! A range is a union (`||`) of comparator groups; each group is an
//! AND-list of `<operator><version>` comparators. Sugar such as `^1.2.3`,
//! `~1.2`, `1.x` and `1.2.3 - 2.0.0` is desugared at parse time into plain
//! comparators, using the `-0` prerelease convention for exclusive upper
//! bounds (`^14.17.0` becomes `>=14.17.0 <15.0.0-0`).

use super::bound::{merge_intervals, Interval, LowerBound, UpperBound};
use crate::error::RangeParseError;
use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static HYPHEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+-\s+(\S+)$").unwrap());
static SIMPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(~>|~|\^|>=|<=|>|<|=)?v?([0-9]+|[xX*])(?:\.([0-9]+|[xX*])(?:\.([0-9]+|[xX*])(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?)?)?$",
    )
    .unwrap()
});
static OPERATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(~>|~|\^|>=|<=|>|<|=)$").unwrap());

/// Comparison operator of a single comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=` (rendered without a prefix)
    Eq,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
}

impl Operator {
    /// Textual prefix used when rendering a comparator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
        }
    }
}

/// A single `<operator><version>` constraint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comparator {
    pub op: Operator,
    pub version: Version,
}

impl Comparator {
    pub fn new(op: Operator, version: Version) -> Self {
        Self { op, version }
    }

    /// Builds the comparator expressing a lower bound (`None` for unbounded)
    pub fn from_lower(bound: &LowerBound) -> Option<Self> {
        match bound {
            LowerBound::Unbounded => None,
            LowerBound::Inclusive(v) => Some(Self::new(Operator::Gte, v.clone())),
            LowerBound::Exclusive(v) => Some(Self::new(Operator::Gt, v.clone())),
        }
    }

    /// Canonical text: operator followed by version
    pub fn value(&self) -> String {
        format!("{}{}", self.op.as_str(), self.version)
    }

    /// Returns true for `>` and `>=`
    pub fn is_lower_bound(&self) -> bool {
        matches!(self.op, Operator::Gt | Operator::Gte)
    }

    fn lower(&self) -> LowerBound {
        match self.op {
            Operator::Gte | Operator::Eq => LowerBound::Inclusive(self.version.clone()),
            Operator::Gt => LowerBound::Exclusive(self.version.clone()),
            Operator::Lt | Operator::Lte => LowerBound::Unbounded,
        }
    }

    fn upper(&self) -> UpperBound {
        match self.op {
            Operator::Lte | Operator::Eq => UpperBound::Inclusive(self.version.clone()),
            Operator::Lt => UpperBound::Exclusive(self.version.clone()),
            Operator::Gt | Operator::Gte => UpperBound::Unbounded,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.as_str(), self.version)
    }
}

/// Comparators that must all hold; an empty group matches everything
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ComparatorGroup {
    comparators: Vec<Comparator>,
}

impl ComparatorGroup {
    pub fn new(comparators: Vec<Comparator>) -> Self {
        Self { comparators }
    }

    /// The group matching every version (`*`)
    pub fn any() -> Self {
        Self::default()
    }

    pub fn comparators(&self) -> &[Comparator] {
        &self.comparators
    }

    pub fn is_any(&self) -> bool {
        self.comparators.is_empty()
    }

    /// The interval of versions satisfying every comparator
    pub fn interval(&self) -> Interval {
        self.comparators
            .iter()
            .fold(Interval::all(), |acc, c| {
                acc.intersect(&Interval {
                    lower: c.lower(),
                    upper: c.upper(),
                })
            })
    }

    /// Lowest version admitted by the group
    pub fn lower_bound(&self) -> LowerBound {
        self.interval().lower
    }

    /// Replaces the group's lower-bound comparators with `bound`
    pub fn with_lower_bound(&self, bound: &LowerBound) -> Self {
        let mut comparators: Vec<Comparator> = Comparator::from_lower(bound).into_iter().collect();
        comparators.extend(
            self.comparators
                .iter()
                .filter(|c| !c.is_lower_bound())
                .cloned(),
        );
        Self { comparators }
    }
}

impl fmt::Display for ComparatorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.comparators.is_empty() {
            return write!(f, "*");
        }
        let values: Vec<String> = self.comparators.iter().map(Comparator::value).collect();
        write!(f, "{}", values.join(" "))
    }
}

/// A union of comparator groups
///
/// Two ranges compare equal only when their raw text is identical; use
/// [`Range::is_subset_of`] for semantic comparisons.
#[derive(Debug, Clone)]
pub struct Range {
    raw: String,
    groups: Vec<ComparatorGroup>,
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Range {}

impl Range {
    /// Parses npm range syntax
    pub fn parse(text: &str) -> Result<Self, RangeParseError> {
        let raw = text.trim();
        let mut groups = Vec::new();

        for part in raw.split("||") {
            if let Some(group) = parse_group(part.trim(), raw)? {
                groups.push(group);
            }
        }

        if groups.is_empty() {
            return Err(RangeParseError::Unsatisfiable {
                range: raw.to_string(),
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            groups,
        })
    }

    /// The universal range `*`
    pub fn any() -> Self {
        Self {
            raw: "*".to_string(),
            groups: vec![ComparatorGroup::any()],
        }
    }

    /// Rebuilds a range from groups; the raw text is derived from them
    pub fn from_groups(groups: Vec<ComparatorGroup>) -> Self {
        let raw = groups
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" || ");
        Self { raw, groups }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn groups(&self) -> &[ComparatorGroup] {
        &self.groups
    }

    /// Returns true if the range has no groups at all
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns true if some group matches every version
    pub fn is_any(&self) -> bool {
        self.groups.iter().any(ComparatorGroup::is_any)
    }

    /// Lowest version the range admits (`None` for a range without groups)
    pub fn min_bound(&self) -> Option<LowerBound> {
        self.groups.iter().map(ComparatorGroup::lower_bound).min()
    }

    /// Returns true if every version matched by `self` is matched by `other`
    pub fn is_subset_of(&self, other: &Range) -> bool {
        let cover = merge_intervals(other.intervals());
        self.intervals()
            .iter()
            .filter(|i| !i.is_empty())
            .all(|i| cover.iter().any(|c| c.contains(i)))
    }

    /// Returns true if at least one version is matched by both ranges
    pub fn intersects(&self, other: &Range) -> bool {
        let theirs = other.intervals();
        self.intervals()
            .iter()
            .any(|a| theirs.iter().any(|b| !a.intersect(b).is_empty()))
    }

    fn intervals(&self) -> Vec<Interval> {
        self.groups.iter().map(ComparatorGroup::interval).collect()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for Range {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s)
    }
}

/// Partially specified version (`1`, `1.2`, `1.2.x`, `1.2.3-beta`)
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl Partial {
    /// Missing components filled with zeros
    fn floor(&self) -> Version {
        Version {
            major: self.major.unwrap_or(0),
            minor: self.minor.unwrap_or(0),
            patch: self.patch.unwrap_or(0),
            pre: self.pre.clone(),
            build: BuildMetadata::EMPTY,
        }
    }
}

/// Parses one `||`-separated branch; `None` when it can match nothing
fn parse_group(part: &str, range: &str) -> Result<Option<ComparatorGroup>, RangeParseError> {
    let invalid = |token: &str, message: String| RangeParseError::Invalid {
        range: range.to_string(),
        token: token.to_string(),
        message,
    };

    let mut comparators = Vec::new();

    if let Some(caps) = HYPHEN_RE.captures(part) {
        let (from, to) = (&caps[1], &caps[2]);
        let lower = parse_partial(from).ok_or_else(|| invalid(from, "not a version".into()))?;
        let upper = parse_partial(to).ok_or_else(|| invalid(to, "not a version".into()))?;
        comparators.extend(desugar_hyphen(&lower, &upper).map_err(|m| invalid(part, m))?);
    } else {
        for token in tokenize(part) {
            let caps = SIMPLE_RE
                .captures(&token)
                .ok_or_else(|| invalid(&token, "unrecognized comparator".into()))?;
            let op = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let partial = partial_from_captures(&caps).map_err(|m| invalid(&token, m))?;
            match desugar(op, &partial).map_err(|m| invalid(&token, m))? {
                Some(desugared) => comparators.extend(desugared),
                None => return Ok(None),
            }
        }
    }

    let group = ComparatorGroup::new(comparators);
    if group.interval().is_empty() {
        return Ok(None);
    }
    Ok(Some(group))
}

/// Splits on whitespace, gluing a bare operator to the version after it
fn tokenize(part: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut pending: Option<&str> = None;

    for word in part.split_whitespace() {
        match pending.take() {
            Some(op) => tokens.push(format!("{}{}", op, word)),
            None if OPERATOR_RE.is_match(word) => pending = Some(word),
            None => tokens.push(word.to_string()),
        }
    }
    if let Some(op) = pending {
        tokens.push(op.to_string());
    }
    tokens
}

fn parse_partial(text: &str) -> Option<Partial> {
    let caps = SIMPLE_RE.captures(text)?;
    if caps.get(1).is_some() {
        return None;
    }
    partial_from_captures(&caps).ok()
}

fn partial_from_captures(caps: &regex::Captures<'_>) -> Result<Partial, String> {
    let component = |idx: usize| -> Result<Option<u64>, String> {
        match caps.get(idx).map(|m| m.as_str()) {
            None | Some("x") | Some("X") | Some("*") => Ok(None),
            Some(n) => n
                .parse::<u64>()
                .map(Some)
                .map_err(|e| format!("invalid version component '{}': {}", n, e)),
        }
    };

    let major = component(2)?;
    let minor = major.map(|_| component(3)).transpose()?.flatten();
    let patch = minor.map(|_| component(4)).transpose()?.flatten();
    let pre = match (patch, caps.get(5)) {
        (Some(_), Some(m)) => Prerelease::new(m.as_str()).map_err(|e| e.to_string())?,
        _ => Prerelease::EMPTY,
    };

    Ok(Partial {
        major,
        minor,
        patch,
        pre,
    })
}

/// `major.minor.patch-0`, the lowest prerelease of a version
fn ceiling(major: u64, minor: u64, patch: u64) -> Result<Version, String> {
    Ok(Version {
        major,
        minor,
        patch,
        pre: Prerelease::new("0").map_err(|e| e.to_string())?,
        build: BuildMetadata::EMPTY,
    })
}

fn bump(n: u64) -> Result<u64, String> {
    n.checked_add(1)
        .ok_or_else(|| "version component overflow".to_string())
}

fn gte(version: Version) -> Comparator {
    Comparator::new(Operator::Gte, version)
}

fn lt(version: Version) -> Comparator {
    Comparator::new(Operator::Lt, version)
}

/// Desugars a single comparator token; `None` when it matches nothing
fn desugar(op: &str, p: &Partial) -> Result<Option<Vec<Comparator>>, String> {
    let Some(major) = p.major else {
        // `*`, `>=*`, `<=*` match everything; `>*` and `<*` nothing
        return Ok(match op {
            ">" | "<" => None,
            _ => Some(Vec::new()),
        });
    };

    let comparators = match (op, p.minor, p.patch) {
        ("^", None, _) => vec![gte(p.floor()), lt(ceiling(bump(major)?, 0, 0)?)],
        ("^", Some(minor), None) if major == 0 => {
            vec![gte(p.floor()), lt(ceiling(0, bump(minor)?, 0)?)]
        }
        ("^", Some(minor), Some(patch)) if major == 0 => {
            let upper = if minor > 0 {
                ceiling(0, bump(minor)?, 0)?
            } else {
                ceiling(0, 0, bump(patch)?)?
            };
            vec![gte(p.floor()), lt(upper)]
        }
        ("^", Some(_), _) => vec![gte(p.floor()), lt(ceiling(bump(major)?, 0, 0)?)],

        ("~" | "~>" | "" | "=", None, _) => {
            vec![gte(p.floor()), lt(ceiling(bump(major)?, 0, 0)?)]
        }
        ("~" | "~>", Some(minor), _) | ("" | "=", Some(minor), None) => {
            vec![gte(p.floor()), lt(ceiling(major, bump(minor)?, 0)?)]
        }
        ("" | "=", Some(_), Some(_)) => vec![Comparator::new(Operator::Eq, p.floor())],

        (">=", _, _) => vec![gte(p.floor())],

        (">", None, _) => vec![gte(Version::new(bump(major)?, 0, 0))],
        (">", Some(minor), None) => vec![gte(Version::new(major, bump(minor)?, 0))],
        (">", Some(_), Some(_)) => vec![Comparator::new(Operator::Gt, p.floor())],

        ("<", None, _) => vec![lt(ceiling(major, 0, 0)?)],
        ("<", Some(minor), None) => vec![lt(ceiling(major, minor, 0)?)],
        ("<", Some(_), Some(_)) => vec![lt(p.floor())],

        ("<=", None, _) => vec![lt(ceiling(bump(major)?, 0, 0)?)],
        ("<=", Some(minor), None) => vec![lt(ceiling(major, bump(minor)?, 0)?)],
        ("<=", Some(_), Some(_)) => vec![Comparator::new(Operator::Lte, p.floor())],

        (other, _, _) => return Err(format!("unknown operator '{}'", other)),
    };

    Ok(Some(comparators))
}

/// `A - B`: inclusive on both ends, partial upper ends bumped
fn desugar_hyphen(from: &Partial, to: &Partial) -> Result<Vec<Comparator>, String> {
    let mut comparators = Vec::new();

    if from.major.is_some() {
        comparators.push(gte(from.floor()));
    }

    match (to.major, to.minor, to.patch) {
        (None, _, _) => {}
        (Some(major), None, _) => comparators.push(lt(ceiling(bump(major)?, 0, 0)?)),
        (Some(major), Some(minor), None) => {
            comparators.push(lt(ceiling(major, bump(minor)?, 0)?))
        }
        (Some(_), Some(_), Some(_)) => {
            comparators.push(Comparator::new(Operator::Lte, to.floor()))
        }
    }

    Ok(comparators)
}
