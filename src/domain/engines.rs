//! The `engines` field of a package manifest
//!
//! npm accepts two shapes:
//! - Map: `{"node": ">=14.17.0", "npm": ">=7"}`
//! - List (legacy): `["node >=14.17.0", "npm >=7"]`
//!
//! The shape is resolved once when the manifest is read; lookups never
//! re-inspect the JSON.

use serde_json::Value;

/// Declared engine constraints, tagged with the shape they were written in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Engines {
    /// Object form, entries in declaration order
    Map(Vec<(String, String)>),
    /// Array form of `"<engine> <constraint>"` strings
    List(Vec<(String, String)>),
}

impl Engines {
    /// Resolves a JSON `engines` value; `None` for any other shape
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => {
                let entries = map
                    .iter()
                    .filter_map(|(name, constraint)| match constraint.as_str() {
                        Some(c) => Some((name.clone(), c.to_string())),
                        None => {
                            tracing::debug!("ignoring non-string engine constraint for {}", name);
                            None
                        }
                    })
                    .collect();
                Some(Engines::Map(entries))
            }
            Value::Array(items) => {
                let entries = items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(split_list_entry)
                    .collect();
                Some(Engines::List(entries))
            }
            _ => None,
        }
    }

    /// All `(engine, constraint)` pairs
    pub fn entries(&self) -> &[(String, String)] {
        match self {
            Engines::Map(entries) | Engines::List(entries) => entries,
        }
    }

    /// Constraint declared for `engine`, if any
    pub fn get(&self, engine: &str) -> Option<&str> {
        self.entries()
            .iter()
            .find(|(name, _)| name == engine)
            .map(|(_, constraint)| constraint.as_str())
    }

    /// Engine names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries().iter().map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Returns true for the legacy array form
    pub fn is_list(&self) -> bool {
        matches!(self, Engines::List(_))
    }
}

/// `"node >=14 <16"` → `("node", ">=14 <16")`; a bare name means any version
fn split_list_entry(entry: &str) -> Option<(String, String)> {
    let trimmed = entry.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.split_once(char::is_whitespace) {
        Some((name, constraint)) => Some((name.to_string(), constraint.trim().to_string())),
        None => Some((trimmed.to_string(), "*".to_string())),
    }
}
