//! Dependency information structures

use super::Engines;
use std::fmt;

/// A package found in the installed dependency tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Package name
    pub name: String,
    /// Install location inside the tree (e.g. `node_modules/a/node_modules/b`)
    pub path: String,
    /// Whether the package is only needed for development
    pub is_dev: bool,
    /// Declared engines, if the package has any
    pub engines: Option<Engines>,
}

impl Dependency {
    /// Creates a new production dependency without engines
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dev: false,
            engines: None,
        }
    }

    /// Sets the declared engines (builder pattern)
    pub fn with_engines(mut self, engines: Engines) -> Self {
        self.engines = Some(engines);
        self
    }

    /// Marks the dependency as dev-only (builder pattern)
    pub fn development(mut self) -> Self {
        self.is_dev = true;
        self
    }

    /// Constraint this dependency declares for `engine`
    pub fn engine_constraint(&self, engine: &str) -> Option<&str> {
        self.engines.as_ref().and_then(|e| e.get(engine))
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev_marker = if self.is_dev { " (dev)" } else { "" };
        write!(f, "{} [{}]{}", self.name, self.path, dev_marker)
    }
}
