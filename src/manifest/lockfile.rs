//! package-lock.json / npm-shrinkwrap.json reader
//!
//! Only lockfile versions 2 and 3 record each installed package's
//! `engines`, under the flat `packages` map keyed by install path.

use crate::domain::{Dependency, Engines};
use crate::error::ManifestError;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Lockfile names, in lookup order
pub const LOCKFILES: [&str; 2] = ["npm-shrinkwrap.json", "package-lock.json"];

const NODE_MODULES: &str = "node_modules/";

/// Locates the lockfile in `dir`
pub fn find_lockfile(dir: &Path) -> Option<PathBuf> {
    LOCKFILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Reads every installed package from the lockfile in `dir`, in file order
pub fn read_lockfile(dir: &Path) -> Result<Vec<Dependency>, ManifestError> {
    let path = find_lockfile(dir).ok_or_else(|| ManifestError::not_found(dir.join(LOCKFILES[1])))?;
    let content = std::fs::read_to_string(&path).map_err(|e| ManifestError::read_error(&path, e))?;
    parse_lockfile(&path, &content)
}

/// Parses lockfile content
pub fn parse_lockfile(path: &Path, content: &str) -> Result<Vec<Dependency>, ManifestError> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;

    let version = json.get("lockfileVersion").and_then(Value::as_u64).unwrap_or(1);
    if version < 2 {
        return Err(ManifestError::UnsupportedLockfile {
            path: path.to_path_buf(),
            version,
        });
    }

    let Some(packages) = json.get("packages").and_then(Value::as_object) else {
        return Ok(Vec::new());
    };

    let dependencies = packages
        .iter()
        .filter(|(location, _)| !location.is_empty())
        .filter_map(|(location, entry)| parse_entry(location, entry))
        .collect::<Vec<_>>();

    tracing::debug!("{} packages in {}", dependencies.len(), path.display());
    Ok(dependencies)
}

fn parse_entry(location: &str, entry: &Value) -> Option<Dependency> {
    let flag = |key: &str| entry.get(key).and_then(Value::as_bool).unwrap_or(false);

    if flag("link") {
        tracing::trace!("skipping link {}", location);
        return None;
    }

    let name = match location.rfind(NODE_MODULES) {
        Some(idx) => location[idx + NODE_MODULES.len()..].to_string(),
        None => entry
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(location)
            .to_string(),
    };

    let mut dependency = Dependency::new(name, location);
    if flag("dev") {
        dependency = dependency.development();
    }
    if let Some(engines) = entry.get("engines").and_then(Engines::from_value) {
        dependency = dependency.with_engines(engines);
    }
    Some(dependency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LOCK_V3: &str = r#"{
  "name": "my-app",
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "my-app", "engines": { "node": ">=12" } },
    "node_modules/zeta": { "version": "1.0.0", "engines": { "node": ">=14.17.0" } },
    "node_modules/@scope/alpha": { "version": "2.0.0", "dev": true, "engines": ["node >=12.22.0"] },
    "node_modules/zeta/node_modules/beta": { "version": "0.1.0", "optional": true },
    "node_modules/local": { "resolved": "packages/local", "link": true },
    "packages/local": { "name": "local", "version": "0.0.1", "engines": { "node": "^16.0.0" } }
  }
}"#;

    fn parse(content: &str) -> Result<Vec<Dependency>, ManifestError> {
        parse_lockfile(Path::new("package-lock.json"), content)
    }

    #[test]
    fn test_parse_packages_in_file_order() {
        let deps = parse(LOCK_V3).unwrap();
        let names: Vec<_> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "@scope/alpha", "beta", "local"]);
    }

    #[test]
    fn test_parse_flags_and_engines() {
        let deps = parse(LOCK_V3).unwrap();

        assert_eq!(deps[0].engine_constraint("node"), Some(">=14.17.0"));
        assert!(!deps[0].is_dev);

        assert!(deps[1].is_dev);
        assert!(deps[1].engines.as_ref().unwrap().is_list());
        assert_eq!(deps[1].engine_constraint("node"), Some(">=12.22.0"));

        assert_eq!(deps[2].path, "node_modules/zeta/node_modules/beta");
        assert!(deps[2].engines.is_none());

        assert_eq!(deps[3].path, "packages/local");
    }

    #[test]
    fn test_v1_lockfile_is_unsupported() {
        let err = parse(r#"{"lockfileVersion": 1, "dependencies": {}}"#).unwrap_err();
        assert!(matches!(err, ManifestError::UnsupportedLockfile { version: 1, .. }));
        assert!(format!("{}", err).contains("unsupported lockfile version 1"));
    }

    #[test]
    fn test_missing_packages() {
        assert!(parse(r#"{"lockfileVersion": 2}"#).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = parse("not json").unwrap_err();
        assert!(matches!(err, ManifestError::JsonParseError { .. }));
    }

    #[test]
    fn test_shrinkwrap_takes_precedence() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package-lock.json"), LOCK_V3).unwrap();
        assert_eq!(
            find_lockfile(temp.path()),
            Some(temp.path().join("package-lock.json"))
        );

        fs::write(
            temp.path().join("npm-shrinkwrap.json"),
            r#"{"lockfileVersion": 3, "packages": {}}"#,
        )
        .unwrap();
        assert_eq!(
            find_lockfile(temp.path()),
            Some(temp.path().join("npm-shrinkwrap.json"))
        );
        assert!(read_lockfile(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_lockfile() {
        let temp = TempDir::new().unwrap();
        let err = read_lockfile(temp.path()).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }
}
