//! Manifest and lockfile handling
//!
//! This module provides functionality to:
//! - Read the project's own package.json (name and engines)
//! - Read every installed package's engines from the npm lockfile
//! - Write computed engines back to package.json, preserving its format

mod lockfile;
mod package_json;
mod writer;

pub use lockfile::{find_lockfile, parse_lockfile, read_lockfile, LOCKFILES};
pub use package_json::{read_project, update_engines, ProjectManifest, PACKAGE_JSON};
pub use writer::{write_manifest, ManifestWriter, WriteResult};
