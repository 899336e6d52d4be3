//! package.json reading and `engines` rewriting
//!
//! Handles:
//! - name
//! - engines (object and legacy array form)
//!
//! Rewrites touch only the `engines` object so the rest of the file keeps
//! its formatting and key order.

use crate::domain::Engines;
use crate::error::ManifestError;
use regex::Regex;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// File name of the project manifest
pub const PACKAGE_JSON: &str = "package.json";

static ENGINES_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""engines"\s*:\s*\{"#).unwrap());
static ENTRY_INDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\n([ \t]*)""#).unwrap());

/// The parts of a project's package.json the engine computation needs
#[derive(Debug, Clone)]
pub struct ProjectManifest {
    /// Path to package.json
    pub path: PathBuf,
    /// `name` field
    pub name: Option<String>,
    /// `engines` field
    pub engines: Option<Engines>,
    /// Original file content, kept for format-preserving rewrites
    pub content: String,
}

impl ProjectManifest {
    /// Parses package.json content
    pub fn parse(path: impl Into<PathBuf>, content: String) -> Result<Self, ManifestError> {
        let path = path.into();
        let json: Value = serde_json::from_str(&content)
            .map_err(|e| ManifestError::json_parse_error(&path, e.to_string()))?;

        let name = json.get("name").and_then(Value::as_str).map(str::to_string);
        let engines = json.get("engines").and_then(Engines::from_value);

        Ok(Self {
            path,
            name,
            engines,
            content,
        })
    }

    /// Constraint the project itself declares for `engine`
    pub fn engine_constraint(&self, engine: &str) -> Option<&str> {
        self.engines.as_ref().and_then(|e| e.get(engine))
    }
}

/// Reads `package.json` from `dir`
pub fn read_project(dir: &Path) -> Result<ProjectManifest, ManifestError> {
    let path = dir.join(PACKAGE_JSON);
    if !path.is_file() {
        return Err(ManifestError::not_found(path));
    }
    let content =
        std::fs::read_to_string(&path).map_err(|e| ManifestError::read_error(&path, e))?;
    ProjectManifest::parse(path, content)
}

/// Sets each `(engine, constraint)` in the `engines` field of `content`
///
/// An existing `engines` object is edited in place: matching values are
/// replaced and missing engines are appended after the last entry. A
/// manifest without an object-form `engines` field is re-serialized.
pub fn update_engines(
    path: &Path,
    content: &str,
    updates: &[(&str, &str)],
) -> Result<String, ManifestError> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;

    if updates.is_empty() {
        return Ok(content.to_string());
    }

    let in_place = match json.get("engines") {
        Some(Value::Object(map)) if !map.is_empty() => rewrite_in_place(path, content, updates)?,
        _ => None,
    };

    match in_place {
        Some(updated) => Ok(updated),
        None => rewrite_document(path, json, updates),
    }
}

/// Edits the text of the `engines` object; `None` when it cannot be located
fn rewrite_in_place(
    path: &Path,
    content: &str,
    updates: &[(&str, &str)],
) -> Result<Option<String>, ManifestError> {
    let Some(body_start) = find_engines_body(content) else {
        return Ok(None);
    };
    let Some(body_end) = find_object_end(content, body_start) else {
        return Ok(None);
    };

    let mut body = content[body_start..body_end].to_string();
    let mut missing = Vec::new();

    for (engine, constraint) in updates {
        let pattern = format!(r#"({}\s*:\s*)"(?:[^"\\]|\\.)*""#, regex::escape(&quote(engine)));
        let re = Regex::new(&pattern)
            .map_err(|e| ManifestError::update_error(path, format!("invalid pattern: {}", e)))?;

        if re.is_match(&body) {
            let value = quote(constraint);
            body = re
                .replace(&body, |caps: &regex::Captures| format!("{}{}", &caps[1], value))
                .into_owned();
        } else {
            missing.push((*engine, *constraint));
        }
    }

    if !missing.is_empty() {
        let indent = ENTRY_INDENT_RE
            .captures(&body)
            .map(|caps| caps[1].to_string());
        let last = body.trim_end().len();
        let (entries, trailing) = body.split_at(last);

        let mut appended = entries.to_string();
        for (engine, constraint) in missing {
            match &indent {
                Some(indent) => appended.push_str(&format!(",\n{}", indent)),
                None => appended.push_str(", "),
            }
            appended.push_str(&format!("{}: {}", quote(engine), quote(constraint)));
        }
        appended.push_str(trailing);
        body = appended;
    }

    let mut updated = String::with_capacity(content.len() + body.len());
    updated.push_str(&content[..body_start]);
    updated.push_str(&body);
    updated.push_str(&content[body_end..]);
    Ok(Some(updated))
}

/// Re-serializes the whole document with an object-form `engines`
fn rewrite_document(
    path: &Path,
    mut json: Value,
    updates: &[(&str, &str)],
) -> Result<String, ManifestError> {
    let root = json
        .as_object_mut()
        .ok_or_else(|| ManifestError::update_error(path, "top level is not an object"))?;

    let mut engines: Map<String, Value> = match root.get("engines").and_then(Engines::from_value) {
        Some(existing) => existing
            .entries()
            .iter()
            .map(|(name, constraint)| (name.clone(), Value::String(constraint.clone())))
            .collect(),
        None => Map::new(),
    };
    for (engine, constraint) in updates {
        engines.insert(engine.to_string(), Value::String(constraint.to_string()));
    }
    root.insert("engines".to_string(), Value::Object(engines));

    let mut out = serde_json::to_string_pretty(&json)
        .map_err(|e| ManifestError::update_error(path, e.to_string()))?;
    out.push('\n');
    Ok(out)
}

/// String-aware nesting tracker over JSON text
#[derive(Default)]
struct Scanner {
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl Scanner {
    fn feed(&mut self, ch: char) {
        if self.in_string {
            match ch {
                _ if self.escaped => self.escaped = false,
                '\\' => self.escaped = true,
                '"' => self.in_string = false,
                _ => {}
            }
            return;
        }
        match ch {
            '"' => self.in_string = true,
            '{' | '[' => self.depth += 1,
            '}' | ']' => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
    }
}

/// Byte offset just past the `{` of the root object's `engines` member
fn find_engines_body(content: &str) -> Option<usize> {
    let mut scanner = Scanner::default();
    let mut scanned = 0;

    for open in ENGINES_OPEN_RE.find_iter(content) {
        content[scanned..open.start()].chars().for_each(|ch| scanner.feed(ch));
        scanned = open.start();
        if scanner.depth == 1 && !scanner.in_string {
            return Some(open.end());
        }
    }
    None
}

/// Byte offset of the `}` closing the object whose body starts at `start`
fn find_object_end(content: &str, start: usize) -> Option<usize> {
    let mut scanner = Scanner::default();

    for (offset, ch) in content[start..].char_indices() {
        if ch == '}' && scanner.depth == 0 && !scanner.in_string {
            return Some(start + offset);
        }
        scanner.feed(ch);
    }
    None
}

fn quote(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}
