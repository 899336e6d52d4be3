//! enginup - package.json engines calculator library
//!
//! This library computes the most restrictive `engines` constraint (node,
//! npm, ...) implied by every package installed in an npm project:
//! - npm range parsing and interval arithmetic
//! - Most-restrictive reduction and per-engine aggregation
//! - Humanized display of reduced ranges
//! - Reading package.json / package-lock.json and writing engines back

pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod reduce;
