//! Core domain models for enginup
//!
//! This module contains the fundamental types used throughout the application:
//! - Version ranges, comparator groups and their interval bounds
//! - Engine constraint declarations in both manifest shapes
//! - Dependency information structures
//! - Per-engine results and the project report

mod bound;
mod dependency;
mod engine_change;
mod engines;
mod version_range;

pub use bound::{Interval, LowerBound, UpperBound};
pub use dependency::Dependency;
pub use engine_change::{EngineChange, EngineReport};
pub use engines::Engines;
pub use version_range::{Comparator, ComparatorGroup, Operator, Range};
