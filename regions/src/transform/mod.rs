//! Transformation module.
//!
//! - Grouper: flat lines to regions with their settlements
//! - Pipeline: decode, group, render and write

pub mod grouper;
pub mod pipeline;

pub use grouper::{group_lines, group_str, GroupStats, GroupedRegions, Grouper};
pub use pipeline::*;
