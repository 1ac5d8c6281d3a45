//! # Regions - voivodeship settlement listings to JSON
//!
//! Converts a flat CSV where region header rows (`,Mazowieckie (województwo)`)
//! introduce runs of settlement rows into a JSON object keyed by region name.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│   Parser    │────▶│   Grouper   │────▶│  JSON file  │
//! │ (UTF-8/...) │     │ (decode +   │     │ (fold over  │     │ (region →   │
//! │             │     │  classify)  │     │  lines)     │     │  settlements│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use regions::{convert_file, write_document, ConvertOptions};
//! use std::path::Path;
//!
//! let options = ConvertOptions::default();
//! let result = convert_file(Path::new("dane.csv"), &options).unwrap();
//! write_document(&result.document, Path::new("out.json"), options.pretty).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Settlement, Region, RegionsDocument
//! - [`parser`] - Input decoding and line classification
//! - [`transform`] - Grouping and pipeline
//! - [`validation`] - JSON Schema validation of documents

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConvertError, DecodeError, ParseError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Region, RegionsDocument, Settlement};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    classify_line,
    decode_content,
    detect_encoding,
    region_name,
    split_lines,
    Decoded,
    EncodingChoice,
    Row,
    DEFAULT_DELIMITER,
};

// =============================================================================
// Re-exports - Grouper
// =============================================================================

pub use transform::grouper::{group_lines, group_str, GroupStats, GroupedRegions, Grouper};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    convert_bytes,
    convert_file,
    convert_str,
    read_document,
    read_json,
    render,
    summarize,
    write_document,
    ConvertOptions,
    ConvertOutcome,
    RegionSummary,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{check_document, is_valid_document, validate_document};
