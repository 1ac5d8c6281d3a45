//! Error types for the regions conversion pipeline.
//!
//! - [`ParseError`] - line grouping errors (bad record rows, rows before any region)
//! - [`DecodeError`] - input decoding errors
//! - [`ConvertError`] - top-level errors returned by the pipeline
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Grouping Errors
// =============================================================================

/// Errors raised while grouping input lines into regions.
///
/// Line numbers are 1-based and count every physical input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A record row did not split into exactly nine fields.
    #[error("Line {line}: malformed record, expected {expected} fields but found {found}")]
    MalformedRecord {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A record row appeared before any region header.
    #[error("Line {line}: settlement record appears before any region header")]
    MissingRegion { line: usize },
}

impl ParseError {
    /// Line on which the error occurred.
    pub fn line(&self) -> usize {
        match self {
            ParseError::MalformedRecord { line, .. } | ParseError::MissingRegion { line } => *line,
        }
    }
}

// =============================================================================
// Decoding Errors
// =============================================================================

/// Errors while turning raw input bytes into text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input declared (or defaulted) as UTF-8 is not valid UTF-8.
    #[error("Input is not valid UTF-8 (try --encoding auto or an explicit label)")]
    InvalidUtf8,

    /// The requested encoding label is not known.
    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level conversion errors.
///
/// This is the error type returned by [`crate::transform::pipeline::convert_file`].
/// Any variant aborts the whole run; no output is written.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input resource could not be opened or read.
    #[error("Cannot read input '{}': {source}", .path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output resource could not be created or written.
    #[error("Cannot write output '{}': {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input decoding error.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Line grouping error.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Document failed schema validation.
    #[error("Document failed validation: {}", .0.join("; "))]
    InvalidDocument(Vec<String>),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for grouping operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for pipeline operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let parse_err = ParseError::MissingRegion { line: 1 };
        let convert_err: ConvertError = parse_err.into();
        assert!(convert_err.to_string().contains("before any region header"));

        let decode_err = DecodeError::UnknownEncoding("klingon".into());
        let convert_err: ConvertError = decode_err.into();
        assert!(convert_err.to_string().contains("klingon"));
    }

    #[test]
    fn test_malformed_record_format() {
        let err = ParseError::MalformedRecord {
            line: 7,
            expected: 9,
            found: 8,
        };
        let msg = err.to_string();
        assert!(msg.contains("Line 7"));
        assert!(msg.contains("expected 9"));
        assert!(msg.contains("found 8"));
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn test_io_errors_name_the_path() {
        let err = ConvertError::MissingInput {
            path: PathBuf::from("dane.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("dane.csv"));
    }
}
