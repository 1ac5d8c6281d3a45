//! High-level pipeline API: read, decode, group, render, write.
//!
//! # Example
//!
//! ```rust,ignore
//! use regions::{convert_file, write_document, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = ConvertOptions::default();
//!     let result = convert_file(Path::new("dane.csv"), &options)?;
//!     write_document(&result.document, Path::new("out.json"), options.pretty)?;
//!     println!("{} regions", result.document.len());
//!     Ok(())
//! }
//! ```

use serde_json::Value;
use std::fs;
use std::path::Path;

use super::grouper::{group_str, GroupStats};
use crate::error::{ConvertError, ConvertResult};
use crate::models::RegionsDocument;
use crate::parser::{decode_content, EncodingChoice, DEFAULT_DELIMITER};

/// Options for a conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Field delimiter
    pub delimiter: char,

    /// How to decode the input bytes
    pub encoding: EncodingChoice,

    /// Indent the JSON output
    pub pretty: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            encoding: EncodingChoice::Utf8,
            pretty: false,
        }
    }
}

/// Result of a conversion run
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    /// The grouped document
    pub document: RegionsDocument,

    /// Line counters
    pub stats: GroupStats,

    /// Encoding the input was decoded with
    pub encoding: String,
}

/// Per-region line of a summary report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    pub name: String,
    pub settlements: usize,
}

/// Convert a file on disk.
///
/// Nothing is written: pair with [`write_document`] to produce the output.
pub fn convert_file(path: &Path, options: &ConvertOptions) -> ConvertResult<ConvertOutcome> {
    tracing::info!(input = %path.display(), "reading input");
    let bytes = fs::read(path).map_err(|source| ConvertError::MissingInput {
        path: path.to_path_buf(),
        source,
    })?;
    convert_bytes(&bytes, options)
}

/// Convert raw input bytes.
pub fn convert_bytes(bytes: &[u8], options: &ConvertOptions) -> ConvertResult<ConvertOutcome> {
    let decoded = decode_content(bytes, &options.encoding)?;
    tracing::info!(encoding = %decoded.encoding, bytes = bytes.len(), "decoded input");

    let mut outcome = convert_str(&decoded.text, options)?;
    outcome.encoding = decoded.encoding;
    Ok(outcome)
}

/// Convert already-decoded text.
pub fn convert_str(text: &str, options: &ConvertOptions) -> ConvertResult<ConvertOutcome> {
    let grouped = group_str(text, options.delimiter)?;
    tracing::info!(
        regions = grouped.document.len(),
        settlements = grouped.document.settlement_count(),
        "grouped input"
    );

    Ok(ConvertOutcome {
        document: grouped.document,
        stats: grouped.stats,
        encoding: "utf-8".to_string(),
    })
}

/// Render a document as JSON text.
pub fn render(document: &RegionsDocument, pretty: bool) -> ConvertResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}

/// Write a document to `path`, in full.
///
/// The JSON is rendered before the file is created, so a serialization
/// failure leaves no file behind.
pub fn write_document(document: &RegionsDocument, path: &Path, pretty: bool) -> ConvertResult<()> {
    let json = render(document, pretty)?;
    fs::write(path, json).map_err(|source| ConvertError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(output = %path.display(), regions = document.len(), "document written");
    Ok(())
}

fn read_text(path: &Path) -> ConvertResult<String> {
    fs::read_to_string(path).map_err(|source| ConvertError::MissingInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a JSON file as an untyped value.
pub fn read_json(path: &Path) -> ConvertResult<Value> {
    Ok(serde_json::from_str(&read_text(path)?)?)
}

/// Read a previously written document, keeping region order.
pub fn read_document(path: &Path) -> ConvertResult<RegionsDocument> {
    Ok(serde_json::from_str(&read_text(path)?)?)
}

/// Settlement counts per region, in document order.
pub fn summarize(document: &RegionsDocument) -> Vec<RegionSummary> {
    document
        .regions()
        .iter()
        .map(|r| RegionSummary {
            name: r.name.clone(),
            settlements: r.settlements.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    const SAMPLE: &str = ",Mazowieckie (województwo)\n0101,Warszawa,warszawski,5177,51.77,1790658,345832,1,1\n";

    #[test]
    fn test_convert_str_defaults() {
        let outcome = convert_str(SAMPLE, &ConvertOptions::default()).unwrap();
        assert_eq!(outcome.document.len(), 1);
        assert_eq!(outcome.stats.record_rows, 1);
        assert_eq!(outcome.encoding, "utf-8");
    }

    #[test]
    fn test_convert_bytes_with_label() {
        // ",Łódzkie\n" followed by a record, windows-1250 encoded
        let mut bytes: Vec<u8> = vec![0x2C, 0xA3, 0xF3, 0x64, 0x7A, 0x6B, 0x69, 0x65, b'\n'];
        bytes.extend_from_slice(b"1061,Lodz,lodzki,29325,293.25,664071,2264,3,3\n");
        let options = ConvertOptions {
            encoding: "windows-1250".parse().unwrap(),
            ..ConvertOptions::default()
        };

        let outcome = convert_bytes(&bytes, &options).unwrap();
        assert_eq!(outcome.encoding, "windows-1250");
        assert!(outcome.document.get("Łódzkie").is_some());
    }

    #[test]
    fn test_convert_propagates_parse_error() {
        let err = convert_str("0101,a,b,c,d,e,f,g,h\n", &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Parse(ParseError::MissingRegion { line: 1 })));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let options = ConvertOptions {
            delimiter: ';',
            ..ConvertOptions::default()
        };
        let input = ";Pomorskie\n2261;Gdansk;gdanski;26196;261.96;486022;1855;5;6\n";
        let outcome = convert_str(input, &options).unwrap();
        assert_eq!(outcome.document.get("Pomorskie").unwrap().settlements[0].name, "Gdansk");
    }

    #[test]
    fn test_render_pretty_and_compact_agree() {
        let outcome = convert_str(SAMPLE, &ConvertOptions::default()).unwrap();
        let compact = render(&outcome.document, false).unwrap();
        let pretty = render(&outcome.document, true).unwrap();

        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
        let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_read_json_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = read_json(&path).unwrap_err();
        assert!(matches!(err, ConvertError::MissingInput { .. }));
        assert!(err.to_string().contains("absent.json"));
        assert!(matches!(read_document(&path), Err(ConvertError::MissingInput { .. })));
    }

    #[test]
    fn test_summarize() {
        let input = ",A\n1,a,b,c,d,e,f,g,h\n2,a,b,c,d,e,f,g,h\n,B\n";
        let outcome = convert_str(input, &ConvertOptions::default()).unwrap();
        assert_eq!(
            summarize(&outcome.document),
            vec![
                RegionSummary { name: "A".into(), settlements: 2 },
                RegionSummary { name: "B".into(), settlements: 0 },
            ]
        );
    }
}
