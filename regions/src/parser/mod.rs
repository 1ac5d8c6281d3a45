//! Input decoding and line classification.
//!
//! The input is a flat delimited file with no column header. Each line is
//! either a region header (`,Mazowieckie (województwo)`) or a settlement
//! record (`0101,Warszawa,warszawski,...`). Lines end at `\r\n`, `\n` or a
//! lone `\r`. Fields are split on the delimiter as-is: there are no quoting
//! rules.

use encoding_rs::Encoding;
use std::str::FromStr;

use crate::error::DecodeError;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// How input bytes are turned into text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EncodingChoice {
    /// Strict UTF-8, leading byte-order mark removed.
    #[default]
    Utf8,
    /// Detect with chardet, then decode.
    Auto,
    /// A WHATWG encoding label such as `windows-1250`.
    Label(String),
}

impl FromStr for EncodingChoice {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(EncodingChoice::Utf8),
            "auto" => Ok(EncodingChoice::Auto),
            other => Encoding::for_label(other.as_bytes())
                .map(|_| EncodingChoice::Label(other.to_string()))
                .ok_or_else(|| DecodeError::UnknownEncoding(s.to_string())),
        }
    }
}

/// Decoded input text with the encoding actually used.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub text: String,
    pub encoding: String,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // chardet reports pure ASCII separately; it decodes identically as UTF-8
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string according to `choice`.
pub fn decode_content(bytes: &[u8], choice: &EncodingChoice) -> Result<Decoded, DecodeError> {
    match choice {
        EncodingChoice::Utf8 => decode_utf8(bytes),
        EncodingChoice::Label(label) => {
            let encoding = Encoding::for_label(label.as_bytes())
                .ok_or_else(|| DecodeError::UnknownEncoding(label.clone()))?;
            Ok(decode_with(bytes, encoding))
        }
        EncodingChoice::Auto => {
            let detected = detect_encoding(bytes);
            match Encoding::for_label(detected.as_bytes()) {
                Some(encoding) if encoding != encoding_rs::UTF_8 => Ok(decode_with(bytes, encoding)),
                Some(_) => decode_utf8(bytes),
                None => {
                    tracing::warn!(detected = %detected, "unsupported charset, decoding as lossy UTF-8");
                    Ok(Decoded {
                        text: String::from_utf8_lossy(strip_bom(bytes)).into_owned(),
                        encoding: "utf-8".to_string(),
                    })
                }
            }
        }
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<Decoded, DecodeError> {
    let text = std::str::from_utf8(strip_bom(bytes)).map_err(|_| DecodeError::InvalidUtf8)?;
    Ok(Decoded {
        text: text.to_string(),
        encoding: "utf-8".to_string(),
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Decoded {
    // decode() sniffs a BOM and may switch encodings
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(encoding = used.name(), "input contained undecodable bytes, replaced");
    }
    Decoded {
        text: text.into_owned(),
        encoding: used.name().to_lowercase(),
    }
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

// =============================================================================
// Line classification
// =============================================================================

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row<'a> {
    /// Introduces a new region; carries the cleaned region name.
    Header(&'a str),
    /// Any other row, split into its raw fields.
    Record(Vec<&'a str>),
}

/// Split text into lines ending at `\r\n`, `\n` or a lone `\r`.
///
/// A terminator at the very end does not produce a trailing empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(end) => {
                let line = &rest[..end];
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + skip..];
                Some(line)
            }
            None => Some(std::mem::take(&mut rest)),
        }
    })
}

/// Classify one input line.
///
/// The line is stripped of surrounding whitespace before splitting, so a
/// line terminator never ends up in the last field. A row whose first field
/// is empty and whose second field is not is a region header. Everything
/// else, an empty line included, is a record.
pub fn classify_line(line: &str, delimiter: char) -> Row<'_> {
    let line = line.trim();
    let fields: Vec<&str> = line.split(delimiter).collect();
    if let ["", raw, ..] = fields[..] {
        if !raw.is_empty() {
            return Row::Header(region_name(raw));
        }
    }
    Row::Record(fields)
}

/// Clean a raw header field into a region name.
///
/// Everything from the first `(` onward is dropped and the rest trimmed:
/// `"Mazowieckie (województwo)"` becomes `"Mazowieckie"`.
pub fn region_name(raw: &str) -> &str {
    raw.split('(').next().unwrap_or(raw).trim()
}
