//! Group flat region/settlement lines into a nested document.
//!
//! ```text
//! Input (flat lines)                        →  Output (grouped)
//! ┌───────────────────────────────────┐       ┌──────────────────────────┐
//! │ ,Mazowieckie (województwo)        │       │ Mazowieckie              │
//! │ 0101,Warszawa,warszawski,...      │  →    │   [Warszawa, Radom]      │
//! │ 0102,Radom,radomski,...           │       ├──────────────────────────┤
//! │ ,Lubelskie (województwo)          │       │ Lubelskie                │
//! │ 0601,Lublin,lubelski,...          │       │   [Lublin]               │
//! └───────────────────────────────────┘       └──────────────────────────┘
//! ```
//!
//! The pass is a fold: the current region lives in the [`Grouper`]
//! accumulator and changes only on header rows.

use crate::error::{ParseError, ParseResult};
use crate::models::{RegionsDocument, Settlement};
use crate::parser::{classify_line, split_lines, Row};

/// Counters collected while grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupStats {
    pub header_rows: usize,
    pub record_rows: usize,
    /// Headers naming a region that was already registered.
    pub reopened_regions: usize,
}

/// Grouped document with the counters of the pass that built it.
#[derive(Debug, Clone, Default)]
pub struct GroupedRegions {
    pub document: RegionsDocument,
    pub stats: GroupStats,
}

/// Accumulator for one grouping pass.
#[derive(Debug, Default)]
pub struct Grouper {
    document: RegionsDocument,
    current: Option<usize>,
    stats: GroupStats,
}

impl Grouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line. `line_no` is 1-based and only used for error reporting.
    pub fn feed(mut self, line_no: usize, line: &str, delimiter: char) -> ParseResult<Self> {
        match classify_line(line, delimiter) {
            Row::Header(name) => {
                let (index, reopened) = self.document.register(name);
                if reopened {
                    tracing::warn!(line = line_no, region = name, "region header repeated, earlier settlements dropped");
                    self.stats.reopened_regions += 1;
                } else {
                    tracing::debug!(line = line_no, region = name, "region header");
                }
                self.current = Some(index);
                self.stats.header_rows += 1;
            }
            Row::Record(fields) => {
                let index = self.current.ok_or(ParseError::MissingRegion { line: line_no })?;
                let settlement = Settlement::from_fields(&fields).ok_or(ParseError::MalformedRecord {
                    line: line_no,
                    expected: Settlement::FIELD_COUNT,
                    found: fields.len(),
                })?;
                self.document.push(index, settlement);
                self.stats.record_rows += 1;
            }
        }
        Ok(self)
    }

    pub fn finish(self) -> GroupedRegions {
        GroupedRegions {
            document: self.document,
            stats: self.stats,
        }
    }
}

/// Group lines, in order, into a document.
///
/// Stops at the first malformed or out-of-place record.
pub fn group_lines<'a, I>(lines: I, delimiter: char) -> ParseResult<GroupedRegions>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .enumerate()
        .try_fold(Grouper::new(), |grouper, (idx, line)| grouper.feed(idx + 1, line, delimiter))
        .map(Grouper::finish)
}

/// Group the lines of a whole text.
///
/// `\r\n`, `\n` and a lone `\r` all end a line.
pub fn group_str(text: &str, delimiter: char) -> ParseResult<GroupedRegions> {
    group_lines(split_lines(text), delimiter)
}
