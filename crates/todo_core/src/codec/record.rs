//! Pipe-delimited record format.
//!
//! One record per line: `<0|1>|<created_at>|<text>`. Text is written
//! verbatim with no escaping, so it may itself contain pipes.
//!
//! # Invariants
//! - `decode_records(encode_records(items)?)` reproduces `items` for any
//!   texts without `\n`, whatever other bytes they hold.
//! - Encoding rejects text containing `\n` instead of splitting the record.
//! - Decoding accepts every text encoding produces, so a loaded list can
//!   always be saved again.

use crate::model::todo::{TodoItem, TodoValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const FIELD_DELIMITER: u8 = b'|';

/// Error for one storage line that cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Line lacks the first or second `|`.
    MissingDelimiter,
    /// Field between the delimiters is not an integer.
    InvalidTimestamp { value: String },
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDelimiter => write!(f, "record is missing a `|` delimiter"),
            Self::InvalidTimestamp { value } => {
                write!(f, "record timestamp `{value}` is not an integer")
            }
        }
    }
}

impl Error for RecordError {}

/// Error for an item that cannot be written as a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError {
    /// Position of the offending item in the encoded slice.
    pub index: usize,
    pub source: TodoValidationError,
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot encode todo #{}: {}", self.index, self.source)
    }
}

impl Error for EncodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// A line skipped while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based line number in the decoded input.
    pub line: usize,
    pub reason: RecordError,
}

/// Result of decoding a whole storage file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodeReport {
    /// Successfully decoded items in file order.
    pub items: Vec<TodoItem>,
    /// Malformed lines that were dropped.
    pub skipped: Vec<SkippedRecord>,
}

/// Encodes one item as a record line, without the trailing newline.
pub fn encode_record(item: &TodoItem) -> Result<Vec<u8>, TodoValidationError> {
    item.validate()?;
    let mut record = format!(
        "{}{}{}{}",
        u8::from(item.completed),
        FIELD_DELIMITER as char,
        item.created_at,
        FIELD_DELIMITER as char
    )
    .into_bytes();
    record.extend_from_slice(item.text.as_bytes());
    Ok(record)
}

/// Encodes all items, each record terminated by `\n`.
pub fn encode_records(items: &[TodoItem]) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let record = encode_record(item).map_err(|source| EncodeError { index, source })?;
        out.extend_from_slice(&record);
        out.push(b'\n');
    }
    Ok(out)
}

/// Parses one record line.
///
/// The completion flag is the first byte of the line (`1` means done,
/// anything else pending). The timestamp tolerates surrounding ASCII
/// whitespace. Everything after the second delimiter is the text, byte for
/// byte.
pub fn parse_record(line: impl AsRef<[u8]>) -> Result<TodoItem, RecordError> {
    let line = line.as_ref();
    let first = find_delimiter(line).ok_or(RecordError::MissingDelimiter)?;
    let rest = &line[first + 1..];
    let second = find_delimiter(rest).ok_or(RecordError::MissingDelimiter)?;

    let raw_timestamp = &rest[..second];
    let created_at = std::str::from_utf8(raw_timestamp)
        .ok()
        .and_then(|value| {
            value
                .trim_matches(|c: char| c.is_ascii_whitespace())
                .parse::<i64>()
                .ok()
        })
        .ok_or_else(|| RecordError::InvalidTimestamp {
            value: String::from_utf8_lossy(raw_timestamp).into_owned(),
        })?;

    let completed = line.first() == Some(&b'1');
    let text = rest[second + 1..].to_vec();

    Ok(TodoItem::with_created_at(text, completed, created_at))
}

/// Decodes a whole storage file, skipping malformed lines.
///
/// Lines end at `\n` only; any `\r` stays part of the text so that saving
/// writes back exactly what was read. Lines that are empty or a lone `\r`
/// are ignored and not reported.
pub fn decode_records(input: impl AsRef<[u8]>) -> DecodeReport {
    let mut report = DecodeReport::default();

    for (offset, line) in input.as_ref().split(|byte| *byte == b'\n').enumerate() {
        if line.is_empty() || line == b"\r" {
            continue;
        }
        match parse_record(line) {
            Ok(item) => report.items.push(item),
            Err(reason) => report.skipped.push(SkippedRecord {
                line: offset + 1,
                reason,
            }),
        }
    }

    report
}

fn find_delimiter(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|byte| *byte == FIELD_DELIMITER)
}
