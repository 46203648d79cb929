use csv::{ReaderBuilder, Trim};
use thiserror::Error;

use crate::model::inventory::RawRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("the file has no header line")]
    MissingHeader,
    #[error("the header line is empty")]
    EmptyHeader,
    #[error("unreadable CSV content: {0}")]
    Read(String),
}

/// Splits `text` into one [`RawRecord`] per non-blank data line.
///
/// The first line is the header row. Fields are split on `,` with no quote
/// handling, so a value containing a comma shifts the columns after it.
/// Missing trailing fields become empty strings; surplus fields are dropped.
pub fn parse(text: &str) -> Result<Vec<RawRecord>, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let header_line = text.lines().next().ok_or(ParseError::MissingHeader)?;
    if header_line.split(',').all(|h| h.trim().is_empty()) {
        return Err(ParseError::EmptyHeader);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    let mut rows = reader.records();

    let headers: Vec<String> = match rows.next() {
        Some(row) => row
            .map_err(|e| ParseError::Read(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect(),
        None => return Err(ParseError::MissingHeader),
    };

    let mut records = Vec::new();
    for row in rows {
        let row = row.map_err(|e| ParseError::Read(e.to_string()))?;
        // whitespace-only line
        if row.len() == 1 && row[0].is_empty() {
            continue;
        }

        let record: RawRecord = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (header.as_str(), row.get(idx).unwrap_or("")))
            .collect();
        records.push(record);
    }

    Ok(records)
}
