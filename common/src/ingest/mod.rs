//! CSV ingestion pipeline: delimited text -> [`RawRecord`]s -> [`InventoryItem`]s,
//! plus the inverse export used by the "Export" button.
//!
//! The pipeline is deliberately lenient. Only a structurally unusable file
//! (no header line) is rejected; unparseable numbers become `0` and
//! unrecognized dates are dropped.
//!
//! [`RawRecord`]: crate::model::inventory::RawRecord
//! [`InventoryItem`]: crate::model::inventory::InventoryItem

pub mod aliases;
mod export;
mod normalize;
mod parser;

pub use export::{export_csv, ExportError, EXPORT_HEADERS};
pub use normalize::{
    normalize, normalize_all, normalize_date, parse_count, parse_price, DEFAULT_CATEGORY,
    DEFAULT_NAME,
};
pub use parser::{parse, ParseError};

use crate::model::inventory::InventoryItem;

/// Parses and normalizes an uploaded file in one step.
///
/// Produces one item per non-blank data line, in file order.
pub fn import(text: &str) -> Result<Vec<InventoryItem>, ParseError> {
    let records = parse(text)?;
    Ok(normalize_all(records))
}
