use csv::{QuoteStyle, WriterBuilder};
use thiserror::Error;

use crate::model::inventory::InventoryItem;

/// Column order of exported files.
pub const EXPORT_HEADERS: [&str; 7] = [
    "id",
    "name",
    "category",
    "currentStock",
    "minimumStock",
    "expiryDate",
    "unitPrice",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Write(#[from] csv::Error),
    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

/// Writes `items` as comma-joined lines under [`EXPORT_HEADERS`].
///
/// Values are never quoted, matching the importer, so a value containing a
/// comma does not survive a round trip.
pub fn export_csv(items: &[InventoryItem]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for item in items {
        let current = item.current_stock.to_string();
        let minimum = item.minimum_stock.to_string();
        let price = item.unit_price.to_string();
        let expiry = item
            .expiry_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        writer.write_record([
            item.id.as_str(),
            item.name.as_str(),
            item.category.as_str(),
            current.as_str(),
            minimum.as_str(),
            expiry.as_str(),
            price.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::inventory::sample_inventory;

    #[test]
    fn test_header_and_row_layout() {
        let items = sample_inventory();
        let csv = export_csv(&items[..1]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "id,name,category,currentStock,minimumStock,expiryDate,unitPrice"
        );
        assert_eq!(
            lines[1],
            "MED001,Paracetamol 500mg,Pain Relief,120,50,2024-12-31,0.15"
        );
    }

    #[test]
    fn test_missing_expiry_is_empty_and_commas_are_not_escaped() {
        let mut item = sample_inventory().remove(0);
        item.expiry_date = None;
        item.name = "Aspirin, 75mg".to_string();
        let csv = export_csv(&[item]).unwrap();
        assert!(csv.contains("MED001,Aspirin, 75mg,Pain Relief,120,50,,0.15"));
    }

    #[test]
    fn test_empty_collection_exports_header_only() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), EXPORT_HEADERS.join(","));
    }
}
