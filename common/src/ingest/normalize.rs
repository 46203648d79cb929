use chrono::NaiveDate;
use uuid::Uuid;

use super::aliases::{resolve, Field};
use crate::model::inventory::{InventoryItem, RawRecord};

pub const DEFAULT_NAME: &str = "Unnamed Item";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Accepted date shapes, tried in order. `#` stands for one ASCII digit.
const DATE_PATTERNS: [(&str, &str); 3] = [
    ("####-##-##", "%Y-%m-%d"),
    ("##-##-####", "%d-%m-%Y"),
    ("##/##/####", "%m/%d/%Y"),
];

/// Converts one raw row into a canonical item. Never fails.
pub fn normalize(record: &RawRecord) -> InventoryItem {
    let text = |field| resolve(record, field).map(str::to_string);

    InventoryItem {
        id: text(Field::Id).unwrap_or_else(|| Uuid::new_v4().to_string()),
        name: text(Field::Name).unwrap_or_else(|| DEFAULT_NAME.to_string()),
        category: text(Field::Category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        current_stock: resolve(record, Field::CurrentStock).map_or(0, parse_count),
        minimum_stock: resolve(record, Field::MinimumStock).map_or(0, parse_count),
        unit_price: resolve(record, Field::UnitPrice).map_or(0.0, parse_price),
        expiry_date: resolve(record, Field::ExpiryDate).and_then(normalize_date),
        supplier: text(Field::Supplier),
        location: text(Field::Location),
    }
}

pub fn normalize_all(records: Vec<RawRecord>) -> Vec<InventoryItem> {
    records.iter().map(normalize).collect()
}

/// Reads the leading integer of `value` (`"12.7"` -> 12, `"8 boxes"` -> 8).
///
/// Anything without leading digits is 0, negative numbers clamp to 0 and
/// values past `u32::MAX` saturate.
pub fn parse_count(value: &str) -> u32 {
    let value = value.trim();
    if value.starts_with('-') {
        return 0;
    }
    let digits = value.strip_prefix('+').unwrap_or(value);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }

    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(u32::MAX)
}

/// Parses a price. Unparseable, non-finite and negative input all yield 0.
pub fn parse_price(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => price,
        _ => 0.0,
    }
}

/// Accepts `YYYY-MM-DD`, `DD-MM-YYYY` or `MM/DD/YYYY`; the first matching
/// pattern wins. Calendar-invalid dates and every other shape give `None`.
pub fn normalize_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_PATTERNS
        .iter()
        .filter(|(shape, _)| has_shape(value, shape))
        .find_map(|(_, format)| NaiveDate::parse_from_str(value, format).ok())
}

fn has_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(v, s)| match s {
            b'#' => v.is_ascii_digit(),
            _ => v == s,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(value: &str) -> Option<String> {
        normalize_date(value).map(|d| d.format("%Y-%m-%d").to_string())
    }

    #[test]
    fn test_date_patterns() {
        assert_eq!(iso("31-12-2024").as_deref(), Some("2024-12-31"));
        assert_eq!(iso("12/31/2024").as_deref(), Some("2024-12-31"));
        assert_eq!(iso("2024-12-31").as_deref(), Some("2024-12-31"));
        assert_eq!(iso("not-a-date"), None);
    }

    #[test]
    fn test_invalid_calendar_dates_are_dropped() {
        assert_eq!(iso("2024-02-30"), None);
        assert_eq!(iso("31/12/2024"), None);
        assert_eq!(iso("1-2-2024"), None);
        assert_eq!(iso(""), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("42"), 42);
        assert_eq!(parse_count(" 12.7 "), 12);
        assert_eq!(parse_count("8 boxes"), 8);
        assert_eq!(parse_count("-5"), 0);
        assert_eq!(parse_count("+3"), 3);
        assert_eq!(parse_count("99999999999999"), u32::MAX);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("12.5"), 12.5);
        assert_eq!(parse_price("abc"), 0.0);
        assert_eq!(parse_price("-1.5"), 0.0);
        assert_eq!(parse_price("NaN"), 0.0);
        assert_eq!(parse_price("inf"), 0.0);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let item = normalize(&RawRecord::new());
        assert_eq!(item.name, DEFAULT_NAME);
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.current_stock, 0);
        assert_eq!(item.minimum_stock, 0);
        assert_eq!(item.unit_price, 0.0);
        assert_eq!(item.expiry_date, None);
        assert_eq!(item.supplier, None);
        assert!(Uuid::parse_str(&item.id).is_ok());
    }

    #[test]
    fn test_source_id_is_kept() {
        let record: RawRecord = [("ID", "MED042"), ("unit_price", "0.35")].into_iter().collect();
        let item = normalize(&record);
        assert_eq!(item.id, "MED042");
        assert_eq!(item.unit_price, 0.35);
    }
}
