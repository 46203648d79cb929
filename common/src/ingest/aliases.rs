//! Header aliases accepted for each canonical inventory field.
//!
//! Matching is exact and case-sensitive against the lists below; the order of
//! each list is the probing order.

use crate::model::inventory::RawRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Category,
    CurrentStock,
    MinimumStock,
    UnitPrice,
    ExpiryDate,
    Supplier,
    Location,
}

pub const ALIAS_TABLE: &[(Field, &[&str])] = &[
    (Field::Id, &["id", "ID", "Id"]),
    (Field::Name, &["name", "Name"]),
    (Field::Category, &["category", "Category"]),
    (Field::CurrentStock, &["currentStock", "current_stock", "Current Stock"]),
    (Field::MinimumStock, &["minimumStock", "minimum_stock", "Minimum Stock"]),
    (Field::UnitPrice, &["unitPrice", "unit_price", "Unit Price"]),
    (Field::ExpiryDate, &["expiryDate", "expiry_date", "Expiry Date"]),
    (Field::Supplier, &["supplier", "Supplier"]),
    (Field::Location, &["location", "Location"]),
];

impl Field {
    pub fn aliases(self) -> &'static [&'static str] {
        ALIAS_TABLE
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[])
    }

    /// The camelCase name used in JSON and in exported files.
    pub fn canonical_name(self) -> &'static str {
        self.aliases()[0]
    }
}

/// Returns the first alias of `field` that is present in `record` with a
/// non-empty value.
pub fn resolve(record: &RawRecord, field: Field) -> Option<&str> {
    field
        .aliases()
        .iter()
        .filter_map(|alias| record.get(alias))
        .find(|value| !value.is_empty())
}
