use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// One data line of an uploaded file, keyed by the verbatim (trimmed) header.
///
/// Values are kept as strings; nothing is coerced until the record goes
/// through [`crate::ingest::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `header` to `value`. A repeated header overwrites the earlier one.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(header.into(), value.into());
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields.get(header).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Canonical inventory record used by every other part of the system.
///
/// Stock counts are unsigned and `unit_price` is always a finite,
/// non-negative number; the ingest layer guarantees both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub current_stock: u32,
    pub minimum_stock: u32,
    pub unit_price: f64,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl InventoryItem {
    /// Stock value of this line (`current_stock * unit_price`).
    pub fn stock_value(&self) -> f64 {
        f64::from(self.current_stock) * self.unit_price
    }

    /// Merges the fields present in `patch` into this item.
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(current) = patch.current_stock {
            self.current_stock = current;
        }
        if let Some(minimum) = patch.minimum_stock {
            self.minimum_stock = minimum;
        }
        if let Some(price) = patch.unit_price {
            if price.is_finite() {
                self.unit_price = price.max(0.0);
            }
        }
        if let Some(date) = patch.expiry_date {
            self.expiry_date = date;
        }
        if let Some(supplier) = &patch.supplier {
            self.supplier = non_empty(supplier);
        }
        if let Some(location) = &patch.location {
            self.location = non_empty(location);
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Partial update of an [`InventoryItem`]; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub current_stock: Option<u32>,
    pub minimum_stock: Option<u32>,
    pub unit_price: Option<f64>,
    /// `null` clears the expiry date; an absent field leaves it untouched.
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_date: Option<Option<NaiveDate>>,
    /// An empty string clears the supplier.
    pub supplier: Option<String>,
    /// An empty string clears the location.
    pub location: Option<String>,
}

/// Maps a present field (value or `null`) to `Some`; `#[serde(default)]`
/// covers the absent case.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Stock bucket shown in the inventory table and the analytics breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Low,
    Medium,
    High,
}

impl StockLevel {
    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::Low => "Low Stock",
            StockLevel::Medium => "Medium Stock",
            StockLevel::High => "High Stock",
        }
    }
}

impl std::str::FromStr for StockLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(StockLevel::Low),
            "medium" => Ok(StockLevel::Medium),
            "high" => Ok(StockLevel::High),
            other => Err(format!("unknown stock level '{}'", other)),
        }
    }
}

/// Inventory a new dashboard starts with before any file is uploaded.
pub fn sample_inventory() -> Vec<InventoryItem> {
    let rows: [(&str, &str, &str, u32, u32, (i32, u32, u32), f64, &str, &str); 10] = [
        ("MED001", "Paracetamol 500mg", "Pain Relief", 120, 50, (2024, 12, 31), 0.15, "PharmaCorp", "Shelf A1"),
        ("MED002", "Amoxicillin 250mg", "Antibiotics", 45, 60, (2024, 10, 15), 0.45, "MediSource", "Shelf B2"),
        ("MED003", "Ibuprofen 200mg", "Anti-inflammatory", 85, 40, (2025, 1, 20), 0.20, "PharmaCorp", "Shelf A2"),
        ("MED004", "Loratadine 10mg", "Antihistamine", 65, 30, (2024, 11, 5), 0.30, "AllergyCare", "Shelf C1"),
        ("MED005", "Omeprazole 20mg", "Gastric", 95, 40, (2024, 9, 30), 0.40, "DigestHealth", "Shelf D2"),
        ("MED006", "Metformin 500mg", "Diabetes", 110, 60, (2025, 2, 28), 0.25, "GlucoHelp", "Shelf E1"),
        ("MED007", "Aspirin 75mg", "Anti-platelet", 75, 50, (2024, 8, 15), 0.10, "HeartCare", "Shelf A3"),
        ("MED008", "Lisinopril 10mg", "Hypertension", 50, 40, (2024, 12, 10), 0.35, "CardioHealth", "Shelf F2"),
        ("MED009", "Atorvastatin 20mg", "Cholesterol", 85, 40, (2025, 3, 20), 0.55, "LipidCare", "Shelf G1"),
        ("MED010", "Levothyroxine 50mcg", "Thyroid", 35, 30, (2024, 11, 25), 0.40, "ThyroSource", "Shelf H3"),
    ];

    rows.into_iter()
        .map(
            |(id, name, category, current, minimum, (y, m, d), price, supplier, location)| {
                InventoryItem {
                    id: id.to_string(),
                    name: name.to_string(),
                    category: category.to_string(),
                    current_stock: current,
                    minimum_stock: minimum,
                    unit_price: price,
                    expiry_date: NaiveDate::from_ymd_opt(y, m, d),
                    supplier: Some(supplier.to_string()),
                    location: Some(location.to_string()),
                }
            },
        )
        .collect()
}
