//! Request and response payloads exchanged with the HTTP API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ingest::{DEFAULT_CATEGORY, DEFAULT_NAME};
use crate::model::inventory::{InventoryItem, StockLevel};
use crate::stats::InventoryFilter;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignInRequest {
    pub email: String,
    /// Accepted and ignored by the mock session.
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: String,
    pub user: crate::model::session::SessionUser,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Returned as soon as an upload is parsed and loaded in memory; the
/// persistence job runs on after the response.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub job_id: String,
    pub imported: usize,
}

/// Query string of the inventory table and the export.
///
/// Kept as plain strings so that empty form values (`?stock=`) mean "no filter".
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InventoryQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub stock: Option<String>,
}

impl InventoryQuery {
    pub fn to_filter(&self) -> Result<InventoryFilter, String> {
        let stock = match self.stock.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(level) => Some(level.parse::<StockLevel>()?),
        };
        Ok(InventoryFilter {
            search: self.search.clone(),
            category: self.category.clone(),
            stock,
        })
    }
}

/// "Add Item" form.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub current_stock: u32,
    #[serde(default)]
    pub minimum_stock: u32,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl CreateItemRequest {
    pub fn into_item(self) -> InventoryItem {
        let text = |value: Option<String>| value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        InventoryItem {
            id: text(self.id).unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: text(self.name).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            category: text(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            current_stock: self.current_stock,
            minimum_stock: self.minimum_stock,
            unit_price: if self.unit_price.is_finite() && self.unit_price > 0.0 {
                self.unit_price
            } else {
                0.0
            },
            expiry_date: self.expiry_date,
            supplier: text(self.supplier),
            location: text(self.location),
        }
    }
}
