use chrono::{DateTime, Utc};

use crate::model::inventory::{InventoryItem, ItemPatch};
use crate::model::notification::NewNotification;

/// Every state transition of a [`super::DashboardState`].
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Replaces the whole collection (CSV upload, reload from storage).
    SetInventory(Vec<InventoryItem>),
    AddItem(InventoryItem),
    UpdateItem { id: String, patch: ItemPatch },
    RemoveItem(String),
    /// The caller supplies id and timestamp so that `update` stays deterministic.
    AddNotification {
        id: String,
        created_at: DateTime<Utc>,
        notification: NewNotification,
    },
    MarkAsRead(String),
    MarkAllAsRead,
    RemoveNotification(String),
    ClearNotifications,
}
