//! Explicit state container for one user's dashboard.
//!
//! Follows an Elm-style layout: [`DashboardState`] holds the data, [`Msg`]
//! names every transition and [`update`] applies one message to the state.
//! Nothing outside `update` mutates the state.

mod messages;
mod update;

pub use messages::Msg;
pub use update::update;

use serde::Serialize;

use crate::model::inventory::{sample_inventory, InventoryItem};
use crate::model::notification::Notification;

/// Oldest notifications are dropped beyond this many.
pub const MAX_NOTIFICATIONS: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    /// Current inventory collection, in upload order.
    pub inventory: Vec<InventoryItem>,
    /// Notifications, newest first.
    pub notifications: Vec<Notification>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dashboard pre-filled with the sample inventory.
    pub fn with_sample_inventory() -> Self {
        Self {
            inventory: sample_inventory(),
            notifications: Vec::new(),
        }
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn item(&self, id: &str) -> Option<&InventoryItem> {
        self.inventory.iter().find(|item| item.id == id)
    }
}
