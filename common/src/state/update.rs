use super::messages::Msg;
use super::{DashboardState, MAX_NOTIFICATIONS};

/// Applies `msg` to `state`.
///
/// Returns `true` when the state changed. Messages naming an unknown item or
/// notification id are ignored, and so is adding an item whose id is taken.
pub fn update(state: &mut DashboardState, msg: Msg) -> bool {
    match msg {
        Msg::SetInventory(items) => {
            state.inventory = items;
            true
        }
        Msg::AddItem(item) => {
            if state.item(&item.id).is_some() {
                return false;
            }
            state.inventory.push(item);
            true
        }
        Msg::UpdateItem { id, patch } => {
            match state.inventory.iter_mut().find(|item| item.id == id) {
                Some(item) => {
                    item.apply(&patch);
                    true
                }
                None => false,
            }
        }
        Msg::RemoveItem(id) => {
            let before = state.inventory.len();
            state.inventory.retain(|item| item.id != id);
            state.inventory.len() != before
        }
        Msg::AddNotification {
            id,
            created_at,
            notification,
        } => {
            state
                .notifications
                .insert(0, notification.into_notification(id, created_at));
            state.notifications.truncate(MAX_NOTIFICATIONS);
            true
        }
        Msg::MarkAsRead(id) => {
            match state
                .notifications
                .iter_mut()
                .find(|n| n.id == id && !n.read)
            {
                Some(notification) => {
                    notification.read = true;
                    true
                }
                None => false,
            }
        }
        Msg::MarkAllAsRead => {
            let mut changed = false;
            for notification in state.notifications.iter_mut().filter(|n| !n.read) {
                notification.read = true;
                changed = true;
            }
            changed
        }
        Msg::RemoveNotification(id) => {
            let before = state.notifications.len();
            state.notifications.retain(|n| n.id != id);
            state.notifications.len() != before
        }
        Msg::ClearNotifications => {
            let changed = !state.notifications.is_empty();
            state.notifications.clear();
            changed
        }
    }
}
