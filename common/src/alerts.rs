//! Builds the low-stock and expiry notifications raised whenever the
//! inventory changes.

use chrono::NaiveDate;

use crate::model::inventory::InventoryItem;
use crate::model::notification::{NewNotification, NotificationType};
use crate::stats::{expires_within, is_low_stock, ALERT_EXPIRY_WINDOW};

/// Above this many matches a single grouped notification replaces the
/// per-item ones.
pub const INDIVIDUAL_ALERT_LIMIT: usize = 3;

const INVENTORY_LINK: &str = "/inventory";

pub fn derive_alerts(items: &[InventoryItem], today: NaiveDate) -> Vec<NewNotification> {
    let low: Vec<&InventoryItem> = items.iter().filter(|i| is_low_stock(i)).collect();
    let expiring: Vec<&InventoryItem> = items
        .iter()
        .filter(|i| expires_within(i, today, ALERT_EXPIRY_WINDOW))
        .collect();

    let mut alerts = Vec::new();

    if low.len() > INDIVIDUAL_ALERT_LIMIT {
        alerts.push(alert(
            NotificationType::LowStock,
            "Multiple Low Stock Alerts",
            format!("{} items are below minimum stock levels", low.len()),
        ));
    } else {
        alerts.extend(low.iter().map(|item| {
            alert(
                NotificationType::LowStock,
                "Low Stock Alert",
                format!(
                    "{} is running low ({}/{})",
                    item.name, item.current_stock, item.minimum_stock
                ),
            )
        }));
    }

    if expiring.len() > INDIVIDUAL_ALERT_LIMIT {
        alerts.push(alert(
            NotificationType::Expiring,
            "Multiple Expiring Items",
            format!(
                "{} items are expiring within the next month",
                expiring.len()
            ),
        ));
    } else {
        alerts.extend(expiring.iter().filter_map(|item| {
            item.expiry_date.map(|date| {
                alert(
                    NotificationType::Expiring,
                    "Expiring Soon",
                    format!("{} will expire on {}", item.name, date.format("%Y-%m-%d")),
                )
            })
        }));
    }

    alerts
}

fn alert(kind: NotificationType, title: &str, message: String) -> NewNotification {
    NewNotification {
        title: title.to_string(),
        message,
        kind,
        link: Some(INVENTORY_LINK.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::inventory::sample_inventory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_few_low_stock_items_alert_individually() {
        let mut items = sample_inventory();
        for item in &mut items {
            item.expiry_date = None;
        }
        let alerts = derive_alerts(&items, date(2024, 1, 1));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, NotificationType::LowStock);
        assert_eq!(alerts[0].message, "Amoxicillin 250mg is running low (45/60)");
        assert_eq!(alerts[0].link.as_deref(), Some("/inventory"));
    }

    #[test]
    fn test_many_low_stock_items_are_grouped() {
        let mut items = sample_inventory();
        for item in &mut items {
            item.current_stock = 0;
            item.expiry_date = None;
        }
        let alerts = derive_alerts(&items, date(2024, 1, 1));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "Multiple Low Stock Alerts");
        assert_eq!(alerts[0].message, "10 items are below minimum stock levels");
    }

    #[test]
    fn test_expiring_items() {
        let items = sample_inventory();
        // from October 2024 everything up to November counts
        let alerts = derive_alerts(&items, date(2024, 10, 1));
        let expiring: Vec<_> = alerts
            .iter()
            .filter(|a| a.kind == NotificationType::Expiring)
            .collect();
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].title, "Multiple Expiring Items");
        assert_eq!(expiring[0].message, "5 items are expiring within the next month");
    }

    #[test]
    fn test_healthy_inventory_raises_nothing() {
        let mut items = sample_inventory();
        items.retain(|i| i.id == "MED003");
        assert!(derive_alerts(&items, date(2024, 1, 1)).is_empty());
    }
}
