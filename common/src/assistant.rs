//! Canned inventory assistant.
//!
//! Questions are routed by keyword to a handful of answers computed from the
//! current collection; anything else gets the placeholder reply.

use chrono::NaiveDate;

use crate::model::inventory::InventoryItem;
use crate::stats::{
    category_counts, expires_within, low_stock_alerts, total_value, DASHBOARD_EXPIRY_WINDOW,
};

const LISTED_ITEMS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    LowStock,
    Expiring,
    Value,
    Categories,
    Count,
}

const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (Topic::LowStock, &["low stock", "reorder", "running low", "shortage"]),
    (Topic::Expiring, &["expir", "expire"]),
    (Topic::Value, &["value", "worth", "cost"]),
    (Topic::Categories, &["categor"]),
    (Topic::Count, &["how many", "count", "total items"]),
];

pub fn reply(query: &str, items: &[InventoryItem], today: NaiveDate) -> String {
    let lowered = query.to_lowercase();
    let topic = TOPIC_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(topic, _)| *topic);

    match topic {
        Some(Topic::LowStock) => low_stock_reply(items),
        Some(Topic::Expiring) => expiring_reply(items, today),
        Some(Topic::Value) => format!(
            "The total value of your inventory is {:.2} across {} items.",
            total_value(items),
            items.len()
        ),
        Some(Topic::Categories) => {
            let counts = category_counts(items);
            if counts.is_empty() {
                return "There is no inventory data yet.".to_string();
            }
            let listed: Vec<String> = counts
                .iter()
                .map(|c| format!("{} ({})", c.name, c.count))
                .collect();
            format!("You have {} categories: {}.", counts.len(), listed.join(", "))
        }
        Some(Topic::Count) => format!("You currently track {} items.", items.len()),
        None => format!(
            "This is a placeholder response to your query: \"{}\". In the future, this will connect to an AI service.",
            query
        ),
    }
}

fn low_stock_reply(items: &[InventoryItem]) -> String {
    let low = low_stock_alerts(items, items.len());
    if low.is_empty() {
        return "There are no items below minimum stock levels.".to_string();
    }
    let listed: Vec<String> = low
        .iter()
        .take(LISTED_ITEMS)
        .map(|i| format!("{} ({}/{})", i.name, i.current_stock, i.minimum_stock))
        .collect();
    format!(
        "{} items are at or below minimum stock: {}.",
        low.len(),
        listed.join(", ")
    )
}

fn expiring_reply(items: &[InventoryItem], today: NaiveDate) -> String {
    let mut expiring: Vec<&InventoryItem> = items
        .iter()
        .filter(|i| expires_within(i, today, DASHBOARD_EXPIRY_WINDOW))
        .collect();
    if expiring.is_empty() {
        return "No items expire in the next 3 months.".to_string();
    }
    expiring.sort_by_key(|i| i.expiry_date);
    let listed: Vec<String> = expiring
        .iter()
        .take(LISTED_ITEMS)
        .filter_map(|i| {
            i.expiry_date
                .map(|d| format!("{} ({})", i.name, d.format("%Y-%m-%d")))
        })
        .collect();
    format!(
        "{} items expire in the next 3 months, soonest first: {}.",
        expiring.len(),
        listed.join(", ")
    )
}
