//! Derived statistics over an in-memory inventory collection.
//!
//! All functions are pure; anything that depends on the current date takes
//! `today` explicitly.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::inventory::{InventoryItem, StockLevel};

/// How far ahead an item counts as "expiring soon".
///
/// `Months` compares whole calendar months (`year * 12 + month`), so an item
/// expiring on the last day of next month is one month away. `Days` counts
/// calendar days. Already-expired items fall inside every window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "amount", rename_all = "lowercase")]
pub enum ExpiryWindow {
    Months(i32),
    Days(i64),
}

/// Window behind the "expiring in next 3 months" dashboard card.
pub const DASHBOARD_EXPIRY_WINDOW: ExpiryWindow = ExpiryWindow::Months(3);
/// Window behind the "expiring soon" notifications.
pub const ALERT_EXPIRY_WINDOW: ExpiryWindow = ExpiryWindow::Months(1);

pub fn is_low_stock(item: &InventoryItem) -> bool {
    item.current_stock <= item.minimum_stock
}

pub fn stock_level(item: &InventoryItem) -> StockLevel {
    if is_low_stock(item) {
        StockLevel::Low
    } else if u64::from(item.current_stock) <= u64::from(item.minimum_stock) * 2 {
        StockLevel::Medium
    } else {
        StockLevel::High
    }
}

pub fn expires_within(item: &InventoryItem, today: NaiveDate, window: ExpiryWindow) -> bool {
    let Some(expiry) = item.expiry_date else {
        return false;
    };
    match window {
        ExpiryWindow::Months(months) => {
            let diff = (expiry.year() - today.year()) * 12 + expiry.month() as i32
                - today.month() as i32;
            diff <= months
        }
        ExpiryWindow::Days(days) => (expiry - today).num_days() <= days,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub name: String,
    pub count: usize,
    /// Rounded whole percent of all items.
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevelCount {
    pub level: StockLevel,
    pub label: String,
    pub count: usize,
    /// Percent of all items, one decimal.
    pub percentage: f64,
}

/// Item count per category, largest first; ties keep first-seen order.
pub fn category_counts(items: &[InventoryItem]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|c| c.name == item.category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                name: item.category.clone(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Stock value (`current_stock * unit_price`) per category, rounded to
/// cents, largest first.
pub fn value_by_category(items: &[InventoryItem]) -> Vec<CategoryValue> {
    let mut values: Vec<CategoryValue> = Vec::new();
    for item in items {
        match values.iter_mut().find(|c| c.name == item.category) {
            Some(entry) => entry.value += item.stock_value(),
            None => values.push(CategoryValue {
                name: item.category.clone(),
                value: item.stock_value(),
            }),
        }
    }
    for entry in &mut values {
        entry.value = round_cents(entry.value);
    }
    values.sort_by(|a, b| b.value.total_cmp(&a.value));
    values
}

pub fn stock_level_breakdown(items: &[InventoryItem]) -> Vec<StockLevelCount> {
    [StockLevel::Low, StockLevel::Medium, StockLevel::High]
        .into_iter()
        .map(|level| {
            let count = items.iter().filter(|i| stock_level(i) == level).count();
            let percentage = if items.is_empty() {
                0.0
            } else {
                (count as f64 / items.len() as f64 * 1000.0).round() / 10.0
            };
            StockLevelCount {
                level,
                label: level.label().to_string(),
                count,
                percentage,
            }
        })
        .collect()
}

pub fn total_value(items: &[InventoryItem]) -> f64 {
    round_cents(items.iter().map(InventoryItem::stock_value).sum())
}

/// Low-stock items ordered by how far below minimum they are
/// (`current / minimum`, ascending), truncated to `limit`.
pub fn low_stock_alerts(items: &[InventoryItem], limit: usize) -> Vec<InventoryItem> {
    let ratio = |item: &InventoryItem| {
        if item.minimum_stock == 0 {
            0.0
        } else {
            f64::from(item.current_stock) / f64::from(item.minimum_stock)
        }
    };

    let mut low: Vec<InventoryItem> = items.iter().filter(|i| is_low_stock(i)).cloned().collect();
    low.sort_by(|a, b| ratio(a).total_cmp(&ratio(b)));
    low.truncate(limit);
    low
}

/// Figures shown on the dashboard cards and the overview panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_items: usize,
    pub total_value: f64,
    pub low_stock_count: usize,
    pub low_stock_percentage: u32,
    pub expiring_count: usize,
    pub top_categories: Vec<CategoryShare>,
}

pub const TOP_CATEGORY_LIMIT: usize = 5;

pub fn summarize(items: &[InventoryItem], today: NaiveDate) -> InventorySummary {
    let total_items = items.len();
    let low_stock_count = items.iter().filter(|i| is_low_stock(i)).count();
    let expiring_count = items
        .iter()
        .filter(|i| expires_within(i, today, DASHBOARD_EXPIRY_WINDOW))
        .count();

    let top_categories = category_counts(items)
        .into_iter()
        .take(TOP_CATEGORY_LIMIT)
        .map(|c| CategoryShare {
            percentage: whole_percent(c.count, total_items),
            name: c.name,
            count: c.count,
        })
        .collect();

    InventorySummary {
        total_items,
        total_value: total_value(items),
        low_stock_count,
        low_stock_percentage: whole_percent(low_stock_count, total_items),
        expiring_count,
        top_categories,
    }
}

/// Unique category names, sorted.
pub fn categories(items: &[InventoryItem]) -> Vec<String> {
    let mut names: Vec<String> = items.iter().map(|i| i.category.clone()).collect();
    names.sort();
    names.dedup();
    names
}

/// Search and filter settings of the inventory table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryFilter {
    /// Case-insensitive substring of the name or the id.
    pub search: Option<String>,
    pub category: Option<String>,
    pub stock: Option<StockLevel>,
}

impl InventoryFilter {
    pub fn matches(&self, item: &InventoryItem) -> bool {
        if let Some(query) = self.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            if !item.name.to_lowercase().contains(&query)
                && !item.id.to_lowercase().contains(&query)
            {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if item.category != category {
                return false;
            }
        }
        if let Some(level) = self.stock {
            if stock_level(item) != level {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, items: &[InventoryItem]) -> Vec<InventoryItem> {
        items.iter().filter(|i| self.matches(i)).cloned().collect()
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn whole_percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (part as f64 / total as f64 * 100.0).round() as u32
    }
}
