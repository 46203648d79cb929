//! `inventory_data` table: one row per item, owned by a user.

use chrono::NaiveDate;
use common::model::inventory::InventoryItem;
use rusqlite::{params, Connection, Result, Row};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Replaces every row owned by `user_id` with `items`, keeping their order.
///
/// Delete and insert run in one transaction: a failure part-way leaves the
/// previous rows in place.
pub fn replace_all(conn: &mut Connection, user_id: &str, items: &[InventoryItem]) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM inventory_data WHERE user_id = ?1", params![user_id])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO inventory_data
                (item_id, user_id, name, category, current_stock, minimum_stock, expiry_date, unit_price, supplier, location)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;
        for item in items {
            stmt.execute(params![
                item.id,
                user_id,
                item.name,
                item.category,
                item.current_stock,
                item.minimum_stock,
                item.expiry_date.map(|d| d.format(DATE_FORMAT).to_string()),
                item.unit_price,
                item.supplier,
                item.location,
            ])?;
        }
    }
    tx.commit()
}

/// Rows owned by `user_id`, in insertion order.
pub fn list_all(conn: &Connection, user_id: &str) -> Result<Vec<InventoryItem>> {
    let mut stmt = conn.prepare(
        "SELECT item_id, name, category, current_stock, minimum_stock, expiry_date, unit_price, supplier, location
         FROM inventory_data
         WHERE user_id = ?1
         ORDER BY row_id",
    )?;

    let items = stmt
        .query_map(params![user_id], row_to_item)?
        .collect::<Result<Vec<_>>>()?;
    Ok(items)
}

fn row_to_item(row: &Row) -> Result<InventoryItem> {
    let expiry: Option<String> = row.get(5)?;
    let price: f64 = row.get(6)?;
    Ok(InventoryItem {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        current_stock: row.get(3)?,
        minimum_stock: row.get(4)?,
        expiry_date: expiry.and_then(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT).ok()),
        unit_price: if price.is_finite() { price.max(0.0) } else { 0.0 },
        supplier: row.get(7)?,
        location: row.get(8)?,
    })
}
