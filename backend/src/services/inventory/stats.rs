use actix_web::{web, HttpResponse, Responder};
use common::stats::{
    category_counts, low_stock_alerts, stock_level_breakdown, summarize, value_by_category,
    CategoryCount, CategoryValue, InventorySummary, StockLevelCount,
};
use serde::Serialize;

use crate::app_state::{today, AppState, CurrentUser};

/// Number of rows in the dashboard's low-stock panel.
const LOW_STOCK_PANEL_LIMIT: usize = 5;

/// Everything the dashboard and analytics pages chart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub summary: InventorySummary,
    pub stock_levels: Vec<StockLevelCount>,
    pub value_by_category: Vec<CategoryValue>,
    pub category_counts: Vec<CategoryCount>,
}

pub async fn process(state: web::Data<AppState>, current: CurrentUser) -> impl Responder {
    let items = state.inventory(&current.user.id).await;
    HttpResponse::Ok().json(InventoryStats {
        summary: summarize(&items, today()),
        stock_levels: stock_level_breakdown(&items),
        value_by_category: value_by_category(&items),
        category_counts: category_counts(&items),
    })
}

pub async fn low_stock(state: web::Data<AppState>, current: CurrentUser) -> impl Responder {
    let items = state.inventory(&current.user.id).await;
    HttpResponse::Ok().json(low_stock_alerts(&items, LOW_STOCK_PANEL_LIMIT))
}
