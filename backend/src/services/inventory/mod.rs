//! Inventory table endpoints.
//!
//! - `GET /api/inventory?search=&category=&stock=`: filtered rows.
//! - `GET /api/inventory/categories`: unique category names for the filter.
//! - `POST /api/inventory/items`, `PUT|DELETE /api/inventory/items/{id}`:
//!   single-item edits. Each edit schedules the same replace-all job as an
//!   upload and answers with its id.
//! - `POST /api/inventory/sync`: reloads the in-memory collection from storage.
//! - `GET /api/inventory/stats`, `GET /api/inventory/low_stock`: dashboard
//!   figures.

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

mod items;
mod list;
mod stats;
mod sync;

const API_PATH: &str = "/api/inventory";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/categories", get().to(list::categories))
        .route("/items", post().to(items::add))
        .route("/items/{id}", put().to(items::update))
        .route("/items/{id}", delete().to(items::remove))
        .route("/sync", post().to(sync::process))
        .route("/stats", get().to(stats::process))
        .route("/low_stock", get().to(stats::low_stock))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};
    use common::jobs::JobStatus;
    use common::model::inventory::InventoryItem;
    use serde_json::{json, Value};

    use crate::db::inventory;
    use crate::services::test_support::context;

    macro_rules! app {
        ($ctx:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($ctx.state.clone()))
                    .service(configure_routes()),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_list_filters() {
        let ctx = context(true).await;
        let app = app!(ctx);

        let req = ctx.get("/api/inventory").to_request();
        let all: Vec<InventoryItem> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 10);

        let req = ctx.get("/api/inventory?search=AMOX").to_request();
        let found: Vec<InventoryItem> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "MED002");

        let req = ctx.get("/api/inventory?stock=low").to_request();
        let low: Vec<InventoryItem> = test::call_and_read_body_json(&app, req).await;
        assert!(low.iter().all(|i| i.current_stock <= i.minimum_stock));

        let req = ctx.get("/api/inventory?stock=plenty").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn test_categories_are_sorted_and_unique() {
        let ctx = context(true).await;
        let app = app!(ctx);

        let req = ctx.get("/api/inventory/categories").to_request();
        let names: Vec<String> = test::call_and_read_body_json(&app, req).await;
        let mut expected = names.clone();
        expected.sort();
        expected.dedup();
        assert_eq!(names, expected);
        assert!(names.contains(&"Antibiotics".to_string()));
    }

    #[actix_web::test]
    async fn test_item_edits_are_persisted() {
        let ctx = context(false).await;
        let app = app!(ctx);

        let req = ctx
            .post("/api/inventory/items")
            .set_json(json!({"id": "GZ1", "name": "Gauze", "category": "Supplies",
                             "currentStock": 4, "minimumStock": 10, "unitPrice": 2.5}))
            .to_request();
        let receipt: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(receipt["items"], 1);
        let job_id = receipt["jobId"].as_str().unwrap().to_string();
        assert!(matches!(ctx.wait_for_job(&job_id).await, JobStatus::Completed(_)));

        let req = ctx
            .post("/api/inventory/items")
            .set_json(json!({"id": "GZ1", "name": "Duplicate"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        let req = ctx
            .put("/api/inventory/items/GZ1")
            .set_json(json!({"currentStock": 40}))
            .to_request();
        let receipt: Value = test::call_and_read_body_json(&app, req).await;
        let job_id = receipt["jobId"].as_str().unwrap().to_string();
        ctx.wait_for_job(&job_id).await;

        let conn = ctx.state.db.connect().unwrap();
        let stored = inventory::list_all(&conn, &ctx.user.id).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].current_stock, 40);
        assert_eq!(stored[0].name, "Gauze");

        let req = ctx.delete("/api/inventory/items/GZ1").to_request();
        let receipt: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(receipt["items"], 0);
        let job_id = receipt["jobId"].as_str().unwrap().to_string();
        ctx.wait_for_job(&job_id).await;
        assert!(inventory::list_all(&conn, &ctx.user.id).unwrap().is_empty());

        let req = ctx.delete("/api/inventory/items/GZ1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }

    #[actix_web::test]
    async fn test_sync_reloads_from_storage() {
        let ctx = context(true).await;
        let app = app!(ctx);

        let item = common::requests::CreateItemRequest {
            id: Some("ST1".to_string()),
            name: Some("Stored".to_string()),
            category: None,
            current_stock: 1,
            minimum_stock: 2,
            unit_price: 1.0,
            expiry_date: None,
            supplier: None,
            location: None,
        }
        .into_item();
        {
            let mut conn = ctx.state.db.connect().unwrap();
            inventory::replace_all(&mut conn, &ctx.user.id, std::slice::from_ref(&item)).unwrap();
        }

        let req = ctx.post("/api/inventory/sync").to_request();
        let items: Vec<InventoryItem> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(items, vec![item.clone()]);
        assert_eq!(ctx.state.inventory(&ctx.user.id).await, vec![item]);
    }

    #[actix_web::test]
    async fn test_stats_and_low_stock_panel() {
        let ctx = context(true).await;
        let app = app!(ctx);

        let req = ctx.get("/api/inventory/stats").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["summary"]["totalItems"], 10);
        assert_eq!(stats["stockLevels"].as_array().unwrap().len(), 3);
        assert!(stats["summary"]["topCategories"].as_array().unwrap().len() <= 5);

        let req = ctx.get("/api/inventory/low_stock").to_request();
        let low: Vec<InventoryItem> = test::call_and_read_body_json(&app, req).await;
        assert!(low.len() <= 5);
        assert_eq!(low[0].id, "MED002");
    }

    #[actix_web::test]
    async fn test_back_to_back_adds_leave_storage_matching_memory() {
        let ctx = context(false).await;
        let app = app!(ctx);

        let mut job_ids = Vec::new();
        for n in 0..10 {
            let req = ctx
                .post("/api/inventory/items")
                .set_json(json!({"id": format!("IT{}", n), "name": format!("Item {}", n)}))
                .to_request();
            let receipt: Value = test::call_and_read_body_json(&app, req).await;
            job_ids.push(receipt["jobId"].as_str().unwrap().to_string());
        }
        for job_id in &job_ids {
            ctx.wait_for_job(job_id).await;
        }

        let conn = ctx.state.db.connect().unwrap();
        let stored = inventory::list_all(&conn, &ctx.user.id).unwrap();
        assert_eq!(stored.len(), 10);
        assert_eq!(stored, ctx.state.inventory(&ctx.user.id).await);
    }
}
