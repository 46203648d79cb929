use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::inventory::InventoryItem;
use common::state::Msg;
use log::{error, info};

use crate::app_state::{today, AppState, CurrentUser};
use crate::db::inventory;
use crate::error::ServiceError;

/// Replaces the in-memory collection with the caller's stored rows.
pub async fn process(state: web::Data<AppState>, current: CurrentUser) -> impl Responder {
    match load_from_storage(&state, &current).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => {
            error!("Loading stored inventory failed: {}", e);
            e.error_response()
        }
    }
}

async fn load_from_storage(
    state: &AppState,
    current: &CurrentUser,
) -> Result<Vec<InventoryItem>, ServiceError> {
    let db = state.db.clone();
    let user_id = current.user.id.clone();
    let items = web::block(move || {
        let conn = db.connect()?;
        inventory::list_all(&conn, &user_id)
    })
    .await
    .map_err(|e| ServiceError::Task(e.to_string()))??;

    info!(
        "Loaded {} stored items for {}",
        items.len(),
        current.user.email
    );
    state
        .change_inventory(&current.user.id, Msg::SetInventory(items.clone()), today())
        .await;
    Ok(items)
}
