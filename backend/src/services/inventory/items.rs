//! Single-item edits from the inventory table.
//!
//! The in-memory collection changes first; the whole collection is then
//! mirrored to storage by a replace-all job, exactly like an upload.

use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::inventory::ItemPatch;
use common::requests::CreateItemRequest;
use common::state::Msg;
use log::{info, warn};
use serde::Serialize;

use crate::app_state::{today, AppState, CurrentUser};
use crate::error::ServiceError;
use crate::job_controller::persist::Snapshot;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditReceipt {
    pub job_id: String,
    pub items: usize,
}

pub async fn add(
    state: web::Data<AppState>,
    current: CurrentUser,
    body: web::Json<CreateItemRequest>,
) -> impl Responder {
    respond(add_item(&state, &current, body.into_inner()).await)
}

pub async fn update(
    state: web::Data<AppState>,
    current: CurrentUser,
    id: web::Path<String>,
    body: web::Json<ItemPatch>,
) -> impl Responder {
    let id = id.into_inner();
    let msg = Msg::UpdateItem {
        id: id.clone(),
        patch: body.into_inner(),
    };
    respond(edit(&state, &current, id, msg).await)
}

pub async fn remove(
    state: web::Data<AppState>,
    current: CurrentUser,
    id: web::Path<String>,
) -> impl Responder {
    let id = id.into_inner();
    respond(edit(&state, &current, id.clone(), Msg::RemoveItem(id)).await)
}

fn respond(result: Result<EditReceipt, ServiceError>) -> HttpResponse {
    match result {
        Ok(receipt) => HttpResponse::Ok().json(receipt),
        Err(e) => {
            warn!("Inventory edit failed: {}", e);
            e.error_response()
        }
    }
}

async fn add_item(
    state: &AppState,
    current: &CurrentUser,
    request: CreateItemRequest,
) -> Result<EditReceipt, ServiceError> {
    let item = request.into_item();
    let id = item.id.clone();
    info!("Adding {} ({}) for {}", item.name, item.id, current.user.email);

    let snapshot = state
        .change_inventory(&current.user.id, Msg::AddItem(item), today())
        .await
        .ok_or_else(|| {
            ServiceError::BadRequest(format!("an item with id {} already exists", id))
        })?;
    persist(state, current, snapshot).await
}

async fn edit(
    state: &AppState,
    current: &CurrentUser,
    id: String,
    msg: Msg,
) -> Result<EditReceipt, ServiceError> {
    let snapshot = state
        .change_inventory(&current.user.id, msg, today())
        .await
        .ok_or_else(|| ServiceError::NotFound(format!("item {}", id)))?;
    persist(state, current, snapshot).await
}

async fn persist(
    state: &AppState,
    current: &CurrentUser,
    snapshot: Snapshot,
) -> Result<EditReceipt, ServiceError> {
    let items = snapshot.items.len();
    let job_id = state.persist(&current.user.id, snapshot).await;
    Ok(EditReceipt { job_id, items })
}
