//! Inventory assistant.
//!
//! - `POST /api/chat` with `{ "message": ... }`: answers from the caller's
//!   current inventory and records the exchange.
//! - `GET /api/chat/history`: recorded exchanges, oldest first.

use actix_web::web::{get, post, scope};
use actix_web::{web, HttpResponse, Responder, ResponseError, Scope};
use chrono::Utc;
use common::assistant::reply;
use common::model::chat::ChatEntry;
use common::requests::ChatRequest;
use log::warn;

use crate::app_state::{today, AppState, CurrentUser};
use crate::db::chat;
use crate::error::ServiceError;

const API_PATH: &str = "/api/chat";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(ask))
        .route("/history", get().to(history))
}

async fn ask(
    state: web::Data<AppState>,
    current: CurrentUser,
    body: web::Json<ChatRequest>,
) -> impl Responder {
    match answer(&state, &current, body.into_inner()).await {
        Ok(entry) => HttpResponse::Ok().json(entry),
        Err(e) => e.error_response(),
    }
}

async fn history(state: web::Data<AppState>, current: CurrentUser) -> impl Responder {
    let db = state.db.clone();
    let user_id = current.user.id.clone();
    let result = web::block(move || {
        let conn = db.connect()?;
        chat::list_entries(&conn, &user_id)
    })
    .await;

    match result {
        Ok(Ok(entries)) => HttpResponse::Ok().json(entries),
        Ok(Err(e)) => ServiceError::Database(e).error_response(),
        Err(e) => ServiceError::Task(e.to_string()).error_response(),
    }
}

/// The answer is returned even when recording it fails.
async fn answer(
    state: &AppState,
    current: &CurrentUser,
    request: ChatRequest,
) -> Result<ChatEntry, ServiceError> {
    let query = request.message.trim().to_string();
    if query.is_empty() {
        return Err(ServiceError::BadRequest("message must not be empty".to_string()));
    }

    let items = state.inventory(&current.user.id).await;
    let entry = ChatEntry {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: current.user.id.clone(),
        response: reply(&query, &items, today()),
        query,
        created_at: Some(Utc::now()),
    };

    let db = state.db.clone();
    let stored = entry.clone();
    let saved = web::block(move || {
        let conn = db.connect()?;
        chat::insert_entry(&conn, &stored)
    })
    .await;
    match saved {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("Chat exchange not recorded: {}", e),
        Err(e) => warn!("Chat exchange not recorded: {}", e),
    }

    Ok(entry)
}
