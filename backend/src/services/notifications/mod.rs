//! Notification bell endpoints.
//!
//! Notifications are raised by inventory changes and live only in memory,
//! newest first.

use actix_web::web::{delete, get, post, scope};
use actix_web::{web, HttpResponse, Responder, Scope};
use common::model::notification::Notification;
use common::state::Msg;
use serde::Serialize;

use crate::app_state::{AppState, CurrentUser};

const API_PATH: &str = "/api/notifications";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list))
        .route("", delete().to(clear))
        .route("/read_all", post().to(mark_all_as_read))
        .route("/{id}/read", post().to(mark_as_read))
        .route("/{id}", delete().to(remove))
}

async fn list(state: web::Data<AppState>, current: CurrentUser) -> impl Responder {
    HttpResponse::Ok().json(current_list(&state, &current).await)
}

async fn mark_as_read(
    state: web::Data<AppState>,
    current: CurrentUser,
    id: web::Path<String>,
) -> impl Responder {
    apply(&state, &current, Msg::MarkAsRead(id.into_inner())).await
}

async fn mark_all_as_read(state: web::Data<AppState>, current: CurrentUser) -> impl Responder {
    apply(&state, &current, Msg::MarkAllAsRead).await
}

async fn remove(
    state: web::Data<AppState>,
    current: CurrentUser,
    id: web::Path<String>,
) -> impl Responder {
    apply(&state, &current, Msg::RemoveNotification(id.into_inner())).await
}

async fn clear(state: web::Data<AppState>, current: CurrentUser) -> impl Responder {
    apply(&state, &current, Msg::ClearNotifications).await
}

/// Unknown ids are ignored; the answer is always the resulting list.
async fn apply(state: &AppState, current: &CurrentUser, msg: Msg) -> HttpResponse {
    state.dispatch(&current.user.id, msg).await;
    HttpResponse::Ok().json(current_list(state, current).await)
}

async fn current_list(state: &AppState, current: &CurrentUser) -> NotificationList {
    let snapshot = state.snapshot(&current.user.id).await;
    NotificationList {
        unread_count: snapshot.unread_count(),
        notifications: snapshot.notifications,
    }
}
