use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::InventoryQuery;
use common::stats::categories as category_names;

use crate::app_state::{AppState, CurrentUser};
use crate::error::ServiceError;

pub async fn process(
    state: web::Data<AppState>,
    current: CurrentUser,
    query: web::Query<InventoryQuery>,
) -> impl Responder {
    match query.to_filter() {
        Ok(filter) => {
            let items = state.inventory(&current.user.id).await;
            HttpResponse::Ok().json(filter.apply(&items))
        }
        Err(e) => ServiceError::BadRequest(e).error_response(),
    }
}

pub async fn categories(state: web::Data<AppState>, current: CurrentUser) -> impl Responder {
    let items = state.inventory(&current.user.id).await;
    HttpResponse::Ok().json(category_names(&items))
}
