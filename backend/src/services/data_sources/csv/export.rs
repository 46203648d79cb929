use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::ingest::export_csv;
use common::requests::InventoryQuery;
use log::warn;

use crate::app_state::{AppState, CurrentUser};
use crate::error::ServiceError;

const EXPORT_FILE_NAME: &str = "inventory_export.csv";

/// Downloads the rows currently visible in the inventory table.
pub async fn process(
    state: web::Data<AppState>,
    current: CurrentUser,
    query: web::Query<InventoryQuery>,
) -> impl Responder {
    match export_inventory(&state, &current, &query).await {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(EXPORT_FILE_NAME.to_string())],
            })
            .body(csv),
        Err(e) => {
            warn!("CSV export failed: {}", e);
            e.error_response()
        }
    }
}

async fn export_inventory(
    state: &AppState,
    current: &CurrentUser,
    query: &InventoryQuery,
) -> Result<String, ServiceError> {
    let filter = query.to_filter().map_err(ServiceError::BadRequest)?;
    let items = filter.apply(&state.inventory(&current.user.id).await);
    Ok(export_csv(&items)?)
}
