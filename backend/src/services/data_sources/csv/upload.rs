use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::ingest::import;
use common::requests::UploadReceipt;
use common::state::Msg;
use futures_util::StreamExt;
use log::{info, warn};

use crate::app_state::{today, AppState, CurrentUser};
use crate::error::ServiceError;

/// HTTP handler wrapper that converts internal result to an `HttpResponse`.
///
/// - On success: returns `200 OK` with an [`UploadReceipt`].
/// - On failure: returns the status of the [`ServiceError`] with its message.
///   A rejected file leaves the in-memory inventory untouched.
pub async fn process(
    state: web::Data<AppState>,
    current: CurrentUser,
    payload: Multipart,
) -> impl Responder {
    match upload_inventory(&state, &current, payload).await {
        Ok(receipt) => HttpResponse::Ok().json(receipt),
        Err(e) => {
            warn!("Rejected CSV upload from {}: {}", current.user.email, e);
            e.error_response()
        }
    }
}

/// Replaces the caller's inventory with the uploaded file and schedules the
/// replace-all of their stored rows.
pub async fn upload_inventory(
    state: &AppState,
    current: &CurrentUser,
    payload: Multipart,
) -> Result<UploadReceipt, ServiceError> {
    let text = read_csv_file(payload, state.max_upload_bytes).await?;
    let items = import(&text)?;
    let imported = items.len();
    info!(
        "Parsed {} inventory items for {}",
        imported, current.user.email
    );

    let snapshot = state
        .change_inventory(&current.user.id, Msg::SetInventory(items), today())
        .await
        .ok_or_else(|| ServiceError::Task("inventory was not replaced".to_string()))?;
    let job_id = state.persist(&current.user.id, snapshot).await;

    Ok(UploadReceipt { job_id, imported })
}

/// Reads the `file` part of the form as UTF-8 text. Other parts are skipped.
async fn read_csv_file(mut payload: Multipart, limit: usize) -> Result<String, ServiceError> {
    let mut contents: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if field_name.as_deref() != Some("file") {
            while let Some(chunk) = field.next().await {
                chunk?;
            }
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !filename.to_lowercase().ends_with(".csv") {
            return Err(ServiceError::MalformedFile(
                "the file must end with .csv".to_string(),
            ));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if bytes.len() + chunk.len() > limit {
                return Err(ServiceError::MalformedFile(format!(
                    "the file is larger than {} bytes",
                    limit
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        contents = Some(bytes);
    }

    let bytes = contents.ok_or_else(|| ServiceError::MalformedFile("missing file".to_string()))?;
    String::from_utf8(bytes)
        .map_err(|_| ServiceError::MalformedFile("the file is not valid UTF-8".to_string()))
}
