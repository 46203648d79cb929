//! CSV data source endpoints: inventory upload, persistence status and export.
//!
//! - `POST /api/data_sources/csv/upload`: multipart/form-data with a `file`
//!   field. The file is parsed and normalized, replaces the caller's
//!   in-memory inventory, and a background job mirrors it to storage. The
//!   response carries the job id and the number of imported items.
//!
//! - `GET /api/data_sources/csv/status/{job_id}`: current `JobStatus` of a
//!   persistence job (`Pending`, `InProgress`, `Completed` or `Failed`).
//!
//! - `GET /api/data_sources/csv/export`: the caller's inventory, filtered
//!   like the inventory table, as a downloadable CSV file.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod export;
mod get_status;
mod upload;

const API_PATH: &str = "/api/data_sources/csv";

/// Configures and returns the Actix scope for CSV data source routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        // Route to upload a new inventory file.
        .route("/upload", post().to(upload::process))
        // Route to get the status of a persistence job.
        .route("/status/{job_id}", get().to(get_status::process))
        // Route to download the current inventory.
        .route("/export", get().to(export::process))
}
