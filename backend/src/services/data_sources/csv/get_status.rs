use crate::app_state::AppState;
use actix_web::{web, HttpResponse, Responder};

pub(crate) async fn process(job_id: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    get_csv_job_status(job_id, state).await
}

async fn get_csv_job_status(job_id: web::Path<String>, state: web::Data<AppState>) -> HttpResponse {
    match state.jobs.status(&job_id.into_inner()).await {
        Some(status) => HttpResponse::Ok().json(status),
        None => HttpResponse::NotFound().body("Job ID not found"),
    }
}
