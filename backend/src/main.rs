mod app_state;
mod config;
mod db;
mod error;
mod job_controller;
mod services;

use crate::app_state::AppState;
use crate::config::Config;
use crate::db::Database;
use crate::job_controller::state::{start_job_updater, JobsState};
use actix_web::{web, App, HttpResponse, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::thread;
use std::time::Duration;

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().body("Not Found")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::parse();
    let url = config.url();

    let db = Database::new(config.database.clone());
    if let Err(e) = db.initialize() {
        error!("Cannot open database {}: {}", db.path().display(), e);
        return Err(std::io::Error::other(e));
    }
    info!("Using database {}", db.path().display());

    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    // Initialize job controller state
    let (jobs_state, rx) = JobsState::new(100);

    // Start job updater task
    tokio::spawn(start_job_updater(jobs_state.clone(), rx));

    let state = AppState::new(
        db,
        jobs_state,
        config.seed_sample,
        config.max_upload_bytes(),
    );

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(web::Data::new(state.clone()))
            .service(services::auth::configure_routes())
            .service(services::data_sources::csv::configure_routes())
            .service(services::inventory::configure_routes())
            .service(services::notifications::configure_routes())
            .service(services::chat::configure_routes())
            .service(services::profile::configure_routes())
            .default_service(web::route().to(not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
