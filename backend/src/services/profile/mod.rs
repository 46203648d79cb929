//! Account settings: `GET /api/profile` and `POST /api/profile` with
//! `{ "firstName", "lastName" }`.

use actix_web::web::{get, post, scope};
use actix_web::{web, HttpResponse, Responder, ResponseError, Scope};
use common::model::profile::{ProfileUpdate, UserProfile};

use crate::app_state::{AppState, CurrentUser};
use crate::db::profiles;
use crate::error::ServiceError;

const API_PATH: &str = "/api/profile";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(process))
        .route("", post().to(update))
}

pub async fn process(state: web::Data<AppState>, current: CurrentUser) -> impl Responder {
    match load_profile(&state, &current).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => e.error_response(),
    }
}

pub async fn update(
    state: web::Data<AppState>,
    current: CurrentUser,
    body: web::Json<ProfileUpdate>,
) -> impl Responder {
    match save_profile(&state, &current, body.into_inner()).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => e.error_response(),
    }
}

async fn load_profile(state: &AppState, current: &CurrentUser) -> Result<UserProfile, ServiceError> {
    let db = state.db.clone();
    let user_id = current.user.id.clone();
    web::block(move || {
        let conn = db.connect()?;
        profiles::get_profile(&conn, &user_id)
    })
    .await
    .map_err(|e| ServiceError::Task(e.to_string()))??
    .ok_or_else(|| ServiceError::NotFound(format!("profile of {}", current.user.email)))
}

async fn save_profile(
    state: &AppState,
    current: &CurrentUser,
    update: ProfileUpdate,
) -> Result<UserProfile, ServiceError> {
    let db = state.db.clone();
    let user_id = current.user.id.clone();
    let updated = web::block(move || {
        let conn = db.connect()?;
        profiles::update_profile(&conn, &user_id, &update)
    })
    .await
    .map_err(|e| ServiceError::Task(e.to_string()))??;

    if !updated {
        return Err(ServiceError::NotFound(format!(
            "profile of {}",
            current.user.email
        )));
    }
    load_profile(state, current).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::json;

    use crate::services::test_support::context;

    #[actix_web::test]
    async fn test_update_profile() {
        let ctx = context(false).await;
        {
            let conn = ctx.state.db.connect().unwrap();
            profiles::ensure_profile(&conn, &ctx.user).unwrap();
        }
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx.state.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = ctx.get("/api/profile").to_request();
        let profile: UserProfile = test::call_and_read_body_json(&app, req).await;
        assert_eq!(profile.first_name, "nurse");
        assert_eq!(profile.role, "user");
        assert!(profile.updated_at.is_none());

        let req = ctx
            .post("/api/profile")
            .set_json(json!({"firstName": " Ada ", "lastName": "Lovelace"}))
            .to_request();
        let profile: UserProfile = test::call_and_read_body_json(&app, req).await;
        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.last_name, "Lovelace");
        assert!(profile.updated_at.is_some());
    }

    #[actix_web::test]
    async fn test_missing_profile() {
        let ctx = context(false).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx.state.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = ctx.get("/api/profile").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }
}
