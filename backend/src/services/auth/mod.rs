//! Mock session endpoints.
//!
//! There is no credential store: any e-mail signs in (the password is
//! ignored) and always maps to the same user id. Sign-up behaves the same.
//! The returned token goes in the `x-session-token` header of later calls.

use actix_web::web::{post, scope};
use actix_web::{web, HttpResponse, Responder, ResponseError, Scope};
use common::model::session::SessionUser;
use common::requests::{SignInRequest, SignInResponse};
use log::info;

use crate::app_state::{AppState, CurrentUser};
use crate::db::profiles;
use crate::error::ServiceError;

const API_PATH: &str = "/api/auth";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/sign_in", post().to(sign_in))
        .route("/sign_up", post().to(sign_in))
        .route("/sign_out", post().to(sign_out))
}

async fn sign_in(state: web::Data<AppState>, body: web::Json<SignInRequest>) -> impl Responder {
    match open_session(&state, body.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.error_response(),
    }
}

async fn sign_out(state: web::Data<AppState>, current: CurrentUser) -> impl Responder {
    state.close_session(&current.token).await;
    info!("{} signed out", current.user.email);
    HttpResponse::NoContent().finish()
}

async fn open_session(
    state: &AppState,
    request: SignInRequest,
) -> Result<SignInResponse, ServiceError> {
    if request.email.trim().is_empty() {
        return Err(ServiceError::BadRequest("email is required".to_string()));
    }
    let user = SessionUser::from_email(&request.email);

    let db = state.db.clone();
    let profile_user = user.clone();
    web::block(move || {
        let conn = db.connect()?;
        profiles::ensure_profile(&conn, &profile_user)
    })
    .await
    .map_err(|e| ServiceError::Task(e.to_string()))??;

    let token = state.open_session(user.clone()).await;
    info!("{} signed in", user.email);
    Ok(SignInResponse { token, user })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::json;

    use crate::app_state::SESSION_HEADER;
    use crate::services::test_support::context;

    #[actix_web::test]
    async fn test_sign_in_then_out() {
        let ctx = context(false).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx.state.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/sign_in")
            .set_json(json!({"email": "pharm@clinic.org", "password": "anything"}))
            .to_request();
        let signed_in: SignInResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(signed_in.user, SessionUser::from_email("pharm@clinic.org"));

        let conn = ctx.state.db.connect().unwrap();
        let profile = profiles::get_profile(&conn, &signed_in.user.id).unwrap().unwrap();
        assert_eq!(profile.email, "pharm@clinic.org");

        let req = test::TestRequest::post()
            .uri("/api/auth/sign_out")
            .insert_header((SESSION_HEADER, signed_in.token.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 204);

        let req = test::TestRequest::post()
            .uri("/api/auth/sign_out")
            .insert_header((SESSION_HEADER, signed_in.token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }

    #[actix_web::test]
    async fn test_blank_email_is_rejected() {
        let ctx = context(false).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx.state.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/sign_up")
            .set_json(json!({"email": " "}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }
}
