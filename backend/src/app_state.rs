//! Application state injected into every handler.
//!
//! Each signed-in user owns one [`DashboardState`]. Handlers never touch it
//! directly: they send a [`Msg`] through [`AppState::dispatch`], which applies
//! it under the write lock.

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use chrono::{Local, NaiveDate, Utc};
use common::alerts::derive_alerts;
use common::model::inventory::InventoryItem;
use common::model::session::SessionUser;
use common::state::{update, DashboardState, Msg};
use futures_util::future::LocalBoxFuture;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use crate::db::Database;
use crate::error::ServiceError;
use crate::job_controller::persist::{InventoryWriter, Snapshot};
use crate::job_controller::state::JobsState;

/// Header carrying the token returned by sign-in.
pub const SESSION_HEADER: &str = "x-session-token";

#[derive(Clone)]
pub struct AppState {
    pub dashboards: Arc<RwLock<HashMap<String, DashboardState>>>,
    /// Session token to signed-in user.
    pub sessions: Arc<RwLock<HashMap<String, SessionUser>>>,
    pub jobs: JobsState,
    pub db: Database,
    pub writer: InventoryWriter,
    pub seed_sample: bool,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(db: Database, jobs: JobsState, seed_sample: bool, max_upload_bytes: usize) -> Self {
        AppState {
            dashboards: Arc::new(RwLock::new(HashMap::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            jobs,
            writer: InventoryWriter::new(db.clone()),
            db,
            seed_sample,
            max_upload_bytes,
        }
    }

    /// A seeded dashboard starts with the alerts of its sample inventory.
    fn fresh_dashboard(&self) -> DashboardState {
        if !self.seed_sample {
            return DashboardState::new();
        }
        let mut state = DashboardState::with_sample_inventory();
        raise_alerts(&mut state, today());
        state
    }

    /// Applies `msg` to `user_id`'s dashboard, creating it first if needed.
    pub async fn dispatch(&self, user_id: &str, msg: Msg) -> bool {
        let mut dashboards = self.dashboards.write().await;
        let state = dashboards
            .entry(user_id.to_string())
            .or_insert_with(|| self.fresh_dashboard());
        update(state, msg)
    }

    /// Applies an inventory message, then raises the low-stock and expiry
    /// notifications for the resulting collection.
    ///
    /// Returns the collection after the change, tagged with the revision to
    /// persist it under, or `None` if nothing changed.
    pub async fn change_inventory(
        &self,
        user_id: &str,
        msg: Msg,
        today: NaiveDate,
    ) -> Option<Snapshot> {
        let mut dashboards = self.dashboards.write().await;
        let state = dashboards
            .entry(user_id.to_string())
            .or_insert_with(|| self.fresh_dashboard());
        if !update(state, msg) {
            return None;
        }
        raise_alerts(state, today);
        let items = state.inventory.clone();
        let revision = self.writer.next_revision(user_id).await;
        Some(Snapshot { revision, items })
    }

    /// Mirrors `snapshot` to storage in the background; returns the job id.
    pub async fn persist(&self, user_id: &str, snapshot: Snapshot) -> String {
        self.writer
            .schedule_replace_all(&self.jobs, user_id.to_string(), snapshot)
            .await
    }

    pub async fn snapshot(&self, user_id: &str) -> DashboardState {
        let mut dashboards = self.dashboards.write().await;
        dashboards
            .entry(user_id.to_string())
            .or_insert_with(|| self.fresh_dashboard())
            .clone()
    }

    pub async fn inventory(&self, user_id: &str) -> Vec<InventoryItem> {
        self.snapshot(user_id).await.inventory
    }

    pub async fn open_session(&self, user: SessionUser) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.sessions.write().await.insert(token.clone(), user);
        token
    }

    pub async fn close_session(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

fn raise_alerts(state: &mut DashboardState, today: NaiveDate) {
    let now = Utc::now();
    for notification in derive_alerts(&state.inventory, today) {
        update(
            state,
            Msg::AddNotification {
                id: uuid::Uuid::new_v4().to_string(),
                created_at: now,
                notification,
            },
        );
    }
}

/// Local calendar date used for expiry computations.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Signed-in user of the current request, resolved from [`SESSION_HEADER`].
pub struct CurrentUser {
    pub user: SessionUser,
    pub token: String,
}

impl FromRequest for CurrentUser {
    type Error = ServiceError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = req
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string());

        Box::pin(async move {
            let state = state.ok_or(ServiceError::Unauthorized)?;
            let token = token.ok_or(ServiceError::Unauthorized)?;
            let user = state
                .sessions
                .read()
                .await
                .get(&token)
                .cloned()
                .ok_or(ServiceError::Unauthorized)?;
            Ok(CurrentUser { user, token })
        })
    }
}
