//! HTTP route groups. Each submodule exposes a `configure_routes()` returning
//! its `Scope`, mounted in `main`.

pub mod auth;
pub mod chat;
pub mod data_sources;
pub mod inventory;
pub mod notifications;
pub mod profile;
