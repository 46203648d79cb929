pub mod chat;
pub mod inventory;
pub mod notification;
pub mod profile;
pub mod session;
