//! Shared model types and pure inventory logic for the SmartMed service.
//!
//! Everything in this crate is free of I/O: the backend feeds it uploaded
//! text and in-memory collections, and persists whatever comes back.

pub mod alerts;
pub mod assistant;
pub mod ingest;
pub mod jobs;
pub mod model;
pub mod requests;
pub mod state;
pub mod stats;
