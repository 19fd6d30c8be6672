//! HTTP API for VerseNotes patient records and clinical notes.
//!
//! # Responsibility
//! - Expose core CRUD use-cases as JSON routes.
//! - Own process-level concerns: configuration, CORS, request sessions.
//!
//! # Invariants
//! - Handlers never panic on bad input; every failure maps to a JSON error.
//! - Storage work runs on the blocking pool, one connection per request.

pub mod api;
pub mod config;
pub mod error;
pub mod store;

pub use api::router;
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, Resource, WriteAction};
pub use store::{Store, StoreError};
