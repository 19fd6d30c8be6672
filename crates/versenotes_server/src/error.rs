//! HTTP error mapping.
//!
//! # Responsibility
//! - Map typed storage/validation failures onto status codes and the stable
//!   `{"error": <message>}` body.
//! - Log failure details server-side; clients only see the generic message.
//!
//! # Invariants
//! - `NotFound` is always 404, even on write routes.
//! - Every write failure is 400 with an action-specific message, whether it
//!   came from validation or storage.

use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};
use versenotes_core::RepoError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Resource family addressed by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Patient,
    Note,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Note => "note",
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            Self::Patient => "Patient not found",
            Self::Note => "Note not found",
        }
    }

    fn read_failure_message(self) -> &'static str {
        match self {
            Self::Patient => "Failed to load patients",
            Self::Note => "Failed to load notes",
        }
    }
}

/// Write operation a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    CreatePatient,
    UpdatePatient,
    DeletePatient,
    CreateNote,
    UpdateNote,
    DeleteNote,
}

impl WriteAction {
    pub fn resource(self) -> Resource {
        match self {
            Self::CreatePatient | Self::UpdatePatient | Self::DeletePatient => Resource::Patient,
            Self::CreateNote | Self::UpdateNote | Self::DeleteNote => Resource::Note,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatePatient => "patient_create",
            Self::UpdatePatient => "patient_update",
            Self::DeletePatient => "patient_delete",
            Self::CreateNote => "note_create",
            Self::UpdateNote => "note_update",
            Self::DeleteNote => "note_delete",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Self::CreatePatient => "Failed to create patient",
            Self::UpdatePatient => "Failed to update patient",
            Self::DeletePatient => "Failed to delete patient",
            Self::CreateNote => "Failed to create note",
            Self::UpdateNote => "Failed to update note",
            Self::DeleteNote => "Failed to delete note",
        }
    }
}

/// Handler-boundary error.
#[derive(Debug)]
pub enum ApiError {
    /// Requested id does not exist (404).
    NotFound { resource: Resource, id: String },
    /// Storage failed on a read route (500).
    Read {
        resource: Resource,
        source: StoreError,
    },
    /// Validation or storage failed on a write route (400).
    Write {
        action: WriteAction,
        source: StoreError,
    },
}

impl ApiError {
    pub fn not_found(resource: Resource, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Classifies a read-route failure.
    pub fn read(resource: Resource, err: StoreError) -> Self {
        match err {
            StoreError::Repo(RepoError::NotFound(id)) => Self::not_found(resource, id.to_string()),
            source => Self::Read { resource, source },
        }
    }

    /// Classifies a write-route failure.
    pub fn write(action: WriteAction, err: StoreError) -> Self {
        match err {
            StoreError::Repo(RepoError::NotFound(id)) => {
                Self::not_found(action.resource(), id.to_string())
            }
            source => Self::Write { action, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Read { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Write { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message. Never includes failure details.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotFound { resource, .. } => resource.not_found_message(),
            Self::Read { resource, .. } => resource.read_failure_message(),
            Self::Write { action, .. } => action.failure_message(),
        }
    }

    fn log(&self) {
        match self {
            Self::NotFound { resource, id } => warn!(
                "event={}_lookup module=api status=not_found id={}",
                resource.as_str(),
                id
            ),
            Self::Read { resource, source } => error!(
                "event={}_read module=api status=error error={}",
                resource.as_str(),
                source
            ),
            Self::Write { action, source } if source.is_validation() => warn!(
                "event={} module=api status=rejected error={}",
                action.as_str(),
                source
            ),
            Self::Write { action, source } => error!(
                "event={} module=api status=error error={}",
                action.as_str(),
                source
            ),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource, id } => write!(f, "{} not found: {id}", resource.as_str()),
            Self::Read { resource, source } => {
                write!(f, "failed to read {}: {source}", resource.as_str())
            }
            Self::Write { action, source } => write!(f, "{} failed: {source}", action.as_str()),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let body = Json(json!({ "error": self.message() }));
        (self.status(), body).into_response()
    }
}
