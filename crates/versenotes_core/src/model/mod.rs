//! Domain model for patient records and clinical notes.
//!
//! # Responsibility
//! - Define canonical records used by repositories and services.
//! - Define write drafts and their validation rules.
//! - Produce plain serializable representations for API callers.
//!
//! # Invariants
//! - Every record is identified by a storage-assigned `RecordId`.
//! - `Note::patient_id` is a loose text reference, never a foreign key.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod note;
pub mod patient;

/// Storage-assigned integer identity shared by patients and notes.
pub type RecordId = i64;

/// Validation failure for drafts and persisted records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Request body is not a JSON object with the required, well-typed keys.
    MalformedBody(String),
    /// Path segment is not valid UTF-8 text.
    MalformedPath(String),
    /// Required text field is empty or whitespace-only.
    EmptyField(&'static str),
    /// `updated_at` is earlier than `created_at`.
    TimestampOrder {
        created_at_ms: i64,
        updated_at_ms: i64,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedBody(message) => write!(f, "malformed request body: {message}"),
            Self::MalformedPath(message) => write!(f, "malformed path segment: {message}"),
            Self::EmptyField(field) => write!(f, "field `{field}` must not be empty"),
            Self::TimestampOrder {
                created_at_ms,
                updated_at_ms,
            } => write!(
                f,
                "updated_at ({updated_at_ms}) must not be earlier than created_at ({created_at_ms})"
            ),
        }
    }
}

impl Error for ValidationError {}
