//! Clinical note domain model.
//!
//! # Invariants
//! - `created_at` is set once and never changes.
//! - `updated_at >= created_at`.
//! - Timestamps carry millisecond precision, matching storage.

use super::{RecordId, ValidationError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Stored note record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: RecordId,
    /// Loose reference to `Patient::id` in text form. Not checked for existence.
    pub patient_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Returns the full client-facing representation.
    pub fn to_representation(&self) -> NoteRepresentation {
        NoteRepresentation {
            id: self.id,
            patient_id: self.patient_id.clone(),
            content: self.content.clone(),
            created_at: format_timestamp(self.created_at),
            updated_at: format_timestamp(self.updated_at),
        }
    }

    /// Checks timestamp ordering.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.updated_at < self.created_at {
            return Err(ValidationError::TimestampOrder {
                created_at_ms: self.created_at.timestamp_millis(),
                updated_at_ms: self.updated_at.timestamp_millis(),
            });
        }
        Ok(())
    }
}

/// Content input for note create and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoteDraft {
    pub content: String,
}

impl NoteDraft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Plain serializable note shape returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteRepresentation {
    pub id: RecordId,
    pub patient_id: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Drops sub-millisecond precision so in-memory values equal stored ones.
pub fn truncate_to_millis(value: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or(value)
}

fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
