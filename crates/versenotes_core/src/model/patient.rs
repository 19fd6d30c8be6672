//! Patient domain model.
//!
//! # Invariants
//! - `name` is never empty.
//! - `date_of_birth` renders as `YYYY-MM-DD`.

use super::{RecordId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage and wire format of `date_of_birth`.
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

/// Stored patient record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: RecordId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    /// Free-form, no enumeration enforced.
    pub gender: String,
}

impl Patient {
    /// Builds the stored record for `draft` once storage assigned `id`.
    pub fn from_draft(id: RecordId, draft: &PatientDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            date_of_birth: draft.date_of_birth,
            gender: draft.gender.clone(),
        }
    }

    /// Returns the full client-facing representation.
    pub fn to_representation(&self) -> PatientRepresentation {
        PatientRepresentation {
            id: self.id,
            name: self.name.clone(),
            date_of_birth: self.date_of_birth.format(DATE_OF_BIRTH_FORMAT).to_string(),
            gender: self.gender.clone(),
        }
    }

    /// Re-checks stored state against draft rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

/// Full-replace input for create and update.
///
/// Unknown JSON keys are ignored; every listed key is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatientDraft {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
}

impl PatientDraft {
    pub fn new(
        name: impl Into<String>,
        date_of_birth: NaiveDate,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date_of_birth,
            gender: gender.into(),
        }
    }

    /// Validates draft fields before persistence.
    ///
    /// # Errors
    /// - `ValidationError::EmptyField("name")` for empty or blank names.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

/// Plain serializable patient shape returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientRepresentation {
    pub id: RecordId,
    pub name: String,
    pub date_of_birth: String,
    pub gender: String,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyField("name"));
    }
    Ok(())
}
