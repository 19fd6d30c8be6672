//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from services and the HTTP layer.
//!
//! # Invariants
//! - Writes validate drafts before any SQL mutation.
//! - Each write runs in one transaction, committed once; an error drops the
//!   transaction, which rolls it back.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

use crate::db::DbError;
use crate::model::{RecordId, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod note_repo;
pub mod patient_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by patient and note persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Input rejected before touching storage.
    Validation(ValidationError),
    /// Storage-level failure.
    Db(DbError),
    /// No row with the requested id.
    NotFound(RecordId),
    /// Persisted row violates model invariants.
    InvalidData(String),
}

impl RepoError {
    /// Returns whether this failure was caused by caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
