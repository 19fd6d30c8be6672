//! Core domain logic for VerseNotes: patient records and clinical notes.
//! This crate is the single source of truth for persistence invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::note::{Note, NoteDraft, NoteRepresentation};
pub use model::patient::{Patient, PatientDraft, PatientRepresentation};
pub use model::{RecordId, ValidationError};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::patient_repo::{PatientRepository, SqlitePatientRepository};
pub use repo::{RepoError, RepoResult};
pub use service::note_service::NoteService;
pub use service::patient_service::PatientService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
