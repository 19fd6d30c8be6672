//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/update/get/list/delete APIs.
//! - Stamp writes with the current UTC time.
//!
//! # Invariants
//! - `update_note` replaces content fully and never touches `created_at`.
//! - Listing by patient never checks that the patient exists.

use crate::model::note::{Note, NoteDraft};
use crate::model::RecordId;
use crate::repo::note_repo::NoteRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::{DateTime, Utc};

/// Clock used to stamp note timestamps.
pub type Clock = fn() -> DateTime<Utc>;

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
    clock: Clock,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service stamping writes with `Utc::now`.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Utc::now)
    }

    /// Creates a service with a caller-provided clock.
    pub fn with_clock(repo: R, clock: Clock) -> Self {
        Self { repo, clock }
    }

    pub fn list_notes(&self) -> RepoResult<Vec<Note>> {
        self.repo.list_notes()
    }

    /// Lists notes attached to `patient_id`; empty when none match.
    pub fn list_notes_for_patient(&self, patient_id: &str) -> RepoResult<Vec<Note>> {
        self.repo.list_notes_for_patient(patient_id)
    }

    pub fn get_note(&self, id: RecordId) -> RepoResult<Option<Note>> {
        self.repo.get_note(id)
    }

    /// Gets one note, turning absence into `RepoError::NotFound`.
    pub fn require_note(&self, id: RecordId) -> RepoResult<Note> {
        self.repo.get_note(id)?.ok_or(RepoError::NotFound(id))
    }

    pub fn create_note(&mut self, patient_id: &str, draft: &NoteDraft) -> RepoResult<Note> {
        let now = (self.clock)();
        self.repo.create_note(patient_id, draft, now)
    }

    pub fn update_note(&mut self, id: RecordId, draft: &NoteDraft) -> RepoResult<Note> {
        let now = (self.clock)();
        self.repo.update_note(id, draft, now)
    }

    pub fn delete_note(&mut self, id: RecordId) -> RepoResult<()> {
        self.repo.delete_note(id)
    }
}
