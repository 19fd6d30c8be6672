//! Patient use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::patient::{Patient, PatientDraft};
use crate::model::RecordId;
use crate::repo::patient_repo::PatientRepository;
use crate::repo::{RepoError, RepoResult};

/// Use-case service wrapper for patient CRUD operations.
pub struct PatientService<R: PatientRepository> {
    repo: R,
}

impl<R: PatientRepository> PatientService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_patients(&self) -> RepoResult<Vec<Patient>> {
        self.repo.list_patients()
    }

    pub fn get_patient(&self, id: RecordId) -> RepoResult<Option<Patient>> {
        self.repo.get_patient(id)
    }

    /// Gets one patient, turning absence into `RepoError::NotFound`.
    pub fn require_patient(&self, id: RecordId) -> RepoResult<Patient> {
        self.repo.get_patient(id)?.ok_or(RepoError::NotFound(id))
    }

    pub fn create_patient(&mut self, draft: &PatientDraft) -> RepoResult<Patient> {
        self.repo.create_patient(draft)
    }

    /// Replaces all patient fields.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_patient(&mut self, id: RecordId, draft: &PatientDraft) -> RepoResult<Patient> {
        self.repo.update_patient(id, draft)
    }

    /// Deletes one patient. Notes referencing it are left in place.
    pub fn delete_patient(&mut self, id: RecordId) -> RepoResult<()> {
        self.repo.delete_patient(id)
    }
}
