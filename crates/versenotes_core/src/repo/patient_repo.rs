//! Patient repository contract and SQLite implementation.
//!
//! # Invariants
//! - Lists are ordered by ascending id (insertion order).
//! - Deleting a patient leaves notes that reference it untouched.

use super::{RepoError, RepoResult};
use crate::model::patient::{Patient, PatientDraft, DATE_OF_BIRTH_FORMAT};
use crate::model::RecordId;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

const PATIENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    date_of_birth,
    gender
FROM patients";

/// Repository interface for patient CRUD operations.
pub trait PatientRepository {
    fn list_patients(&self) -> RepoResult<Vec<Patient>>;
    fn get_patient(&self, id: RecordId) -> RepoResult<Option<Patient>>;
    fn create_patient(&mut self, draft: &PatientDraft) -> RepoResult<Patient>;
    /// Fully replaces name, date of birth and gender.
    fn update_patient(&mut self, id: RecordId, draft: &PatientDraft) -> RepoResult<Patient>;
    fn delete_patient(&mut self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed patient repository.
pub struct SqlitePatientRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqlitePatientRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl PatientRepository for SqlitePatientRepository<'_> {
    fn list_patients(&self) -> RepoResult<Vec<Patient>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PATIENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut patients = Vec::new();
        while let Some(row) = rows.next()? {
            patients.push(parse_patient_row(row)?);
        }
        Ok(patients)
    }

    fn get_patient(&self, id: RecordId) -> RepoResult<Option<Patient>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PATIENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_patient_row(row)?));
        }
        Ok(None)
    }

    fn create_patient(&mut self, draft: &PatientDraft) -> RepoResult<Patient> {
        draft.validate()?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO patients (name, date_of_birth, gender) VALUES (?1, ?2, ?3);",
            params![
                draft.name.as_str(),
                format_date_of_birth(draft.date_of_birth),
                draft.gender.as_str(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Patient::from_draft(id, draft))
    }

    fn update_patient(&mut self, id: RecordId, draft: &PatientDraft) -> RepoResult<Patient> {
        draft.validate()?;

        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE patients
             SET
                name = ?2,
                date_of_birth = ?3,
                gender = ?4
             WHERE id = ?1;",
            params![
                id,
                draft.name.as_str(),
                format_date_of_birth(draft.date_of_birth),
                draft.gender.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;

        Ok(Patient::from_draft(id, draft))
    }

    fn delete_patient(&mut self, id: RecordId) -> RepoResult<()> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute("DELETE FROM patients WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;
        Ok(())
    }
}

fn parse_patient_row(row: &Row<'_>) -> RepoResult<Patient> {
    let dob_text: String = row.get("date_of_birth")?;
    let date_of_birth = NaiveDate::parse_from_str(&dob_text, DATE_OF_BIRTH_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date `{dob_text}` in patients.date_of_birth"
        ))
    })?;

    let patient = Patient {
        id: row.get("id")?,
        name: row.get("name")?,
        date_of_birth,
        gender: row.get("gender")?,
    };
    patient
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("patient {}: {err}", patient.id)))?;
    Ok(patient)
}

fn format_date_of_birth(value: NaiveDate) -> String {
    value.format(DATE_OF_BIRTH_FORMAT).to_string()
}
