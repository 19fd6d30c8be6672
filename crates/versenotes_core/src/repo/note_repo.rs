//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide note CRUD plus the per-patient listing.
//! - Own timestamp persistence (`created_at`, `updated_at` as epoch ms).
//!
//! # Invariants
//! - `patient_id` filters are exact string matches; patient existence is
//!   never checked.
//! - `update_note` stores `max(now, previous updated_at)` so `updated_at`
//!   never regresses and never drops below `created_at`.
//! - Lists are ordered by ascending id.

use super::{RepoError, RepoResult};
use crate::model::note::{truncate_to_millis, Note, NoteDraft};
use crate::model::RecordId;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    patient_id,
    content,
    created_at,
    updated_at
FROM notes";

/// Repository interface for note operations.
pub trait NoteRepository {
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Lists notes whose `patient_id` equals `patient_id` exactly.
    fn list_notes_for_patient(&self, patient_id: &str) -> RepoResult<Vec<Note>>;
    fn get_note(&self, id: RecordId) -> RepoResult<Option<Note>>;
    /// Creates a note with `created_at = updated_at = now`.
    fn create_note(
        &mut self,
        patient_id: &str,
        draft: &NoteDraft,
        now: DateTime<Utc>,
    ) -> RepoResult<Note>;
    /// Replaces content and refreshes `updated_at`.
    fn update_note(&mut self, id: RecordId, draft: &NoteDraft, now: DateTime<Utc>)
        -> RepoResult<Note>;
    fn delete_note(&mut self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        collect_notes(&mut rows)
    }

    fn list_notes_for_patient(&self, patient_id: &str) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE patient_id = ?1
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([patient_id])?;
        collect_notes(&mut rows)
    }

    fn get_note(&self, id: RecordId) -> RepoResult<Option<Note>> {
        load_note(self.conn, id)
    }

    fn create_note(
        &mut self,
        patient_id: &str,
        draft: &NoteDraft,
        now: DateTime<Utc>,
    ) -> RepoResult<Note> {
        let now = truncate_to_millis(now);
        let now_ms = now.timestamp_millis();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO notes (patient_id, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3);",
            params![patient_id, draft.content.as_str(), now_ms],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Note {
            id,
            patient_id: patient_id.to_string(),
            content: draft.content.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    fn update_note(
        &mut self,
        id: RecordId,
        draft: &NoteDraft,
        now: DateTime<Utc>,
    ) -> RepoResult<Note> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE notes
             SET
                content = ?2,
                updated_at = MAX(?3, updated_at)
             WHERE id = ?1;",
            params![id, draft.content.as_str(), now.timestamp_millis()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        let note = load_note(&tx, id)?.ok_or(RepoError::NotFound(id))?;
        tx.commit()?;
        Ok(note)
    }

    fn delete_note(&mut self, id: RecordId) -> RepoResult<()> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;
        Ok(())
    }
}

fn load_note(conn: &Connection, id: RecordId) -> RepoResult<Option<Note>> {
    let mut stmt = conn.prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_note_row(row)?));
    }
    Ok(None)
}

fn collect_notes(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Note>> {
    let mut notes = Vec::new();
    while let Some(row) = rows.next()? {
        notes.push(parse_note_row(row)?);
    }
    Ok(notes)
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id: RecordId = row.get("id")?;
    let note = Note {
        id,
        patient_id: row.get("patient_id")?,
        content: row.get("content")?,
        created_at: parse_timestamp(row.get("created_at")?, "notes.created_at")?,
        updated_at: parse_timestamp(row.get("updated_at")?, "notes.updated_at")?,
    };
    note.validate()
        .map_err(|err| RepoError::InvalidData(format!("note {id}: {err}")))?;
    Ok(note)
}

fn parse_timestamp(value: i64, column: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value)
        .ok_or_else(|| RepoError::InvalidData(format!("invalid timestamp `{value}` in {column}")))
}
