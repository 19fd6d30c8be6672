//! Note resource handlers.
//!
//! `/patients/:id/notes` takes the path segment verbatim as the note's
//! `patient_id`; the patient itself is never looked up. A segment that is not
//! UTF-8 matches no stored note.

use super::{decode_body, patient_reference, record_id, Segment};
use crate::error::{ApiError, ApiResult, Resource, WriteAction};
use crate::store::Store;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use log::info;
use versenotes_core::{Note, NoteDraft, NoteRepresentation, NoteService, SqliteNoteRepository};

fn represent(notes: &[Note]) -> Vec<NoteRepresentation> {
    notes.iter().map(Note::to_representation).collect()
}

pub async fn list_notes(State(store): State<Store>) -> ApiResult<Json<Vec<NoteRepresentation>>> {
    info!("event=note_list module=api status=start");
    let notes = store
        .run(|conn| NoteService::new(SqliteNoteRepository::new(conn)).list_notes())
        .await
        .map_err(|err| ApiError::read(Resource::Note, err))?;

    info!("event=note_list module=api status=ok count={}", notes.len());
    Ok(Json(represent(&notes)))
}

pub async fn get_note(
    State(store): State<Store>,
    segment: Segment,
) -> ApiResult<Json<NoteRepresentation>> {
    let id = record_id(Resource::Note, segment)?;
    info!("event=note_get module=api status=start id={id}");
    let note = store
        .run(move |conn| NoteService::new(SqliteNoteRepository::new(conn)).require_note(id))
        .await
        .map_err(|err| ApiError::read(Resource::Note, err))?;

    Ok(Json(note.to_representation()))
}

pub async fn list_patient_notes(
    State(store): State<Store>,
    segment: Segment,
) -> ApiResult<Json<Vec<NoteRepresentation>>> {
    let Ok(patient_id) = patient_reference(segment) else {
        info!("event=patient_note_list module=api status=ok count=0 patient_id=invalid");
        return Ok(Json(Vec::new()));
    };
    info!("event=patient_note_list module=api status=start patient_id={patient_id}");
    let notes = store
        .run(move |conn| {
            NoteService::new(SqliteNoteRepository::new(conn)).list_notes_for_patient(&patient_id)
        })
        .await
        .map_err(|err| ApiError::read(Resource::Note, err))?;

    info!(
        "event=patient_note_list module=api status=ok count={}",
        notes.len()
    );
    Ok(Json(represent(&notes)))
}

pub async fn create_note(
    State(store): State<Store>,
    segment: Segment,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<NoteRepresentation>)> {
    let patient_id = patient_reference(segment)
        .map_err(|err| ApiError::write(WriteAction::CreateNote, err.into()))?;
    info!("event=note_create module=api status=start patient_id={patient_id}");
    let note = store
        .run(move |conn| {
            let draft: NoteDraft = decode_body(&body)?;
            NoteService::new(SqliteNoteRepository::new(conn)).create_note(&patient_id, &draft)
        })
        .await
        .map_err(|err| ApiError::write(WriteAction::CreateNote, err))?;

    info!("event=note_create module=api status=ok id={}", note.id);
    Ok((StatusCode::CREATED, Json(note.to_representation())))
}

pub async fn update_note(
    State(store): State<Store>,
    segment: Segment,
    body: Bytes,
) -> ApiResult<Json<NoteRepresentation>> {
    let id = record_id(Resource::Note, segment)?;
    info!("event=note_update module=api status=start id={id}");
    let note = store
        .run(move |conn| {
            let mut service = NoteService::new(SqliteNoteRepository::new(conn));
            service.require_note(id)?;
            let draft: NoteDraft = decode_body(&body)?;
            service.update_note(id, &draft)
        })
        .await
        .map_err(|err| ApiError::write(WriteAction::UpdateNote, err))?;

    info!("event=note_update module=api status=ok id={id}");
    Ok(Json(note.to_representation()))
}

pub async fn delete_note(
    State(store): State<Store>,
    segment: Segment,
) -> ApiResult<StatusCode> {
    let id = record_id(Resource::Note, segment)?;
    info!("event=note_delete module=api status=start id={id}");
    store
        .run(move |conn| {
            let mut service = NoteService::new(SqliteNoteRepository::new(conn));
            service.require_note(id)?;
            service.delete_note(id)
        })
        .await
        .map_err(|err| ApiError::write(WriteAction::DeleteNote, err))?;

    info!("event=note_delete module=api status=ok id={id}");
    Ok(StatusCode::NO_CONTENT)
}
