//! Patient resource handlers.

use super::{decode_body, record_id, Segment};
use crate::error::{ApiError, ApiResult, Resource, WriteAction};
use crate::store::Store;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use log::info;
use versenotes_core::{
    PatientDraft, PatientRepresentation, PatientService, SqlitePatientRepository,
};

pub async fn list_patients(
    State(store): State<Store>,
) -> ApiResult<Json<Vec<PatientRepresentation>>> {
    info!("event=patient_list module=api status=start");
    let patients = store
        .run(|conn| PatientService::new(SqlitePatientRepository::new(conn)).list_patients())
        .await
        .map_err(|err| ApiError::read(Resource::Patient, err))?;

    info!(
        "event=patient_list module=api status=ok count={}",
        patients.len()
    );
    Ok(Json(
        patients.iter().map(|patient| patient.to_representation()).collect(),
    ))
}

pub async fn get_patient(
    State(store): State<Store>,
    segment: Segment,
) -> ApiResult<Json<PatientRepresentation>> {
    let id = record_id(Resource::Patient, segment)?;
    info!("event=patient_get module=api status=start id={id}");
    let patient = store
        .run(move |conn| {
            PatientService::new(SqlitePatientRepository::new(conn)).require_patient(id)
        })
        .await
        .map_err(|err| ApiError::read(Resource::Patient, err))?;

    Ok(Json(patient.to_representation()))
}

pub async fn create_patient(
    State(store): State<Store>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<PatientRepresentation>)> {
    info!("event=patient_create module=api status=start");
    let patient = store
        .run(move |conn| {
            let draft: PatientDraft = decode_body(&body)?;
            PatientService::new(SqlitePatientRepository::new(conn)).create_patient(&draft)
        })
        .await
        .map_err(|err| ApiError::write(WriteAction::CreatePatient, err))?;

    info!("event=patient_create module=api status=ok id={}", patient.id);
    Ok((StatusCode::CREATED, Json(patient.to_representation())))
}

pub async fn update_patient(
    State(store): State<Store>,
    segment: Segment,
    body: Bytes,
) -> ApiResult<Json<PatientRepresentation>> {
    let id = record_id(Resource::Patient, segment)?;
    info!("event=patient_update module=api status=start id={id}");
    let patient = store
        .run(move |conn| {
            let mut service = PatientService::new(SqlitePatientRepository::new(conn));
            service.require_patient(id)?;
            let draft: PatientDraft = decode_body(&body)?;
            service.update_patient(id, &draft)
        })
        .await
        .map_err(|err| ApiError::write(WriteAction::UpdatePatient, err))?;

    info!("event=patient_update module=api status=ok id={id}");
    Ok(Json(patient.to_representation()))
}

pub async fn delete_patient(
    State(store): State<Store>,
    segment: Segment,
) -> ApiResult<StatusCode> {
    let id = record_id(Resource::Patient, segment)?;
    info!("event=patient_delete module=api status=start id={id}");
    store
        .run(move |conn| {
            let mut service = PatientService::new(SqlitePatientRepository::new(conn));
            service.require_patient(id)?;
            service.delete_patient(id)
        })
        .await
        .map_err(|err| ApiError::write(WriteAction::DeletePatient, err))?;

    info!("event=patient_delete module=api status=ok id={id}");
    Ok(StatusCode::NO_CONTENT)
}
