use chrono::NaiveDate;
use versenotes_core::db::open_db_in_memory;
use versenotes_core::{
    NoteDraft, NoteRepository, PatientDraft, PatientRepository, PatientService, RepoError,
    SqliteNoteRepository, SqlitePatientRepository, ValidationError,
};

fn draft(name: &str, dob: &str, gender: &str) -> PatientDraft {
    PatientDraft::new(
        name,
        NaiveDate::parse_from_str(dob, "%Y-%m-%d").unwrap(),
        gender,
    )
}

#[test]
fn create_and_get_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePatientRepository::new(&mut conn);

    let created = repo
        .create_patient(&draft("A. Lee", "1990-01-01", "F"))
        .unwrap();
    assert_eq!(created.id, 1);

    let loaded = repo.get_patient(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "A. Lee");
    assert_eq!(loaded.date_of_birth.to_string(), "1990-01-01");
    assert_eq!(loaded.gender, "F");
}

#[test]
fn list_returns_patients_in_insertion_order() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePatientRepository::new(&mut conn);

    let first = repo.create_patient(&draft("first", "1970-05-05", "M")).unwrap();
    let second = repo.create_patient(&draft("second", "1980-06-06", "X")).unwrap();

    let listed = repo.list_patients().unwrap();
    assert_eq!(listed, vec![first, second]);
}

#[test]
fn update_replaces_all_fields() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePatientRepository::new(&mut conn);
    let created = repo.create_patient(&draft("draft", "1990-01-01", "F")).unwrap();

    let updated = repo
        .update_patient(created.id, &draft("B. Kim", "1991-02-03", "non-binary"))
        .unwrap();
    assert_eq!(updated.id, created.id);

    let loaded = repo.get_patient(created.id).unwrap().unwrap();
    assert_eq!(loaded, updated);
    assert_eq!(loaded.gender, "non-binary");
}

#[test]
fn update_and_delete_not_found_return_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePatientRepository::new(&mut conn);

    let err = repo
        .update_patient(42, &draft("ghost", "2000-01-01", "F"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));

    let err = repo.delete_patient(42).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn validation_failure_blocks_create_and_update_without_writing() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePatientRepository::new(&mut conn);

    let err = repo.create_patient(&draft("  ", "1990-01-01", "F")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyField("name"))
    ));
    assert!(err.is_validation());
    assert!(repo.list_patients().unwrap().is_empty());

    let created = repo.create_patient(&draft("A. Lee", "1990-01-01", "F")).unwrap();
    let err = repo
        .update_patient(created.id, &draft("", "1990-01-01", "F"))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(repo.get_patient(created.id).unwrap().unwrap(), created);
}

#[test]
fn deleted_ids_are_not_reused() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePatientRepository::new(&mut conn);

    let first = repo.create_patient(&draft("first", "1990-01-01", "F")).unwrap();
    repo.delete_patient(first.id).unwrap();
    let second = repo.create_patient(&draft("second", "1990-01-01", "F")).unwrap();

    assert!(second.id > first.id);
    assert!(repo.get_patient(first.id).unwrap().is_none());
}

#[test]
fn deleting_patient_keeps_its_notes() {
    let mut conn = open_db_in_memory().unwrap();
    let patient = {
        let mut repo = SqlitePatientRepository::new(&mut conn);
        repo.create_patient(&draft("A. Lee", "1990-01-01", "F")).unwrap()
    };
    let note = {
        let mut repo = SqliteNoteRepository::new(&mut conn);
        repo.create_note(
            &patient.id.to_string(),
            &NoteDraft::new("first visit"),
            chrono::Utc::now(),
        )
        .unwrap()
    };

    SqlitePatientRepository::new(&mut conn)
        .delete_patient(patient.id)
        .unwrap();

    let repo = SqliteNoteRepository::new(&mut conn);
    assert_eq!(repo.get_note(note.id).unwrap(), Some(note.clone()));
    assert_eq!(
        repo.list_notes_for_patient(&patient.id.to_string()).unwrap(),
        vec![note]
    );
}

#[test]
fn service_require_patient_reports_absence_as_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = PatientService::new(SqlitePatientRepository::new(&mut conn));

    assert!(matches!(
        service.require_patient(5).unwrap_err(),
        RepoError::NotFound(5)
    ));

    let created = service
        .create_patient(&draft("A. Lee", "1990-01-01", "F"))
        .unwrap();
    assert_eq!(service.require_patient(created.id).unwrap(), created);
    assert_eq!(service.list_patients().unwrap().len(), 1);

    service.delete_patient(created.id).unwrap();
    assert!(service.get_patient(created.id).unwrap().is_none());
}
