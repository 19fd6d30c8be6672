//! HTTP routes for patients and notes.
//!
//! # Responsibility
//! - Assemble the router, its shared `Store` state and the CORS policy.
//! - Decode path ids and JSON bodies into core types.
//! - Keep every rejection in the `{"error": ...}` shape: path segments are
//!   extracted fallibly and bodies are unbounded.
//!
//! # Invariants
//! - Each handler performs one storage job on its own connection.
//! - Body decoding happens inside the job, after any existence lookup, so a
//!   missing record is reported before a bad body.

use crate::error::{ApiError, ApiResult, Resource};
use crate::store::Store;
use axum::extract::rejection::PathRejection;
use axum::extract::{DefaultBodyLimit, Path};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use serde::de::DeserializeOwned;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use versenotes_core::{RecordId, RepoError, RepoResult, ValidationError};

mod health;
mod notes;
mod patients;

/// Builds the application router.
///
/// Browsers may call the API only from `allowed_origin`.
pub fn router(store: Store, allowed_origin: HeaderValue) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            "/patients/:id",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route(
            "/patients/:id/notes",
            get(notes::list_patient_notes).post(notes::create_note),
        )
        .route("/notes", get(notes::list_notes))
        .route(
            "/notes/:id",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(cors_layer(allowed_origin))
        .with_state(store)
}

fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

/// One `:id` path segment; the rejection case covers non-UTF-8 bytes.
type Segment = Result<Path<String>, PathRejection>;

/// Resolves the id segment of `/patients/:id` or `/notes/:id`.
fn record_id(resource: Resource, segment: Segment) -> ApiResult<RecordId> {
    let Path(raw) = segment
        .map_err(|rejection| ApiError::not_found(resource, rejection.body_text()))?;
    parse_record_id(resource, &raw)
}

/// Resolves the verbatim `patient_id` segment of `/patients/:id/notes`.
fn patient_reference(segment: Segment) -> RepoResult<String> {
    segment.map(|Path(raw)| raw).map_err(|rejection| {
        RepoError::Validation(ValidationError::MalformedPath(rejection.body_text()))
    })
}

/// Parses a `/{resource}/{id}` segment. Non-integers cannot name a row.
fn parse_record_id(resource: Resource, raw: &str) -> ApiResult<RecordId> {
    raw.parse::<RecordId>()
        .map_err(|_| ApiError::not_found(resource, raw))
}

/// Decodes a JSON body, regardless of `Content-Type`.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> RepoResult<T> {
    serde_json::from_slice(body)
        .map_err(|err| RepoError::Validation(ValidationError::MalformedBody(err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::{decode_body, parse_record_id};
    use crate::error::{ApiError, Resource};
    use versenotes_core::{NoteDraft, RepoError, ValidationError};

    #[test]
    fn parse_record_id_accepts_integers_only() {
        assert_eq!(parse_record_id(Resource::Patient, "12").unwrap(), 12);

        let err = parse_record_id(Resource::Note, "abc").unwrap_err();
        assert!(matches!(
            err,
            ApiError::NotFound {
                resource: Resource::Note,
                ref id,
            } if id == "abc"
        ));
    }

    #[test]
    fn decode_body_reports_malformed_json_as_validation() {
        let draft: NoteDraft = decode_body(br#"{"content":"ok"}"#).unwrap();
        assert_eq!(draft.content, "ok");

        let bodies: [&[u8]; 4] = [
            b"",
            b"not json",
            br#"{"text":"wrong key"}"#,
            br#"{"content":5}"#,
        ];
        for body in bodies {
            let err = decode_body::<NoteDraft>(body).unwrap_err();
            assert!(matches!(
                err,
                RepoError::Validation(ValidationError::MalformedBody(_))
            ));
        }
    }
}
