// libs/doctor-cell/tests/doctor_test.rs

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::{Path, State};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use serde_json::json;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{header, method, path, query_param};

use doctor_cell::handlers::{get_doctor, get_doctor_slots};
use doctor_cell::models::*;
use doctor_cell::services::DoctorService;
use scheduling_cell::SchedulingError;
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::test_utils::{MockStoreResponses, TestConfig};

async fn mount_doctor(mock_server: &MockServer, doctor_id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("id", format!("eq.{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

fn config_for(mock_server: &MockServer) -> AppConfig {
    TestConfig::with_store_url(&mock_server.uri()).to_app_config()
}

fn create_auth_header(token: &str) -> TypedHeader<Authorization<Bearer>> {
    TypedHeader(Authorization::bearer(token).unwrap())
}

// ==============================================================================
// SERVICE TESTS
// ==============================================================================

#[tokio::test]
async fn test_get_doctor_reads_profile_and_slots() {
    let mock_server = MockServer::start().await;
    mount_doctor(&mock_server, "doc-1", json!([
        MockStoreResponses::doctor_response("doc-1", &[
            ("monday", "09:00", "12:00"),
            ("wednesday", "14:00:00", "17:30:00"),
        ])
    ])).await;

    let service = DoctorService::new(&config_for(&mock_server));
    let doctor = service.get_doctor("doc-1", None).await.unwrap();

    assert_eq!(doctor.display_name(), "Dr. Test");
    assert_eq!(doctor.ticket_price, Some(500.0));
    assert_eq!(doctor.time_slots.len(), 2);
    assert_eq!(doctor.display_photo(), DEFAULT_AVATAR_URL);

    let availability = doctor.availability().unwrap();
    assert_eq!(availability.len(), 2);
}

#[tokio::test]
async fn test_anonymous_reads_use_anon_key() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(header("apikey", "test-anon-key"))
        .and(header("authorization", "Bearer test-anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::doctor_response("doc-1", &[])
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = DoctorService::new(&config_for(&mock_server));
    let doctor = service.get_doctor("doc-1", None).await.unwrap();
    assert!(doctor.time_slots.is_empty());
}

#[tokio::test]
async fn test_unknown_doctor_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_doctor(&mock_server, "missing", json!([])).await;

    let service = DoctorService::new(&config_for(&mock_server));
    let result = service.get_doctor("missing", Some("token")).await;

    assert_matches!(result, Err(DoctorError::NotFound(id)) if id == "missing");
}

#[tokio::test]
async fn test_slot_labels_follow_stored_order() {
    let mock_server = MockServer::start().await;
    mount_doctor(&mock_server, "doc-1", json!([
        MockStoreResponses::doctor_response("doc-1", &[
            ("friday", "18:00", "21:00"),
            ("monday", "09:00", "12:00"),
        ])
    ])).await;

    let service = DoctorService::new(&config_for(&mock_server));
    let slots = service.get_slots("doc-1", None).await.unwrap();

    assert_eq!(slots.doctor_name, "Dr. Test");
    assert_eq!(slots.slots, vec![
        "Friday: 6:00 pm - 9:00 pm".to_string(),
        "Monday: 9:00 am - 12:00 pm".to_string(),
    ]);
}

#[tokio::test]
async fn test_duplicate_days_are_invalid_availability() {
    let mock_server = MockServer::start().await;
    mount_doctor(&mock_server, "doc-1", json!([
        MockStoreResponses::doctor_response("doc-1", &[
            ("monday", "09:00", "12:00"),
            ("Monday", "14:00", "17:00"),
        ])
    ])).await;

    let service = DoctorService::new(&config_for(&mock_server));
    let result = service.get_availability("doc-1", None).await;

    assert_matches!(
        result,
        Err(DoctorError::InvalidAvailability(SchedulingError::DuplicateDay(_)))
    );
}

#[tokio::test]
async fn test_store_rejection_maps_to_auth_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            MockStoreResponses::error_response("JWT expired", "PGRST301")
        ))
        .mount(&mock_server)
        .await;

    let service = DoctorService::new(&config_for(&mock_server));
    let err = service.get_doctor("doc-1", Some("stale")).await.unwrap_err();

    assert_matches!(err, DoctorError::Store(_));
    assert_matches!(AppError::from(err), AppError::Auth(_));
}

// ==============================================================================
// HANDLER TESTS
// ==============================================================================

#[tokio::test]
async fn test_get_doctor_slots_handler() {
    let mock_server = MockServer::start().await;
    mount_doctor(&mock_server, "doc-1", json!([
        MockStoreResponses::doctor_response("doc-1", &[("sunday", "10:00", "13:00")])
    ])).await;

    let result = get_doctor_slots(
        State(Arc::new(config_for(&mock_server))),
        Path("doc-1".to_string()),
        Some(create_auth_header("patient-token")),
    ).await;

    let response = result.expect("slots should load").0;
    assert_eq!(response["success"], true);
    assert_eq!(response["slots"][0], "Sunday: 10:00 am - 1:00 pm");
    assert_eq!(response["ticket_price"], 500.0);
}

#[tokio::test]
async fn test_get_doctor_handler_not_found() {
    let mock_server = MockServer::start().await;
    mount_doctor(&mock_server, "ghost", json!([])).await;

    let result = get_doctor(
        State(Arc::new(config_for(&mock_server))),
        Path("ghost".to_string()),
        None,
    ).await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_malformed_slot_time_surfaces_as_internal_error() {
    let mock_server = MockServer::start().await;
    mount_doctor(&mock_server, "doc-1", json!([
        MockStoreResponses::doctor_response("doc-1", &[("monday", "9am", "12:00")])
    ])).await;

    let result = get_doctor_slots(
        State(Arc::new(config_for(&mock_server))),
        Path("doc-1".to_string()),
        None,
    ).await;

    assert_matches!(result, Err(AppError::Internal(msg)) if msg.contains("availability"));
}
