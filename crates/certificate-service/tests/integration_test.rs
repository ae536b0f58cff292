//! Integration tests for the Certificate Submission Service

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tokio::sync::Mutex;
use tower::ServiceExt; // for `oneshot`

use certforge_common::Certificate;
use certificate_service::{create_router, AppState, CertificateLog};

/// Log that accepts every append and records the certificate IDs it saw.
#[derive(Default)]
struct RecordingLog {
    appended: Mutex<Vec<String>>,
}

#[async_trait]
impl CertificateLog for RecordingLog {
    async fn append(&self, certificate: &Certificate) -> Result<()> {
        self.appended
            .lock()
            .await
            .push(certificate.certificate_id.clone());
        Ok(())
    }
}

/// Log that fails like a sheet append without credentials.
struct FailingLog;

#[async_trait]
impl CertificateLog for FailingLog {
    async fn append(&self, _certificate: &Certificate) -> Result<()> {
        bail!("GOOGLE_SHEETS_API_KEY environment variable is missing")
    }
}

fn create_test_app() -> (axum::Router, Arc<RecordingLog>) {
    let log = Arc::new(RecordingLog::default());
    let app = create_router(AppState::new(log.clone()));
    (app, log)
}

fn create_failing_app() -> axum::Router {
    create_router(AppState::new(Arc::new(FailingLog)))
}

fn valid_payload() -> serde_json::Value {
    json!({
        "name": "Ann Lee",
        "email": "ann@example.com",
        "githubRepo": "https://github.com/ann/proj",
        "vercelDeployment": "https://proj.vercel.app",
        "projectExplanation": "A full-stack project with CI, tests and a documented deploy flow."
    })
}

fn post_certificates(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri("/api/certificates")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&body).expect("body is JSON")
}

#[tokio::test]
async fn test_health_check() {
    let (app, _log) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "certificate-service");
}

#[tokio::test]
async fn test_create_certificate_generates_an_id() {
    let (app, log) = create_test_app();

    let response = app.oneshot(post_certificates(&valid_payload())).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Certificate created successfully");

    let certificate_id = json["certificateId"].as_str().unwrap();
    assert!(
        certforge_common::is_well_formed_certificate_id(certificate_id),
        "unexpected id shape: {certificate_id}"
    );

    // The confirmed record reached the external log.
    assert_eq!(*log.appended.lock().await, vec![certificate_id.to_string()]);
}

#[tokio::test]
async fn test_create_certificate_keeps_client_supplied_id() {
    let (app, _log) = create_test_app();

    let mut payload = valid_payload();
    payload["certificateId"] = json!("CERT-2026-CLIENTID1");
    // The wizard also posts its display date; unknown keys are ignored.
    payload["date"] = json!("August 7, 2026");

    let response = app.oneshot(post_certificates(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["certificateId"], "CERT-2026-CLIENTID1");
}

#[tokio::test]
async fn test_create_certificate_rejects_invalid_fields() {
    let (app, log) = create_test_app();

    let mut payload = valid_payload();
    payload["vercelDeployment"] = json!("https://proj.example.com");
    payload["projectExplanation"] = json!("too short");

    let response = app.oneshot(post_certificates(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid certificate data");

    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["vercelDeployment", "projectExplanation"]);

    // Nothing was stored or logged.
    assert!(log.appended.lock().await.is_empty());
}

#[tokio::test]
async fn test_create_certificate_collects_missing_fields() {
    let (app, _log) = create_test_app();

    let response = app
        .oneshot(post_certificates(&json!({ "name": "Ann Lee" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    for field in ["email", "githubRepo", "vercelDeployment", "projectExplanation"] {
        assert!(fields.contains(&field), "missing error for {field}");
    }
    assert!(!fields.contains(&"name"));
}

#[tokio::test]
async fn test_stored_certificate_round_trips_by_confirmed_id() {
    let (app, _log) = create_test_app();

    let response = app
        .clone()
        .oneshot(post_certificates(&valid_payload()))
        .await
        .unwrap();
    let created = body_json(response).await;
    let certificate_id = created["certificateId"].as_str().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/certificates/{certificate_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["certificateId"], certificate_id);
    assert_eq!(json["name"], "Ann Lee");
    assert_eq!(json["email"], "ann@example.com");
    assert_eq!(json["githubRepo"], "https://github.com/ann/proj");
    assert_eq!(json["vercelDeployment"], "https://proj.vercel.app");
    assert_eq!(json["id"], 1);
    assert!(json["createdAt"].is_string());
}

#[tokio::test]
async fn test_get_unknown_certificate_is_not_found() {
    let (app, _log) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/certificates/CERT-2026-MISSING00")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Certificate not found");
}

#[tokio::test]
async fn test_duplicate_client_supplied_id_conflicts() {
    let (app, log) = create_test_app();

    let mut payload = valid_payload();
    payload["certificateId"] = json!("CERT-2026-CLIENTID1");

    let first = app
        .clone()
        .oneshot(post_certificates(&payload))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.oneshot(post_certificates(&payload)).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // Only the first submission reached the log.
    assert_eq!(log.appended.lock().await.len(), 1);
}

#[tokio::test]
async fn test_failed_log_append_rolls_back_the_store() {
    let app = create_failing_app();

    let mut payload = valid_payload();
    payload["certificateId"] = json!("CERT-2026-CLIENTID1");

    let response = app
        .clone()
        .oneshot(post_certificates(&payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Failed to create certificate");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("GOOGLE_SHEETS_API_KEY"));

    // The in-memory record was taken back; the map and the (empty)
    // durable log agree.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/certificates/CERT-2026-CLIENTID1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
