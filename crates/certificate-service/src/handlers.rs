//! API request handlers for the certificate submission service

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::Mutex;
use tracing::{error, info};

use certforge_common::{generate_certificate_id, validate, Certificate, ValidationErrors};

use crate::{
    models::{CreateCertificateRequest, CreateCertificateResponse},
    sheets::CertificateLog,
    storage::MemStorage,
};

/// How many times a server-generated certificate ID is re-drawn when it
/// collides with a stored one. With a 36^9 keyspace one draw virtually
/// always suffices.
const MAX_ID_ATTEMPTS: usize = 5;

/// Shared application state
pub struct AppState {
    pub storage: Mutex<MemStorage>,
    pub log: Arc<dyn CertificateLog>,
}

impl AppState {
    /// Create application state with an empty store and the given log.
    pub fn new(log: Arc<dyn CertificateLog>) -> Self {
        Self {
            storage: Mutex::new(MemStorage::new()),
            log,
        }
    }
}

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// 400 with the collected field errors.
    Validation(ValidationErrors),
    /// 404 for a certificate ID with no stored record.
    NotFound(String),
    /// 409 for a client-supplied certificate ID that is already taken.
    Conflict(String),
    /// 500 with a generic message plus the underlying error text.
    Internal { message: String, error: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "message": "Invalid certificate data",
                    "errors": errors.errors,
                })),
            )
                .into_response(),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            ApiError::Conflict(message) => (
                StatusCode::CONFLICT,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            ApiError::Internal { message, error } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "message": message, "error": error })),
            )
                .into_response(),
        }
    }
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "certificate-service"
    }))
}

/// Create a certificate: validate, assign an ID, store, append to the log.
pub async fn create_certificate_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCertificateRequest>,
) -> Result<(StatusCode, Json<CreateCertificateResponse>), ApiError> {
    let (details, client_id) = payload.into_parts();

    validate(&details).map_err(ApiError::Validation)?;

    // The lock is held across the log append so a failed save is rolled
    // back before any other request can observe the record.
    let mut storage = state.storage.lock().await;

    let certificate = match client_id {
        Some(certificate_id) => storage
            .create_certificate(details, certificate_id.clone())
            .ok_or_else(|| {
                ApiError::Conflict(format!("Certificate ID already exists: {certificate_id}"))
            })?,
        None => generate_and_store(&mut storage, details)?,
    };

    info!("created certificate {}", certificate.certificate_id);

    if let Err(err) = state.log.append(&certificate).await {
        storage.remove(certificate.id);
        error!("certificate log append failed: {err:#}");
        return Err(ApiError::Internal {
            message: "Failed to create certificate".to_string(),
            error: err.to_string(),
        });
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateCertificateResponse {
            message: "Certificate created successfully".to_string(),
            certificate_id: certificate.certificate_id,
        }),
    ))
}

fn generate_and_store(
    storage: &mut MemStorage,
    details: certforge_common::NewCertificate,
) -> Result<Certificate, ApiError> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let certificate_id = generate_certificate_id();
        if let Some(certificate) = storage.create_certificate(details.clone(), certificate_id) {
            return Ok(certificate);
        }
    }
    Err(ApiError::Internal {
        message: "Failed to create certificate".to_string(),
        error: "could not generate a unique certificate ID".to_string(),
    })
}

/// Get a certificate by its certificate ID.
pub async fn get_certificate_handler(
    State(state): State<Arc<AppState>>,
    Path(certificate_id): Path<String>,
) -> Result<Json<Certificate>, ApiError> {
    let storage = state.storage.lock().await;

    match storage.get_by_certificate_id(&certificate_id) {
        Some(certificate) => Ok(Json(certificate.clone())),
        None => Err(ApiError::NotFound("Certificate not found".to_string())),
    }
}
