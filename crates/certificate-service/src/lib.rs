//! Certificate Submission Service
//!
//! REST API that receives validated certificate submissions, stores them
//! in an in-process map and appends each confirmed record to a Google
//! Sheets log.
//!
//! ## Endpoints
//!
//! - `POST /api/certificates` - Validate and store a submission
//! - `GET /api/certificates/{certificate_id}` - Look up a stored certificate
//! - `GET /health` - Health check

pub mod config;
pub mod handlers;
pub mod models;
pub mod sheets;
pub mod storage;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use handlers::{ApiError, AppState};
pub use models::{CreateCertificateRequest, CreateCertificateResponse};
pub use sheets::{CertificateLog, GoogleSheetsLog, LoggedCertificate};
pub use storage::MemStorage;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route(
            "/api/certificates",
            post(handlers::create_certificate_handler),
        )
        .route(
            "/api/certificates/{certificate_id}",
            get(handlers::get_certificate_handler),
        )
        .with_state(shared_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
