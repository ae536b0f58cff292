//! Certificate Submission Service
//!
//! REST API for validated certificate submissions and the spreadsheet log

use std::sync::Arc;

use anyhow::{Context, Result};
use certificate_service::{create_router, AppState, Config, GoogleSheetsLog};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "certificate_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    info!("Starting Certificate Submission Service");
    info!("Listening on {}", config.api_address());
    if !config.has_sheets_credentials() {
        warn!("Google Sheets credentials not configured; saves will fail until they are set");
    }

    // Create application state
    let log = GoogleSheetsLog::new(
        config.sheets_api_key.clone(),
        config.sheets_spreadsheet_id.clone(),
    );
    let state = AppState::new(Arc::new(log));

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(&config.api_address())
        .await
        .context("Failed to bind to address")?;

    info!(
        "Certificate Submission Service running on http://{}",
        config.api_address()
    );

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
