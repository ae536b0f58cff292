//! Configuration management for the certificate service
//!
//! Loads configuration from environment variables with sensible defaults.
//! Sheets credentials are optional here: the service starts without them,
//! and only the save path that reaches the spreadsheet log fails.

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server host
    pub api_host: String,

    /// API server port
    pub api_port: u16,

    /// Google Sheets API key, if configured
    pub sheets_api_key: Option<String>,

    /// Target spreadsheet identifier, if configured
    pub sheets_spreadsheet_id: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let config = Config {
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "8084".to_string())
                .parse()
                .context("Invalid API_PORT")?,

            sheets_api_key: env::var("GOOGLE_SHEETS_API_KEY").ok(),

            sheets_spreadsheet_id: env::var("GOOGLE_SHEETS_SPREADSHEET_ID").ok(),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.api_port == 0 {
            anyhow::bail!("API_PORT must be greater than 0");
        }

        Ok(())
    }

    /// Get the API server address
    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    /// Whether both spreadsheet credentials are present.
    pub fn has_sheets_credentials(&self) -> bool {
        self.sheets_api_key.is_some() && self.sheets_spreadsheet_id.is_some()
    }
}
