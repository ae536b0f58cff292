//! Google Sheets certificate log
//!
//! Each confirmed certificate is appended as one flattened row to a
//! spreadsheet over the Sheets v4 REST API. The spreadsheet is the only
//! durable record the system keeps; the in-process store is lost on
//! restart.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use certforge_common::Certificate;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Sheet range holding the flattened rows, column A through G.
pub const SHEETS_RANGE: &str = "Sheet1!A:G";

/// Where confirmed certificates are durably appended.
#[async_trait]
pub trait CertificateLog: Send + Sync {
    /// Append one flattened certificate row to the log.
    async fn append(&self, certificate: &Certificate) -> Result<()>;
}

/// A certificate row read back from the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedCertificate {
    pub certificate_id: String,
    pub name: String,
    pub email: String,
    pub github_repo: String,
    pub vercel_deployment: String,
    pub project_explanation: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
struct AppendRequest {
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Sheets-backed [`CertificateLog`].
///
/// Credentials are optional at construction so the service can start
/// without them; they are required (and their absence is an error) only
/// when a save actually reaches the log.
pub struct GoogleSheetsLog {
    api_key: Option<String>,
    spreadsheet_id: Option<String>,
    client: reqwest::Client,
}

impl GoogleSheetsLog {
    pub fn new(api_key: Option<String>, spreadsheet_id: Option<String>) -> Self {
        Self {
            api_key,
            spreadsheet_id,
            client: reqwest::Client::new(),
        }
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .context("GOOGLE_SHEETS_API_KEY environment variable is missing")?;
        let spreadsheet_id = self
            .spreadsheet_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .context("GOOGLE_SHEETS_SPREADSHEET_ID environment variable is missing")?;
        Ok((api_key, spreadsheet_id))
    }

    /// The column order of a logged row, A through G.
    pub fn flatten_row(certificate: &Certificate) -> Vec<String> {
        vec![
            certificate.certificate_id.clone(),
            certificate.name.clone(),
            certificate.email.clone(),
            certificate.github_repo.clone(),
            certificate.vercel_deployment.clone(),
            certificate.project_explanation.clone(),
            certificate.created_at.to_rfc3339(),
        ]
    }

    /// Read the sheet and locate a row by certificate ID (column A).
    pub async fn fetch_by_certificate_id(
        &self,
        certificate_id: &str,
    ) -> Result<Option<LoggedCertificate>> {
        let (api_key, spreadsheet_id) = self.credentials()?;
        let url = format!("{SHEETS_API_BASE}/{spreadsheet_id}/values/{SHEETS_RANGE}");

        debug!("reading spreadsheet rows from {url}");

        let response = self
            .client
            .get(&url)
            .query(&[("key", api_key)])
            .send()
            .await
            .context("failed to reach Google Sheets")?;

        if !response.status().is_success() {
            bail!(
                "Google Sheets read failed with status {}",
                response.status()
            );
        }

        let body: ValuesResponse = response
            .json()
            .await
            .context("failed to parse Google Sheets response")?;

        Ok(body
            .values
            .iter()
            .find(|row| row.first().is_some_and(|cell| cell == certificate_id))
            .map(|row| row_to_logged_certificate(row)))
    }
}

#[async_trait]
impl CertificateLog for GoogleSheetsLog {
    async fn append(&self, certificate: &Certificate) -> Result<()> {
        let (api_key, spreadsheet_id) = self.credentials()?;
        let url = format!("{SHEETS_API_BASE}/{spreadsheet_id}/values/{SHEETS_RANGE}:append");

        let body = AppendRequest {
            values: vec![Self::flatten_row(certificate)],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("valueInputOption", "RAW"), ("key", api_key)])
            .json(&body)
            .send()
            .await
            .context("failed to reach Google Sheets")?;

        if !response.status().is_success() {
            bail!(
                "Google Sheets append failed with status {}",
                response.status()
            );
        }

        info!(
            "certificate {} appended to spreadsheet log",
            certificate.certificate_id
        );
        Ok(())
    }
}

/// Convert a raw sheet row into a record; missing trailing cells read as
/// empty strings.
fn row_to_logged_certificate(row: &[String]) -> LoggedCertificate {
    let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
    LoggedCertificate {
        certificate_id: cell(0),
        name: cell(1),
        email: cell(2),
        github_repo: cell(3),
        vercel_deployment: cell(4),
        project_explanation: cell(5),
        created_at: cell(6),
    }
}
