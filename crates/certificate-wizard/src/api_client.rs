//! Client for the certificate submission service

use anyhow::anyhow;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use certforge_common::{Certificate, CertificateData, Result};

use crate::store::PersistenceAdapter;

/// Remote persistence adapter: saves through `POST /api/certificates`.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCertificateResponse {
    certificate_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiClient {
    /// Create a new client for the service at `base_url`.
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Look up a certificate by its certificate ID.
    pub async fn get_certificate(&self, certificate_id: &str) -> Result<Option<Certificate>> {
        let url = format!("{}/api/certificates/{}", self.base_url, certificate_id);

        debug!("fetching certificate from service: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!(e).context("failed to reach certificate service"))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(anyhow!("failed to fetch certificate: {}", response.status()).into());
        }

        let certificate: Certificate = response
            .json()
            .await
            .map_err(|e| anyhow!(e).context("failed to parse certificate response"))?;

        Ok(Some(certificate))
    }

    /// Check if the submission service is healthy.
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!(e).context("failed to reach certificate service"))?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl PersistenceAdapter for ApiClient {
    async fn save(&self, certificate: &CertificateData) -> Result<String> {
        let url = format!("{}/api/certificates", self.base_url);

        debug!("saving certificate {} via {url}", certificate.certificate_id);

        let response = self
            .client
            .post(&url)
            .json(certificate)
            .send()
            .await
            .map_err(|e| anyhow!(e).context("failed to reach certificate service"))?;

        let status = response.status();
        if status.is_success() {
            let body: CreateCertificateResponse = response
                .json()
                .await
                .map_err(|e| anyhow!(e).context("failed to parse save response"))?;
            return Ok(body.certificate_id);
        }

        // Surface the server's message; fall back to the bare status when
        // the body is not the expected error shape.
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| format!("certificate save failed with status {status}"));
        Err(anyhow!(message).into())
    }
}
