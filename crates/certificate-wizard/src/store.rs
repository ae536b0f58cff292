//! Persistence adapters for confirmed certificates
//!
//! Two interchangeable backends sit behind [`PersistenceAdapter`]: the
//! file-backed [`LocalStore`] (ephemeral, single-user) and the remote
//! [`crate::ApiClient`] (submission service plus spreadsheet log).

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use certforge_common::{Certificate, CertificateData, Result};

/// Where confirmed certificates are durably recorded.
///
/// `save` returns the confirmed certificate ID, which may differ from the
/// one on the record when the backend assigns an authoritative ID.
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    async fn save(&self, certificate: &CertificateData) -> Result<String>;
}

/// File name of the local certificate list, namespaced to this
/// application.
pub const LOCAL_STORE_FILE: &str = "certforge_certificates.json";

/// Client-resident ordered list of certificates in a single JSON file.
///
/// The whole list is read on access and rewritten wholesale on every save.
/// Read-modify-write is not atomic across concurrent sessions (last writer
/// wins), which is acceptable under the single-user model.
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Store the certificate list under `dir` using the fixed namespaced
    /// file name.
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(LOCAL_STORE_FILE),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All saved certificates, oldest first. A missing file is an empty
    /// list, not an error.
    pub fn certificates(&self) -> Result<Vec<Certificate>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn write_all(&self, certificates: &[Certificate]) -> Result<()> {
        let json = serde_json::to_vec_pretty(certificates)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[async_trait]
impl PersistenceAdapter for LocalStore {
    async fn save(&self, certificate: &CertificateData) -> Result<String> {
        let mut certificates = self.certificates()?;
        let row_id = certificates.len() as u64 + 1;
        certificates.push(Certificate::new(
            row_id,
            certificate.details.clone(),
            certificate.certificate_id.clone(),
        ));
        self.write_all(&certificates)?;

        debug!(
            "saved certificate {} as row {} in {}",
            certificate.certificate_id,
            row_id,
            self.path.display()
        );
        Ok(certificate.certificate_id.clone())
    }
}
