//! Request/response models for the submission endpoint

use serde::{Deserialize, Serialize};

use certforge_common::NewCertificate;

/// Body of `POST /api/certificates`.
///
/// Fields are optional at the wire level so that missing values reach the
/// shared validator and come back as field errors instead of a
/// deserialization failure. Unknown keys (the wizard also posts its
/// display `date`) are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCertificateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub github_repo: Option<String>,
    pub vercel_deployment: Option<String>,
    pub project_explanation: Option<String>,

    /// Client-generated certificate ID; the server generates one when
    /// absent.
    pub certificate_id: Option<String>,
}

impl CreateCertificateRequest {
    /// Split the payload into a candidate submission and the optional
    /// client-supplied certificate ID. Missing fields become empty
    /// strings, which fail their respective validation rules.
    pub fn into_parts(self) -> (NewCertificate, Option<String>) {
        let details = NewCertificate {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            github_repo: self.github_repo.unwrap_or_default(),
            vercel_deployment: self.vercel_deployment.unwrap_or_default(),
            project_explanation: self.project_explanation.unwrap_or_default(),
        };
        (details, self.certificate_id)
    }
}

/// Success body of `POST /api/certificates`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCertificateResponse {
    pub message: String,
    pub certificate_id: String,
}
