//! Data models shared by the wizard, the renderer and the submission service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-submitted project details, before an ID is assigned.
///
/// Constructed from form input and immutable once it has passed
/// [`crate::validate::validate`]. Wire field names are camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCertificate {
    pub name: String,
    pub email: String,
    pub github_repo: String,
    pub vercel_deployment: String,
    pub project_explanation: String,
}

/// A stored certificate record.
///
/// Created exactly once per successful submission and never mutated. The
/// numeric `id` is assigned by the store; `certificate_id` is unique across
/// all stored certificates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub github_repo: String,
    pub vercel_deployment: String,
    pub project_explanation: String,
    pub certificate_id: String,
    pub created_at: DateTime<Utc>,
}

impl Certificate {
    /// Create a new certificate record, stamping the creation time.
    pub fn new(id: u64, details: NewCertificate, certificate_id: String) -> Self {
        Self {
            id,
            name: details.name,
            email: details.email,
            github_repo: details.github_repo,
            vercel_deployment: details.vercel_deployment,
            project_explanation: details.project_explanation,
            certificate_id,
            created_at: Utc::now(),
        }
    }

    /// The submission details carried by this record.
    pub fn details(&self) -> NewCertificate {
        NewCertificate {
            name: self.name.clone(),
            email: self.email.clone(),
            github_repo: self.github_repo.clone(),
            vercel_deployment: self.vercel_deployment.clone(),
            project_explanation: self.project_explanation.clone(),
        }
    }
}

/// The wizard-side record shown on the preview step and printed on the
/// downloaded artifact: the submission plus a generated ID and display date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateData {
    #[serde(flatten)]
    pub details: NewCertificate,
    pub certificate_id: String,
    pub date: String,
}

/// Format a timestamp the way the certificate displays it, e.g.
/// `August 7, 2026`.
pub fn format_display_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_details() -> NewCertificate {
        NewCertificate {
            name: "Ann Lee".to_string(),
            email: "ann@example.com".to_string(),
            github_repo: "https://github.com/ann/proj".to_string(),
            vercel_deployment: "https://proj.vercel.app".to_string(),
            project_explanation: "A project explanation that is definitely long enough to pass."
                .to_string(),
        }
    }

    #[test]
    fn certificate_keeps_submission_fields() {
        let cert = Certificate::new(1, sample_details(), "CERT-2026-ABCDEF123".to_string());

        assert_eq!(cert.id, 1);
        assert_eq!(cert.name, "Ann Lee");
        assert_eq!(cert.email, "ann@example.com");
        assert_eq!(cert.certificate_id, "CERT-2026-ABCDEF123");
        assert_eq!(cert.details(), sample_details());
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let cert = Certificate::new(1, sample_details(), "CERT-2026-ABCDEF123".to_string());
        let json = serde_json::to_value(&cert).unwrap();

        assert!(json.get("githubRepo").is_some());
        assert!(json.get("vercelDeployment").is_some());
        assert!(json.get("projectExplanation").is_some());
        assert!(json.get("certificateId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("github_repo").is_none());
    }

    #[test]
    fn certificate_data_flattens_details() {
        let data = CertificateData {
            details: sample_details(),
            certificate_id: "CERT-2026-ABCDEF123".to_string(),
            date: "August 7, 2026".to_string(),
        };
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["name"], "Ann Lee");
        assert_eq!(json["certificateId"], "CERT-2026-ABCDEF123");
        assert_eq!(json["date"], "August 7, 2026");
    }

    #[test]
    fn display_date_uses_long_month_format() {
        let date = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        assert_eq!(format_display_date(date), "August 7, 2026");

        let padded = Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap();
        assert_eq!(format_display_date(padded), "January 3, 2025");
    }
}
