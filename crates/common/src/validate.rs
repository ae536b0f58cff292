//! Field validation for certificate submissions
//!
//! All fields are checked on every call; failures are collected into
//! per-field messages rather than failing fast, so a form can highlight
//! every offending input at once.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::model::NewCertificate;

/// Deployment hosts accepted for the `vercelDeployment` field.
pub const DEPLOYMENT_HOSTS: [&str; 3] = ["vercel.app", "netlify.app", "herokuapp.com"];

/// A single field-level validation failure. `field` carries the wire
/// (camelCase) name of the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// The collected validation failures for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Names of all fields that failed validation.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }

    /// Whether a particular field failed validation.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a candidate submission.
///
/// Returns `Ok(())` when every field passes, or the full list of field
/// errors otherwise. Lengths are counted in characters, not bytes.
pub fn validate(input: &NewCertificate) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if input.name.chars().count() < 2 {
        errors.push(FieldError {
            field: "name",
            message: "Name must be at least 2 characters",
        });
    }

    if !is_valid_email(&input.email) {
        errors.push(FieldError {
            field: "email",
            message: "Please enter a valid email address",
        });
    }

    match Url::parse(&input.github_repo) {
        Err(_) => errors.push(FieldError {
            field: "githubRepo",
            message: "Please enter a valid URL",
        }),
        Ok(_) if !input.github_repo.contains("github.com") => errors.push(FieldError {
            field: "githubRepo",
            message: "Must be a GitHub repository URL",
        }),
        Ok(_) => {}
    }

    match Url::parse(&input.vercel_deployment) {
        Err(_) => errors.push(FieldError {
            field: "vercelDeployment",
            message: "Please enter a valid URL",
        }),
        Ok(url) if !is_allowed_deployment_host(&url) => errors.push(FieldError {
            field: "vercelDeployment",
            message: "Must be a valid deployment URL",
        }),
        Ok(_) => {}
    }

    if input.project_explanation.chars().count() < 50 {
        errors.push(FieldError {
            field: "projectExplanation",
            message: "Project explanation must be at least 50 characters",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}

/// Structural email check: one `@`, non-empty local part, dotted domain
/// with non-empty labels and a multi-character top-level label.
fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let mut labels = domain.split('.');
    let Some(first) = labels.next() else {
        return false;
    };
    let rest: Vec<&str> = labels.collect();
    if first.is_empty() || rest.is_empty() {
        return false;
    }
    if rest.iter().any(|label| label.is_empty()) {
        return false;
    }
    // Top-level label must be at least two characters.
    rest.last().is_some_and(|tld| tld.chars().count() >= 2)
}

fn is_allowed_deployment_host(url: &Url) -> bool {
    url.host_str().is_some_and(|host| {
        DEPLOYMENT_HOSTS
            .iter()
            .any(|allowed| host == *allowed || host.ends_with(&format!(".{allowed}")))
    })
}
