//! Shared domain types for the certforge workspace
//!
//! The submission record and certificate models, the field validator, the
//! certificate ID generator and the common error taxonomy. Both the wizard
//! client and the submission service validate with the same rules, so a
//! record that previews locally is exactly the record the endpoint accepts.

pub mod error;
pub mod id;
pub mod model;
pub mod validate;

pub use error::{Error, Result};
pub use id::{generate_certificate_id, is_well_formed_certificate_id};
pub use model::{format_display_date, Certificate, CertificateData, NewCertificate};
pub use validate::{validate, FieldError, ValidationErrors, DEPLOYMENT_HOSTS};
