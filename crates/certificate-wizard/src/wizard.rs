//! Three-step wizard state machine
//!
//! `Collecting -> Previewing -> Delivered`, with `back` and `create_new`
//! closing the cycle. The wizard owns the single in-flight submission
//! record; a busy flag admits exactly one save at a time.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use certforge_common::{
    format_display_date, generate_certificate_id, validate, CertificateData, NewCertificate,
    ValidationErrors,
};

use crate::store::PersistenceAdapter;

/// The wizard's current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    /// Form input is being collected (or corrected after `back`).
    #[default]
    Collecting,
    /// A validated record with ID and date is shown for review.
    Previewing,
    /// The record was saved; artifacts can be downloaded.
    Delivered,
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Invalid certificate data")]
    Validation(#[from] ValidationErrors),

    /// The requested transition is not available from the current step.
    #[error("{0}")]
    InvalidTransition(&'static str),

    /// A save is already in flight; the trigger is disabled until it
    /// resolves.
    #[error("a save is already in progress")]
    Busy,

    /// The persistence adapter rejected the save. The message is what the
    /// user sees in the dismissible alert.
    #[error("{0}")]
    Save(String),
}

/// The wizard: one mutable submission slot plus step/busy/error state.
#[derive(Debug, Default)]
pub struct Wizard {
    step: WizardStep,
    certificate_data: Option<CertificateData>,
    busy: bool,
    error: Option<String>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// The current submission record, if one has been built.
    pub fn certificate_data(&self) -> Option<&CertificateData> {
        self.certificate_data.as_ref()
    }

    /// Whether a save is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The visible error message from the last failed save, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clear the visible error message.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Retained form values to prefill after `back`.
    pub fn prefill(&self) -> Option<&NewCertificate> {
        self.certificate_data.as_ref().map(|d| &d.details)
    }

    /// `Collecting -> Previewing`: validate the input and attach a freshly
    /// generated certificate ID and the current date.
    ///
    /// A new ID and date are generated on every successful submit; nothing
    /// is memoized across `back`.
    pub fn submit(&mut self, input: NewCertificate) -> Result<&CertificateData, WizardError> {
        if self.step != WizardStep::Collecting {
            return Err(WizardError::InvalidTransition(
                "submit is only available while collecting form input",
            ));
        }

        validate(&input)?;

        let data = CertificateData {
            details: input,
            certificate_id: generate_certificate_id(),
            date: format_display_date(Utc::now()),
        };
        debug!("previewing certificate {}", data.certificate_id);
        self.certificate_data = Some(data);
        self.step = WizardStep::Previewing;

        self.certificate_data
            .as_ref()
            .ok_or(WizardError::InvalidTransition("submission record missing"))
    }

    /// `Previewing -> Collecting`: return to the form, keeping the record
    /// as prefill.
    pub fn back(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Previewing {
            return Err(WizardError::InvalidTransition(
                "back is only available from the preview step",
            ));
        }
        self.step = WizardStep::Collecting;
        Ok(())
    }

    /// `Previewing -> Delivered`: save the record through the adapter.
    ///
    /// On success the adapter's confirmed ID is adopted and the wizard
    /// advances. On failure the wizard stays in `Previewing` with the
    /// record unchanged and a dismissible error set; retrying is a fresh
    /// user-initiated call.
    pub async fn generate(
        &mut self,
        adapter: &dyn PersistenceAdapter,
    ) -> Result<String, WizardError> {
        if self.step != WizardStep::Previewing {
            return Err(WizardError::InvalidTransition(
                "generate is only available from the preview step",
            ));
        }
        if self.busy {
            return Err(WizardError::Busy);
        }
        let data = self
            .certificate_data
            .clone()
            .ok_or(WizardError::InvalidTransition("submission record missing"))?;

        self.busy = true;
        let result = adapter.save(&data).await;
        self.busy = false;

        match result {
            Ok(confirmed_id) => {
                if let Some(record) = self.certificate_data.as_mut() {
                    record.certificate_id = confirmed_id.clone();
                }
                self.step = WizardStep::Delivered;
                self.error = None;
                Ok(confirmed_id)
            }
            Err(err) => {
                let message = err.to_string();
                warn!("certificate save failed: {message}");
                self.error = Some(message.clone());
                Err(WizardError::Save(message))
            }
        }
    }

    /// `Delivered -> Collecting`: discard the record entirely and start
    /// over. Persisted copies are untouched.
    pub fn create_new(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Delivered {
            return Err(WizardError::InvalidTransition(
                "create_new is only available after delivery",
            ));
        }
        self.certificate_data = None;
        self.error = None;
        self.step = WizardStep::Collecting;
        Ok(())
    }
}
