//! Donation wizard orchestration
//!
//! Sequences the four steps, gates forward moves on the step validator and
//! drives the single in-flight submission.

use super::donation::{CreatedDonation, DraftPatch, DraftRecord};
use super::session::FormSessionStore;
use super::storage::DraftStorage;
use super::validation::{StepValidator, ValidationResult};
use super::wizard::{Step, WizardState};
use crate::error::SubmitError;
#[cfg(test)]
use crate::service::DonationServiceTrait;
use chrono::NaiveDate;

/// Where the current submit attempt stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// A request is in flight; further submits are refused
    Pending,
    /// The last attempt failed; the draft is intact for a retry
    Failed(String),
}

/// Today's date in the donor's local timezone
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// The wizard: session store + validator + submission state
pub struct DonationWizard<S: DraftStorage> {
    store: FormSessionStore<S>,
    validator: StepValidator,
    today: fn() -> NaiveDate,
    errors: ValidationResult,
    submission: SubmissionState,
}

impl<S: DraftStorage> DonationWizard<S> {
    /// Start (or resume) the wizard on whatever step the store reports
    pub fn new(store: FormSessionStore<S>, validator: StepValidator) -> Self {
        Self {
            store,
            validator,
            today: local_today,
            errors: ValidationResult::new(),
            submission: SubmissionState::Idle,
        }
    }

    /// Replace the date source used by the pickup-date rule
    #[cfg(test)]
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn state(&self) -> &WizardState {
        self.store.state()
    }

    pub fn current_step(&self) -> Step {
        self.state().current_step
    }

    pub fn draft(&self) -> &DraftRecord {
        &self.state().form_data
    }

    pub fn validator(&self) -> &StepValidator {
        &self.validator
    }

    /// Errors from the most recent validation pass
    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::Pending
    }

    /// Apply a field edit; refused while a submission is in flight
    pub fn update_draft(&mut self, patch: DraftPatch) -> bool {
        if self.is_submitting() {
            tracing::debug!("Ignoring draft edit while submission is pending");
            return false;
        }
        self.store.update_draft(patch);
        true
    }

    /// Drop surfaced item errors; their paths are stale once the list changes
    pub fn clear_item_errors(&mut self) {
        self.errors
            .retain(|path| path != "items" && !path.starts_with("items."));
    }

    /// Validate the current step without moving
    pub fn validate_current(&self) -> ValidationResult {
        self.validator
            .validate_step(self.current_step(), self.draft(), (self.today)())
    }

    /// Advance one step if the current one validates
    ///
    /// On failure the step stays put and the field errors are returned
    /// (and kept for display until the next validation pass).
    pub fn next(&mut self) -> Result<Step, ValidationResult> {
        let current = self.current_step();
        let result = self.validate_current();
        self.errors = result.clone();

        if !result.is_valid() {
            tracing::debug!(
                step = current.number(),
                errors = result.len(),
                "Step validation failed"
            );
            return Err(result);
        }

        let target = current.next();
        if target != current {
            self.store.set_step(i64::from(target.number()));
            tracing::debug!(from = current.number(), to = target.number(), "Advanced step");
        }
        Ok(target)
    }

    /// Go back one step; never validates
    ///
    /// Stays put while a submission is in flight.
    pub fn previous(&mut self) -> Step {
        let current = self.current_step();
        if self.is_submitting() {
            tracing::debug!("Ignoring step change while submission is pending");
            return current;
        }
        let target = current.previous();
        self.errors = ValidationResult::new();
        if target != current {
            self.store.set_step(i64::from(target.number()));
            tracing::debug!(from = current.number(), to = target.number(), "Moved back");
        }
        target
    }

    /// Explicit cancellation: drop the draft and start over
    pub fn cancel(&mut self) {
        tracing::info!("Donation draft cancelled");
        self.store.reset_draft();
        self.errors = ValidationResult::new();
        self.submission = SubmissionState::Idle;
    }

    /// Run the final guard and mark a submission in flight
    ///
    /// Returns the record to hand to the submission service.
    pub fn begin_submit(&mut self) -> Result<DraftRecord, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::AlreadyPending);
        }
        if self.current_step() != Step::LAST {
            return Err(SubmitError::NotOnReviewStep);
        }

        let result = self.validate_current();
        self.errors = result.clone();
        if !result.is_valid() {
            return Err(SubmitError::Invalid(result));
        }

        self.submission = SubmissionState::Pending;
        tracing::info!(items = self.draft().items.len(), "Submitting donation");
        Ok(self.draft().clone())
    }

    /// Settle the in-flight submission
    ///
    /// Success clears the draft; failure keeps draft and step for a retry.
    pub fn finish_submit(
        &mut self,
        outcome: anyhow::Result<CreatedDonation>,
    ) -> Result<CreatedDonation, SubmitError> {
        if !self.is_submitting() {
            // The wizard was cancelled while the request was out
            tracing::debug!("Submission settled after the wizard moved on");
            return outcome.map_err(|e| SubmitError::Rejected(e.to_string()));
        }

        match outcome {
            Ok(created) => {
                tracing::info!(id = %created.id, "Donation submitted");
                self.store.reset_draft();
                self.errors = ValidationResult::new();
                self.submission = SubmissionState::Idle;
                Ok(created)
            }
            Err(e) => {
                let message = format!("{e:#}");
                tracing::warn!("Donation submission failed: {message}");
                self.submission = SubmissionState::Failed(message.clone());
                Err(SubmitError::Rejected(message))
            }
        }
    }

    /// Submit and wait for the outcome (one attempt, no retry)
    #[cfg(test)]
    pub async fn submit<C>(&mut self, service: &mut C) -> Result<CreatedDonation, SubmitError>
    where
        C: DonationServiceTrait + ?Sized,
    {
        let record = self.begin_submit()?;
        let outcome = service.create_donation(&record).await;
        self.finish_submit(outcome)
    }
}
