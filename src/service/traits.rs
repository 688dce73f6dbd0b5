//! Trait abstraction for the donation service to enable mocking in tests

use crate::state::{CreatedDonation, Donation, DraftRecord};
use anyhow::Result;
use async_trait::async_trait;

/// Operations the wizard and listing view need from the donation backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationServiceTrait: Send + Sync {
    /// Submit a completed draft; returns the new id plus an echo of the record
    async fn create_donation(&mut self, record: &DraftRecord) -> Result<CreatedDonation>;

    /// List the donor's submitted donations, newest first
    async fn list_donations(&mut self) -> Result<Vec<Donation>>;
}
