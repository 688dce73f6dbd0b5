//! Donation service module: the submission collaborator behind the wizard

mod client;
mod traits;

pub use client::DonationClient;
pub use traits::DonationServiceTrait;

#[cfg(test)]
pub use traits::MockDonationServiceTrait;
