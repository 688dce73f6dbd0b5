//! In-process donation service
//!
//! Accepts completed drafts, assigns identifiers and keeps the donor's
//! donation history, optionally mirrored to a JSON file so the listing
//! survives restarts.

use super::traits::DonationServiceTrait;
use crate::state::{
    CreatedDonation, Donation, DonationItemSummary, DonationStatus, DraftRecord,
};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handle to the donation history; clones share the same history
#[derive(Debug, Clone, Default)]
pub struct DonationClient {
    donations: Arc<Mutex<Vec<Donation>>>,
    /// Where the history is mirrored, if anywhere
    history_path: Option<PathBuf>,
}

impl DonationClient {
    /// Create a client with an empty, in-memory history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client whose history is loaded from and saved to `path`
    pub async fn with_history_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let donations = match tokio::fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str::<Vec<Donation>>(&content) {
                Ok(donations) => donations,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable donation history {}: {e}", path.display());
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read donation history {}", path.display())
                })
            }
        };

        Ok(Self {
            donations: Arc::new(Mutex::new(donations)),
            history_path: Some(path),
        })
    }

    async fn save_history(&self, donations: &[Donation]) -> Result<()> {
        let Some(path) = &self.history_path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(donations)?;
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write donation history {}", path.display()))
    }
}

/// Server-side completeness check; the wizard validates first, this guards
/// against records assembled some other way
fn check_complete(record: &DraftRecord) -> Result<()> {
    let mut missing = Vec::new();
    if record.food_type.is_none() {
        missing.push("food type");
    }
    if record.items.is_empty() {
        missing.push("items");
    }
    if record.pickup_date.is_none() {
        missing.push("pickup date");
    }
    if record.pickup_time_slot.is_none() {
        missing.push("pickup time slot");
    }
    if !record.terms_accepted {
        missing.push("terms acceptance");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Donation is missing {}", missing.join(", ")))
    }
}

fn summarize(id: &str, record: &DraftRecord, submitted_at: chrono::DateTime<Utc>) -> Donation {
    Donation {
        id: id.to_string(),
        status: DonationStatus::Pending,
        submitted_at,
        pickup_date: record.pickup_date,
        pickup_time_slot: record.pickup_time_slot,
        items: record
            .items
            .iter()
            .map(|item| DonationItemSummary {
                name: item.name.clone(),
                quantity: item.quantity_label(),
            })
            .collect(),
    }
}

#[async_trait]
impl DonationServiceTrait for DonationClient {
    async fn create_donation(&mut self, record: &DraftRecord) -> Result<CreatedDonation> {
        check_complete(record)?;

        let id = format!("don-{}", uuid::Uuid::new_v4().simple());
        let submitted_at = Utc::now();

        let mut donations = self.donations.lock().await;
        donations.insert(0, summarize(&id, record, submitted_at));
        if let Err(e) = self.save_history(&donations).await {
            donations.remove(0);
            return Err(e.context("Failed to create donation"));
        }
        tracing::info!(id = %id, items = record.items.len(), "Donation created");

        Ok(CreatedDonation {
            id,
            submitted_at,
            record: record.clone(),
        })
    }

    async fn list_donations(&mut self) -> Result<Vec<Donation>> {
        Ok(self.donations.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Address, FoodItem, FoodType, TimeSlotId};
    use chrono::NaiveDate;

    fn complete_record() -> DraftRecord {
        DraftRecord {
            food_type: Some(FoodType::NonPerishable),
            items: vec![FoodItem {
                name: "Canned beans".to_string(),
                category: "Canned Goods".to_string(),
                quantity: "24".to_string(),
                unit: "cans".to_string(),
                ..FoodItem::with_id("item-1")
            }],
            pickup_address: Address {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip: "62701".to_string(),
            },
            pickup_date: NaiveDate::from_ymd_opt(2026, 10, 20),
            pickup_time_slot: Some(TimeSlotId::Morning),
            terms_accepted: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_donation_echoes_record() {
        let mut client = DonationClient::new();
        let created = client.create_donation(&complete_record()).await.unwrap();

        assert!(created.id.starts_with("don-"));
        assert_eq!(created.record, complete_record());
    }

    #[tokio::test]
    async fn test_created_donation_is_listed_as_pending() {
        let mut client = DonationClient::new();
        let created = client.create_donation(&complete_record()).await.unwrap();

        let donations = client.list_donations().await.unwrap();
        assert_eq!(donations.len(), 1);
        assert_eq!(donations[0].id, created.id);
        assert_eq!(donations[0].status, DonationStatus::Pending);
        assert_eq!(donations[0].items[0].quantity, "24 cans");
    }

    #[tokio::test]
    async fn test_newest_donation_first() {
        let mut client = DonationClient::new();
        let first = client.create_donation(&complete_record()).await.unwrap();
        let second = client.create_donation(&complete_record()).await.unwrap();

        let ids: Vec<String> = client
            .list_donations()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_incomplete_record_is_rejected() {
        let mut client = DonationClient::new();
        let err = client
            .create_donation(&DraftRecord::default())
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("food type"));
        assert!(msg.contains("terms acceptance"));
        assert!(client.list_donations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_history() {
        let client = DonationClient::new();
        let mut other = client.clone();
        other.create_donation(&complete_record()).await.unwrap();

        let mut client = client;
        assert_eq!(client.list_donations().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_history_file_round_trip() {
        let path = crate::state::temp_dir("history").join("donations.json");

        let mut client = DonationClient::with_history_file(&path).await.unwrap();
        let created = client.create_donation(&complete_record()).await.unwrap();

        let mut reopened = DonationClient::with_history_file(&path).await.unwrap();
        let donations = reopened.list_donations().await.unwrap();
        assert_eq!(donations.len(), 1);
        assert_eq!(donations[0].id, created.id);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_missing_history_file_starts_empty() {
        let path = crate::state::temp_dir("absent").join("donations.json");
        let mut client =
            tokio_test::block_on(DonationClient::with_history_file(&path)).unwrap();
        let donations = tokio_test::block_on(client.list_donations()).unwrap();
        assert!(donations.is_empty());
    }
}
