//! Configuration handling for the donation TUI

use crate::state::{StepValidator, TimeSlotId, DEFAULT_MAX_INSTRUCTIONS_LEN};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the draft directory
pub const DRAFT_DIR_ENV: &str = "DONATION_TUI_DRAFT_DIR";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DonationConfig {
    /// Directory holding the durable draft slot
    pub draft_dir: Option<PathBuf>,
    /// File the donation history is kept in
    pub history_file: Option<PathBuf>,
    /// Pickup slots donors may choose
    pub enabled_time_slots: Option<Vec<TimeSlotId>>,
    /// Bound on special instructions, in characters
    pub max_instructions_len: Option<usize>,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "foodshare", "donation-tui")
}

impl DonationConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields the defaults
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Draft directory, honouring the environment override
    pub fn draft_dir(&self) -> PathBuf {
        self.resolve_draft_dir(std::env::var_os(DRAFT_DIR_ENV).map(PathBuf::from))
    }

    fn resolve_draft_dir(&self, env_override: Option<PathBuf>) -> PathBuf {
        env_override
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| self.draft_dir.clone())
            .unwrap_or_else(|| data_dir().join("drafts"))
    }

    pub fn history_file(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| data_dir().join("donations.json"))
    }

    /// Step validator built from the configured slots and bound
    pub fn validator(&self) -> StepValidator {
        let slots = self
            .enabled_time_slots
            .clone()
            .unwrap_or_else(TimeSlotId::available);
        StepValidator::new(
            slots,
            self.max_instructions_len
                .unwrap_or(DEFAULT_MAX_INSTRUCTIONS_LEN),
        )
    }
}

fn data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".donation-tui"))
}
