//! Form session store: the single owner of the wizard state
//!
//! Every mutation is written through to the durable slot so a restart
//! restores the in-progress draft exactly. Persistence is fire-and-forget:
//! a failed write is logged and the in-memory state stays authoritative.

use super::donation::{DraftPatch, DraftRecord};
use super::storage::{DraftStorage, DRAFT_STORAGE_KEY};
use super::wizard::{Step, WizardState};

/// Holds the current step and draft, persisting each change
pub struct FormSessionStore<S: DraftStorage> {
    state: WizardState,
    storage: S,
    key: String,
}

impl<S: DraftStorage> FormSessionStore<S> {
    /// Open the store on the default slot, restoring any saved draft
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, DRAFT_STORAGE_KEY)
    }

    /// Open the store on a specific slot
    ///
    /// Unreadable or unparsable slot contents are discarded and the store
    /// starts from empty defaults.
    pub fn open_with_key(mut storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = match storage.read(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<WizardState>(&raw) {
                Ok(state) => {
                    tracing::info!(
                        step = state.current_step.number(),
                        items = state.form_data.items.len(),
                        "Restored donation draft"
                    );
                    state
                }
                Err(e) => {
                    tracing::warn!("Discarding unreadable donation draft: {e}");
                    if let Err(e) = storage.remove(&key) {
                        tracing::warn!("Failed to remove corrupt draft: {e}");
                    }
                    WizardState::default()
                }
            },
            Ok(None) => WizardState::default(),
            Err(e) => {
                tracing::warn!("Failed to read donation draft: {e}");
                WizardState::default()
            }
        };

        Self {
            state,
            storage,
            key,
        }
    }

    /// Current step and draft
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> Step {
        self.state().current_step
    }

    pub fn draft(&self) -> &DraftRecord {
        &self.state().form_data
    }

    /// Move to step `n`, clamped to 1..=4; no validation happens here
    pub fn set_step(&mut self, n: i64) {
        self.state.current_step = Step::from_number(n);
        self.persist();
    }

    /// Shallow-merge `patch` into the draft
    pub fn update_draft(&mut self, patch: DraftPatch) {
        self.state.form_data.apply(patch);
        self.persist();
    }

    /// Clear the draft, drop the persisted copy and return to step 1
    pub fn reset_draft(&mut self) {
        self.state = WizardState::default();
        if let Err(e) = self.storage.remove(&self.key) {
            tracing::warn!("Failed to remove donation draft: {e}");
        }
    }

    /// Give the storage back (used to reopen a store on the same slot)
    #[cfg(test)]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.state)
            .map_err(Into::into)
            .and_then(|json| self.storage.write(&self.key, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to save donation draft: {e}");
        }
    }
}
