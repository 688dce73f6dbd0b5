//! Form state management for the donation wizard
//!
//! Tracks which field has focus on the current step and converts key-level
//! edits into draft patches applied through the wizard.

use super::field::{FieldKey, FieldKind};
use crate::state::donation::{Allergen, DietaryTag, DraftPatch, DraftRecord, FoodItem};
use crate::state::orchestrator::DonationWizard;
use crate::state::storage::DraftStorage;
use crate::state::validation::ValidationResult;
use crate::state::wizard::Step;
use std::collections::HashMap;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Ordered focusable fields of a step for the given draft
pub fn step_fields(step: Step, draft: &DraftRecord) -> Vec<FieldKey> {
    match step {
        Step::FoodType => vec![FieldKey::FoodType],
        Step::ItemDetails => {
            let mut fields = Vec::with_capacity(draft.items.len() * 6 + 9);
            for i in 0..draft.items.len() {
                fields.extend([
                    FieldKey::ItemName(i),
                    FieldKey::ItemCategory(i),
                    FieldKey::ItemQuantity(i),
                    FieldKey::ItemUnit(i),
                    FieldKey::ItemExpiry(i),
                    FieldKey::ItemDescription(i),
                ]);
            }
            fields.extend(DietaryTag::ALL.into_iter().map(FieldKey::Dietary));
            fields.extend(Allergen::ALL.into_iter().map(FieldKey::Allergen));
            fields
        }
        Step::PickupDetails => vec![
            FieldKey::Street,
            FieldKey::City,
            FieldKey::State,
            FieldKey::Zip,
            FieldKey::PickupDate,
            FieldKey::TimeSlot,
            FieldKey::Instructions,
        ],
        Step::Review => vec![FieldKey::Terms],
    }
}

/// Focus and raw-input state of the wizard screen
#[derive(Debug, Clone, Default)]
pub struct WizardForm {
    pub active_field_index: usize,
    /// Fields of the step currently shown
    fields: Vec<FieldKey>,
    /// Raw text of date inputs, keyed by field path, while being typed
    date_buffers: HashMap<String, String>,
}

impl Form for WizardForm {
    fn field_count(&self) -> usize {
        self.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len().saturating_sub(1));
    }
}

impl WizardForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the field list after the step or the item count changed
    pub fn sync(&mut self, step: Step, draft: &DraftRecord) {
        let fields = step_fields(step, draft);
        if fields != self.fields {
            self.fields = fields;
            let index = self.active_field_index;
            self.set_active_field(index);
        }
    }

    /// Rebuild for a new step with focus on its first field
    pub fn enter_step(&mut self, step: Step, draft: &DraftRecord) {
        self.fields = step_fields(step, draft);
        self.active_field_index = 0;
    }

    /// Back to a pristine form (after submit or cancel)
    pub fn reset(&mut self, step: Step, draft: &DraftRecord) {
        self.date_buffers.clear();
        self.enter_step(step, draft);
    }

    pub fn fields(&self) -> &[FieldKey] {
        &self.fields
    }

    pub fn active_key(&self) -> Option<FieldKey> {
        self.fields.get(self.active_field_index).copied()
    }

    pub fn is_active(&self, key: FieldKey) -> bool {
        self.active_key() == Some(key)
    }

    /// Move focus to the first field, in screen order, that has an error
    pub fn focus_first_error(&mut self, errors: &ValidationResult) -> bool {
        match self.fields.iter().position(|k| errors.contains(&k.path())) {
            Some(pos) => {
                self.active_field_index = pos;
                true
            }
            None => false,
        }
    }

    /// Text shown in an input: the raw buffer for dates being typed,
    /// otherwise the draft value
    pub fn display_value(&self, key: FieldKey, draft: &DraftRecord) -> String {
        if key.kind() == FieldKind::Date {
            if let Some(raw) = self.date_buffers.get(&key.path()) {
                return raw.clone();
            }
        }
        key.display_value(draft)
    }

    /// Type a character into the focused text field
    pub fn input_char<S: DraftStorage>(&mut self, c: char, wizard: &mut DonationWizard<S>) {
        self.edit_text(wizard, |text| text.push(c));
    }

    /// Delete the last character of the focused text field
    pub fn backspace<S: DraftStorage>(&mut self, wizard: &mut DonationWizard<S>) {
        self.edit_text(wizard, |text| {
            text.pop();
        });
    }

    fn edit_text<S, F>(&mut self, wizard: &mut DonationWizard<S>, edit: F)
    where
        S: DraftStorage,
        F: FnOnce(&mut String),
    {
        let Some(key) = self.active_key() else {
            return;
        };
        if !key.kind().accepts_text() {
            return;
        }

        let mut text = self.display_value(key, wizard.draft());
        edit(&mut text);

        if let Some(patch) = key.set_text(wizard.draft(), &text) {
            if wizard.update_draft(patch) && key.kind() == FieldKind::Date {
                self.date_buffers.insert(key.path(), text);
            }
        }
    }

    /// Space on the focused field: flip a toggle or step a choice forward
    pub fn activate<S: DraftStorage>(&mut self, wizard: &mut DonationWizard<S>) -> bool {
        match self.active_key().map(|k| (k, k.kind())) {
            Some((key, FieldKind::Toggle)) => self.apply(wizard, key.toggle(wizard.draft())),
            Some((_, FieldKind::Choice)) => self.cycle(wizard, true),
            _ => false,
        }
    }

    /// Move the focused choice field to its next or previous option
    pub fn cycle<S: DraftStorage>(&mut self, wizard: &mut DonationWizard<S>, forward: bool) -> bool {
        let Some(key) = self.active_key() else {
            return false;
        };
        let slots = wizard.validator().enabled_slots();
        let patch = key.cycle(wizard.draft(), forward, &slots);
        self.apply(wizard, patch)
    }

    /// Append a blank line item and focus its name
    pub fn add_item<S: DraftStorage>(&mut self, wizard: &mut DonationWizard<S>) -> bool {
        if wizard.current_step() != Step::ItemDetails {
            return false;
        }
        let mut items = wizard.draft().items.clone();
        items.push(FoodItem::new());
        let index = items.len() - 1;
        if !self.apply(wizard, Some(DraftPatch::new().items(items))) {
            return false;
        }
        wizard.clear_item_errors();
        if let Some(pos) = self.fields.iter().position(|k| *k == FieldKey::ItemName(index)) {
            self.active_field_index = pos;
        }
        true
    }

    /// Remove the line item owning the focused field
    pub fn remove_item<S: DraftStorage>(&mut self, wizard: &mut DonationWizard<S>) -> bool {
        let Some(index) = self.active_key().and_then(|k| k.item_index()) else {
            return false;
        };
        let mut items = wizard.draft().items.clone();
        if index >= items.len() {
            return false;
        }
        items.remove(index);
        // Item paths shift after a removal
        self.date_buffers.retain(|path, _| !path.starts_with("items."));
        if !self.apply(wizard, Some(DraftPatch::new().items(items))) {
            return false;
        }
        wizard.clear_item_errors();
        true
    }

    fn apply<S: DraftStorage>(&mut self, wizard: &mut DonationWizard<S>, patch: Option<DraftPatch>) -> bool {
        let Some(patch) = patch else {
            return false;
        };
        let applied = wizard.update_draft(patch);
        self.sync(wizard.current_step(), wizard.draft());
        applied
    }
}
