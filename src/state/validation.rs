//! Per-step validation rules for the donation wizard
//!
//! Validation is a pure function of the step, the draft and the date it is
//! evaluated on. It never mutates the draft and never consults anything else.

use super::donation::{DraftRecord, TimeSlotId};
use super::wizard::Step;
use chrono::{Days, NaiveDate};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::OnceLock;

/// Default bound on the special instructions text, in characters
pub const DEFAULT_MAX_INSTRUCTIONS_LEN: usize = 500;

fn zip_pattern() -> &'static Regex {
    static ZIP: OnceLock<Regex> = OnceLock::new();
    ZIP.get_or_init(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("ZIP pattern is valid"))
}

/// Field-path keyed error messages; empty means the step is valid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    errors: BTreeMap<String, String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for a field path such as `items.2.name`
    pub fn get(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.errors.contains_key(path)
    }

    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(path.into(), message.into());
    }

    /// Keep only the errors whose path satisfies `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.errors.retain(|path, _| keep(path));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[cfg(test)]
    pub fn paths(&self) -> Vec<&str> {
        self.errors.keys().map(String::as_str).collect()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(path, msg)| format!("{path}: {msg}"))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Step rules with their tunable policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepValidator {
    enabled_slots: BTreeSet<TimeSlotId>,
    max_instructions_len: usize,
}

impl Default for StepValidator {
    fn default() -> Self {
        Self::new(TimeSlotId::available(), DEFAULT_MAX_INSTRUCTIONS_LEN)
    }
}

impl StepValidator {
    pub fn new(enabled_slots: impl IntoIterator<Item = TimeSlotId>, max_instructions_len: usize) -> Self {
        Self {
            enabled_slots: enabled_slots.into_iter().collect(),
            max_instructions_len,
        }
    }

    pub fn enabled_slots(&self) -> Vec<TimeSlotId> {
        self.enabled_slots.iter().copied().collect()
    }

    pub fn is_slot_enabled(&self, slot: TimeSlotId) -> bool {
        self.enabled_slots.contains(&slot)
    }

    pub fn max_instructions_len(&self) -> usize {
        self.max_instructions_len
    }

    /// Check the fields owned by `step`, ignoring every other step's fields
    pub fn validate_step(&self, step: Step, draft: &DraftRecord, today: NaiveDate) -> ValidationResult {
        let mut result = ValidationResult::new();
        match step {
            Step::FoodType => Self::check_food_type(draft, &mut result),
            Step::ItemDetails => Self::check_items(draft, &mut result),
            Step::PickupDetails => self.check_pickup(draft, today, &mut result),
            Step::Review => Self::check_terms(draft, &mut result),
        }
        result
    }

    fn check_food_type(draft: &DraftRecord, result: &mut ValidationResult) {
        if draft.food_type.is_none() {
            result.insert("foodType", "Please select a food type");
        }
    }

    fn check_items(draft: &DraftRecord, result: &mut ValidationResult) {
        if draft.items.is_empty() {
            result.insert("items", "Please add at least one food item");
            return;
        }

        // Every item is checked so all per-item errors surface at once
        for (index, item) in draft.items.iter().enumerate() {
            let required = [
                ("name", &item.name, "Item name is required"),
                ("category", &item.category, "Category is required"),
                ("quantity", &item.quantity, "Quantity is required"),
                ("unit", &item.unit, "Unit is required"),
            ];
            for (field, value, message) in required {
                if is_blank(value) {
                    result.insert(format!("items.{index}.{field}"), message);
                }
            }
        }
    }

    fn check_pickup(&self, draft: &DraftRecord, today: NaiveDate, result: &mut ValidationResult) {
        let address = &draft.pickup_address;
        let required = [
            ("pickupAddress.street", &address.street, "Street address is required"),
            ("pickupAddress.city", &address.city, "City is required"),
            ("pickupAddress.state", &address.state, "State is required"),
        ];
        for (path, value, message) in required {
            if is_blank(value) {
                result.insert(path, message);
            }
        }

        let zip = address.zip.trim();
        if zip.is_empty() {
            result.insert("pickupAddress.zip", "ZIP code is required");
        } else if !zip_pattern().is_match(zip) {
            result.insert("pickupAddress.zip", "Please enter a valid ZIP code");
        }

        match draft.pickup_date {
            None => result.insert("pickupDate", "Please select a pickup date"),
            Some(date) if date < earliest_pickup_date(today) => {
                result.insert("pickupDate", "Pickup date cannot be in the past")
            }
            Some(_) => {}
        }

        match draft.pickup_time_slot {
            None => result.insert("pickupTimeSlot", "Please select a time slot"),
            Some(slot) if !self.is_slot_enabled(slot) => {
                result.insert("pickupTimeSlot", "Selected time slot is not available")
            }
            Some(_) => {}
        }

        if draft.special_instructions.chars().count() > self.max_instructions_len {
            result.insert(
                "specialInstructions",
                format!(
                    "Special instructions must be at most {} characters",
                    self.max_instructions_len
                ),
            );
        }
    }

    fn check_terms(draft: &DraftRecord, result: &mut ValidationResult) {
        if !draft.terms_accepted {
            result.insert("termsAccepted", "You must accept the terms and conditions");
        }
    }
}

/// Oldest pickup date accepted on `today`: one day back, inclusive, to
/// absorb timezone skew between the donor and the pickup service.
pub fn earliest_pickup_date(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
