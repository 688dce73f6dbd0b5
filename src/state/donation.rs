//! Donation domain types: the draft record and its catalogues

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Broad food category chosen in the first wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoodType {
    Perishable,
    NonPerishable,
}

impl FoodType {
    pub const ALL: [FoodType; 2] = [FoodType::Perishable, FoodType::NonPerishable];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Perishable => "Perishable",
            Self::NonPerishable => "Non-Perishable",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Perishable => "Fresh items like produce, dairy, and baked goods.",
            Self::NonPerishable => "Canned goods, dry pasta, rice, and pantry staples.",
        }
    }

    /// The other food type (used to cycle the selection)
    pub fn toggle(&self) -> Self {
        match self {
            Self::Perishable => Self::NonPerishable,
            Self::NonPerishable => Self::Perishable,
        }
    }
}

/// Dietary tags a donor can attach to the whole donation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryTag {
    Vegetarian,
    Vegan,
    GlutenFree,
}

impl DietaryTag {
    pub const ALL: [DietaryTag; 3] = [
        DietaryTag::Vegetarian,
        DietaryTag::Vegan,
        DietaryTag::GlutenFree,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten-Free",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::GlutenFree => "gluten-free",
        }
    }
}

/// One entry of the fixed allergen flag set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allergen {
    Nuts,
    Dairy,
    Gluten,
    Shellfish,
    Eggs,
    Soy,
}

impl Allergen {
    pub const ALL: [Allergen; 6] = [
        Allergen::Nuts,
        Allergen::Dairy,
        Allergen::Gluten,
        Allergen::Shellfish,
        Allergen::Eggs,
        Allergen::Soy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Nuts => "Nuts",
            Self::Dairy => "Dairy",
            Self::Gluten => "Gluten",
            Self::Shellfish => "Shellfish",
            Self::Eggs => "Eggs",
            Self::Soy => "Soy",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Nuts => "nuts",
            Self::Dairy => "dairy",
            Self::Gluten => "gluten",
            Self::Shellfish => "shellfish",
            Self::Eggs => "eggs",
            Self::Soy => "soy",
        }
    }
}

/// Allergen flags carried by a donation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllergenInfo {
    pub nuts: bool,
    pub dairy: bool,
    pub gluten: bool,
    pub shellfish: bool,
    pub eggs: bool,
    pub soy: bool,
}

impl AllergenInfo {
    pub fn get(&self, allergen: Allergen) -> bool {
        match allergen {
            Allergen::Nuts => self.nuts,
            Allergen::Dairy => self.dairy,
            Allergen::Gluten => self.gluten,
            Allergen::Shellfish => self.shellfish,
            Allergen::Eggs => self.eggs,
            Allergen::Soy => self.soy,
        }
    }

    pub fn set(&mut self, allergen: Allergen, value: bool) {
        let flag = match allergen {
            Allergen::Nuts => &mut self.nuts,
            Allergen::Dairy => &mut self.dairy,
            Allergen::Gluten => &mut self.gluten,
            Allergen::Shellfish => &mut self.shellfish,
            Allergen::Eggs => &mut self.eggs,
            Allergen::Soy => &mut self.soy,
        };
        *flag = value;
    }

    /// Allergens currently flagged, in catalogue order
    pub fn flagged(&self) -> Vec<Allergen> {
        Allergen::ALL
            .into_iter()
            .filter(|a| self.get(*a))
            .collect()
    }
}

/// Suggested quantity units
pub const QUANTITY_UNITS: &[&str] = &["pieces", "kg", "lbs", "boxes", "cans", "gallons", "bunches"];

/// A single line item of a donation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FoodItem {
    /// A blank item with a fresh identifier
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            category: String::new(),
            quantity: String::new(),
            unit: String::new(),
            expiry_date: None,
            description: None,
        }
    }

    /// Quantity and unit joined for display, e.g. "10 lbs"
    pub fn quantity_label(&self) -> String {
        format!("{} {}", self.quantity.trim(), self.unit.trim())
            .trim()
            .to_string()
    }
}

impl Default for FoodItem {
    fn default() -> Self {
        Self::new()
    }
}

/// Pickup address; every part may be blank while the draft is partial
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Address {
    pub fn one_line(&self) -> String {
        format!("{}, {}, {} {}", self.street, self.city, self.state, self.zip)
    }
}

/// Pickup time slot identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlotId {
    Morning,
    Afternoon,
    Evening,
}

/// A time slot as offered in the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub label: &'static str,
    pub range: &'static str,
    pub available: bool,
}

/// Time slot catalogue
pub static TIME_SLOTS: [TimeSlot; 3] = [
    TimeSlot {
        id: TimeSlotId::Morning,
        label: "Morning",
        range: "9:00 AM - 12:00 PM",
        available: true,
    },
    TimeSlot {
        id: TimeSlotId::Afternoon,
        label: "Afternoon",
        range: "12:00 PM - 4:00 PM",
        available: true,
    },
    TimeSlot {
        id: TimeSlotId::Evening,
        label: "Evening",
        range: "4:00 PM - 7:00 PM",
        available: false,
    },
];

impl TimeSlotId {
    pub fn slot(&self) -> &'static TimeSlot {
        match self {
            Self::Morning => &TIME_SLOTS[0],
            Self::Afternoon => &TIME_SLOTS[1],
            Self::Evening => &TIME_SLOTS[2],
        }
    }

    /// Slots marked available in the catalogue
    pub fn available() -> Vec<TimeSlotId> {
        TIME_SLOTS
            .iter()
            .filter(|s| s.available)
            .map(|s| s.id)
            .collect()
    }
}

/// The accumulating donation submission
///
/// Permissively partial: every field has an empty default and the wizard
/// only demands a field once the step owning it is validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftRecord {
    pub food_type: Option<FoodType>,
    pub items: Vec<FoodItem>,
    pub dietary_info: BTreeSet<DietaryTag>,
    pub allergen_info: AllergenInfo,
    pub pickup_address: Address,
    pub pickup_date: Option<NaiveDate>,
    pub pickup_time_slot: Option<TimeSlotId>,
    pub special_instructions: String,
    pub terms_accepted: bool,
}

impl DraftRecord {
    /// Shallow merge: every field present in the patch replaces the
    /// corresponding field wholesale.
    pub fn apply(&mut self, patch: DraftPatch) {
        let DraftPatch {
            food_type,
            items,
            dietary_info,
            allergen_info,
            pickup_address,
            pickup_date,
            pickup_time_slot,
            special_instructions,
            terms_accepted,
        } = patch;

        if let Some(v) = food_type {
            self.food_type = v;
        }
        if let Some(v) = items {
            self.items = v;
        }
        if let Some(v) = dietary_info {
            self.dietary_info = v;
        }
        if let Some(v) = allergen_info {
            self.allergen_info = v;
        }
        if let Some(v) = pickup_address {
            self.pickup_address = v;
        }
        if let Some(v) = pickup_date {
            self.pickup_date = v;
        }
        if let Some(v) = pickup_time_slot {
            self.pickup_time_slot = v;
        }
        if let Some(v) = special_instructions {
            self.special_instructions = v;
        }
        if let Some(v) = terms_accepted {
            self.terms_accepted = v;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A partial update of a [`DraftRecord`]
///
/// `None` leaves a field alone. For optional draft fields the inner option
/// distinguishes "set" from "clear".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftPatch {
    pub food_type: Option<Option<FoodType>>,
    pub items: Option<Vec<FoodItem>>,
    pub dietary_info: Option<BTreeSet<DietaryTag>>,
    pub allergen_info: Option<AllergenInfo>,
    pub pickup_address: Option<Address>,
    pub pickup_date: Option<Option<NaiveDate>>,
    pub pickup_time_slot: Option<Option<TimeSlotId>>,
    pub special_instructions: Option<String>,
    pub terms_accepted: Option<bool>,
}

impl DraftPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn food_type(mut self, food_type: FoodType) -> Self {
        self.food_type = Some(Some(food_type));
        self
    }

    pub fn items(mut self, items: Vec<FoodItem>) -> Self {
        self.items = Some(items);
        self
    }

    pub fn dietary_info(mut self, tags: BTreeSet<DietaryTag>) -> Self {
        self.dietary_info = Some(tags);
        self
    }

    pub fn allergen_info(mut self, info: AllergenInfo) -> Self {
        self.allergen_info = Some(info);
        self
    }

    pub fn pickup_address(mut self, address: Address) -> Self {
        self.pickup_address = Some(address);
        self
    }

    pub fn pickup_date(mut self, date: Option<NaiveDate>) -> Self {
        self.pickup_date = Some(date);
        self
    }

    pub fn pickup_time_slot(mut self, slot: Option<TimeSlotId>) -> Self {
        self.pickup_time_slot = Some(slot);
        self
    }

    pub fn special_instructions(mut self, text: impl Into<String>) -> Self {
        self.special_instructions = Some(text.into());
        self
    }

    pub fn terms_accepted(mut self, accepted: bool) -> Self {
        self.terms_accepted = Some(accepted);
        self
    }
}

/// Lifecycle status of a submitted donation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DonationStatus {
    #[default]
    #[serde(rename = "Pending Pickup")]
    Pending,
    #[serde(rename = "In Transit")]
    InTransit,
    Completed,
    Cancelled,
}

impl DonationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending Pickup",
            Self::InTransit => "In Transit",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Item line shown in donation listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationItemSummary {
    pub name: String,
    pub quantity: String,
}

/// A submitted donation as shown in the listing view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    pub status: DonationStatus,
    pub submitted_at: DateTime<Utc>,
    pub pickup_date: Option<NaiveDate>,
    pub pickup_time_slot: Option<TimeSlotId>,
    pub items: Vec<DonationItemSummary>,
}

/// What the submission collaborator hands back: the new id plus an echo
/// of the submitted record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedDonation {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
    pub record: DraftRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(name: &str) -> FoodItem {
        FoodItem {
            name: name.to_string(),
            category: "Produce".to_string(),
            quantity: "10".to_string(),
            unit: "lbs".to_string(),
            ..FoodItem::with_id(format!("id-{name}"))
        }
    }

    #[test]
    fn test_default_draft_is_empty() {
        let draft = DraftRecord::default();
        assert!(draft.is_empty());
        assert!(draft.food_type.is_none());
        assert!(draft.items.is_empty());
        assert!(!draft.terms_accepted);
    }

    #[test]
    fn test_apply_replaces_only_supplied_fields() {
        let mut draft = DraftRecord {
            special_instructions: "Ring the bell".to_string(),
            ..Default::default()
        };
        draft.apply(DraftPatch::new().food_type(FoodType::Perishable));

        assert_eq!(draft.food_type, Some(FoodType::Perishable));
        assert_eq!(draft.special_instructions, "Ring the bell");
    }

    #[test]
    fn test_apply_replaces_whole_address() {
        let mut draft = DraftRecord {
            pickup_address: Address {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip: "62701".to_string(),
            },
            ..Default::default()
        };
        draft.apply(DraftPatch::new().pickup_address(Address {
            zip: "94043".to_string(),
            ..Default::default()
        }));

        assert_eq!(draft.pickup_address.zip, "94043");
        assert_eq!(draft.pickup_address.street, "");
        assert_eq!(draft.pickup_address.city, "");
    }

    #[test]
    fn test_apply_can_clear_optional_fields() {
        let mut draft = DraftRecord {
            pickup_date: NaiveDate::from_ymd_opt(2026, 10, 20),
            pickup_time_slot: Some(TimeSlotId::Morning),
            ..Default::default()
        };
        draft.apply(DraftPatch::new().pickup_date(None).pickup_time_slot(None));
        assert!(draft.pickup_date.is_none());
        assert!(draft.pickup_time_slot.is_none());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let patch = DraftPatch::new()
            .items(vec![item("Apples"), item("Bread")])
            .terms_accepted(true);

        let mut once = DraftRecord::default();
        once.apply(patch.clone());
        let mut twice = once.clone();
        twice.apply(patch);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut draft = DraftRecord {
            food_type: Some(FoodType::NonPerishable),
            ..Default::default()
        };
        let before = draft.clone();
        draft.apply(DraftPatch::new());
        assert_eq!(draft, before);
    }

    #[test]
    fn test_serializes_with_camel_case_and_iso_dates() {
        let draft = DraftRecord {
            food_type: Some(FoodType::NonPerishable),
            pickup_date: NaiveDate::from_ymd_opt(2026, 10, 20),
            pickup_time_slot: Some(TimeSlotId::Afternoon),
            dietary_info: [DietaryTag::GlutenFree].into_iter().collect(),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();

        assert_eq!(json["foodType"], "non-perishable");
        assert_eq!(json["pickupDate"], "2026-10-20");
        assert_eq!(json["pickupTimeSlot"], "afternoon");
        assert_eq!(json["dietaryInfo"][0], "gluten-free");
        assert_eq!(json["termsAccepted"], false);
    }

    #[test]
    fn test_deserialize_partial_record() {
        let json = r#"{"foodType": "perishable", "items": [{"id": "a", "name": "Milk"}]}"#;
        let draft: DraftRecord = serde_json::from_str(json).unwrap();

        assert_eq!(draft.food_type, Some(FoodType::Perishable));
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].name, "Milk");
        assert_eq!(draft.items[0].unit, "");
        assert_eq!(draft.pickup_address, Address::default());
    }

    #[test]
    fn test_allergen_info_get_set() {
        let mut info = AllergenInfo::default();
        info.set(Allergen::Shellfish, true);
        info.set(Allergen::Soy, true);
        assert!(info.get(Allergen::Shellfish));
        assert!(!info.get(Allergen::Nuts));
        assert_eq!(info.flagged(), vec![Allergen::Shellfish, Allergen::Soy]);
    }

    #[test]
    fn test_new_items_get_distinct_ids() {
        let a = FoodItem::new();
        let b = FoodItem::new();
        assert_ne!(a.id, b.id);
        assert!(a.name.is_empty());
    }

    #[test]
    fn test_quantity_label() {
        assert_eq!(item("Rice").quantity_label(), "10 lbs");
        assert_eq!(FoodItem::with_id("x").quantity_label(), "");
    }

    #[test]
    fn test_available_time_slots() {
        assert_eq!(
            TimeSlotId::available(),
            vec![TimeSlotId::Morning, TimeSlotId::Afternoon]
        );
        assert_eq!(TimeSlotId::Evening.slot().label, "Evening");
    }

    #[test]
    fn test_food_type_toggle() {
        assert_eq!(FoodType::Perishable.toggle(), FoodType::NonPerishable);
        assert_eq!(FoodType::NonPerishable.toggle(), FoodType::Perishable);
    }

    #[test]
    fn test_donation_status_serde_labels() {
        let json = serde_json::to_string(&DonationStatus::Pending).unwrap();
        assert_eq!(json, "\"Pending Pickup\"");
        assert_eq!(DonationStatus::InTransit.label(), "In Transit");
    }
}
