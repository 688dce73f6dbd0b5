//! Form field value objects
//!
//! A [`FieldKey`] names one focusable input of the wizard. Keys know the
//! validator path they report under, how to read their value out of a
//! draft, and how to turn an edit into a [`DraftPatch`].

use crate::state::donation::{
    Allergen, DietaryTag, DraftPatch, DraftRecord, FoodType, TimeSlotId, QUANTITY_UNITS,
};
use chrono::NaiveDate;

/// Date format accepted in date inputs
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// How a field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    /// Typed as `YYYY-MM-DD`
    Date,
    /// On/off checkbox
    Toggle,
    /// One of a fixed set of options
    Choice,
}

impl FieldKind {
    pub fn accepts_text(&self) -> bool {
        matches!(self, Self::Text | Self::Multiline | Self::Date)
    }
}

/// Identifies one focusable input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    FoodType,
    ItemName(usize),
    ItemCategory(usize),
    ItemQuantity(usize),
    ItemUnit(usize),
    ItemExpiry(usize),
    ItemDescription(usize),
    Dietary(DietaryTag),
    Allergen(Allergen),
    Street,
    City,
    State,
    Zip,
    PickupDate,
    TimeSlot,
    Instructions,
    Terms,
}

impl FieldKey {
    /// Path used by the validator for this field
    pub fn path(&self) -> String {
        match self {
            Self::FoodType => "foodType".to_string(),
            Self::ItemName(i) => format!("items.{i}.name"),
            Self::ItemCategory(i) => format!("items.{i}.category"),
            Self::ItemQuantity(i) => format!("items.{i}.quantity"),
            Self::ItemUnit(i) => format!("items.{i}.unit"),
            Self::ItemExpiry(i) => format!("items.{i}.expiryDate"),
            Self::ItemDescription(i) => format!("items.{i}.description"),
            Self::Dietary(tag) => format!("dietaryInfo.{}", tag.id()),
            Self::Allergen(a) => format!("allergenInfo.{}", a.id()),
            Self::Street => "pickupAddress.street".to_string(),
            Self::City => "pickupAddress.city".to_string(),
            Self::State => "pickupAddress.state".to_string(),
            Self::Zip => "pickupAddress.zip".to_string(),
            Self::PickupDate => "pickupDate".to_string(),
            Self::TimeSlot => "pickupTimeSlot".to_string(),
            Self::Instructions => "specialInstructions".to_string(),
            Self::Terms => "termsAccepted".to_string(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::FoodType => "Food Type".to_string(),
            Self::ItemName(_) => "Item Name".to_string(),
            Self::ItemCategory(_) => "Category".to_string(),
            Self::ItemQuantity(_) => "Quantity".to_string(),
            Self::ItemUnit(_) => "Unit".to_string(),
            Self::ItemExpiry(_) => "Expiry Date (YYYY-MM-DD)".to_string(),
            Self::ItemDescription(_) => "Description".to_string(),
            Self::Dietary(tag) => tag.label().to_string(),
            Self::Allergen(a) => a.label().to_string(),
            Self::Street => "Street Address".to_string(),
            Self::City => "City".to_string(),
            Self::State => "State".to_string(),
            Self::Zip => "ZIP Code".to_string(),
            Self::PickupDate => "Pickup Date (YYYY-MM-DD)".to_string(),
            Self::TimeSlot => "Time Slot".to_string(),
            Self::Instructions => "Special Instructions (Optional)".to_string(),
            Self::Terms => "Accept terms and conditions".to_string(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::FoodType | Self::TimeSlot => FieldKind::Choice,
            Self::Dietary(_) | Self::Allergen(_) | Self::Terms => FieldKind::Toggle,
            Self::ItemExpiry(_) | Self::PickupDate => FieldKind::Date,
            Self::ItemDescription(_) | Self::Instructions => FieldKind::Multiline,
            _ => FieldKind::Text,
        }
    }

    /// Index of the line item this field belongs to
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Self::ItemName(i)
            | Self::ItemCategory(i)
            | Self::ItemQuantity(i)
            | Self::ItemUnit(i)
            | Self::ItemExpiry(i)
            | Self::ItemDescription(i) => Some(*i),
            _ => None,
        }
    }

    /// Current text of a text or date field as stored in the draft
    pub fn text(&self, draft: &DraftRecord) -> String {
        match self {
            Self::ItemName(i) => draft
                .items
                .get(*i)
                .map(|it| it.name.clone())
                .unwrap_or_default(),
            Self::ItemCategory(i) => draft
                .items
                .get(*i)
                .map(|it| it.category.clone())
                .unwrap_or_default(),
            Self::ItemQuantity(i) => draft
                .items
                .get(*i)
                .map(|it| it.quantity.clone())
                .unwrap_or_default(),
            Self::ItemUnit(i) => draft
                .items
                .get(*i)
                .map(|it| it.unit.clone())
                .unwrap_or_default(),
            Self::ItemExpiry(i) => draft
                .items
                .get(*i)
                .and_then(|it| it.expiry_date)
                .map(format_date)
                .unwrap_or_default(),
            Self::ItemDescription(i) => draft
                .items
                .get(*i)
                .and_then(|it| it.description.clone())
                .unwrap_or_default(),
            Self::Street => draft.pickup_address.street.clone(),
            Self::City => draft.pickup_address.city.clone(),
            Self::State => draft.pickup_address.state.clone(),
            Self::Zip => draft.pickup_address.zip.clone(),
            Self::PickupDate => draft.pickup_date.map(format_date).unwrap_or_default(),
            Self::Instructions => draft.special_instructions.clone(),
            _ => String::new(),
        }
    }

    /// Patch that stores `text` in this field
    ///
    /// Nested values are replaced whole: an item edit replaces the item
    /// list, an address edit replaces the address. Date text that does not
    /// parse clears the date. Returns `None` for non-text fields or a
    /// missing item.
    pub fn set_text(&self, draft: &DraftRecord, text: &str) -> Option<DraftPatch> {
        if let Some(index) = self.item_index() {
            let mut items = draft.items.clone();
            let item = items.get_mut(index)?;
            match self {
                Self::ItemName(_) => item.name = text.to_string(),
                Self::ItemCategory(_) => item.category = text.to_string(),
                Self::ItemQuantity(_) => item.quantity = text.to_string(),
                Self::ItemUnit(_) => item.unit = text.to_string(),
                Self::ItemExpiry(_) => item.expiry_date = parse_date(text),
                Self::ItemDescription(_) => {
                    item.description = (!text.is_empty()).then(|| text.to_string())
                }
                _ => return None,
            }
            return Some(DraftPatch::new().items(items));
        }

        let mut address = draft.pickup_address.clone();
        match self {
            Self::Street => address.street = text.to_string(),
            Self::City => address.city = text.to_string(),
            Self::State => address.state = text.to_string(),
            Self::Zip => address.zip = text.to_string(),
            Self::PickupDate => return Some(DraftPatch::new().pickup_date(parse_date(text))),
            Self::Instructions => return Some(DraftPatch::new().special_instructions(text)),
            _ => return None,
        }
        Some(DraftPatch::new().pickup_address(address))
    }

    /// Whether a toggle field is on
    pub fn is_on(&self, draft: &DraftRecord) -> bool {
        match self {
            Self::Dietary(tag) => draft.dietary_info.contains(tag),
            Self::Allergen(a) => draft.allergen_info.get(*a),
            Self::Terms => draft.terms_accepted,
            _ => false,
        }
    }

    /// Patch flipping a toggle field
    pub fn toggle(&self, draft: &DraftRecord) -> Option<DraftPatch> {
        match self {
            Self::Dietary(tag) => {
                let mut tags = draft.dietary_info.clone();
                if !tags.remove(tag) {
                    tags.insert(*tag);
                }
                Some(DraftPatch::new().dietary_info(tags))
            }
            Self::Allergen(a) => {
                let mut info = draft.allergen_info;
                info.set(*a, !info.get(*a));
                Some(DraftPatch::new().allergen_info(info))
            }
            Self::Terms => Some(DraftPatch::new().terms_accepted(!draft.terms_accepted)),
            _ => None,
        }
    }

    /// Patch moving a choice field to its next (or previous) option
    pub fn cycle(&self, draft: &DraftRecord, forward: bool, slots: &[TimeSlotId]) -> Option<DraftPatch> {
        match self {
            Self::FoodType => {
                let next = match draft.food_type {
                    None if forward => FoodType::Perishable,
                    None => FoodType::NonPerishable,
                    Some(current) => current.toggle(),
                };
                Some(DraftPatch::new().food_type(next))
            }
            Self::TimeSlot => {
                if slots.is_empty() {
                    return None;
                }
                let position = draft
                    .pickup_time_slot
                    .and_then(|s| slots.iter().position(|x| *x == s));
                let index = match (position, forward) {
                    (None, true) => 0,
                    (None, false) => slots.len() - 1,
                    (Some(p), true) => (p + 1) % slots.len(),
                    (Some(p), false) => (p + slots.len() - 1) % slots.len(),
                };
                Some(DraftPatch::new().pickup_time_slot(Some(slots[index])))
            }
            // Free text stays allowed; arrows step through the suggestions
            Self::ItemUnit(i) => {
                let mut items = draft.items.clone();
                let item = items.get_mut(*i)?;
                let count = QUANTITY_UNITS.len();
                let position = QUANTITY_UNITS.iter().position(|u| *u == item.unit);
                let index = match (position, forward) {
                    (None, true) => 0,
                    (None, false) => count - 1,
                    (Some(p), true) => (p + 1) % count,
                    (Some(p), false) => (p + count - 1) % count,
                };
                item.unit = QUANTITY_UNITS[index].to_string();
                Some(DraftPatch::new().items(items))
            }
            _ => None,
        }
    }

    /// Human-readable value for rendering
    pub fn display_value(&self, draft: &DraftRecord) -> String {
        match self.kind() {
            FieldKind::Toggle => {
                if self.is_on(draft) {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            FieldKind::Choice => match self {
                Self::FoodType => draft
                    .food_type
                    .map(|f| f.label().to_string())
                    .unwrap_or_default(),
                Self::TimeSlot => draft
                    .pickup_time_slot
                    .map(|s| format!("{} ({})", s.slot().label, s.slot().range))
                    .unwrap_or_default(),
                _ => String::new(),
            },
            _ => self.text(draft),
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_INPUT_FORMAT).to_string()
}

/// Parse a fully typed `YYYY-MM-DD` date; unpadded parts are rejected
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let date = NaiveDate::parse_from_str(text, DATE_INPUT_FORMAT).ok()?;
    (format_date(date) == text).then_some(date)
}
