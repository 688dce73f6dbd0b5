//! Wizard step pointer and the persisted wizard state

use super::donation::DraftRecord;
use serde::{Deserialize, Serialize};

/// One of the four sequential wizard stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub enum Step {
    #[default]
    FoodType,
    ItemDetails,
    PickupDetails,
    Review,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::FoodType,
        Step::ItemDetails,
        Step::PickupDetails,
        Step::Review,
    ];

    pub const FIRST: Step = Step::FoodType;
    pub const LAST: Step = Step::Review;

    /// Step for a 1-based number, clamped to the valid range
    pub fn from_number(n: i64) -> Self {
        match n {
            i64::MIN..=1 => Self::FoodType,
            2 => Self::ItemDetails,
            3 => Self::PickupDetails,
            _ => Self::Review,
        }
    }

    /// 1-based step number
    pub fn number(&self) -> u8 {
        match self {
            Self::FoodType => 1,
            Self::ItemDetails => 2,
            Self::PickupDetails => 3,
            Self::Review => 4,
        }
    }

    /// Following step, capped at the last one
    pub fn next(&self) -> Self {
        Self::from_number(i64::from(self.number()) + 1)
    }

    /// Preceding step, floored at the first one
    pub fn previous(&self) -> Self {
        Self::from_number(i64::from(self.number()) - 1)
    }

    pub fn is_first(&self) -> bool {
        *self == Self::FIRST
    }

    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::FoodType => "Food Type",
            Self::ItemDetails => "Item Details",
            Self::PickupDetails => "Pickup Details",
            Self::Review => "Review & Submit",
        }
    }
}

impl From<i64> for Step {
    fn from(n: i64) -> Self {
        Self::from_number(n)
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

/// Current step plus the draft, exactly as persisted
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub current_step: Step,
    #[serde(default)]
    pub form_data: DraftRecord,
}
