//! proptest generators for drafts, patches and wizard states

use super::donation::{
    Address, Allergen, AllergenInfo, DietaryTag, DraftPatch, DraftRecord, FoodItem, FoodType,
    TimeSlotId,
};
use super::wizard::{Step, WizardState};
use chrono::NaiveDate;
use proptest::collection::{btree_set, vec};
use proptest::option;
use proptest::prelude::*;
use proptest::sample::select;

pub fn food_type() -> impl Strategy<Value = FoodType> {
    select(FoodType::ALL.to_vec())
}

pub fn time_slot() -> impl Strategy<Value = TimeSlotId> {
    select(vec![
        TimeSlotId::Morning,
        TimeSlotId::Afternoon,
        TimeSlotId::Evening,
    ])
}

pub fn step() -> impl Strategy<Value = Step> {
    select(Step::ALL.to_vec())
}

pub fn date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("day 1-28 exists"))
}

/// Short text that is blank, whitespace-only or filled
pub fn field_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[A-Za-z0-9 ]{1,12}",
        "\\PC{1,8}",
    ]
}

pub fn zip() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{5}",
        "[0-9]{5}-[0-9]{4}",
        " [0-9]{5} ",
        "[0-9a-z-]{0,10}",
        "[٠-٩]{5}",
    ]
}

pub fn item() -> impl Strategy<Value = FoodItem> {
    (
        "[a-f0-9]{8}",
        field_text(),
        field_text(),
        field_text(),
        field_text(),
        option::of(date()),
        option::of(field_text()),
    )
        .prop_map(
            |(id, name, category, quantity, unit, expiry_date, description)| FoodItem {
                name,
                category,
                quantity,
                unit,
                expiry_date,
                description,
                ..FoodItem::with_id(id)
            },
        )
}

pub fn allergens() -> impl Strategy<Value = AllergenInfo> {
    vec(any::<bool>(), Allergen::ALL.len()).prop_map(|flags| {
        let mut info = AllergenInfo::default();
        for (allergen, on) in Allergen::ALL.into_iter().zip(flags) {
            info.set(allergen, on);
        }
        info
    })
}

pub fn address() -> impl Strategy<Value = Address> {
    (field_text(), field_text(), field_text(), zip()).prop_map(|(street, city, state, zip)| {
        Address {
            street,
            city,
            state,
            zip,
        }
    })
}

pub fn draft_record() -> impl Strategy<Value = DraftRecord> {
    (
        option::of(food_type()),
        vec(item(), 0..4),
        btree_set(select(DietaryTag::ALL.to_vec()), 0..=DietaryTag::ALL.len()),
        allergens(),
        address(),
        option::of(date()),
        option::of(time_slot()),
        "[a-z ]{0,16}",
        any::<bool>(),
    )
        .prop_map(
            |(
                food_type,
                items,
                dietary_info,
                allergen_info,
                pickup_address,
                pickup_date,
                pickup_time_slot,
                special_instructions,
                terms_accepted,
            )| DraftRecord {
                food_type,
                items,
                dietary_info,
                allergen_info,
                pickup_address,
                pickup_date,
                pickup_time_slot,
                special_instructions,
                terms_accepted,
            },
        )
}

/// Any partial update, including ones that clear optional fields
pub fn draft_patch() -> impl Strategy<Value = DraftPatch> {
    (
        option::of(option::of(food_type())),
        option::of(vec(item(), 0..3)),
        option::of(btree_set(select(DietaryTag::ALL.to_vec()), 0..=DietaryTag::ALL.len())),
        option::of(allergens()),
        option::of(address()),
        option::of(option::of(date())),
        option::of(option::of(time_slot())),
        option::of("[a-z ]{0,16}"),
        option::of(any::<bool>()),
    )
        .prop_map(
            |(
                food_type,
                items,
                dietary_info,
                allergen_info,
                pickup_address,
                pickup_date,
                pickup_time_slot,
                special_instructions,
                terms_accepted,
            )| DraftPatch {
                food_type,
                items,
                dietary_info,
                allergen_info,
                pickup_address,
                pickup_date,
                pickup_time_slot,
                special_instructions,
                terms_accepted,
            },
        )
}

pub fn wizard_state() -> impl Strategy<Value = WizardState> {
    (step(), draft_record()).prop_map(|(current_step, form_data)| WizardState {
        current_step,
        form_data,
    })
}
