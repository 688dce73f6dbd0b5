//! Review step summary

use crate::state::{format_date, DraftRecord};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const NOT_PROVIDED: &str = "Not provided";

/// Label/value pairs describing the draft as it will be submitted
pub fn summary_rows(draft: &DraftRecord) -> Vec<(String, String)> {
    let mut rows = vec![(
        "Food Type".to_string(),
        draft
            .food_type
            .map(|f| f.label().to_string())
            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
    )];

    for (i, item) in draft.items.iter().enumerate() {
        let mut value = format!("{} - {} ({})", item.name, item.quantity_label(), item.category);
        if let Some(expiry) = item.expiry_date {
            value.push_str(&format!(", expires {}", format_date(expiry)));
        }
        rows.push((format!("Item {}", i + 1), value));
    }

    if !draft.dietary_info.is_empty() {
        let tags: Vec<&str> = draft.dietary_info.iter().map(|t| t.label()).collect();
        rows.push(("Dietary".to_string(), tags.join(", ")));
    }
    let allergens = draft.allergen_info.flagged();
    if !allergens.is_empty() {
        let labels: Vec<&str> = allergens.iter().map(|a| a.label()).collect();
        rows.push(("Allergens".to_string(), labels.join(", ")));
    }

    rows.push((
        "Pickup Address".to_string(),
        draft.pickup_address.one_line(),
    ));
    rows.push((
        "Pickup Date".to_string(),
        draft
            .pickup_date
            .map(format_date)
            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
    ));
    rows.push((
        "Time Slot".to_string(),
        draft
            .pickup_time_slot
            .map(|s| format!("{} ({})", s.slot().label, s.slot().range))
            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
    ));
    if !draft.special_instructions.trim().is_empty() {
        rows.push((
            "Instructions".to_string(),
            draft.special_instructions.clone(),
        ));
    }

    rows
}

pub fn draw_review_summary(frame: &mut Frame, area: Rect, draft: &DraftRecord) {
    let lines: Vec<Line> = summary_rows(draft)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label:<16}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(value),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Allergen, DietaryTag, FoodItem, FoodType, TimeSlotId};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn value<'a>(rows: &'a [(String, String)], label: &str) -> Option<&'a str> {
        rows.iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_empty_draft_summary() {
        let rows = summary_rows(&DraftRecord::default());
        assert_eq!(value(&rows, "Food Type"), Some(NOT_PROVIDED));
        assert_eq!(value(&rows, "Pickup Date"), Some(NOT_PROVIDED));
        assert_eq!(value(&rows, "Dietary"), None);
        assert_eq!(value(&rows, "Instructions"), None);
    }

    #[test]
    fn test_full_draft_summary() {
        let mut draft = DraftRecord {
            food_type: Some(FoodType::Perishable),
            items: vec![FoodItem {
                name: "Milk".to_string(),
                category: "Dairy".to_string(),
                quantity: "2".to_string(),
                unit: "gallons".to_string(),
                expiry_date: NaiveDate::from_ymd_opt(2026, 10, 25),
                ..FoodItem::with_id("item-1")
            }],
            pickup_date: NaiveDate::from_ymd_opt(2026, 10, 20),
            pickup_time_slot: Some(TimeSlotId::Afternoon),
            special_instructions: "Ring the bell".to_string(),
            ..Default::default()
        };
        draft.dietary_info.insert(DietaryTag::Vegetarian);
        draft.allergen_info.set(Allergen::Dairy, true);

        let rows = summary_rows(&draft);
        assert_eq!(
            value(&rows, "Item 1"),
            Some("Milk - 2 gallons (Dairy), expires 2026-10-25")
        );
        assert_eq!(value(&rows, "Dietary"), Some("Vegetarian"));
        assert_eq!(value(&rows, "Allergens"), Some("Dairy"));
        assert_eq!(value(&rows, "Pickup Date"), Some("2026-10-20"));
        assert_eq!(
            value(&rows, "Time Slot"),
            Some("Afternoon (12:00 PM - 4:00 PM)")
        );
        assert_eq!(value(&rows, "Instructions"), Some("Ring the bell"));
    }
}
