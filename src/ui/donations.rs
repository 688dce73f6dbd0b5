//! Donation listing view

use crate::app::App;
use crate::state::{format_date, Donation, DonationStatus, DraftStorage};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

fn status_color(status: DonationStatus) -> Color {
    match status {
        DonationStatus::Pending => Color::Yellow,
        DonationStatus::InTransit => Color::Blue,
        DonationStatus::Completed => Color::Green,
        DonationStatus::Cancelled => Color::Red,
    }
}

/// Short pickup description, e.g. "2026-10-20 Morning"
fn pickup_label(donation: &Donation) -> String {
    let date = donation
        .pickup_date
        .map(format_date)
        .unwrap_or_else(|| "no date".to_string());
    match donation.pickup_time_slot {
        Some(slot) => format!("{date} {}", slot.slot().label),
        None => date,
    }
}

/// Impact totals derived from the donation history
fn impact_summary(donations: &[Donation]) -> String {
    let items: usize = donations.iter().map(|d| d.items.len()).sum();
    let active = donations
        .iter()
        .filter(|d| matches!(d.status, DonationStatus::Pending | DonationStatus::InTransit))
        .count();
    let completed = donations
        .iter()
        .filter(|d| d.status == DonationStatus::Completed)
        .count();
    format!(" {items} items donated | {active} active | {completed} completed ")
}

/// Draw the donation list with a detail pane for the selection
pub fn draw_list<S: DraftStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let donations = &app.state.donations;
    let block = Block::default()
        .title(format!(" My Donations ({}) ", donations.len()))
        .title_bottom(Line::from(impact_summary(donations)).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if donations.is_empty() {
        let empty = Paragraph::new("No donations yet. Press n to start one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, chunks[0]);
    } else {
        let items: Vec<ListItem> = donations
            .iter()
            .map(|d| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<14}", d.status.label()),
                        Style::default().fg(status_color(d.status)),
                    ),
                    Span::raw(format!(" {}  ", pickup_label(d))),
                    Span::styled(
                        format!("{} item(s)", d.items.len()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
        let mut list_state = ListState::default();
        list_state.select(Some(app.state.selected_index));
        frame.render_stateful_widget(list, chunks[0], &mut list_state);
    }

    draw_detail(frame, chunks[1], app.state.selected_donation());
}

fn draw_detail(frame: &mut Frame, area: Rect, donation: Option<&Donation>) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(donation) = donation else {
        frame.render_widget(block, area);
        return;
    };

    let label = Style::default().fg(Color::Yellow);
    let mut lines = vec![
        Line::from(vec![Span::styled("ID: ", label), Span::raw(&donation.id)]),
        Line::from(vec![
            Span::styled("Status: ", label),
            Span::styled(
                donation.status.label(),
                Style::default().fg(status_color(donation.status)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Submitted: ", label),
            Span::raw(donation.submitted_at.format("%Y-%m-%d %H:%M UTC").to_string()),
        ]),
        Line::from(vec![
            Span::styled("Pickup: ", label),
            Span::raw(pickup_label(donation)),
        ]),
        Line::from(""),
        Line::from(Span::styled("Items", label.add_modifier(Modifier::BOLD))),
    ];
    lines.extend(
        donation
            .items
            .iter()
            .map(|item| Line::from(format!("  • {} ({})", item.name, item.quantity))),
    );

    let detail = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DonationItemSummary, TimeSlotId};
    use chrono::{NaiveDate, Utc};

    fn donation() -> Donation {
        Donation {
            id: "don-001".to_string(),
            status: DonationStatus::Pending,
            submitted_at: Utc::now(),
            pickup_date: NaiveDate::from_ymd_opt(2026, 10, 20),
            pickup_time_slot: Some(TimeSlotId::Morning),
            items: Vec::new(),
        }
    }

    #[test]
    fn test_impact_summary_counts_items_and_statuses() {
        let item = DonationItemSummary {
            name: "Apples".to_string(),
            quantity: "10 lbs".to_string(),
        };
        let donations = vec![
            Donation {
                items: vec![item.clone(), item.clone()],
                ..donation()
            },
            Donation {
                status: DonationStatus::InTransit,
                items: vec![item.clone()],
                ..donation()
            },
            Donation {
                status: DonationStatus::Completed,
                items: vec![item],
                ..donation()
            },
            Donation {
                status: DonationStatus::Cancelled,
                ..donation()
            },
        ];
        assert_eq!(
            impact_summary(&donations),
            " 4 items donated | 2 active | 1 completed "
        );
        assert_eq!(impact_summary(&[]), " 0 items donated | 0 active | 0 completed ");
    }

    #[test]
    fn test_pickup_label() {
        assert_eq!(pickup_label(&donation()), "2026-10-20 Morning");
    }

    #[test]
    fn test_pickup_label_without_slot_or_date() {
        let d = Donation {
            pickup_date: None,
            pickup_time_slot: None,
            ..donation()
        };
        assert_eq!(pickup_label(&d), "no date");
    }

    #[test]
    fn test_status_colors_are_distinct() {
        let colors = [
            status_color(DonationStatus::Pending),
            status_color(DonationStatus::InTransit),
            status_color(DonationStatus::Completed),
            status_color(DonationStatus::Cancelled),
        ];
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| a != b));
        }
    }
}
