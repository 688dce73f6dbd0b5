//! Wizard step rendering

use super::field_renderer::{draw_field, draw_help_text, field_height, FieldView};
use super::review::draw_review_summary;
use crate::app::App;
use crate::platform::{ADD_ITEM_SHORTCUT, CANCEL_SHORTCUT, REMOVE_ITEM_SHORTCUT};
use crate::state::{DraftStorage, FieldKey, FoodType, Step};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// One vertical slot of the step body
#[derive(Debug, Clone, PartialEq)]
enum Row {
    Header(String),
    Field(FieldKey),
}

impl Row {
    fn height(&self) -> u16 {
        match self {
            Row::Header(_) => 1,
            Row::Field(key) => field_height(key.kind()),
        }
    }
}

/// Lay out the fields of a step with section headers
fn step_rows(fields: &[FieldKey]) -> Vec<Row> {
    let mut rows = Vec::with_capacity(fields.len() + 4);
    for key in fields {
        match key {
            FieldKey::ItemName(i) => rows.push(Row::Header(format!("Item {}", i + 1))),
            FieldKey::Dietary(_) if !matches!(rows.last(), Some(Row::Field(FieldKey::Dietary(_)))) => {
                rows.push(Row::Header("Dietary Information".to_string()));
            }
            FieldKey::Allergen(_) if !matches!(rows.last(), Some(Row::Field(FieldKey::Allergen(_)))) => {
                rows.push(Row::Header("Contains Allergens".to_string()));
            }
            _ => {}
        }
        rows.push(Row::Field(*key));
    }
    rows
}

/// First row to draw so that `active` fits in `available` rows
fn scroll_start(heights: &[u16], active: usize, available: u16) -> usize {
    let Some(last) = heights.len().checked_sub(1) else {
        return 0;
    };
    let active = active.min(last);
    let mut start = 0;
    let mut used: u16 = heights[..=active].iter().sum();
    while used > available && start < active {
        used -= heights[start];
        start += 1;
    }
    start
}

/// Draw the current wizard step
pub fn draw_wizard<S: DraftStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let step = app.current_step();

    let block = Block::default()
        .title(format!(
            " Step {} of {}: {} ",
            step.number(),
            Step::ALL.len(),
            step.title()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Step body
            Constraint::Length(BUTTON_HEIGHT), // Back / Next
            Constraint::Length(1),             // Help
        ])
        .margin(1)
        .split(inner);

    match step {
        Step::Review => draw_review_step(frame, chunks[0], app),
        _ => draw_step_fields(frame, chunks[0], app),
    }

    draw_buttons(frame, chunks[1], app);
    draw_help_text(frame, chunks[2], &help_text(step));
}

fn draw_step_fields<S: DraftStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let draft = app.wizard.draft();
    let errors = app.wizard.errors();

    // Step-level messages with no field of their own
    let orphan: Vec<&str> = errors
        .iter()
        .filter(|(path, _)| !app.form.fields().iter().any(|k| k.path() == *path))
        .map(|(_, msg)| msg)
        .collect();

    let mut y = area.y;
    for msg in &orphan {
        if y >= area.bottom() {
            return;
        }
        let line = Paragraph::new(*msg).style(Style::default().fg(Color::Red));
        frame.render_widget(line, Rect::new(area.x, y, area.width, 1));
        y += 1;
    }

    if app.current_step() == Step::ItemDetails && draft.items.is_empty() {
        let hint = format!("No items yet. Press {ADD_ITEM_SHORTCUT} to add one.");
        if y < area.bottom() {
            draw_help_text(frame, Rect::new(area.x, y, area.width, 1), &hint);
            y += 2;
        }
    }

    let rows = step_rows(app.form.fields());
    let heights: Vec<u16> = rows.iter().map(Row::height).collect();
    let active_row = app
        .form
        .active_key()
        .and_then(|key| rows.iter().position(|r| *r == Row::Field(key)))
        .unwrap_or(0);
    let available = area.bottom().saturating_sub(y);
    let start = scroll_start(&heights, active_row, available);

    for row in &rows[start..] {
        let height = row.height();
        if y + height > area.bottom() {
            break;
        }
        let row_area = Rect::new(area.x, y, area.width, height);
        match row {
            Row::Header(title) => {
                let header = Paragraph::new(Span::styled(
                    title.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                frame.render_widget(header, row_area);
            }
            Row::Field(key) => {
                let value = app.form.display_value(*key, draft);
                let path = key.path();
                draw_field(
                    frame,
                    row_area,
                    &FieldView {
                        label: &key.label(),
                        value: &value,
                        kind: key.kind(),
                        is_active: app.form.is_active(*key),
                        error: errors.get(&path),
                    },
                );
            }
        }
        y += height;
    }

    if app.current_step() == Step::FoodType && y < area.bottom() {
        let lines: Vec<Line> = FoodType::ALL
            .iter()
            .map(|food| {
                let marker = if draft.food_type == Some(*food) { "●" } else { "○" };
                Line::from(vec![
                    Span::raw(format!("{marker} ")),
                    Span::styled(food.label(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("  {}", food.description()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect();
        let rest = Rect::new(area.x, y + 1, area.width, area.bottom().saturating_sub(y + 1));
        frame.render_widget(Paragraph::new(lines), rest);
    }
}

fn draw_review_step<S: DraftStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    draw_review_summary(frame, chunks[0], app.wizard.draft());

    let key = FieldKey::Terms;
    let value = key.display_value(app.wizard.draft());
    draw_field(
        frame,
        chunks[1],
        &FieldView {
            label: &key.label(),
            value: &value,
            kind: key.kind(),
            is_active: app.form.is_active(key),
            error: app.wizard.errors().get(&key.path()),
        },
    );
}

fn draw_buttons<S: DraftStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16), // Back
            Constraint::Min(0),
            Constraint::Length(18), // Next / Submit
        ])
        .split(area);

    let step = app.current_step();
    let back = if step.is_first() { "Esc Donations" } else { "Esc Back" };
    render_button(frame, chunks[0], back, false, !app.wizard.is_submitting());

    let forward = if !step.is_last() {
        "Enter Next"
    } else if app.wizard.is_submitting() {
        "Submitting..."
    } else {
        "Enter Submit"
    };
    render_button(frame, chunks[2], forward, true, !app.wizard.is_submitting());
}

fn help_text(step: Step) -> String {
    let common = format!("Tab:next field  {CANCEL_SHORTCUT}:discard");
    match step {
        Step::FoodType => format!("Space/←→:choose  {common}"),
        Step::ItemDetails => format!(
            "{ADD_ITEM_SHORTCUT}:add item  {REMOVE_ITEM_SHORTCUT}:remove item  ←→:unit  Space:toggle  {common}"
        ),
        Step::PickupDetails => format!("←→:time slot  {common}"),
        Step::Review => format!("Space:accept terms  {common}"),
    }
}
