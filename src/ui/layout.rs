//! Layout components (stepper header, status bar)

use super::components::{render_step_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::{DraftStorage, Step, SubmissionState, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect, view: View) -> (Rect, Rect, Rect) {
    let header_height = match view {
        View::Wizard => BUTTON_HEIGHT,
        View::Donations => 0,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height), // Stepper
            Constraint::Min(0),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the four wizard stages with the current one highlighted
pub fn draw_stepper(frame: &mut Frame, area: Rect, current: Step) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (step, chunk) in Step::ALL.iter().zip(chunks.iter()) {
        render_step_button(
            frame,
            *chunk,
            step.number(),
            step.title(),
            *step == current,
            *step < current,
        );
    }
}

/// Draw the status bar
pub fn draw_status_bar<S: DraftStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.state.current_view.title()),
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];

    if app.wizard.is_submitting() {
        spans.push(Span::styled(
            " Submitting... ",
            Style::default().fg(Color::Yellow),
        ));
    } else if app.state.current_view == View::Wizard
        && matches!(app.wizard.submission(), SubmissionState::Failed(_))
    {
        spans.push(Span::styled(
            " Last attempt failed, Enter to retry ",
            Style::default().fg(Color::Red),
        ));
    } else {
        spans.push(Span::styled(
            format!(" {}", get_view_hints(app.state.current_view)),
            Style::default().fg(Color::Gray),
        ));
    }

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.right().saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> &'static str {
    match view {
        View::Wizard => "Enter:next  Esc:back",
        View::Donations => "j/k:nav  n:donate  r:refresh  q:quit",
    }
}
