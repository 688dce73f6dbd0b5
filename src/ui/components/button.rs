//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if is_selected && is_enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render one stage of the stepper header
///
/// Completed stages are marked with a check, the current one is highlighted.
pub fn render_step_button(
    frame: &mut Frame,
    area: Rect,
    number: u8,
    title: &str,
    is_current: bool,
    is_done: bool,
) {
    let marker = if is_done {
        "✓".to_string()
    } else {
        number.to_string()
    };
    let content = format!("{marker} {title}");
    if is_done && !is_current {
        let paragraph = Paragraph::new(format!(" {content} "))
            .style(Style::default().fg(Color::Green));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        frame.render_widget(paragraph.block(block), area);
    } else {
        render_button(frame, area, &content, is_current, true);
    }
}
