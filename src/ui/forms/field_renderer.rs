//! Field rendering utilities for forms

use crate::state::FieldKind;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Everything needed to draw one input
pub struct FieldView<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub kind: FieldKind,
    pub is_active: bool,
    /// Inline validation message
    pub error: Option<&'a str>,
}

/// Rows a field of this kind occupies
pub fn field_height(kind: FieldKind) -> u16 {
    match kind {
        FieldKind::Toggle => 1,
        FieldKind::Multiline => 5,
        _ => 3,
    }
}

/// Draw a form field with its inline error, if any
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FieldView) {
    if field.kind == FieldKind::Toggle {
        draw_toggle(frame, area, field);
        return;
    }

    let style = if field.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_style = if field.error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        style
    };

    let display_str = if field.value.is_empty() && !field.is_active {
        "(empty)"
    } else {
        field.value
    };

    let cursor = if field.is_active { "▌" } else { "" };

    let content = match field.kind {
        FieldKind::Multiline => {
            let mut lines: Vec<Line> = display_str
                .lines()
                .map(|l| Line::from(l.to_string()))
                .collect();
            if field.is_active {
                if let Some(last) = lines.last_mut() {
                    last.spans
                        .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
                } else {
                    lines.push(Line::from(Span::styled(
                        cursor,
                        Style::default().fg(Color::Cyan),
                    )));
                }
            }
            Paragraph::new(lines)
        }
        FieldKind::Choice => {
            let arrow_style = if field.is_active {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let value = if field.value.is_empty() {
                "(none selected)"
            } else {
                field.value
            };
            Paragraph::new(Line::from(vec![
                Span::styled("◀ ", arrow_style),
                Span::styled(value, style),
                Span::styled(" ▶", arrow_style),
            ]))
        }
        _ => Paragraph::new(Line::from(vec![
            Span::styled(display_str, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])),
    };

    let mut block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = field.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

fn draw_toggle(frame: &mut Frame, area: Rect, field: &FieldView) {
    let style = if field.is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(format!("{} ", field.value), style),
        Span::styled(field.label, style),
    ];
    if let Some(error) = field.error {
        spans.push(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw a dimmed help line
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_heights() {
        assert_eq!(field_height(FieldKind::Toggle), 1);
        assert_eq!(field_height(FieldKind::Text), 3);
        assert_eq!(field_height(FieldKind::Date), 3);
        assert_eq!(field_height(FieldKind::Choice), 3);
        assert_eq!(field_height(FieldKind::Multiline), 5);
    }
}
