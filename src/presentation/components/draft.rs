use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::super::view::{DraftRender, FieldRender};

pub fn render_draft(frame: &mut Frame<'_>, area: Rect, draft: &DraftRender<'_>, cursor: bool) {
    let label_width = draft
        .fields
        .iter()
        .map(|field| UnicodeWidthStr::width(field.label.as_str()))
        .max()
        .unwrap_or(0);
    let lines = draft
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| field_line(field, label_width, draft.cursor == Some(index)))
        .collect::<Vec<_>>();

    let border_style = if draft.cursor.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(draft.heading.clone())
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if cursor
        && let Some(index) = draft.cursor
        && let Some(field) = draft.fields.get(index)
        && !field.choice
    {
        let value_width = if field.placeholder {
            0
        } else {
            UnicodeWidthStr::width(field.value.as_str())
        };
        let x = area
            .x
            .saturating_add(1)
            .saturating_add((label_width + 4 + value_width) as u16);
        let y = area.y.saturating_add(1).saturating_add(index as u16);
        if x < area.right() && y < area.bottom() {
            frame.set_cursor_position((x, y));
        }
    }
}

fn field_line(field: &FieldRender, label_width: usize, focused: bool) -> Line<'static> {
    let marker = if focused { "» " } else { "  " };
    let mut label = field.label.clone();
    while UnicodeWidthStr::width(label.as_str()) < label_width {
        label.push(' ');
    }
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let value_style = if field.placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let mut spans = vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{label}  "), label_style),
        Span::styled(field.value.clone(), value_style),
    ];
    if field.choice {
        spans.push(Span::styled(" ▾", Style::default().fg(Color::DarkGray)));
    }
    if let Some(error) = &field.error {
        spans.push(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}
