use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::controller::RowActions;

use super::super::view::{RowRender, UiContext};

const ACTION_COLUMN_WIDTH: usize = 8;

pub fn render_list(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let border_style = if ctx.list_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(format!("{} ({})", ctx.title, ctx.rows.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if ctx.rows.is_empty() {
        let placeholder = Paragraph::new("No entries yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let items = ctx
        .rows
        .iter()
        .enumerate()
        .map(|(position, row)| ListItem::new(row_line(position, row, content_width)))
        .collect::<Vec<_>>();

    let mut state = ListState::default();
    if let Some(selected) = ctx.selected {
        state.select(Some(selected.min(ctx.rows.len() - 1)));
    }
    let highlight = if ctx.list_focused {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut state);
}

fn row_line(position: usize, row: &RowRender, width: usize) -> Line<'static> {
    let number = format!("{:>2}. ", position + 1);
    let badge = row
        .item_type
        .as_deref()
        .filter(|kind| !kind.is_empty())
        .map(|kind| format!(" [{kind}]"))
        .unwrap_or_default();
    let reserved = UnicodeWidthStr::width(number.as_str())
        + UnicodeWidthStr::width(badge.as_str())
        + ACTION_COLUMN_WIDTH;
    let summary = truncate(&row.summary, width.saturating_sub(reserved).max(4));

    let summary_style = if row.editing {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(Color::White)
    };
    let mut spans = vec![
        Span::styled(number, Style::default().fg(Color::DarkGray)),
        Span::styled(summary, summary_style),
        Span::styled(badge, Style::default().fg(Color::Cyan)),
        Span::raw("  "),
    ];
    spans.extend(action_spans(row.actions));
    Line::from(spans)
}

fn action_spans(actions: RowActions) -> Vec<Span<'static>> {
    [
        ("↑", actions.move_up),
        ("↓", actions.move_down),
        ("e", actions.edit),
        ("d", actions.delete),
    ]
    .into_iter()
    .map(|(glyph, enabled)| {
        let style = if enabled {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!("{glyph} "), style)
    })
    .collect()
}

/// First wrapped line of `text`, with an ellipsis when anything was cut.
fn truncate(text: &str, width: usize) -> String {
    let lines = wrap(text, width);
    match lines.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [first, ..] => format!("{first}…"),
    }
}
