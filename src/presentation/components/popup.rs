use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};
use unicode_width::UnicodeWidthStr;

use super::super::view::PickerRender;
use super::layout::popup_rect;

const MIN_WIDTH: usize = 24;

pub fn render_popup(frame: &mut Frame<'_>, picker: PickerRender<'_>) {
    let title = format!("{} · filter: {}", picker.title, picker.filter);
    let max_width = picker
        .options
        .iter()
        .map(|option| UnicodeWidthStr::width(*option))
        .chain([UnicodeWidthStr::width(title.as_str()), MIN_WIDTH])
        .max()
        .unwrap_or(MIN_WIDTH) as u16;
    let width_limit = frame.area().width.saturating_sub(2).max(1);
    let width = max_width.saturating_add(6).min(width_limit);
    let height = picker
        .options
        .len()
        .max(1)
        .saturating_add(2)
        .min(frame.area().height.saturating_sub(2) as usize) as u16;
    let area = popup_rect(frame.area(), width, height.max(3));
    frame.render_widget(Clear, area);

    let block = Block::default().title(title).borders(Borders::ALL);
    if picker.options.is_empty() {
        let empty = List::new([ListItem::new(Line::styled(
            "No matches",
            Style::default().fg(Color::DarkGray),
        ))])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items = picker
        .options
        .iter()
        .map(|option| ListItem::new(option.to_string()))
        .collect::<Vec<_>>();
    let mut state = ListState::default();
    state.select(Some(picker.selected.min(picker.options.len() - 1)));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut state);
}
