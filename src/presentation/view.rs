use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::controller::RowActions;

use super::components::{render_draft, render_footer, render_list, render_popup};

pub struct UiContext<'a> {
    pub title: &'a str,
    pub rows: &'a [RowRender],
    pub selected: Option<usize>,
    pub list_focused: bool,
    pub draft: DraftRender<'a>,
    pub status_message: &'a str,
    pub status_tone: StatusTone,
    pub help: Option<&'a str>,
    pub picker: Option<PickerRender<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Warning,
}

/// One committed entry as shown in the list.
pub struct RowRender {
    pub summary: String,
    pub item_type: Option<String>,
    pub actions: RowActions,
    pub editing: bool,
}

pub struct DraftRender<'a> {
    pub heading: String,
    pub fields: &'a [FieldRender],
    /// Focused field, when keyboard focus is on the draft.
    pub cursor: Option<usize>,
}

pub struct FieldRender {
    pub label: String,
    pub value: String,
    pub placeholder: bool,
    pub error: Option<String>,
    pub choice: bool,
}

pub struct PickerRender<'a> {
    pub title: &'a str,
    pub filter: &'a str,
    pub options: Vec<&'a str>,
    pub selected: usize,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let draft_height = (ctx.draft.fields.len() as u16).saturating_add(3);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(draft_height),
            Constraint::Length(4),
        ])
        .split(frame.area());

    render_list(frame, chunks[0], &ctx);
    render_draft(frame, chunks[1], &ctx.draft, ctx.picker.is_none());
    render_footer(frame, chunks[2], &ctx);

    if let Some(picker) = ctx.picker {
        render_popup(frame, picker);
    }
}
