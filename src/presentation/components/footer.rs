use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::super::view::{StatusTone, UiContext};

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    if let Some(help) = ctx.help {
        let keys = Paragraph::new(format!("Keys: {help}"))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(keys, rows[0]);
    }

    frame.render_widget(
        Paragraph::new(status_line(ctx)).wrap(Wrap { trim: true }),
        rows[1],
    );
}

fn status_line<'a>(ctx: &UiContext<'a>) -> Line<'a> {
    let message = if ctx.status_message.trim().is_empty() {
        "Ready"
    } else {
        ctx.status_message
    };
    let tone = match ctx.status_tone {
        StatusTone::Info => Style::default(),
        StatusTone::Success => Style::default().fg(Color::Green),
        StatusTone::Warning => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    };
    let count = match ctx.rows.len() {
        1 => "[1 entry]".to_string(),
        n => format!("[{n} entries]"),
    };
    Line::from(vec![
        Span::styled(count, Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(message, tone),
    ])
}
