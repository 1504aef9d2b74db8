use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, StatusKind};

/// Render the status row (bottom of screen): the pending message if any,
/// otherwise key hints for the current mode
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match &app.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => app.theme.text,
                StatusKind::Warning => app.theme.yellow,
                StatusKind::Error => app.theme.red,
            };
            Line::from(Span::styled(
                format!(" {}", status.text),
                Style::default().fg(color).bg(bg),
            ))
        }
        None => {
            let hint = mode_hint(app.mode);
            let hint_width = hint.chars().count();
            let mut spans = Vec::new();
            if hint_width < width {
                spans.push(Span::styled(
                    " ".repeat(width - hint_width),
                    Style::default().bg(bg),
                ));
            }
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn mode_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Input => "Enter add  Esc list ",
        Mode::Navigate => "a add  Space toggle  e edit  d delete  1-3 filter  q quit ",
        Mode::Edit | Mode::Confirm | Mode::View => "",
    }
}
