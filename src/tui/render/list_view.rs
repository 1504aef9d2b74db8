use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::item::{Filter, Item};
use crate::tui::app::{App, Mode};
use crate::util::{date, unicode};

/// Width of the date column on the right of each row
const DATE_W: usize = 10;

/// Render the filtered list, scrolling so the cursor row stays visible
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let height = area.height as usize;

    let len = app.visible_items().len();
    if len == 0 {
        let message = match app.filter {
            Filter::All => " No todos yet. Type one above and press Enter.",
            Filter::Active => " No active todos.",
            Filter::Completed => " No completed todos.",
        };
        let para = Paragraph::new(Span::styled(
            message,
            Style::default().fg(app.theme.dim).bg(bg),
        ))
        .style(Style::default().bg(bg));
        frame.render_widget(para, area);
        return;
    }

    adjust_scroll(app, height);
    let app: &App = app;

    // The cursor is only drawn while the list has focus or a modal is open over it
    let show_cursor = app.mode != Mode::Input;
    let width = area.width as usize;
    let lines: Vec<Line> = app
        .visible_items()
        .into_iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(i, item)| render_row(app, item, show_cursor && i == app.cursor, width))
        .collect();

    let para = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(para, area);
}

fn adjust_scroll(app: &mut App, height: usize) {
    if height == 0 {
        return;
    }
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }
}

fn render_row<'a>(app: &App, item: &Item, is_cursor: bool, width: usize) -> Line<'a> {
    let row_bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let base = Style::default().bg(row_bg);

    let marker = if is_cursor { "\u{258E}" } else { " " };
    let check = if item.completed { "[x] " } else { "[ ] " };
    let check_color = if item.completed {
        app.theme.green
    } else {
        app.theme.dim
    };

    let mut text_style = base.fg(app.theme.item_color(item.completed));
    if item.completed {
        text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
    } else if is_cursor {
        text_style = text_style.fg(app.theme.text_bright);
    }

    // marker + checkbox + text + gap + date + right margin
    let fixed = 1 + check.len() + 2 + DATE_W + 1;
    let show_date = width > fixed + 8;
    let text_w = if show_date {
        width - fixed
    } else {
        width.saturating_sub(1 + check.len())
    };
    let text = unicode::truncate_to_width(&item.text, text_w);
    let text_cells = unicode::display_width(&text);

    let mut spans = vec![
        Span::styled(marker, base.fg(app.theme.highlight)),
        Span::styled(check, base.fg(check_color)),
        Span::styled(text, text_style),
    ];
    if show_date {
        let pad = text_w - text_cells + 2;
        spans.push(Span::styled(" ".repeat(pad), base));
        spans.push(Span::styled(
            date::format_short(&item.created_at),
            base.fg(app.theme.dim),
        ));
        spans.push(Span::styled(" ", base));
    } else {
        let pad = width.saturating_sub(1 + check.len() + text_cells);
        spans.push(Span::styled(" ".repeat(pad), base));
    }
    Line::from(spans)
}
