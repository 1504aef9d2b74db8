use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::{date, unicode};

const MODAL_W: u16 = 56;

/// Detail modal for the item being viewed
pub fn render_view_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(item) = app.viewing.and_then(|id| app.store.get(id).ok()) else {
        return;
    };
    let popup_w = MODAL_W.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let styles = ModalStyles::new(app);

    let mut styled_lines: Vec<(String, Style)> = Vec::new();
    styled_lines.push((" Todo Details".into(), styles.header));
    styled_lines.push(("".into(), styles.text));
    for s in wrap_text(" ", &item.text, inner_w) {
        styled_lines.push((s, styles.bright));
    }
    styled_lines.push(("".into(), styles.text));
    let status_style = if item.completed {
        styles.text.fg(app.theme.green)
    } else {
        styles.text.fg(app.theme.yellow)
    };
    styled_lines.push((format!(" Status: {}", item.status_label()), status_style));
    styled_lines.push((
        format!(" Created: {}", date::format_local(&item.created_at)),
        styles.text,
    ));
    styled_lines.push(("".into(), styles.text));
    styled_lines.push((" e edit  Space toggle  d delete  Esc close".into(), styles.dim));

    draw_popup(frame, app, area, popup_w, styled_lines);
}

/// Edit modal with a live character count. Places the terminal cursor.
pub fn render_edit_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(edit) = &app.edit else {
        return;
    };
    let popup_w = MODAL_W.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let styles = ModalStyles::new(app);

    // One-line field, scrolled to keep the cursor in view
    let field_w = inner_w.saturating_sub(2);
    let text = edit.input.text();
    let cursor_col = edit.input.cursor_col();
    let skip = cursor_col.saturating_sub(field_w.saturating_sub(1));
    let shown: String = text
        .chars()
        .scan(0usize, |col, c| {
            let start = *col;
            *col += unicode::display_width(c.encode_utf8(&mut [0; 4]));
            Some((start, c))
        })
        .filter(|(start, _)| *start >= skip)
        .map(|(_, c)| c)
        .collect();

    let max = app.store.max_text_len();
    let count = edit.input.char_count();
    let count_text = if max == 0 {
        format!(" {} characters", count)
    } else {
        format!(" {} / {} characters", count, max)
    };
    let count_style = if max != 0 && count > max {
        styles.text.fg(app.theme.red)
    } else {
        styles.dim
    };

    let styled_lines: Vec<(String, Style)> = vec![
        (" Edit Todo".into(), styles.header),
        ("".into(), styles.text),
        (
            format!(" {}", unicode::truncate_to_width(&shown, field_w)),
            styles.bright.add_modifier(Modifier::UNDERLINED),
        ),
        (count_text, count_style),
        ("".into(), styles.text),
        (" Enter save  Esc cancel".into(), styles.dim),
    ];

    let popup = draw_popup(frame, app, area, popup_w, styled_lines);

    // Field is on the third content row, after the border and a leading space
    let x = popup.x + 2 + (cursor_col - skip) as u16;
    let y = popup.y + 3;
    if x < popup.right() && y < popup.bottom() {
        frame.set_cursor_position(Position::new(x, y));
    }
}

/// Delete confirmation modal
pub fn render_delete_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(item) = app.pending_delete.and_then(|id| app.store.get(id).ok()) else {
        return;
    };
    let popup_w = 48.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let styles = ModalStyles::new(app);

    let mut styled_lines: Vec<(String, Style)> = Vec::new();
    styled_lines.push((" Delete Todo".into(), styles.header));
    styled_lines.push(("".into(), styles.text));
    for s in wrap_text(" ", "Are you sure you want to delete this todo?", inner_w) {
        styled_lines.push((s, styles.text));
    }
    styled_lines.push(("".into(), styles.text));
    let quoted = format!("\u{201c}{}\u{201d}", item.text);
    for s in wrap_text("   ", &quoted, inner_w) {
        styled_lines.push((s, styles.bright));
    }
    styled_lines.push(("".into(), styles.text));
    styled_lines.push((" y delete  n cancel".into(), styles.dim));

    draw_popup(frame, app, area, popup_w, styled_lines);
}

struct ModalStyles {
    header: Style,
    text: Style,
    bright: Style,
    dim: Style,
}

impl ModalStyles {
    fn new(app: &App) -> Self {
        let bg = app.theme.background;
        ModalStyles {
            header: Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
            text: Style::default().fg(app.theme.text).bg(bg),
            bright: Style::default().fg(app.theme.text_bright).bg(bg),
            dim: Style::default().fg(app.theme.dim).bg(bg),
        }
    }
}

/// Draw a bordered popup sized to its content, centered in `area`.
/// Returns the popup rect.
fn draw_popup(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    popup_w: u16,
    styled_lines: Vec<(String, Style)>,
) -> Rect {
    let bg = app.theme.background;

    // Height from content + 2 for borders
    let popup_h = ((styled_lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let lines: Vec<Line> = styled_lines
        .into_iter()
        .map(|(text, style)| Line::from(Span::styled(text, style)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
    overlay_area
}

/// Word-wrap `text` into lines of at most `max_width` cells.
/// Every line (including the first) is prefixed with `indent`.
/// Words wider than a line are split.
fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    let indent_len = unicode::display_width(indent);
    let room = max_width.saturating_sub(indent_len).max(1);
    let mut lines = Vec::new();
    let mut current = indent.to_string();
    let mut current_w = indent_len;

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        loop {
            let word_w = unicode::display_width(&word);
            let space = if current_w == indent_len { 0 } else { 1 };
            if current_w + space + word_w <= max_width {
                if space == 1 {
                    current.push(' ');
                }
                current.push_str(&word);
                current_w += space + word_w;
                break;
            }
            if current_w > indent_len {
                lines.push(std::mem::replace(&mut current, indent.to_string()));
                current_w = indent_len;
                continue;
            }
            // Word alone is too wide: split at the line width
            let head = split_at_width(&word, room);
            current.push_str(&word[..head]);
            lines.push(std::mem::replace(&mut current, indent.to_string()));
            word = word[head..].to_string();
            if word.is_empty() {
                break;
            }
        }
    }
    if current_w > indent_len || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Byte offset of the longest grapheme prefix of `s` fitting in `cells`
/// (at least one grapheme).
fn split_at_width(s: &str, cells: usize) -> usize {
    let mut offset = 0;
    while let Some(next) = unicode::next_grapheme_boundary(s, offset) {
        if offset > 0 && unicode::display_width(&s[..next]) > cells {
            break;
        }
        offset = next;
    }
    offset
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
