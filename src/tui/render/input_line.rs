use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

const PLACEHOLDER: &str = "What needs to be done?";
const PROMPT: &str = " > ";

/// Render the new-item input line. Places the terminal cursor when focused.
pub fn render_input_line(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.mode == Mode::Input;
    let prompt_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };

    let mut spans = vec![Span::styled(
        PROMPT,
        Style::default().fg(prompt_color).bg(bg),
    )];
    let available = (area.width as usize).saturating_sub(PROMPT.len());

    // Scroll horizontally so the cursor stays on screen
    let text = app.input.text();
    let cursor_col = app.input.cursor_col();
    let skip_cols = cursor_col.saturating_sub(available.saturating_sub(1));

    if text.is_empty() {
        spans.push(Span::styled(
            PLACEHOLDER,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        let visible = skip_to_col(text, skip_cols);
        spans.push(Span::styled(
            unicode::truncate_to_width(visible, available),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }

    let row = Rect { height: 1, ..area };
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        row,
    );

    if focused {
        let x = area.x + (PROMPT.len() + cursor_col - skip_cols) as u16;
        frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
    }
}

/// Suffix of `s` starting at the first grapheme at or after display column `col`
fn skip_to_col(s: &str, col: usize) -> &str {
    if col == 0 {
        return s;
    }
    let mut offset = 0;
    while unicode::display_col(s, offset) < col {
        match unicode::next_grapheme_boundary(s, offset) {
            Some(next) => offset = next,
            None => break,
        }
    }
    &s[offset..]
}
