use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::item::Filter;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => app.should_quit = true,

        // Focus the input line
        (KeyModifiers::NONE, KeyCode::Char('a' | 'i' | '/')) => app.mode = Mode::Input,

        // Movement
        (_, KeyCode::Char('j') | KeyCode::Down) => app.move_cursor(1),
        (_, KeyCode::Char('k')) => app.move_cursor(-1),
        (_, KeyCode::Up) => {
            // Up from the top row goes back to the input line
            if app.cursor == 0 {
                app.mode = Mode::Input;
            } else {
                app.move_cursor(-1);
            }
        }
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => app.cursor_to_end(),
        (_, KeyCode::PageDown) => app.move_cursor(10),
        (_, KeyCode::PageUp) => app.move_cursor(-10),

        // Item actions
        (_, KeyCode::Char(' ' | 'x')) => app.toggle_selected(),
        (KeyModifiers::NONE, KeyCode::Char('e')) => app.begin_edit(),
        (_, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char('v')) => app.open_view(),
        (KeyModifiers::NONE, KeyCode::Char('d')) | (_, KeyCode::Delete) => app.begin_delete(),

        // Filters
        (_, KeyCode::Char('1')) => app.set_filter(Filter::All),
        (_, KeyCode::Char('2')) => app.set_filter(Filter::Active),
        (_, KeyCode::Char('3')) => app.set_filter(Filter::Completed),
        (_, KeyCode::Tab) => app.set_filter(app.filter.next()),
        (_, KeyCode::BackTab) => app.set_filter(app.filter.next().next()),

        _ => {}
    }
}
