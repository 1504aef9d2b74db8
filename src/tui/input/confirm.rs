use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

/// Delete confirmation
pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('y')) | (_, KeyCode::Enter) => app.confirm_delete(),
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => app.close_modal(),
        _ => {}
    }
}

/// Detail modal
pub(super) fn handle_view(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('e')) => app.begin_edit(),
        (KeyModifiers::NONE, KeyCode::Char(' ' | 'x')) => app.toggle_selected(),
        (KeyModifiers::NONE, KeyCode::Char('d')) => {
            app.close_modal();
            app.begin_delete();
        }
        (_, KeyCode::Esc | KeyCode::Enter)
        | (KeyModifiers::NONE, KeyCode::Char('q' | 'v')) => app.close_modal(),
        _ => {}
    }
}
