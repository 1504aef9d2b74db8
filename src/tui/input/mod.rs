mod confirm;
mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use confirm::{handle_confirm, handle_view};
use edit::{handle_edit, handle_input_line};
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    // Ctrl+C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    // Status messages last until the next key press
    app.status = None;

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Input => handle_input_line(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Confirm => handle_confirm(app, key),
        Mode::View => handle_view(app, key),
    }
}

/// Handle a bracketed paste. Only the input line and the edit modal take
/// text; line breaks become spaces.
pub fn handle_paste(app: &mut App, text: &str) {
    match app.mode {
        Mode::Input => app.input.insert_str(text),
        Mode::Edit => {
            if let Some(edit) = &mut app.edit {
                edit.input.insert_str(text);
            }
        }
        _ => {}
    }
}
