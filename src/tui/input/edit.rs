use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::tui::text_input::TextInput;

/// Apply a text-editing key to `input`. Returns false when the key is not
/// an editing key.
pub(super) fn edit_text(input: &mut TextInput, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('a') if ctrl => input.move_home(),
        KeyCode::Char('e') if ctrl => input.move_end(),
        KeyCode::Char('w') if ctrl => input.delete_word_left(),
        KeyCode::Char('u') if ctrl => input.clear(),
        KeyCode::Char(_) if ctrl => return false,
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace if key.modifiers.contains(KeyModifiers::ALT) => {
            input.delete_word_left()
        }
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}

/// The new-item input line
pub(super) fn handle_input_line(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc | KeyCode::Down | KeyCode::Tab => {
            app.mode = Mode::Navigate;
            app.clamp_cursor();
        }
        _ => {
            edit_text(&mut app.input, key);
        }
    }
}

/// The edit modal
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.save_edit(),
        KeyCode::Esc => app.close_modal(),
        _ => {
            if let Some(edit) = &mut app.edit {
                edit_text(&mut edit.input, key);
            }
        }
    }
}
