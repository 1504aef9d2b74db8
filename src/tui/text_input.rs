use crate::util::unicode;

/// A single-line text buffer with a grapheme-aware cursor (byte offset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    buffer: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-filled with `text`, cursor at the end
    pub fn with_text(text: &str) -> Self {
        TextInput {
            buffer: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Length in characters, as shown next to the edit field
    pub fn char_count(&self) -> usize {
        unicode::grapheme_count(&self.buffer)
    }

    /// Display column of the cursor
    pub fn cursor_col(&self) -> usize {
        unicode::display_col(&self.buffer, self.cursor)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text; line breaks become spaces.
    pub fn insert_str(&mut self, s: &str) {
        let clean = s.replace("\r\n", " ").replace(['\n', '\r'], " ");
        self.buffer.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    pub fn delete_word_left(&mut self) {
        let start = unicode::word_boundary_left(&self.buffer, self.cursor);
        self.buffer.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_cursor_movement() {
        let mut input = TextInput::new();
        for c in "milk".chars() {
            input.insert_char(c);
        }
        input.move_home();
        input.insert_str("Buy ");
        assert_eq!(input.text(), "Buy milk");
        assert_eq!(input.cursor(), 4);

        input.move_end();
        input.backspace();
        assert_eq!(input.text(), "Buy mil");
        input.move_left();
        input.delete();
        assert_eq!(input.text(), "Buy mi");
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut input = TextInput::with_text("cafe\u{0301}");
        input.backspace();
        assert_eq!(input.text(), "caf");
        assert_eq!(input.char_count(), 3);
    }

    #[test]
    fn edges_are_no_ops() {
        let mut input = TextInput::new();
        input.backspace();
        input.delete();
        input.move_left();
        input.move_right();
        assert_eq!(input, TextInput::new());
    }

    #[test]
    fn paste_flattens_newlines() {
        let mut input = TextInput::new();
        input.insert_str("Buy\nmilk\r\nnow");
        assert_eq!(input.text(), "Buy milk now");
        assert_eq!(input.cursor(), input.text().len());
    }

    #[test]
    fn delete_word_and_clear() {
        let mut input = TextInput::with_text("Buy oat milk");
        input.delete_word_left();
        assert_eq!(input.text(), "Buy oat ");
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn cursor_col_counts_cells() {
        let input = TextInput::with_text("日本");
        assert_eq!(input.cursor_col(), 4);
    }
}
