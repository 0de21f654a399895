//! UTF-8 safe single-line edit buffer with cursor management.
//!
//! The bound input keeps its raw, untransformed text here. Filtering and
//! commits happen one layer up; this type only knows how to edit text.

use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInputState {
    /// The underlying text buffer
    input: String,
    /// Cursor byte index into `input` (always on a UTF-8 boundary)
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
        }
    }

    // ----- Getters -----
    pub fn input(&self) -> &str {
        &self.input
    }
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Display width of the text left of the cursor.
    pub fn cursor_columns(&self) -> usize {
        self.input[..self.cursor].width()
    }

    // ----- Setters -----

    /// Replace the buffer and park the cursor at the end.
    pub fn set_input<S: Into<String>>(&mut self, s: S) {
        self.input = s.into();
        self.cursor = self.input.len();
    }

    /// Move the cursor to `cursor`, clamped to the buffer and snapped back to a char boundary.
    pub fn set_cursor(&mut self, cursor: usize) {
        let mut cursor = cursor.min(self.input.len());
        while !self.input.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    // ----- Editing primitives (UTF-8 safe) -----

    /// Move cursor one Unicode scalar to the left.
    pub fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev_len = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        self.cursor = self.cursor.saturating_sub(prev_len);
    }

    /// Move cursor one Unicode scalar to the right.
    pub fn move_right(&mut self) {
        if self.cursor >= self.input.len() {
            return;
        }
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor = self.cursor.saturating_add(next.len_utf8());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    /// Insert a char at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a string at the cursor, leaving the cursor after it.
    pub fn insert_str(&mut self, s: &str) {
        self.input.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Backspace the char immediately before the cursor. Returns whether anything was removed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        let start = self.cursor - prev;
        self.input.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    /// Delete the char under the cursor. Returns whether anything was removed.
    pub fn delete(&mut self) -> bool {
        let Some(next) = self.input[self.cursor..].chars().next() else {
            return false;
        };
        let end = self.cursor + next.len_utf8();
        self.input.drain(self.cursor..end);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_move_insert_backspace() {
        let mut st = TextInputState::new();
        st.set_input("h🙂llo"); // emoji is 4 bytes
        st.set_cursor(1); // between h and 🙂
        st.insert_char('e');
        assert_eq!(st.input(), "he🙂llo");
        st.move_right(); // step over 🙂
        assert!(st.backspace()); // delete 🙂
        assert_eq!(st.input(), "hello");
        st.move_left();
        st.backspace();
        assert_eq!(st.input(), "ello");
    }

    #[test]
    fn set_cursor_snaps_to_char_boundary() {
        let mut st = TextInputState::new();
        st.set_input("a🙂b");
        st.set_cursor(3); // inside the emoji
        assert_eq!(st.cursor(), 1);
        st.set_cursor(99);
        assert_eq!(st.cursor(), st.input().len());
    }

    #[test]
    fn delete_and_insert_str_at_cursor() {
        let mut st = TextInputState::new();
        st.set_input("abc");
        st.move_home();
        assert!(st.delete());
        assert_eq!(st.input(), "bc");
        st.insert_str("xy");
        assert_eq!(st.input(), "xybc");
        assert_eq!(st.cursor(), 2);
        st.move_end();
        assert!(!st.delete());
        assert!(!TextInputState::new().backspace());
    }

    #[test]
    fn cursor_columns_counts_wide_chars() {
        let mut st = TextInputState::new();
        st.set_input("a中b");
        st.set_cursor(4); // after the CJK char
        assert_eq!(st.cursor_columns(), 3);
    }
}
