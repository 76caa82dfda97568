//! Line buffer and cursor operations

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// Cursor position in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }
}

/// Multi-line text buffer with a cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEditor {
    lines: Vec<String>,
    current_line: usize,
    cursor_column: usize,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `column`-th char, or the end of the string
fn byte_index(s: &str, column: usize) -> usize {
    s.char_indices().nth(column).map(|(i, _)| i).unwrap_or(s.len())
}

impl LineEditor {
    /// Creates a buffer with one empty line
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            current_line: 0,
            cursor_column: 0,
        }
    }

    /// Creates a buffer from text; lines split on `\n`
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(String::from).collect(),
            current_line: 0,
            cursor_column: 0,
        }
    }

    /// Empties the buffer
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|s| s.as_str())
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn cursor_column(&self) -> usize {
        self.cursor_column
    }

    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.current_line, self.cursor_column)
    }

    /// Length in chars of the given line, 0 if out of range
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map(|s| char_len(s)).unwrap_or(0)
    }

    fn current_len(&self) -> usize {
        self.line_len(self.current_line)
    }

    /// Buffer content joined with `\n`
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns true if the cursor is inside the buffer
    pub fn is_valid(&self) -> bool {
        self.current_line < self.lines.len() && self.cursor_column <= self.current_len()
    }

    pub fn move_up(&mut self) {
        if self.current_line > 0 {
            self.current_line -= 1;
            self.cursor_column = self.cursor_column.min(self.current_len());
        }
    }

    pub fn move_down(&mut self) {
        if self.current_line + 1 < self.lines.len() {
            self.current_line += 1;
            self.cursor_column = self.cursor_column.min(self.current_len());
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_column = self.cursor_column.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor_column < self.current_len() {
            self.cursor_column += 1;
        }
    }

    /// Inserts `c` at the cursor and advances
    pub fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.current_line];
        let at = byte_index(line, self.cursor_column);
        line.insert(at, c);
        self.cursor_column += 1;
    }

    /// Splits the current line at the cursor (Enter)
    pub fn split_line(&mut self) {
        let line = &mut self.lines[self.current_line];
        let at = byte_index(line, self.cursor_column);
        let rest = line.split_off(at);
        self.lines.insert(self.current_line + 1, rest);
        self.current_line += 1;
        self.cursor_column = 0;
    }

    /// Deletes before the cursor, joining onto the previous line at column 0
    pub fn backspace(&mut self) {
        if self.cursor_column > 0 {
            let line = &mut self.lines[self.current_line];
            let at = byte_index(line, self.cursor_column - 1);
            line.remove(at);
            self.cursor_column -= 1;
        } else if self.current_line > 0 {
            let removed = self.lines.remove(self.current_line);
            self.current_line -= 1;
            let previous = &mut self.lines[self.current_line];
            self.cursor_column = char_len(previous);
            previous.push_str(&removed);
        }
    }

    /// Deletes at the cursor, joining the next line at end of line
    pub fn delete(&mut self) {
        if self.cursor_column < self.current_len() {
            let line = &mut self.lines[self.current_line];
            let at = byte_index(line, self.cursor_column);
            line.remove(at);
        } else if self.current_line + 1 < self.lines.len() {
            let next = self.lines.remove(self.current_line + 1);
            self.lines[self.current_line].push_str(&next);
        }
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn typed(text: &str) -> LineEditor {
        let mut editor = LineEditor::new();
        for c in text.chars() {
            if c == '\n' {
                editor.split_line();
            } else {
                editor.insert_char(c);
            }
        }
        editor
    }

    #[test]
    fn test_new_is_single_empty_line() {
        let editor = LineEditor::new();
        assert_eq!(editor.line_count(), 1);
        assert_eq!(editor.cursor(), Cursor::new(0, 0));
        assert_eq!(editor.content(), "");
    }

    #[test]
    fn test_insert_advances_cursor() {
        let editor = typed("abc");
        assert_eq!(editor.line(0), Some("abc"));
        assert_eq!(editor.cursor_column(), 3);
    }

    #[test]
    fn test_insert_mid_line() {
        let mut editor = typed("ac");
        editor.move_left();
        editor.insert_char('b');
        assert_eq!(editor.line(0), Some("abc"));
        assert_eq!(editor.cursor_column(), 2);
    }

    #[test]
    fn test_split_line_moves_remainder() {
        let mut editor = typed("hello world");
        for _ in 0..6 {
            editor.move_left();
        }
        editor.split_line();
        assert_eq!(editor.lines(), &["hello".to_string(), " world".to_string()]);
        assert_eq!(editor.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut editor = typed("ab\ncd");
        editor.move_left();
        editor.move_left();
        editor.backspace();
        assert_eq!(editor.lines(), &["abcd".to_string()]);
        assert_eq!(editor.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_backspace_at_origin_is_noop() {
        let mut editor = LineEditor::new();
        editor.backspace();
        assert_eq!(editor, LineEditor::new());
    }

    #[test]
    fn test_delete_joins_next_line() {
        let mut editor = typed("ab\ncd");
        editor.move_up();
        assert_eq!(editor.cursor(), Cursor::new(0, 2));
        editor.delete();
        assert_eq!(editor.lines(), &["abcd".to_string()]);
        assert_eq!(editor.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_delete_within_line() {
        let mut editor = typed("abc");
        editor.move_left();
        editor.move_left();
        editor.delete();
        assert_eq!(editor.line(0), Some("ac"));
        assert_eq!(editor.cursor_column(), 1);
    }

    #[test]
    fn test_delete_at_end_of_buffer_is_noop() {
        let mut editor = typed("x");
        editor.delete();
        assert_eq!(editor.content(), "x");
    }

    #[test]
    fn test_vertical_move_clamps_column() {
        let mut editor = typed("long line\nab");
        editor.move_up();
        assert_eq!(editor.cursor(), Cursor::new(0, 2));
        editor.move_right();
        editor.move_right();
        editor.move_down();
        assert_eq!(editor.cursor(), Cursor::new(1, 2));
    }

    #[test]
    fn test_horizontal_moves_stay_on_line() {
        let mut editor = typed("ab\ncd");
        editor.move_right();
        assert_eq!(editor.cursor(), Cursor::new(1, 2));
        for _ in 0..5 {
            editor.move_left();
        }
        assert_eq!(editor.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn test_multibyte_chars() {
        let mut editor = typed("né─x");
        assert_eq!(editor.cursor_column(), 4);
        editor.move_left();
        editor.backspace();
        assert_eq!(editor.line(0), Some("néx"));
        editor.move_left();
        editor.delete();
        assert_eq!(editor.line(0), Some("nx"));
        assert!(editor.is_valid());
    }

    #[test]
    fn test_from_text_and_content() {
        let editor = LineEditor::from_text("a\n\nb");
        assert_eq!(editor.line_count(), 3);
        assert_eq!(editor.content(), "a\n\nb");
        assert_eq!(editor.cursor(), Cursor::zero());
    }
}
