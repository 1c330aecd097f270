use std::cmp;
use unicode_width::UnicodeWidthChar;

fn cell_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// A single edit to the pending input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    WordLeft,
    WordRight,
    Clear,
}

/// Single-line text buffer with a character cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    chars: Vec<char>,
    cursor_col: usize,
    scroll_col: usize, // Index of the first visible char when the line is wider than the field
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, edit: InputEdit) {
        match edit {
            InputEdit::Insert(ch) => self.insert_char(ch),
            InputEdit::Backspace => self.delete_char(),
            InputEdit::Delete => self.delete_char_forward(),
            InputEdit::Left => self.move_cursor_left(),
            InputEdit::Right => self.move_cursor_right(),
            InputEdit::Home => self.cursor_col = 0,
            InputEdit::End => self.cursor_col = self.chars.len(),
            InputEdit::WordLeft => self.move_cursor_word_left(),
            InputEdit::WordRight => self.move_cursor_word_right(),
            InputEdit::Clear => self.clear(),
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' || ch == '\r' {
            return;
        }
        let col = cmp::min(self.cursor_col, self.chars.len());
        self.chars.insert(col, ch);
        self.cursor_col = col + 1;
    }

    pub fn delete_char(&mut self) {
        let col = cmp::min(self.cursor_col, self.chars.len());
        if col > 0 {
            self.chars.remove(col - 1);
            self.cursor_col = col - 1;
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_col < self.chars.len() {
            self.chars.remove(self.cursor_col);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_col < self.chars.len() {
            self.cursor_col += 1;
        }
    }

    /// Jump to the start of the current or previous word
    pub fn move_cursor_word_left(&mut self) {
        let mut col = self.cursor_col;
        while col > 0 && self.chars[col - 1].is_whitespace() {
            col -= 1;
        }
        while col > 0 && !self.chars[col - 1].is_whitespace() {
            col -= 1;
        }
        self.cursor_col = col;
    }

    /// Jump past the end of the current or next word
    pub fn move_cursor_word_right(&mut self) {
        let len = self.chars.len();
        let mut col = self.cursor_col;
        while col < len && self.chars[col].is_whitespace() {
            col += 1;
        }
        while col < len && !self.chars[col].is_whitespace() {
            col += 1;
        }
        self.cursor_col = col;
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor_col = 0;
        self.scroll_col = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    /// Terminal cells taken by `chars[start..end]`
    fn width_between(&self, start: usize, end: usize) -> usize {
        self.chars[start..end].iter().map(|c| cell_width(*c)).sum()
    }

    /// Keep the cursor inside a field `viewport_width` cells wide.
    /// The scroll offset is a char index; widths are summed per char.
    pub fn update_horizontal_scroll(&mut self, viewport_width: usize) {
        let cursor = cmp::min(self.cursor_col, self.chars.len());
        if viewport_width == 0 {
            self.scroll_col = cursor;
            return;
        }
        if cursor < self.scroll_col {
            self.scroll_col = cursor;
            return;
        }
        // Past the end the cursor still needs one cell
        let cursor_cells = self.chars.get(cursor).map_or(1, |c| cell_width(*c).max(1));
        while self.scroll_col < cursor
            && self.width_between(self.scroll_col, cursor) + cursor_cells > viewport_width
        {
            self.scroll_col += 1;
        }
    }

    /// Visible slice of the line and the cursor's cell offset within it
    pub fn visible(&self, viewport_width: usize) -> (String, usize) {
        let start = cmp::min(self.scroll_col, self.chars.len());
        let mut text = String::new();
        let mut used = 0;
        for ch in &self.chars[start..] {
            let w = cell_width(*ch);
            if used + w > viewport_width {
                break;
            }
            text.push(*ch);
            used += w;
        }
        let cursor = cmp::min(self.cursor_col, self.chars.len());
        (text, self.width_between(start, cmp::max(start, cursor)))
    }
}
