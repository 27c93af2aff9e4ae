// src/editor/buffer.rs
//! Single-line editable text used by the form screens.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    content: String,
    /// Cursor position in characters, `0..=len`.
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        InputBuffer::default()
    }

    pub fn from_text(text: &str) -> Self {
        InputBuffer { content: text.to_string(), cursor: text.chars().count() }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        // Single line: newlines and tabs become spaces.
        let ch = if ch.is_control() { ' ' } else { ch };
        let pos = self.byte_offset(self.cursor);
        self.content.insert(pos, ch);
        self.cursor += 1;
    }

    /// Backspace: removes the character before the cursor.
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let pos = self.byte_offset(self.cursor - 1);
        self.content.remove(pos);
        self.cursor -= 1;
    }

    /// Delete: removes the character under the cursor.
    pub fn delete_forward(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let pos = self.byte_offset(self.cursor);
        self.content.remove(pos);
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let new_pos = (self.cursor as i64 + delta as i64).max(0) as usize;
        self.cursor = new_pos.min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }
}
