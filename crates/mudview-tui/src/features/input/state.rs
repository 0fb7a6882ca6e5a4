//! Input line state: the edit buffer, cursor and command history.

use anyhow::Result;
use mudview_core::{CommandHistory, CommandSink, submit_command};

#[derive(Debug, Default)]
pub struct InputState {
    buffer: String,
    /// Cursor position in characters (not bytes).
    cursor: usize,
    pub history: CommandHistory,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
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

    fn byte_index(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, ch);
        self.cursor += 1;
    }

    /// Inserts pasted text; line breaks become spaces.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\r' => {}
                '\n' | '\t' => self.insert_char(' '),
                c if c.is_control() => {}
                c => self.insert_char(c),
            }
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.buffer.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.buffer.remove(at);
        }
    }

    /// Deletes the word before the cursor (Ctrl+W).
    pub fn delete_word_back(&mut self) {
        let chars: Vec<char> = self.buffer.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let from = self.byte_index(start);
        let to = self.byte_index(self.cursor);
        self.buffer.replace_range(from..to, "");
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Replaces the buffer, placing the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.char_len();
    }

    /// Submits the buffer to `sink`. See [`submit_command`].
    pub fn submit<S: CommandSink + ?Sized>(&mut self, sink: &mut S) -> Result<Option<String>> {
        let sent = submit_command(&mut self.buffer, sink)?;
        if sent.is_some() {
            self.cursor = 0;
        }
        Ok(sent)
    }

    /// Replaces the buffer with the previous history entry, if any.
    pub fn recall_older(&mut self) {
        if let Some(text) = self.history.older(&self.buffer) {
            let text = text.to_string();
            self.set_text(&text);
        }
    }

    /// Replaces the buffer with the next history entry or the saved draft.
    pub fn recall_newer(&mut self) {
        if let Some(text) = self.history.newer() {
            self.set_text(&text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputState {
        let mut input = InputState::new();
        for ch in text.chars() {
            input.insert_char(ch);
        }
        input
    }

    #[test]
    fn test_editing_multibyte() {
        let mut input = typed("殺老鼠");
        input.move_left();
        input.backspace();
        assert_eq!(input.text(), "殺鼠");
        assert_eq!(input.cursor(), 1);
        input.move_home();
        input.delete();
        assert_eq!(input.text(), "鼠");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputState::new();
        input.insert_str("say hi\r\nthere");
        assert_eq!(input.text(), "say hi there");
        assert_eq!(input.cursor(), 12);
    }

    #[test]
    fn test_delete_word_back() {
        let mut input = typed("get sword from corpse  ");
        input.delete_word_back();
        assert_eq!(input.text(), "get sword from ");
    }

    #[test]
    fn test_submit_resets_cursor() {
        let mut input = typed(" look ");
        let mut sent: Vec<String> = Vec::new();
        assert_eq!(input.submit(&mut sent).unwrap().as_deref(), Some("look"));
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_recall_round_trip_restores_draft() {
        let mut input = InputState::new();
        input.history.record("north");
        input.set_text("dr");
        input.recall_older();
        assert_eq!(input.text(), "north");
        input.recall_newer();
        assert_eq!(input.text(), "dr");
    }
}
