/// Single-line text input with a byte-offset cursor kept on char boundaries.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn set<T: Into<String>>(&mut self, value: T) {
        self.text = value.into();
        self.cursor = self.text.len();
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\r' || ch == '\n' {
            return;
        }
        let mut buf = [0u8; 4];
        let encoded = ch.encode_utf8(&mut buf);
        self.text.insert_str(self.cursor, encoded);
        self.cursor += encoded.len();
    }

    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.text.drain(idx..self.cursor);
            self.cursor = idx;
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.text.drain(self.cursor..self.cursor + ch.len_utf8());
        }
    }

    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_places_cursor_at_end() {
        let mut buffer = TextBuffer::new();
        buffer.set("hello");

        assert_eq!(buffer.as_str(), "hello");
        assert_eq!(buffer.cursor(), 5);
    }

    #[test]
    fn edits_respect_multibyte_chars() {
        let mut buffer = TextBuffer::new();
        buffer.set("café");
        buffer.backspace();
        assert_eq!(buffer.as_str(), "caf");

        buffer.insert_char('é');
        buffer.move_home();
        buffer.move_right();
        buffer.delete_char();
        assert_eq!(buffer.as_str(), "cfé");

        buffer.move_end();
        buffer.move_left();
        buffer.insert_char('x');
        assert_eq!(buffer.as_str(), "cfxé");
    }

    #[test]
    fn newlines_are_ignored() {
        let mut buffer = TextBuffer::new();
        buffer.insert_char('a');
        buffer.insert_char('\n');
        buffer.insert_char('\r');
        assert_eq!(buffer.as_str(), "a");
    }
}
