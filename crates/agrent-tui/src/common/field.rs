//! Single-line text field with grapheme-aware editing.

use crossterm::event::{KeyCode, KeyEvent};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Editable single-line input used by every form.
///
/// The cursor is a grapheme index, not a byte offset, so multi-byte input
/// edits cleanly. Masked fields render bullets but keep the real value.
#[derive(Debug, Clone, Default)]
pub struct Field {
    value: String,
    cursor: usize,
    masked: bool,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field that renders bullets instead of its value (passwords).
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Trimmed value, as submitted to the server.
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.grapheme_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    /// Byte offset of the grapheme at `index` (or the end of the string).
    fn byte_offset(&self, index: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(index)
            .map_or(self.value.len(), |(offset, _)| offset)
    }

    pub fn insert(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.value.insert(offset, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.grapheme_count() {
            return;
        }
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.value.replace_range(start..end, "");
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.grapheme_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    /// Text shown in the UI (bullets for masked fields).
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.grapheme_count())
        } else {
            self.value.clone()
        }
    }

    /// Display width of the text before the cursor, for cursor placement.
    pub fn cursor_offset(&self) -> u16 {
        if self.masked {
            return self.cursor as u16;
        }
        let end = self.byte_offset(self.cursor);
        self.value[..end].width() as u16
    }

    /// Applies an editing key. Returns false for keys the field doesn't
    /// handle (navigation/submit), so the caller can route them.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(crossterm::event::KeyModifiers::CONTROL) => {
                self.insert(c);
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Delete => {
                self.delete();
                true
            }
            KeyCode::Left => {
                self.move_left();
                true
            }
            KeyCode::Right => {
                self.move_right();
                true
            }
            KeyCode::Home => {
                self.move_home();
                true
            }
            KeyCode::End => {
                self.move_end();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_and_deletes_at_cursor() {
        let mut field = Field::new();
        for c in "trator".chars() {
            field.insert(c);
        }
        // Fix the typo: trator -> tractor
        field.move_left();
        field.move_left();
        field.move_left();
        field.insert('c');
        assert_eq!(field.value(), "tractor");

        field.backspace();
        assert_eq!(field.value(), "trator");
    }

    #[test]
    fn masked_display_hides_value() {
        let mut field = Field::masked();
        field.set_value("secret");
        assert_eq!(field.display(), "••••••");
        assert_eq!(field.value(), "secret");
    }

    #[test]
    fn multibyte_editing_is_grapheme_aware() {
        let mut field = Field::new();
        field.set_value("నాగలి");
        field.backspace();
        assert_eq!(field.value(), "నాగ");
    }
}
