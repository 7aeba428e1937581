//! Editable single-line text with an insertion cursor.

use crate::core::keys::{KeyEvent, NamedKey};

/// Text being typed into a prompt
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInput {
    value: Vec<char>,
    /// Insertion point, always within `0..=value.len()`
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Remove the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.value.remove(self.cursor - 1);
        self.cursor -= 1;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.len());
    }

    /// Text strictly before the cursor
    pub fn before(&self) -> String {
        self.value[..self.cursor].iter().collect()
    }

    /// Text at and after the cursor
    pub fn after(&self) -> String {
        self.value[self.cursor..].iter().collect()
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn reset(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns true if the text itself changed.
    pub fn apply(&mut self, key: &KeyEvent) -> bool {
        match key {
            // Stray control bytes decode as printable but are never typed
            KeyEvent::Printable(ch) if ch.is_control() => false,
            KeyEvent::Printable(ch) => {
                self.insert(*ch);
                true
            }
            KeyEvent::Named(NamedKey::Backspace) => {
                let before = self.value.len();
                self.backspace();
                self.value.len() != before
            }
            KeyEvent::Named(NamedKey::ArrowLeft) => {
                self.move_left();
                false
            }
            KeyEvent::Named(NamedKey::ArrowRight) => {
                self.move_right();
                false
            }
            _ => false,
        }
    }
}
