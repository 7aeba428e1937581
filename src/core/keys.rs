//! Key decoding for raw terminal input
//!
//! Converts the bytes returned by a single raw-mode read into a [`KeyEvent`].
//! The decoder is best-effort and does not buffer: a lone Escape and the
//! first byte of an escape sequence split across two reads look the same,
//! and UTF-8 runes split across reads are not reassembled.

use std::fmt;

use crate::error::{PromptError, Result};

/// Keys that have no printable form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Escape,
    CtrlC,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Ctrl + lowercase letter
    Ctrl(char),
}

/// A single decoded key press
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    Printable(char),
    Named(NamedKey),
}

impl KeyEvent {
    /// Binding name used by key configuration (`"enter"`, `"ctrl+c"`, `"k"`, ...)
    pub fn name(&self) -> String {
        match self {
            KeyEvent::Printable(ch) => ch.to_string(),
            KeyEvent::Named(key) => match key {
                NamedKey::Enter => "enter".to_string(),
                NamedKey::Escape => "esc".to_string(),
                NamedKey::CtrlC => "ctrl+c".to_string(),
                NamedKey::Backspace => "backspace".to_string(),
                NamedKey::ArrowUp => "arrowup".to_string(),
                NamedKey::ArrowDown => "arrowdown".to_string(),
                NamedKey::ArrowLeft => "arrowleft".to_string(),
                NamedKey::ArrowRight => "arrowright".to_string(),
                NamedKey::Ctrl(ch) => format!("ctrl+{}", ch),
            },
        }
    }

    /// True if this key's binding name appears in `bindings`
    pub fn matches<S: AsRef<str>>(&self, bindings: &[S]) -> bool {
        let name = self.name();
        bindings.iter().any(|b| b.as_ref() == name)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Display symbol for a binding name, used in help lines
pub fn key_symbol(name: &str) -> &str {
    match name {
        "arrowup" => "↑",
        "arrowdown" => "↓",
        "arrowleft" => "←",
        "arrowright" => "→",
        "enter" => "↵",
        other => other,
    }
}

/// Decode the bytes of one read into a key
pub fn decode(bytes: &[u8]) -> Result<KeyEvent> {
    match bytes {
        [b] => decode_single(*b),
        // ESC [ <letter>
        [0x1B, b'[', c] => match c {
            b'A' => Ok(KeyEvent::Named(NamedKey::ArrowUp)),
            b'B' => Ok(KeyEvent::Named(NamedKey::ArrowDown)),
            b'C' => Ok(KeyEvent::Named(NamedKey::ArrowRight)),
            b'D' => Ok(KeyEvent::Named(NamedKey::ArrowLeft)),
            _ => Err(PromptError::UnrecognizedSequence(bytes.to_vec())),
        },
        _ => decode_rune(bytes),
    }
}

fn decode_single(b: u8) -> Result<KeyEvent> {
    let key = match b {
        13 => KeyEvent::Named(NamedKey::Enter),
        27 => KeyEvent::Named(NamedKey::Escape),
        3 => KeyEvent::Named(NamedKey::CtrlC),
        8 | 127 => KeyEvent::Named(NamedKey::Backspace),
        // Tab is indistinguishable from Ctrl+I and is left unmapped
        9 => return Err(PromptError::UnrecognizedSequence(vec![b])),
        1..=26 => KeyEvent::Named(NamedKey::Ctrl((b'a' + b - 1) as char)),
        // Remaining ASCII is taken as-is. A lone byte >= 0x80 is never valid
        // UTF-8 and becomes U+FFFD.
        0..=0x7F => KeyEvent::Printable(char::from(b)),
        _ => KeyEvent::Printable(char::REPLACEMENT_CHARACTER),
    };
    Ok(key)
}

/// First complete UTF-8 codepoint of a multi-byte read
fn decode_rune(bytes: &[u8]) -> Result<KeyEvent> {
    let valid = match std::str::from_utf8(bytes) {
        Ok(s) => s,
        // valid_up_to marks a char boundary, so the prefix always decodes
        Err(e) => std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    };
    match valid.chars().next() {
        Some(ch) if !ch.is_control() => Ok(KeyEvent::Printable(ch)),
        _ => Err(PromptError::UnrecognizedSequence(bytes.to_vec())),
    }
}
