//! Input buffer for the number being typed
//!
//! Holds the raw characters entered on the keypad. Appends past capacity
//! and a second decimal point are dropped silently, so the text is always
//! a parseable (possibly partial) decimal number.

use heapless::String;

use crate::config::INPUT_CAPACITY;

/// Bounded text of the operand currently being entered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String<INPUT_CAPACITY>,
}

impl InputBuffer {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Append a character
    ///
    /// Returns `false` when the character was dropped (buffer full, or a
    /// second `.`).
    pub fn append(&mut self, ch: char) -> bool {
        if ch == '.' && self.has_decimal() {
            return false;
        }
        self.text.push(ch).is_ok()
    }

    /// Empty the buffer
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Numeric value of the buffer, `0.0` when empty
    ///
    /// Accepts `"3."` and `".5"`. A lone `"."` reads as zero.
    pub fn parse_value(&self) -> f64 {
        if self.text.is_empty() {
            return 0.0;
        }
        self.text.parse::<f64>().unwrap_or(0.0)
    }

    /// Check if nothing has been typed
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if the buffer already holds a decimal point
    pub fn has_decimal(&self) -> bool {
        self.text.contains('.')
    }

    /// Number of characters typed
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Raw text as typed
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InputBuffer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Input[{}]", self.text.as_str());
    }
}
