//! Text panel contents
//!
//! The panel above the keypad shows three lines: the value line, the
//! pending operator, and the last touch coordinate. Lines are derived
//! purely from engine state and the current touch sample.

use core::fmt::Write;

use heapless::String;
use tapcalc_core::config::RESULT_PRECISION;
use tapcalc_core::format::write_general;
use tapcalc_core::{Engine, TouchSample};

use crate::backend::Color;

/// Number of text lines on the panel
pub const PANEL_LINES: usize = 3;

/// Maximum characters per line
pub const LINE_LEN: usize = 32;

/// Value line while the error latch is set
pub const ERROR_TEXT: &str = "Error: invalid op";

/// Value line before anything is typed
pub const IDLE_TEXT: &str = "Ready";

/// Shown once when the touch controller fails to come up
pub const HALT_TEXT: &str = "Touch init failed";

/// Left edge of every panel line
pub const LINE_X: u16 = 5;

/// Top edge and foreground colour of each line
pub const LINE_STYLES: [(u16, Color); PANEL_LINES] = [
    (5, Color::Green),
    (30, Color::LightGrey),
    (55, Color::Yellow),
];

/// Rendered text of the panel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextPanel {
    lines: [String<LINE_LEN>; PANEL_LINES],
}

impl TextPanel {
    /// Create an empty panel
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
        }
    }

    /// Derive the panel from calculator state and the latest touch sample
    pub fn derive(engine: &Engine, touch: &TouchSample) -> Self {
        let mut panel = Self::new();

        let value = &mut panel.lines[0];
        if engine.is_error() {
            let _ = value.push_str(ERROR_TEXT);
        } else if !engine.input().is_empty() {
            let _ = write!(value, "Input: {}", engine.input().as_str());
        } else if engine.has_accumulator() {
            let _ = value.push_str("Result: ");
            let _ = write_general(value, engine.accumulator(), RESULT_PRECISION);
        } else {
            let _ = value.push_str(IDLE_TEXT);
        }

        let operator = &mut panel.lines[1];
        match engine.pending_operator() {
            Some(op) => {
                let _ = write!(operator, "Op: {}", op.symbol());
            }
            None => {
                let _ = operator.push_str("Op: none");
            }
        }

        let coords = &mut panel.lines[2];
        match touch.point() {
            Some((x, y)) => {
                let _ = write!(coords, "Touch: {:>3},{:>3}", x, y);
            }
            None => {
                let _ = coords.push_str("Touch: ---");
            }
        }

        panel
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Value, input, or error line
    pub fn value_line(&self) -> &str {
        self.lines[0].as_str()
    }

    /// Pending operator line
    pub fn operator_line(&self) -> &str {
        self.lines[1].as_str()
    }

    /// Touch coordinate line
    pub fn touch_line(&self) -> &str {
        self.lines[2].as_str()
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TextPanel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Panel[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
