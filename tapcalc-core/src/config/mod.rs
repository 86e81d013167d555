//! Keypad configuration
//!
//! Geometry inputs for the button layout. The defaults describe the
//! 240x320 portrait panel the keypad was first drawn on; other panels
//! supply their own values once at startup.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum characters the input buffer holds
pub const INPUT_CAPACITY: usize = 16;

/// Significant digits shown on the result line
pub const RESULT_PRECISION: usize = 6;

/// Button columns in the keypad grid
pub const KEYPAD_COLUMNS: u16 = 4;

/// Rows in the keypad grid (excluding the equals row)
pub const KEYPAD_GRID_ROWS: u16 = 4;

/// Total button rows, including the full-width equals row
pub const KEYPAD_ROWS: u16 = KEYPAD_GRID_ROWS + 1;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Not enough horizontal space for one pixel per button column
    TooNarrow,
    /// Not enough vertical space below the text panel for the keypad
    TooShort,
    /// Zero spacing makes neighbouring buttons share an edge pixel
    NoSpacing,
}

/// Screen and keypad geometry, in display pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeypadConfig {
    /// Usable display width
    pub screen_width: u16,
    /// Usable display height
    pub screen_height: u16,
    /// Height of the text panel at the top of the screen
    pub display_height: u16,
    /// Gap between the text panel and the first button row
    pub panel_gap: u16,
    /// Left and right margin around the keypad
    pub margin_x: u16,
    /// Margin below the last button row
    pub margin_bottom: u16,
    /// Spacing between adjacent buttons (both axes)
    pub spacing: u16,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            screen_width: 240,
            screen_height: 320,
            display_height: 80,
            panel_gap: 10,
            margin_x: 6,
            margin_bottom: 6,
            spacing: 4,
        }
    }
}

impl KeypadConfig {
    /// Y coordinate of the first button row
    pub fn keypad_top(&self) -> u16 {
        self.display_height.saturating_add(self.panel_gap)
    }

    /// Width of a single grid button
    pub fn button_width(&self) -> u16 {
        let gaps = self.spacing.saturating_mul(KEYPAD_COLUMNS - 1);
        self.screen_width
            .saturating_sub(self.margin_x.saturating_mul(2))
            .saturating_sub(gaps)
            / KEYPAD_COLUMNS
    }

    /// Height of every button row
    ///
    /// Derived so all rows, equals included, fit above the bottom margin.
    pub fn button_height(&self) -> u16 {
        let gaps = self.spacing.saturating_mul(KEYPAD_ROWS - 1);
        self.screen_height
            .saturating_sub(self.keypad_top())
            .saturating_sub(self.margin_bottom)
            .saturating_sub(gaps)
            / KEYPAD_ROWS
    }

    /// Check that every button ends up with a non-zero size and that
    /// neighbouring buttons are at least one pixel apart
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spacing == 0 {
            return Err(ConfigError::NoSpacing);
        }
        if self.button_width() == 0 {
            return Err(ConfigError::TooNarrow);
        }
        if self.button_height() == 0 {
            return Err(ConfigError::TooShort);
        }
        Ok(())
    }
}
