//! Display sink trait
//!
//! Defines the drawing primitives the calculator needs from a display
//! driver. Coordinates and colour choices are computed here; pixel formats
//! and font rasterization belong to the implementation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tapcalc_core::Rect;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
}

/// Named colours used by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    /// Operator buttons
    Amber,
    LightGrey,
    DarkGrey,
    /// Screen background before the keypad is drawn
    Gray,
}

impl Color {
    /// RGB565 value for panels such as the ILI9341
    pub const fn to_rgb565(self) -> u16 {
        match self {
            Color::Black => 0x0000,
            Color::Red => 0xF800,
            Color::Green => 0x07E0,
            Color::Yellow => 0xFFE0,
            Color::Amber => 0xFDA0,
            Color::LightGrey => 0xC618,
            Color::DarkGrey => 0x7BEF,
            Color::Gray => 0x8410,
        }
    }
}

/// Fixed-width font cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FontMetrics {
    /// Glyph advance in pixels
    pub width: u16,
    /// Line height in pixels
    pub height: u16,
}

impl FontMetrics {
    /// 11x18 font used for the text panel and button labels
    pub const FONT_11X18: Self = Self {
        width: 11,
        height: 18,
    };

    /// Pixel width of `text` rendered in this font
    pub fn text_width(&self, text: &str) -> u16 {
        let glyphs = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        glyphs.saturating_mul(self.width)
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::FONT_11X18
    }
}

/// Display sink trait
///
/// Provides the hardware-agnostic primitives used to draw the text panel
/// and the keypad. Implementations map them to the panel's driver.
pub trait DisplaySink {
    /// Fill a rectangle with a solid colour
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError>;

    /// Draw a one-pixel rectangle outline
    fn draw_rect_outline(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at `(x, y)`
    fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        font: &FontMetrics,
        fg: Color,
        bg: Color,
    ) -> Result<(), DisplayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        let font = FontMetrics::FONT_11X18;
        assert_eq!(font.text_width(""), 0);
        assert_eq!(font.text_width("7"), 11);
        assert_eq!(font.text_width("Ready"), 55);
    }

    #[test]
    fn test_rgb565_values() {
        assert_eq!(Color::Black.to_rgb565(), 0x0000);
        assert_eq!(Color::Yellow.to_rgb565(), 0xFFE0);
        assert_eq!(Color::Amber.to_rgb565(), 0xFDA0);
    }
}
