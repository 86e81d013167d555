//! Render coordination
//!
//! Tracks what is currently on the glass so the loop only redraws what
//! changed: the text panel when any line differs or an action was
//! dispatched, and a button only when its pressed flag flips.

use tapcalc_core::{ButtonDescriptor, ButtonKind, Keypad, KeypadConfig, Rect, BUTTON_COUNT};

use crate::backend::{Color, DisplayError, DisplaySink, FontMetrics};
use crate::screen::{TextPanel, HALT_TEXT, LINE_STYLES, LINE_X};

/// Text colour on buttons
const LABEL_COLOR: Color = Color::Black;

/// Fill colour for a button
pub fn button_color(kind: ButtonKind, pressed: bool) -> Color {
    if pressed {
        return Color::Yellow;
    }
    match kind {
        ButtonKind::Digit => Color::LightGrey,
        ButtonKind::Operator => Color::Amber,
        ButtonKind::Clear => Color::Red,
        ButtonKind::Equals => Color::Green,
    }
}

/// Change detector and draw command emitter
#[derive(Debug, Clone)]
pub struct RenderCoordinator {
    font: FontMetrics,
    /// Panel as last drawn, `None` before the first draw
    drawn_panel: Option<TextPanel>,
    /// Set when an action was dispatched since the last text redraw
    dirty: bool,
    /// Pressed flag of each button as last drawn
    drawn_pressed: [bool; BUTTON_COUNT],
}

impl Default for RenderCoordinator {
    fn default() -> Self {
        Self::new(FontMetrics::default())
    }
}

impl RenderCoordinator {
    /// Create a coordinator; the first text check always redraws
    pub fn new(font: FontMetrics) -> Self {
        Self {
            font,
            drawn_panel: None,
            dirty: true,
            drawn_pressed: [false; BUTTON_COUNT],
        }
    }

    /// Font used for the panel and button labels
    pub fn font(&self) -> &FontMetrics {
        &self.font
    }

    /// Record that calculator state changed
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if a text redraw is forced regardless of content
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Decide whether the text panel must be redrawn
    ///
    /// Returning `true` commits `panel` as drawn and clears the dirty flag,
    /// so the same panel is not reported twice.
    pub fn should_redraw_text(&mut self, panel: &TextPanel) -> bool {
        let changed = self.drawn_panel.as_ref() != Some(panel);
        if !self.dirty && !changed {
            return false;
        }
        self.drawn_panel = Some(panel.clone());
        self.dirty = false;
        true
    }

    /// Decide whether a button must be redrawn in the given state
    ///
    /// True only when the drawn pressed flag flips; the new flag is recorded.
    pub fn should_redraw_button(&mut self, index: usize, pressed: bool) -> bool {
        match self.drawn_pressed.get_mut(index) {
            Some(flag) if *flag != pressed => {
                *flag = pressed;
                true
            }
            _ => false,
        }
    }

    /// Pressed flag of a button as last drawn
    pub fn is_drawn_pressed(&self, index: usize) -> bool {
        self.drawn_pressed.get(index).copied().unwrap_or(false)
    }

    /// Pick the single button redraw for this iteration
    ///
    /// A newly held button goes first; otherwise one button still drawn
    /// pressed but no longer held is restored.
    pub fn next_button_redraw(&mut self, held: Option<usize>) -> Option<(usize, bool)> {
        if let Some(index) = held {
            if self.should_redraw_button(index, true) {
                return Some((index, true));
            }
        }

        let stale = self
            .drawn_pressed
            .iter()
            .enumerate()
            .position(|(i, &pressed)| pressed && Some(i) != held)?;
        self.should_redraw_button(stale, false);
        Some((stale, false))
    }

    /// Draw the three panel lines on a black background
    pub fn draw_panel<D: DisplaySink>(
        &self,
        display: &mut D,
        config: &KeypadConfig,
        panel: &TextPanel,
    ) -> Result<(), DisplayError> {
        display.fill_rect(
            Rect::new(0, 0, config.screen_width, config.display_height),
            Color::Black,
        )?;
        for (line, &(y, color)) in panel.lines().zip(LINE_STYLES.iter()) {
            display.draw_text(LINE_X, y, line, &self.font, color, Color::Black)?;
        }
        Ok(())
    }

    /// Draw a button with its label centred
    pub fn draw_button<D: DisplaySink>(
        &self,
        display: &mut D,
        button: &ButtonDescriptor,
        pressed: bool,
    ) -> Result<(), DisplayError> {
        let fill = button_color(button.kind(), pressed);
        let rect = button.rect;

        display.fill_rect(rect, fill)?;
        display.draw_rect_outline(rect, Color::Black)?;

        let text_x = rect.x + rect.width.saturating_sub(self.font.text_width(button.label)) / 2;
        let text_y = rect.y + rect.height.saturating_sub(self.font.height) / 2;
        display.draw_text(text_x, text_y, button.label, &self.font, LABEL_COLOR, fill)
    }

    /// Draw the keypad background and every button unpressed
    pub fn draw_keypad<D: DisplaySink>(
        &mut self,
        display: &mut D,
        keypad: &Keypad,
    ) -> Result<(), DisplayError> {
        let config = keypad.config();
        let top = config.keypad_top().saturating_sub(config.spacing);
        display.fill_rect(
            Rect::new(
                0,
                top,
                config.screen_width,
                config.screen_height.saturating_sub(top),
            ),
            Color::DarkGrey,
        )?;

        for button in keypad.buttons() {
            self.draw_button(display, button, false)?;
        }
        self.drawn_pressed = [false; BUTTON_COUNT];
        Ok(())
    }

    /// Draw the permanent touch-failure message
    pub fn draw_halted<D: DisplaySink>(&self, display: &mut D) -> Result<(), DisplayError> {
        display.draw_text(10, 10, HALT_TEXT, &self.font, Color::Red, Color::Gray)
    }
}
