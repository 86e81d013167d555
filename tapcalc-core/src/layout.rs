//! Button layout and hit testing
//!
//! The keypad is a 4x4 grid in row-major order followed by a full-width
//! equals button. The table is built once from a [`KeypadConfig`] and never
//! changes afterwards.

use crate::config::{ConfigError, KeypadConfig, KEYPAD_COLUMNS, KEYPAD_GRID_ROWS};
use crate::state::{Action, Operator};

/// Number of buttons on the keypad
pub const BUTTON_COUNT: usize = 17;

/// Axis-aligned rectangle in display pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point lies inside, edges included on all four sides
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let (x, y) = (u32::from(x), u32::from(y));
        let left = u32::from(self.x);
        let top = u32::from(self.y);
        x >= left
            && x <= left + u32::from(self.width)
            && y >= top
            && y <= top + u32::from(self.height)
    }
}

/// Semantic kind of a button, used for colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonKind {
    Digit,
    Operator,
    Clear,
    Equals,
}

/// One keypad button
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDescriptor {
    /// Glyph drawn on the button
    pub label: &'static str,
    /// Screen area, also the touch target
    pub rect: Rect,
    /// Action fired on a press edge
    pub action: Action,
}

impl ButtonDescriptor {
    /// Semantic kind, derived from the action
    pub fn kind(&self) -> ButtonKind {
        match self.action {
            Action::Digit(_) => ButtonKind::Digit,
            Action::Operator(_) => ButtonKind::Operator,
            Action::Clear => ButtonKind::Clear,
            Action::Equals => ButtonKind::Equals,
        }
    }
}

/// Grid contents, row-major
const GRID: [(&str, Action); 16] = [
    ("7", Action::Digit('7')),
    ("8", Action::Digit('8')),
    ("9", Action::Digit('9')),
    ("/", Action::Operator(Operator::Divide)),
    ("4", Action::Digit('4')),
    ("5", Action::Digit('5')),
    ("6", Action::Digit('6')),
    ("*", Action::Operator(Operator::Multiply)),
    ("1", Action::Digit('1')),
    ("2", Action::Digit('2')),
    ("3", Action::Digit('3')),
    ("-", Action::Operator(Operator::Subtract)),
    ("0", Action::Digit('0')),
    (".", Action::Digit('.')),
    ("C", Action::Clear),
    ("+", Action::Operator(Operator::Add)),
];

/// Immutable button table
#[derive(Debug, Clone, PartialEq)]
pub struct Keypad {
    config: KeypadConfig,
    buttons: [ButtonDescriptor; BUTTON_COUNT],
}

impl Keypad {
    /// Build the button table from screen geometry
    pub fn new(config: KeypadConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let width = config.button_width();
        let height = config.button_height();
        let pitch_x = width + config.spacing;
        let pitch_y = height + config.spacing;
        let top = config.keypad_top();

        let buttons = core::array::from_fn(|i| {
            if let Some(&(label, action)) = GRID.get(i) {
                let col = i as u16 % KEYPAD_COLUMNS;
                let row = i as u16 / KEYPAD_COLUMNS;
                ButtonDescriptor {
                    label,
                    rect: Rect::new(
                        config.margin_x + col * pitch_x,
                        top + row * pitch_y,
                        width,
                        height,
                    ),
                    action,
                }
            } else {
                ButtonDescriptor {
                    label: "=",
                    rect: Rect::new(
                        config.margin_x,
                        top + KEYPAD_GRID_ROWS * pitch_y,
                        width * KEYPAD_COLUMNS + config.spacing * (KEYPAD_COLUMNS - 1),
                        height,
                    ),
                    action: Action::Equals,
                }
            }
        });

        Ok(Self { config, buttons })
    }

    /// Index of the first button containing the point
    pub fn hit_test(&self, x: u16, y: u16) -> Option<usize> {
        self.buttons.iter().position(|b| b.rect.contains(x, y))
    }

    /// Button at `index`
    pub fn get(&self, index: usize) -> Option<&ButtonDescriptor> {
        self.buttons.get(index)
    }

    /// All buttons in table order
    pub fn buttons(&self) -> &[ButtonDescriptor] {
        &self.buttons
    }

    /// Number of buttons
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Check if the keypad has no buttons
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Geometry the table was built from
    pub fn config(&self) -> &KeypadConfig {
        &self.config
    }
}
