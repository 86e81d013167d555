//! Board-agnostic core logic for the touch calculator
//!
//! This crate contains all application logic that does not depend on
//! a specific display or touch controller:
//!
//! - Input buffer for the number being typed
//! - Arithmetic engine (accumulator, pending operator, sticky error)
//! - Number formatting for the result line
//! - Keypad configuration and button layout with hit testing
//! - Touch sample debouncing into press/release edges

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod format;
pub mod input;
pub mod layout;
pub mod state;
pub mod touch;

pub use config::{ConfigError, KeypadConfig};
pub use input::InputBuffer;
pub use layout::{ButtonDescriptor, ButtonKind, Keypad, Rect, BUTTON_COUNT};
pub use state::{Action, ArithmeticError, Dispatch, Engine, Operator, Phase};
pub use touch::{Debouncer, TouchEdge, TouchSample};
