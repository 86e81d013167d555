//! Calculator state machine
//!
//! The engine is explicit, deterministic, and driven only by button
//! actions. Divide-by-zero latches an error that only Clear releases.

pub mod events;
pub mod machine;

pub use events::{Action, ArithmeticError, Operator};
pub use machine::{Dispatch, Engine, Phase};
