//! Arithmetic engine
//!
//! Single-pending-operator, left-to-right evaluation. The engine owns the
//! accumulator, the pending operator, the error latch and the input buffer.

use super::events::{apply, Action, ArithmeticError, Operator};
use crate::input::InputBuffer;

/// Observable phase of the engine, derived from its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Nothing committed and nothing typed
    Idle,
    /// Operand being typed or a result on display, no operator pending
    Accumulating,
    /// Operator selected, waiting for the right-hand operand
    PendingOperator,
    /// Divide-by-zero latched; only Clear is accepted
    Error,
}

/// What happened to a dispatched action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// The action was processed
    Applied,
    /// Nothing to do for this action in the current state
    Ignored,
    /// Blocked by the error latch
    Rejected,
}

/// Calculator state and the transitions over it
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Engine {
    accumulator: f64,
    pending: Option<Operator>,
    has_accumulator: bool,
    error: bool,
    input: InputBuffer,
}

impl Engine {
    /// Create an engine in the reset state
    pub const fn new() -> Self {
        Self {
            accumulator: 0.0,
            pending: None,
            has_accumulator: false,
            error: false,
            input: InputBuffer::new(),
        }
    }

    /// Process a button action
    ///
    /// The error latch is checked here, before any handler runs.
    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        if self.error && !action.bypasses_error() {
            return Dispatch::Rejected;
        }

        match action {
            Action::Digit(ch) => {
                self.input.append(ch);
                Dispatch::Applied
            }
            Action::Operator(op) => {
                self.select_operator(op);
                Dispatch::Applied
            }
            Action::Equals => self.evaluate(),
            Action::Clear => {
                self.reset();
                Dispatch::Applied
            }
        }
    }

    /// Return to the power-on state, clearing the error latch
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Commit the typed operand and remember `op`
    fn select_operator(&mut self, op: Operator) {
        let value = self.input.parse_value();

        if !self.has_accumulator {
            self.accumulator = value;
            self.has_accumulator = true;
        } else if self.pending.is_some() || !self.input.is_empty() {
            // A second operator press without a new operand folds the
            // stale operator against 0.0
            self.fold(value, self.pending);
        }

        self.input.clear();
        self.pending = Some(op);
    }

    fn evaluate(&mut self) -> Dispatch {
        if !self.has_accumulator && !self.input.is_empty() {
            self.accumulator = self.input.parse_value();
            self.has_accumulator = true;
            self.pending = None;
            self.input.clear();
            return Dispatch::Applied;
        }

        if self.has_accumulator && self.pending.is_some() {
            let value = self.input.parse_value();
            self.fold(value, self.pending);
            self.pending = None;
            self.input.clear();
            return Dispatch::Applied;
        }

        Dispatch::Ignored
    }

    fn fold(&mut self, value: f64, op: Option<Operator>) {
        match apply(self.accumulator, value, op) {
            Ok(result) => self.accumulator = result,
            Err(ArithmeticError::DivideByZero) => {
                self.accumulator = 0.0;
                self.error = true;
            }
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        if self.error {
            Phase::Error
        } else if self.pending.is_some() {
            Phase::PendingOperator
        } else if self.has_accumulator || !self.input.is_empty() {
            Phase::Accumulating
        } else {
            Phase::Idle
        }
    }

    /// Last committed operand or result
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Check if a value has been committed since the last reset
    pub fn has_accumulator(&self) -> bool {
        self.has_accumulator
    }

    /// Operator waiting for its right-hand operand
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending
    }

    /// Check if the error latch is set
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Operand being typed
    pub fn input(&self) -> &InputBuffer {
        &self.input
    }
}
