//! Actions that drive the calculator

/// Binary operators available on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Arithmetic faults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArithmeticError {
    /// Right-hand operand of `/` was zero
    DivideByZero,
}

impl Operator {
    /// Parse a keypad glyph
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Keypad glyph for this operator
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Apply `a <op> b`
    pub fn apply(self, a: f64, b: f64) -> Result<f64, ArithmeticError> {
        match self {
            Operator::Add => Ok(a + b),
            Operator::Subtract => Ok(a - b),
            Operator::Multiply => Ok(a * b),
            Operator::Divide if b == 0.0 => Err(ArithmeticError::DivideByZero),
            Operator::Divide => Ok(a / b),
        }
    }
}

/// Fold `b` into `a` with an optional operator
///
/// With no operator the result is `b`: the typed operand simply replaces
/// the accumulator.
pub fn apply(a: f64, b: f64, op: Option<Operator>) -> Result<f64, ArithmeticError> {
    match op {
        Some(op) => op.apply(a, b),
        None => Ok(b),
    }
}

/// Button actions that can be dispatched to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Append a digit or decimal point to the input
    Digit(char),
    /// Commit the input and select an operator
    Operator(Operator),
    /// Evaluate the pending operation
    Equals,
    /// Full reset, including the error latch
    Clear,
}

impl Action {
    /// Check if this action is still accepted while the error latch is set
    pub fn bypasses_error(&self) -> bool {
        matches!(self, Action::Clear)
    }
}
