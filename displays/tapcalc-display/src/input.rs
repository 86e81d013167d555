//! Touch source trait
//!
//! Abstracts a polled touch controller. Orientation mapping and
//! calibration happen inside the implementation; samples arrive here in
//! display pixel coordinates.

use tapcalc_core::TouchSample;

/// Touch controller errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// Controller did not respond or reported a bad ID during bring-up
    InitFailed,
}

/// Polled touch controller
pub trait TouchSource {
    /// Bring up the controller
    ///
    /// Called once before the first poll. A failure halts the calculator.
    fn init(&mut self) -> Result<(), TouchError>;

    /// Read the current touch state
    ///
    /// Called once per loop iteration; must not block beyond a bounded
    /// hardware read. Read errors are reported as "not touched".
    fn poll_touch(&mut self) -> TouchSample;
}
