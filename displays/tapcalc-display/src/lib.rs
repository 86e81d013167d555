//! Display abstraction traits and the interaction loop for tapcalc
//!
//! This crate provides:
//! - `DisplaySink` trait for the rectangle/text primitives the keypad needs
//! - `TouchSource` trait for polled touch controllers
//! - Text panel derivation from calculator state
//! - `RenderCoordinator` for change detection and minimal redraws
//! - `Session`, the single-owner poll loop tying it together
//!
//! # Architecture
//!
//! ```text
//! TouchSource ──► hit test ──► Debouncer ──► Engine
//!                                               │
//!                       DisplaySink ◄── RenderCoordinator
//! ```
//!
//! Display and touch drivers implement the two traits; everything else is
//! hardware independent and runs on the host in tests.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod input;
pub mod render;
pub mod screen;
pub mod session;

// Re-export key types
pub use backend::{Color, DisplayError, DisplaySink, FontMetrics};
pub use input::{TouchError, TouchSource};
pub use render::RenderCoordinator;
pub use screen::TextPanel;
pub use session::{Session, Tick};
