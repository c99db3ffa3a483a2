//! Hardware-facing user interface pieces.
//!
//! The menu engine itself draws through the [`crate::menu::render::Screen`]
//! trait; this module holds the concrete SSD1306 adapter used on the
//! target board. Host builds and tests do not need it.

#[cfg(feature = "embedded")]
pub mod display;
