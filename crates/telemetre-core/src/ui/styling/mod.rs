//! Styling system for UI elements.
//!
//! Split into logical modules:
//! - [`colors`] - RGB565 color constants and palette management
//! - [`layout`] - spacing, padding, and border radius scales
//! - [`style`] - per-element style configuration and button variants
//! - [`theme`] - global theme combining all styling parameters

pub mod colors;
pub mod layout;
pub mod style;
pub mod theme;

pub use colors::ColorPalette;
pub use layout::{BorderRadius, Padding, Spacing};
pub use style::{ButtonVariant, Style};
pub use theme::Theme;
