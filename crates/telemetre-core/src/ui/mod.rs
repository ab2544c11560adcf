//! Telemetre UI system.
//!
//! A small retained-mode UI for the touch display:
//! - core traits for drawable and touchable elements
//! - a flex-like layout container
//! - styled components (buttons, text readouts, multi-line panels)
//! - dirty tracking so only changed screens are redrawn
//! - an event type pages consume to refresh their readouts

pub mod components;
pub mod core;
pub mod layouts;
pub mod styling;

pub use components::{Button, MultiLineText, TextComponent, TextSize};
pub use self::core::{
    Action, DirtyRegion, Drawable, PageEvent, PageId, TouchEvent, TouchPoint, TouchResult,
    Touchable,
};
pub use layouts::{Alignment, Container, Direction, SizeConstraint};
pub use styling::{BorderRadius, ButtonVariant, ColorPalette, Padding, Spacing, Style, Theme};
