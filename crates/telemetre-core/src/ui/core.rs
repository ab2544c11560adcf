//! Core UI traits and types.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::capture::CaptureSnapshot;
use crate::history::HistoryText;
use crate::measure::Measurement;

/// A 2D touch point on the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Touch events delivered to the active page.
#[derive(Debug, Clone, Copy)]
pub enum TouchEvent {
    /// Initial touch press at a point.
    Press(TouchPoint),
    /// Touch drag to a new point.
    Drag(TouchPoint),
}

/// Result from handling a touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchResult {
    /// Event was handled by this element.
    Handled,
    /// Event was not handled, pass to the next element.
    NotHandled,
    /// Event triggered an action.
    Action(Action),
}

/// Discrete user actions the UI can trigger.
///
/// Every button on every page maps to exactly one variant; the session
/// dispatcher matches over them exhaustively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Navigate to a specific page.
    NavigateToPage(PageId),
    /// Go back to the previous page.
    GoBack,
    /// Perform one manual ranging exchange.
    Sample,
    /// Switch continuous sampling on or off.
    ToggleContinuous(bool),
    /// Append the last measurement to the history log.
    SaveToHistory,
    /// Empty the history log.
    ClearHistory,
    /// Latch the last measurement into capture slot A.
    CaptureA,
    /// Latch the last measurement into capture slot B.
    CaptureB,
}

/// Page identifier for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Measure,
    History,
}

/// State updates pushed to the active page.
///
/// Events carry cloned snapshots so pages never borrow the session.
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// Outcome of a ranging exchange (valid or the sentinel).
    Measurement(Measurement),
    /// Continuous sampling switched on (`true`) or off (`false`).
    SamplingState(bool),
    /// Re-rendered history panel text.
    History(HistoryText),
    /// Capture slots and derived surface after a capture action.
    Captures(CaptureSnapshot),
}

/// Dirty region tracking for partial redraws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirtyRegion {
    pub bounds: Rectangle,
    pub is_dirty: bool,
}

impl DirtyRegion {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            is_dirty: true,
        }
    }

    /// Expand this dirty region to include another rectangle.
    pub fn expand_to_include(&mut self, other: Rectangle) {
        if !self.is_dirty {
            self.bounds = other;
            self.is_dirty = true;
        } else {
            let min_x = self.bounds.top_left.x.min(other.top_left.x);
            let min_y = self.bounds.top_left.y.min(other.top_left.y);
            let max_x = (self.bounds.top_left.x + self.bounds.size.width as i32)
                .max(other.top_left.x + other.size.width as i32);
            let max_y = (self.bounds.top_left.y + self.bounds.size.height as i32)
                .max(other.top_left.y + other.size.height as i32);

            self.bounds = Rectangle::new(
                Point::new(min_x, min_y),
                Size::new((max_x - min_x) as u32, (max_y - min_y) as u32),
            );
        }
    }
}

/// Trait for any UI element that can be drawn.
pub trait Drawable {
    /// Draw the element to the display.
    fn draw<D: DrawTarget<Color = embedded_graphics::pixelcolor::Rgb565>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error>;

    /// Bounding rectangle of this element.
    fn bounds(&self) -> Rectangle;

    /// Whether this element needs to be redrawn.
    fn is_dirty(&self) -> bool;

    /// Clear the dirty flag after a successful draw.
    fn mark_clean(&mut self);

    /// Force a redraw on the next frame.
    fn mark_dirty(&mut self);

    /// Dirty region for partial updates.
    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.is_dirty() {
            Some(DirtyRegion::new(self.bounds()))
        } else {
            None
        }
    }
}

/// Trait for UI elements that respond to touch events.
pub trait Touchable {
    /// Whether a point falls within this element's bounds.
    fn contains_point(&self, point: TouchPoint) -> bool;

    /// Handle a touch event.
    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult;
}
