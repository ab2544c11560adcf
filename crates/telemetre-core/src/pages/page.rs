//! Core page abstraction and type-erased wrapper for the UI page system.
//!
//! [`Page`] defines the lifecycle, rendering, and interaction contract for
//! every screen. Because `DrawTarget` is generic, the trait is not
//! object-safe; [`PageWrapper`] is the enum-based alternative that lets the
//! [`PageManager`](super::page_manager::PageManager) hold a heterogeneous
//! collection of concrete page types without `dyn`.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::core::{Action, PageEvent, PageId, TouchEvent};

extern crate alloc;
use alloc::boxed::Box;

/// Trait that all navigable UI pages must implement.
///
/// The page manager calls these methods in a well-defined order each frame:
/// `on_activate` once when the page becomes current, then per frame
/// `on_event` for incoming state updates, `update`, `handle_touch` for touch
/// input, `draw_page` when dirty, and finally `on_deactivate` when
/// navigating away.
pub trait Page {
    /// Unique identifier used for navigation and lookup.
    fn id(&self) -> PageId;

    /// Human-readable title (appears in debug logs).
    fn title(&self) -> &str;

    /// Called once when this page becomes the active page.
    fn on_activate(&mut self) {}

    /// Called once when this page is no longer the active page.
    fn on_deactivate(&mut self) {}

    /// Process a touch event and optionally return an [`Action`].
    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action>;

    /// Advance per-frame state.
    fn update(&mut self);

    /// Handle an incoming state update.
    ///
    /// Returns `true` if the event was consumed and the page needs a redraw.
    fn on_event(&mut self, _event: &PageEvent) -> bool {
        false
    }

    /// Render the entire page to the given display target.
    fn draw_page<D: DrawTarget<Color = embedded_graphics::pixelcolor::Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error>;

    /// Bounding rectangle of this page (typically the full screen).
    fn bounds(&self) -> Rectangle;

    /// Whether the page has regions that need redrawing.
    fn is_dirty(&self) -> bool;

    /// Clear the dirty flag after a successful draw.
    fn mark_clean(&mut self);

    /// Force the page to be redrawn on the next frame.
    fn mark_dirty(&mut self);
}

/// Forwards every call through to the boxed page.
impl<T: Page> Page for Box<T> {
    fn id(&self) -> PageId {
        (**self).id()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn on_activate(&mut self) {
        (**self).on_activate()
    }

    fn on_deactivate(&mut self) {
        (**self).on_deactivate()
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        (**self).handle_touch(event)
    }

    fn update(&mut self) {
        (**self).update()
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        (**self).on_event(event)
    }

    fn draw_page<D: DrawTarget<Color = embedded_graphics::pixelcolor::Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        (**self).draw_page(display)
    }

    fn bounds(&self) -> Rectangle {
        (**self).bounds()
    }

    fn is_dirty(&self) -> bool {
        (**self).is_dirty()
    }

    fn mark_clean(&mut self) {
        (**self).mark_clean()
    }

    fn mark_dirty(&mut self) {
        (**self).mark_dirty()
    }
}

/// Enum-based wrapper storing one of the concrete page types.
///
/// Each variant boxes its page to keep the enum size uniform. When adding a
/// new page to the application, add a variant here and extend the
/// delegation below.
pub enum PageWrapper {
    Measure(Box<crate::pages::measure::MeasurePage>),
    History(Box<crate::pages::history::HistoryPage>),
}

impl Page for PageWrapper {
    fn id(&self) -> PageId {
        match self {
            PageWrapper::Measure(page) => page.id(),
            PageWrapper::History(page) => page.id(),
        }
    }

    fn title(&self) -> &str {
        match self {
            PageWrapper::Measure(page) => page.title(),
            PageWrapper::History(page) => page.title(),
        }
    }

    fn on_activate(&mut self) {
        match self {
            PageWrapper::Measure(page) => page.on_activate(),
            PageWrapper::History(page) => page.on_activate(),
        }
    }

    fn on_deactivate(&mut self) {
        match self {
            PageWrapper::Measure(page) => page.on_deactivate(),
            PageWrapper::History(page) => page.on_deactivate(),
        }
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        match self {
            PageWrapper::Measure(page) => page.handle_touch(event),
            PageWrapper::History(page) => page.handle_touch(event),
        }
    }

    fn update(&mut self) {
        match self {
            PageWrapper::Measure(page) => page.update(),
            PageWrapper::History(page) => page.update(),
        }
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        match self {
            PageWrapper::Measure(page) => page.on_event(event),
            PageWrapper::History(page) => page.on_event(event),
        }
    }

    fn draw_page<D: DrawTarget<Color = embedded_graphics::pixelcolor::Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        match self {
            PageWrapper::Measure(page) => page.draw_page(display),
            PageWrapper::History(page) => page.draw_page(display),
        }
    }

    fn bounds(&self) -> Rectangle {
        match self {
            PageWrapper::Measure(page) => Page::bounds(page),
            PageWrapper::History(page) => Page::bounds(page),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            PageWrapper::Measure(page) => Page::is_dirty(page),
            PageWrapper::History(page) => Page::is_dirty(page),
        }
    }

    fn mark_clean(&mut self) {
        match self {
            PageWrapper::Measure(page) => Page::mark_clean(page),
            PageWrapper::History(page) => Page::mark_clean(page),
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            PageWrapper::Measure(page) => Page::mark_dirty(page),
            PageWrapper::History(page) => Page::mark_dirty(page),
        }
    }
}
