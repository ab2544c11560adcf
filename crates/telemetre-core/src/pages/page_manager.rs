//! Page manager with navigation and event dispatching.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use log::debug;

use crate::pages::page::{Page, PageWrapper};
use crate::ui::core::{Action, PageEvent, PageId, TouchEvent};

/// Manages page navigation, rendering, and event dispatching.
pub struct PageManager {
    pages: Vec<PageWrapper, 4>,
    current_page: PageId,
    navigation_stack: Vec<PageId, 4>,
    display_bounds: Rectangle,
}

impl PageManager {
    pub fn new(initial_page: PageId, display_bounds: Rectangle) -> Self {
        Self {
            pages: Vec::new(),
            current_page: initial_page,
            navigation_stack: Vec::new(),
            display_bounds,
        }
    }

    /// Register a new page
    pub fn register_page(&mut self, page: PageWrapper) {
        self.pages.push(page).ok();
    }

    /// Navigate to a specific page
    pub fn navigate_to(&mut self, page_id: PageId) {
        if let Some(current) = self.current_page_mut() {
            current.on_deactivate();
        }

        // Push current page to stack for back navigation
        self.navigation_stack.push(self.current_page).ok();
        self.current_page = page_id;

        if let Some(new_page) = self.current_page_mut() {
            new_page.on_activate();
        }
    }

    /// Go back to the previous page
    pub fn go_back(&mut self) -> bool {
        if let Some(prev_page) = self.navigation_stack.pop() {
            if let Some(current) = self.current_page_mut() {
                current.on_deactivate();
            }
            self.current_page = prev_page;
            if let Some(page) = self.current_page_mut() {
                page.on_activate();
            }
            true
        } else {
            false
        }
    }

    fn current_page_mut(&mut self) -> Option<&mut PageWrapper> {
        self.pages.iter_mut().find(|p| p.id() == self.current_page)
    }

    fn current_page(&self) -> Option<&PageWrapper> {
        self.pages.iter().find(|p| p.id() == self.current_page)
    }

    /// Forward a touch event to the current page, returning its action if any
    pub fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        debug!("touch event: {:?}", event);
        if let Some(page) = self.current_page_mut() {
            let result = page.handle_touch(event);
            debug!("touch result: {:?}", result);
            result
        } else {
            None
        }
    }

    /// Dispatch a state update to the current page.
    /// Returns true if the page needs a redraw.
    pub fn dispatch_event(&mut self, event: &PageEvent) -> bool {
        debug!("event for {:?}: {:?}", self.current_page, event);
        if let Some(page) = self.current_page_mut() {
            page.on_event(event)
        } else {
            false
        }
    }

    /// Advance the current page's per-frame state
    pub fn update(&mut self) {
        if let Some(page) = self.current_page_mut() {
            page.update();
        }
    }

    /// Draw the current page if it has pending changes.
    /// Returns whether anything was drawn.
    pub fn draw_dirty<D: DrawTarget<Color = embedded_graphics::pixelcolor::Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        if let Some(page) = self.current_page_mut() {
            if page.is_dirty() {
                page.draw_page(display)?;
                page.mark_clean();
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether the current page needs a redraw
    pub fn is_dirty(&self) -> bool {
        self.current_page().is_some_and(|page| page.is_dirty())
    }

    pub fn current_page_id(&self) -> PageId {
        self.current_page
    }

    pub fn display_bounds(&self) -> Rectangle {
        self.display_bounds
    }
}
