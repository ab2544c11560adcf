//! History page: the saved-measurement log and its clear action.

use embedded_graphics::prelude::*;
use embedded_graphics::{
    Drawable as EgDrawable,
    pixelcolor::Rgb565,
    primitives::{PrimitiveStyle, Rectangle},
};
use heapless::Vec;

use crate::history::HISTORY_HEADER;
use crate::pages::page::Page;
use crate::ui::{
    Action, Alignment, Button, ButtonVariant, Container, Direction, Drawable, MultiLineText,
    PageEvent, PageId, Padding, SizeConstraint, Style, TextSize, Theme, TouchEvent, TouchResult,
    Touchable,
};

const BUTTON_ROW_HEIGHT_PX: u32 = 36;

pub struct HistoryPage {
    bounds: Rectangle,
    theme: Theme,
    panel: MultiLineText,
    buttons: Vec<Button, 2>,
    dirty: bool,
}

impl HistoryPage {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            theme: Theme::default(),
            panel: MultiLineText::new(Rectangle::zero(), HISTORY_HEADER, TextSize::Medium),
            buttons: Vec::new(),
            dirty: true,
        }
    }

    /// Compute the layout and build the buttons.
    pub fn init(&mut self) {
        let theme = self.theme;
        let palette = theme.palette;

        let mut root = Container::<2>::new(self.bounds, Direction::Vertical)
            .with_alignment(Alignment::Stretch)
            .with_spacing(theme.spacing.medium)
            .with_padding(Padding::all(theme.spacing.medium));

        let panel_slot = root.add_child(Size::zero(), SizeConstraint::Expand);
        let button_row = root.add_child(Size::zero(), SizeConstraint::Fixed(BUTTON_ROW_HEIGHT_PX));

        if let Some(bounds) = panel_slot.ok().and_then(|i| root.child_bounds(i)) {
            self.panel = MultiLineText::new(bounds, HISTORY_HEADER, TextSize::Medium).with_style(
                Style::new()
                    .with_background(palette.surface)
                    .with_border(palette.border, 1)
                    .with_padding(Padding::all(theme.spacing.medium)),
            );
        }

        self.buttons.clear();
        if let Some(bounds) = button_row.ok().and_then(|i| root.child_bounds(i)) {
            let mut row = Container::<2>::new(bounds, Direction::Horizontal)
                .with_alignment(Alignment::Stretch)
                .with_spacing(theme.spacing.medium);
            let left = row.add_child(Size::zero(), SizeConstraint::Expand);
            let right = row.add_child(Size::zero(), SizeConstraint::Expand);

            if let Some(bounds) = left.ok().and_then(|i| row.child_bounds(i)) {
                self.buttons
                    .push(
                        Button::new(bounds, "Effacer", Action::ClearHistory)
                            .with_palette(palette)
                            .with_variant(ButtonVariant::Secondary),
                    )
                    .ok();
            }
            if let Some(bounds) = right.ok().and_then(|i| row.child_bounds(i)) {
                self.buttons
                    .push(
                        Button::new(bounds, "Retour", Action::GoBack)
                            .with_palette(palette)
                            .with_variant(ButtonVariant::Outline),
                    )
                    .ok();
            }
        }

        self.dirty = true;
    }
}

impl Page for HistoryPage {
    fn id(&self) -> PageId {
        PageId::History
    }

    fn title(&self) -> &str {
        "Historique"
    }

    fn on_activate(&mut self) {
        self.dirty = true;
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        for button in &mut self.buttons {
            match button.handle_touch(event) {
                TouchResult::Action(action) => return Some(action),
                TouchResult::Handled => return None,
                TouchResult::NotHandled => continue,
            }
        }
        None
    }

    fn update(&mut self) {}

    fn on_event(&mut self, event: &PageEvent) -> bool {
        match event {
            PageEvent::History(text) => {
                self.panel.set_text(text);
                Drawable::is_dirty(self)
            }
            _ => false,
        }
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        Drawable::draw(self, display)
    }

    fn bounds(&self) -> Rectangle {
        Drawable::bounds(self)
    }

    fn is_dirty(&self) -> bool {
        Drawable::is_dirty(self)
    }

    fn mark_clean(&mut self) {
        Drawable::mark_clean(self)
    }

    fn mark_dirty(&mut self) {
        Drawable::mark_dirty(self)
    }
}

impl Drawable for HistoryPage {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.theme.palette.background))
            .draw(display)?;

        self.panel.draw(display)?;
        for button in &self.buttons {
            button.draw(display)?;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.panel.is_dirty() || self.buttons.iter().any(|b| b.is_dirty())
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.panel.mark_clean();
        for button in &mut self.buttons {
            button.mark_clean();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::SessionState;
    use crate::measure::Measurement;
    use crate::ui::TouchPoint;

    fn page() -> HistoryPage {
        let mut page = HistoryPage::new(Rectangle::new(Point::zero(), Size::new(320, 240)));
        page.init();
        page
    }

    #[test]
    fn test_history_event_updates_panel() {
        let mut session = SessionState::new();
        session.record_measurement(Measurement::Distance(300));
        let _ = session.handle_action(Action::SaveToHistory);

        let mut page = page();
        Drawable::mark_clean(&mut page);

        assert!(page.on_event(&PageEvent::History(session.history_text())));
    }

    #[test]
    fn test_clear_button_emits_clear_action() {
        let mut page = page();
        let center = page.buttons[0].bounds().center();

        let action = page.handle_touch(TouchEvent::Press(TouchPoint::new(
            center.x as u16,
            center.y as u16,
        )));
        assert_eq!(action, Some(Action::ClearHistory));
    }

    #[test]
    fn test_other_events_are_ignored() {
        let mut page = page();
        Drawable::mark_clean(&mut page);

        assert!(!page.on_event(&PageEvent::Measurement(Measurement::Distance(1))));
    }
}
