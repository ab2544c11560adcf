//! Measure page: live distance readout, sampling controls, capture slots.
//!
//! Layout (vertical):
//! - title
//! - distance readout
//! - `Mesurer` / `Continu` button row
//! - `Capture A` / `Capture B` button row
//! - slot A / slot B readout row
//! - surface readout
//! - `Enregistrer` / `Historique` button row

use embedded_graphics::prelude::*;
use embedded_graphics::text::Alignment as TextAlignment;
use embedded_graphics::{
    Drawable as EgDrawable,
    pixelcolor::Rgb565,
    primitives::{PrimitiveStyle, Rectangle},
};
use heapless::Vec;

use crate::measure::Measurement;
use crate::pages::page::Page;
use crate::readout;
use crate::ui::{
    Action, Alignment, Button, ButtonVariant, Container, Direction, Drawable, PageEvent, PageId,
    Padding, SizeConstraint, TextComponent, TextSize, Theme, TouchEvent, TouchResult, Touchable,
};

const TITLE_HEIGHT_PX: u32 = 24;
const READOUT_LARGE_HEIGHT_PX: u32 = 28;
const READOUT_SMALL_HEIGHT_PX: u32 = 14;
const BUTTON_ROW_HEIGHT_PX: u32 = 36;

/// Index of the `Continu` toggle in the button list.
const CONTINUOUS_BUTTON: usize = 1;

pub struct MeasurePage {
    bounds: Rectangle,
    theme: Theme,
    title: TextComponent,
    distance: TextComponent,
    slot_a: TextComponent,
    slot_b: TextComponent,
    area: TextComponent,
    buttons: Vec<Button, 6>,
    running: bool,
    dirty: bool,
}

impl MeasurePage {
    pub fn new(bounds: Rectangle) -> Self {
        let theme = Theme::default();
        let zero = Rectangle::zero();

        let title = TextComponent::new(zero, "Télémètre SRF02", TextSize::Large)
            .with_alignment(TextAlignment::Center);
        let distance = TextComponent::new(zero, readout::DISTANCE_PLACEHOLDER, TextSize::Large)
            .with_alignment(TextAlignment::Center);
        let slot_a = TextComponent::new(zero, "A : ---", TextSize::Medium);
        let slot_b = TextComponent::new(zero, "B : ---", TextSize::Medium);
        let area = TextComponent::new(zero, readout::AREA_PLACEHOLDER, TextSize::Medium);

        Self {
            bounds,
            theme,
            title,
            distance,
            slot_a,
            slot_b,
            area,
            buttons: Vec::new(),
            running: false,
            dirty: true,
        }
    }

    /// Compute the layout and build the buttons.
    pub fn init(&mut self) {
        let theme = self.theme;
        let palette = theme.palette;

        let mut root = Container::<7>::new(self.bounds, Direction::Vertical)
            .with_alignment(Alignment::Stretch)
            .with_spacing(theme.spacing.small)
            .with_padding(Padding::all(theme.spacing.medium));

        let title_slot = root.add_child(Size::zero(), SizeConstraint::Fixed(TITLE_HEIGHT_PX));
        let distance_slot =
            root.add_child(Size::zero(), SizeConstraint::Fixed(READOUT_LARGE_HEIGHT_PX));
        let sample_row = root.add_child(Size::zero(), SizeConstraint::Fixed(BUTTON_ROW_HEIGHT_PX));
        let capture_row = root.add_child(Size::zero(), SizeConstraint::Fixed(BUTTON_ROW_HEIGHT_PX));
        let slots_row = root.add_child(Size::zero(), SizeConstraint::Fixed(READOUT_SMALL_HEIGHT_PX));
        let area_slot =
            root.add_child(Size::zero(), SizeConstraint::Fixed(READOUT_SMALL_HEIGHT_PX));
        let bottom_row = root.add_child(Size::zero(), SizeConstraint::Fixed(BUTTON_ROW_HEIGHT_PX));

        if let Some(bounds) = title_slot.ok().and_then(|i| root.child_bounds(i)) {
            self.title.set_bounds(bounds);
        }
        if let Some(bounds) = distance_slot.ok().and_then(|i| root.child_bounds(i)) {
            self.distance.set_bounds(bounds);
        }
        if let Some(bounds) = area_slot.ok().and_then(|i| root.child_bounds(i)) {
            self.area.set_bounds(bounds);
        }

        if let Some(bounds) = slots_row.ok().and_then(|i| root.child_bounds(i)) {
            let (left, right) = Self::split_row(bounds, theme.spacing.medium);
            self.slot_a.set_bounds(left);
            self.slot_b.set_bounds(right);
        }

        self.buttons.clear();

        if let Some(bounds) = sample_row.ok().and_then(|i| root.child_bounds(i)) {
            let (left, right) = Self::split_row(bounds, theme.spacing.medium);
            self.buttons
                .push(
                    Button::new(left, "Mesurer", Action::Sample)
                        .with_palette(palette)
                        .with_variant(ButtonVariant::Primary),
                )
                .ok();
            // Placeholder bool; the page substitutes its own toggle state
            // when the button fires.
            self.buttons
                .push(
                    Button::new(right, "Continu", Action::ToggleContinuous(true))
                        .with_palette(palette)
                        .with_variant(ButtonVariant::Outline),
                )
                .ok();
        }

        if let Some(bounds) = capture_row.ok().and_then(|i| root.child_bounds(i)) {
            let (left, right) = Self::split_row(bounds, theme.spacing.medium);
            self.buttons
                .push(
                    Button::new(left, "Capture A", Action::CaptureA)
                        .with_palette(palette)
                        .with_variant(ButtonVariant::Secondary),
                )
                .ok();
            self.buttons
                .push(
                    Button::new(right, "Capture B", Action::CaptureB)
                        .with_palette(palette)
                        .with_variant(ButtonVariant::Secondary),
                )
                .ok();
        }

        if let Some(bounds) = bottom_row.ok().and_then(|i| root.child_bounds(i)) {
            let (left, right) = Self::split_row(bounds, theme.spacing.medium);
            self.buttons
                .push(
                    Button::new(left, "Enregistrer", Action::SaveToHistory)
                        .with_palette(palette)
                        .with_variant(ButtonVariant::Secondary),
                )
                .ok();
            self.buttons
                .push(
                    Button::new(right, "Historique", Action::NavigateToPage(PageId::History))
                        .with_palette(palette)
                        .with_variant(ButtonVariant::Outline),
                )
                .ok();
        }

        self.dirty = true;
    }

    /// Split a row into two equal halves with a gap between them.
    fn split_row(row: Rectangle, gap: u32) -> (Rectangle, Rectangle) {
        let mut half = Container::<2>::new(row, Direction::Horizontal)
            .with_alignment(Alignment::Stretch)
            .with_spacing(gap);
        let left = half.add_child(Size::zero(), SizeConstraint::Expand);
        let right = half.add_child(Size::zero(), SizeConstraint::Expand);

        let fallback = Rectangle::zero();
        (
            left.ok().and_then(|i| half.child_bounds(i)).unwrap_or(fallback),
            right
                .ok()
                .and_then(|i| half.child_bounds(i))
                .unwrap_or(fallback),
        )
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
        let variant = if running {
            ButtonVariant::Primary
        } else {
            ButtonVariant::Outline
        };
        if let Some(button) = self.buttons.get_mut(CONTINUOUS_BUTTON) {
            button.set_variant(variant);
        }
    }

    fn apply_captures(&mut self, a: Measurement, b: Measurement, area_m2: Option<f32>) {
        self.slot_a.set_text(&readout::slot_line('A', a));
        self.slot_b.set_text(&readout::slot_line('B', b));
        // Without both slots the surface readout keeps its previous value.
        if let Some(area) = area_m2 {
            self.area.set_text(&readout::area_line(area));
        }
    }
}

impl Page for MeasurePage {
    fn id(&self) -> PageId {
        PageId::Measure
    }

    fn title(&self) -> &str {
        "Mesure"
    }

    fn on_activate(&mut self) {
        self.dirty = true;
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        for button in &mut self.buttons {
            match button.handle_touch(event) {
                TouchResult::Action(Action::ToggleContinuous(_)) => {
                    // The button's stored bool is a placeholder; flip the
                    // page-tracked state and emit that instead.
                    let running = !self.running;
                    self.set_running(running);
                    return Some(Action::ToggleContinuous(running));
                }
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
            PageEvent::Measurement(m) => {
                self.distance.set_text(&readout::distance_line(*m));
            }
            PageEvent::SamplingState(running) => {
                self.set_running(*running);
                if !running {
                    self.distance.set_text(readout::SAMPLING_STOPPED);
                }
            }
            PageEvent::Captures(snapshot) => {
                self.apply_captures(snapshot.a, snapshot.b, snapshot.area_m2);
            }
            // The history panel lives on its own page.
            PageEvent::History(_) => return false,
        }
        Drawable::is_dirty(self)
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

impl Drawable for MeasurePage {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.theme.palette.background))
            .draw(display)?;

        self.title.draw(display)?;
        self.distance.draw(display)?;
        self.slot_a.draw(display)?;
        self.slot_b.draw(display)?;
        self.area.draw(display)?;

        for button in &self.buttons {
            button.draw(display)?;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.title.is_dirty()
            || self.distance.is_dirty()
            || self.slot_a.is_dirty()
            || self.slot_b.is_dirty()
            || self.area.is_dirty()
            || self.buttons.iter().any(|b| b.is_dirty())
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.title.mark_clean();
        self.distance.mark_clean();
        self.slot_a.mark_clean();
        self.slot_b.mark_clean();
        self.area.mark_clean();
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
    use crate::capture::CaptureSnapshot;

    fn page() -> MeasurePage {
        let mut page = MeasurePage::new(Rectangle::new(Point::zero(), Size::new(320, 240)));
        page.init();
        page
    }

    fn press_button(page: &mut MeasurePage, index: usize) -> Option<Action> {
        let center = page.buttons[index].bounds().center();
        page.handle_touch(TouchEvent::Press(crate::ui::TouchPoint::new(
            center.x as u16,
            center.y as u16,
        )))
    }

    #[test]
    fn test_measurement_event_updates_distance_readout() {
        let mut page = page();
        Drawable::mark_clean(&mut page);

        assert!(page.on_event(&PageEvent::Measurement(Measurement::Distance(100))));
        assert_eq!(page.distance.text(), "Distance : 100 cm");

        let _ = page.on_event(&PageEvent::Measurement(Measurement::Invalid));
        assert_eq!(page.distance.text(), "Erreur I2C !");
    }

    #[test]
    fn test_toggle_button_alternates_state() {
        let mut page = page();

        assert_eq!(
            press_button(&mut page, CONTINUOUS_BUTTON),
            Some(Action::ToggleContinuous(true))
        );
        assert_eq!(
            press_button(&mut page, CONTINUOUS_BUTTON),
            Some(Action::ToggleContinuous(false))
        );
    }

    #[test]
    fn test_stop_event_shows_stopped_text() {
        let mut page = page();
        let _ = page.on_event(&PageEvent::Measurement(Measurement::Distance(55)));

        let _ = page.on_event(&PageEvent::SamplingState(false));
        assert_eq!(page.distance.text(), readout::SAMPLING_STOPPED);
    }

    #[test]
    fn test_area_readout_keeps_last_value_without_both_slots() {
        let mut page = page();

        let _ = page.on_event(&PageEvent::Captures(CaptureSnapshot {
            a: Measurement::Distance(300),
            b: Measurement::Distance(400),
            area_m2: Some(12.0),
        }));
        assert_eq!(page.area.text(), "Surface : 12.00 m2");

        // Slot A re-captured while the bus is down: no new surface.
        let _ = page.on_event(&PageEvent::Captures(CaptureSnapshot {
            a: Measurement::Invalid,
            b: Measurement::Distance(400),
            area_m2: None,
        }));
        assert_eq!(page.slot_a.text(), "A : ---");
        assert_eq!(page.area.text(), "Surface : 12.00 m2");
    }

    #[test]
    fn test_sample_button_emits_sample_action() {
        let mut page = page();
        assert_eq!(press_button(&mut page, 0), Some(Action::Sample));
    }
}
