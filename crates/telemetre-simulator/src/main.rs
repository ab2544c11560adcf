//! Desktop simulator for the telemetre-rs distance-meter UI.
//!
//! Renders the telemetre-core pages in an SDL2 window via
//! `embedded-graphics-simulator` and replaces the SRF02 with a synthetic
//! range generator so every action can be exercised without hardware.
//!
//! # Key bindings
//!
//! | Key   | Action                          |
//! |-------|---------------------------------|
//! | M     | Manual measurement              |
//! | C     | Toggle continuous sampling      |
//! | S     | Save to history                 |
//! | A / B | Capture slot A / B              |
//! | H     | History page                    |
//! | E     | Toggle simulated bus failure    |
//! | Q     | Quit                            |
//!
//! Mouse clicks are forwarded as touch events, so the on-screen buttons work
//! exactly as they do on the device.

use std::cell::Cell;
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::info;

use telemetre_core::app_state::{Effect, SamplingMode, SessionState};
use telemetre_core::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, SAMPLE_INTERVAL};
use telemetre_core::pages::{HistoryPage, MeasurePage, PageManager, PageWrapper};
use telemetre_core::sampler::Sampler;
use telemetre_core::sensors::{RangeSensor, SETTLE_DELAY_MS, SensorError};
use telemetre_core::ui::{Action, PageEvent, PageId, TouchEvent, TouchPoint};

extern crate alloc;
use alloc::boxed::Box;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

// ---------------------------------------------------------------------------
// Mock sensor
// ---------------------------------------------------------------------------

/// Synthetic range sensor standing in for the SRF02.
///
/// Produces a slowly drifting distance and emulates the sensor's settle time
/// with a real blocking sleep, so the simulator stalls during a measurement
/// just like the device does. Flipping `bus_ok` simulates unplugging the
/// sensor from the bus.
struct MockRangeSensor {
    start: Instant,
    bus_ok: Rc<Cell<bool>>,
}

impl MockRangeSensor {
    fn new(bus_ok: Rc<Cell<bool>>) -> Self {
        Self {
            start: Instant::now(),
            bus_ok,
        }
    }
}

impl RangeSensor for MockRangeSensor {
    async fn measure(&mut self) -> Result<u16, SensorError> {
        // Ranging settle time, same stall as the real exchange.
        std::thread::sleep(Duration::from_millis(SETTLE_DELAY_MS as u64));

        if !self.bus_ok.get() {
            return Err(SensorError::Bus);
        }

        let t = self.start.elapsed().as_secs_f64();
        let cm = 150.0 + 100.0 * (t / 7.0).sin() + 8.0 * (t / 1.3).cos();

        // The SRF02 cannot range below ~16 cm.
        Ok(cm.max(16.0) as u16)
    }
}

/// Drive a future to completion on this thread.
///
/// The mock sensor never yields to a reactor, so a no-op waker poll loop is
/// sufficient.
fn block_on<F: Future>(fut: F) -> F::Output {
    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
            return out;
        }
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

fn screen_bounds() -> Rectangle {
    Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
    )
}

fn build_pages() -> PageManager {
    let bounds = screen_bounds();
    let mut pages = PageManager::new(PageId::Measure, bounds);

    let mut measure = MeasurePage::new(bounds);
    measure.init();
    pages.register_page(PageWrapper::Measure(Box::new(measure)));

    let mut history = HistoryPage::new(bounds);
    history.init();
    pages.register_page(PageWrapper::History(Box::new(history)));

    pages
}

/// Push the full state snapshot to the (freshly) current page so it shows
/// up-to-date readouts after navigation.
fn refresh_current_page(pages: &mut PageManager, session: &SessionState) {
    let _ = pages.dispatch_event(&PageEvent::Measurement(session.last_measurement()));
    let _ = pages.dispatch_event(&PageEvent::Captures(session.capture_snapshot()));
    let _ = pages.dispatch_event(&PageEvent::History(session.history_text()));
    let _ = pages.dispatch_event(&PageEvent::SamplingState(
        session.sampling_mode() == SamplingMode::Running,
    ));
}

// ---------------------------------------------------------------------------
// Action dispatch
// ---------------------------------------------------------------------------

/// Route one UI action: navigation to the page manager, everything else
/// through the session dispatcher, then realize the returned effect.
fn apply_action(
    action: Action,
    session: &mut SessionState,
    sampler: &mut Sampler<MockRangeSensor>,
    pages: &mut PageManager,
    next_tick: &mut Instant,
) {
    match action {
        Action::NavigateToPage(page_id) => {
            info!("navigate to {:?}", page_id);
            pages.navigate_to(page_id);
            refresh_current_page(pages, session);
        }
        Action::GoBack => {
            if pages.go_back() {
                refresh_current_page(pages, session);
            }
        }
        other => match session.handle_action(other) {
            Effect::SampleNow => {
                let m = block_on(sampler.sample(session));
                let _ = pages.dispatch_event(&PageEvent::Measurement(m));
            }
            Effect::StartContinuous => {
                info!("continuous sampling started");
                *next_tick = Instant::now() + sample_interval();
                let _ = pages.dispatch_event(&PageEvent::SamplingState(true));
            }
            Effect::StopContinuous => {
                info!("continuous sampling stopped");
                let _ = pages.dispatch_event(&PageEvent::SamplingState(false));
            }
            Effect::HistoryChanged => {
                let _ = pages.dispatch_event(&PageEvent::History(session.history_text()));
            }
            Effect::CapturesChanged => {
                let _ = pages.dispatch_event(&PageEvent::Captures(session.capture_snapshot()));
            }
            Effect::None => {}
        },
    }
}

fn sample_interval() -> Duration {
    Duration::from_millis(SAMPLE_INTERVAL.as_millis())
}

/// Map a keyboard shortcut to the same actions the on-screen buttons emit.
fn keycode_to_action(keycode: Keycode, session: &SessionState) -> Option<Action> {
    match keycode {
        Keycode::M => Some(Action::Sample),
        Keycode::C => Some(Action::ToggleContinuous(
            session.sampling_mode() == SamplingMode::Idle,
        )),
        Keycode::S => Some(Action::SaveToHistory),
        Keycode::A => Some(Action::CaptureA),
        Keycode::B => Some(Action::CaptureB),
        Keycode::H => Some(Action::NavigateToPage(PageId::History)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting telemetre-rs simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: M=Mesurer  C=Continu  S=Enregistrer  A/B=Capture  H=Historique  E=BusError  Q=Quit");

    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Telemetre Simulator", &output_settings);

    let bus_ok = Rc::new(Cell::new(true));
    let mut sampler = Sampler::new(MockRangeSensor::new(Rc::clone(&bus_ok)));
    let mut session = SessionState::new();
    let mut pages = build_pages();

    // Deadline for the next continuous-sampling tick (only consulted while
    // the session is in the Running mode).
    let mut next_tick = Instant::now();

    // The SDL window is lazily initialized on the first `update()` call; it
    // must happen once before `events()` is polled.
    let _ = display.clear(Rgb565::BLACK);
    let _ = pages.draw_dirty(&mut display);
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }

                    if keycode == Keycode::E {
                        let ok = !bus_ok.get();
                        bus_ok.set(ok);
                        info!("bus {}", if ok { "restored" } else { "failing" });
                        continue;
                    }

                    if let Some(action) = keycode_to_action(keycode, &session) {
                        apply_action(action, &mut session, &mut sampler, &mut pages, &mut next_tick);
                    }
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    let touch = TouchEvent::Press(TouchPoint::new(
                        point.x.max(0) as u16,
                        point.y.max(0) as u16,
                    ));

                    if let Some(action) = pages.handle_touch(touch) {
                        apply_action(action, &mut session, &mut sampler, &mut pages, &mut next_tick);
                    }
                }

                _ => {}
            }
        }

        // --- Continuous sampling tick -------------------------------------
        if session.sampling_mode() == SamplingMode::Running && Instant::now() >= next_tick {
            let m = block_on(sampler.sample(&mut session));
            let _ = pages.dispatch_event(&PageEvent::Measurement(m));
            next_tick = Instant::now() + sample_interval();
        }

        // --- Page update tick ---------------------------------------------
        pages.update();

        // --- Render -------------------------------------------------------
        if pages.is_dirty() {
            let _ = display.clear(Rgb565::BLACK);
            if let Err(e) = pages.draw_dirty(&mut display) {
                log::error!("draw error: {:?}", e);
            }
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
