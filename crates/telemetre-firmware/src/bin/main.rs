#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_time::{Ticker, Timer};
use esp_hal::Async;
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::timer::timg::TimerGroup;
use rtt_target::rprintln;

// Display-LCD panel specific imports
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::{Builder as MipidsiBuilder, models::ILI9342CRgb565};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use telemetre_firmware::ft6336u::{FT6336U, TouchStatus};

use telemetre_core::app_state::{Effect, SessionState, TOUCH_CHANNEL};
use telemetre_core::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, SAMPLE_INTERVAL};
use telemetre_core::pages::{HistoryPage, MeasurePage, PageManager, PageWrapper};
use telemetre_core::sampler::Sampler;
use telemetre_core::sensors::Srf02;
use telemetre_core::ui::{Action, PageEvent, PageId, TouchEvent, TouchPoint};

extern crate alloc;
use alloc::boxed::Box;

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
esp_bootloader_esp_idf::esp_app_desc!();

/// Poll interval of the touch controller.
const TOUCH_POLL_MS: u64 = 20;

/// Polls the FT6336U and forwards new contacts to the application loop.
#[embassy_executor::task]
async fn touch_task(mut touch: FT6336U<I2c<'static, Async>>) -> ! {
    loop {
        if let Ok(Some(sample)) = touch.scan().await
            && sample.status == TouchStatus::Touch
        {
            TOUCH_CHANNEL
                .send(TouchEvent::Press(TouchPoint::new(sample.x, sample.y)))
                .await;
        }
        Timer::after_millis(TOUCH_POLL_MS).await;
    }
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_print!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 73744);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    rprintln!("Embassy initialized!");

    // Configure and initialize the display

    // 1. Configure SPI bus
    let spi_bus = Spi::new(peripherals.SPI2, SpiConfig::default())
        .unwrap()
        .with_sck(peripherals.GPIO36)
        .with_mosi(peripherals.GPIO37);

    // 2. Create a dummy CS pin (we don't use hardware CS for this display)
    let cs = Output::new(peripherals.GPIO35, Level::High, OutputConfig::default());

    // 3. Wrap the SPI bus as a SPI device (required by embedded-hal traits)
    let spi_device = ExclusiveDevice::new_no_delay(spi_bus, cs).unwrap();

    // 4. Set up DC (Data/Command) pin
    let dc = Output::new(peripherals.GPIO34, Level::Low, OutputConfig::default());

    // 5. Create a buffer for SPI batching (larger = faster, uses more RAM)
    let mut spi_buffer = [0u8; 64];

    // 6. Create display interface
    let di = SpiInterface::new(spi_device, dc, &mut spi_buffer);

    // 7. Build and initialize the display driver
    let mut display = MipidsiBuilder::new(ILI9342CRgb565, di)
        .display_size(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)
        .init(&mut embassy_time::Delay)
        .expect("Failed to initialize display");

    rprintln!("Display initialized!");

    // SRF02 on the external I2C port
    let sensor_bus = I2c::new(peripherals.I2C0, I2cConfig::default())
        .unwrap()
        .with_sda(peripherals.GPIO2)
        .with_scl(peripherals.GPIO1)
        .into_async();
    let mut sampler = Sampler::new(Srf02::new(sensor_bus, embassy_time::Delay));

    // FT6336U touch controller on the internal I2C bus
    let touch_bus = I2c::new(peripherals.I2C1, I2cConfig::default())
        .unwrap()
        .with_sda(peripherals.GPIO12)
        .with_scl(peripherals.GPIO11)
        .into_async();
    spawner.must_spawn(touch_task(FT6336U::new(touch_bus)));

    // Application state and pages
    let bounds = Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
    );
    let mut session = SessionState::new();
    let mut pages = PageManager::new(PageId::Measure, bounds);

    let mut measure_page = MeasurePage::new(bounds);
    measure_page.init();
    pages.register_page(PageWrapper::Measure(Box::new(measure_page)));

    let mut history_page = HistoryPage::new(bounds);
    history_page.init();
    pages.register_page(PageWrapper::History(Box::new(history_page)));

    let _ = display.clear(Rgb565::BLACK);
    let _ = pages.draw_dirty(&mut display);

    rprintln!("Telemetre ready");

    // At most one periodic trigger exists; the session's idempotent
    // start/stop transitions guarantee it.
    let mut ticker: Option<Ticker> = None;

    loop {
        // Wait for a touch, or for the next periodic tick while running.
        let touch_event = if let Some(t) = ticker.as_mut() {
            match select(TOUCH_CHANNEL.receive(), t.next()).await {
                Either::First(event) => Some(event),
                Either::Second(()) => None,
            }
        } else {
            Some(TOUCH_CHANNEL.receive().await)
        };

        match touch_event {
            Some(event) => {
                if let Some(action) = pages.handle_touch(event) {
                    match action {
                        Action::NavigateToPage(page_id) => {
                            pages.navigate_to(page_id);
                            refresh_current_page(&mut pages, &session, ticker.is_some());
                        }
                        Action::GoBack => {
                            if pages.go_back() {
                                refresh_current_page(&mut pages, &session, ticker.is_some());
                            }
                        }
                        other => match session.handle_action(other) {
                            Effect::SampleNow => {
                                let m = sampler.sample(&mut session).await;
                                let _ = pages.dispatch_event(&PageEvent::Measurement(m));
                            }
                            Effect::StartContinuous => {
                                if ticker.is_none() {
                                    ticker = Some(Ticker::every(SAMPLE_INTERVAL));
                                }
                                let _ = pages.dispatch_event(&PageEvent::SamplingState(true));
                            }
                            Effect::StopContinuous => {
                                ticker = None;
                                let _ = pages.dispatch_event(&PageEvent::SamplingState(false));
                            }
                            Effect::HistoryChanged => {
                                let _ = pages
                                    .dispatch_event(&PageEvent::History(session.history_text()));
                            }
                            Effect::CapturesChanged => {
                                let _ = pages.dispatch_event(&PageEvent::Captures(
                                    session.capture_snapshot(),
                                ));
                            }
                            Effect::None => {}
                        },
                    }
                }
            }
            // Periodic tick: same exchange as a manual measurement. The
            // settle wait stalls this loop, so samples never overlap.
            None => {
                let m = sampler.sample(&mut session).await;
                let _ = pages.dispatch_event(&PageEvent::Measurement(m));
            }
        }

        if pages.is_dirty() {
            let _ = display.clear(Rgb565::BLACK);
            if let Err(e) = pages.draw_dirty(&mut display) {
                rprintln!("draw error: {:?}", e);
            }
        }
    }
}

/// Push the full state snapshot to the (freshly) current page.
fn refresh_current_page(pages: &mut PageManager, session: &SessionState, running: bool) {
    let _ = pages.dispatch_event(&PageEvent::Measurement(session.last_measurement()));
    let _ = pages.dispatch_event(&PageEvent::Captures(session.capture_snapshot()));
    let _ = pages.dispatch_event(&PageEvent::History(session.history_text()));
    let _ = pages.dispatch_event(&PageEvent::SamplingState(running));
}
