//! Device-wide constants shared by the firmware and the simulator.

use embassy_time::Duration;

/// Display panel width in pixels (ILI9342C, landscape).
pub const DISPLAY_WIDTH_PX: u16 = 320;

/// Display panel height in pixels.
pub const DISPLAY_HEIGHT_PX: u16 = 240;

/// Interval between two measurements while continuous sampling is running.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(500);

/// Number of measurements kept in the history log.
pub const HISTORY_CAPACITY: usize = 10;
