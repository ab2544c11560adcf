mod srf02;

use thiserror_no_std::Error;

/// The only error the sampling path distinguishes: the bus exchange did not
/// produce a complete reading. Not retried, surfaced as a readout text only.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    #[error("i2c bus unavailable")]
    Bus,
}

/// Trait for sensors that measure a distance in centimeters.
///
/// The blocking settle wait of a ranging exchange happens inside
/// [`measure`](RangeSensor::measure); callers await it inline, so no two
/// exchanges ever overlap.
pub trait RangeSensor {
    /// Perform one complete ranging exchange.
    fn measure(&mut self) -> impl Future<Output = Result<u16, SensorError>>;
}

pub use srf02::{SETTLE_DELAY_MS, SRF02_ADDRESS, Srf02};
