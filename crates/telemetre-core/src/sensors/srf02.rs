//! SRF02 ultrasonic range finder driver.
//!
//! The SRF02 sits on the I2C bus and needs a two-phase exchange per reading:
//! a ranging command, a fixed settle time while the ping is in flight, then a
//! two-byte big-endian read of the result register.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use super::{RangeSensor, SensorError};

/// Factory-default bus address of the SRF02.
pub const SRF02_ADDRESS: u8 = 0x70;

/// Time the sensor needs to complete a ranging cycle before the result
/// registers are valid.
pub const SETTLE_DELAY_MS: u32 = 70;

/// Command register.
const REG_COMMAND: u8 = 0x00;

/// High byte of the 16-bit range result; the low byte follows at 0x03.
const REG_RANGE_HIGH: u8 = 0x02;

/// "Real ranging mode, result in centimeters".
const CMD_RANGE_CM: u8 = 0x51;

/// SRF02 driver over any async I2C bus and delay provider.
pub struct Srf02<I, D> {
    i2c: I,
    delay: D,
    address: u8,
}

impl<I, D> Srf02<I, D> {
    /// Driver at the factory-default address.
    pub fn new(i2c: I, delay: D) -> Self {
        Self::with_address(i2c, delay, SRF02_ADDRESS)
    }

    /// Driver at a re-programmed address.
    pub fn with_address(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }
}

impl<I: I2c, D: DelayNs> Srf02<I, D> {
    /// One ranging exchange: command, settle, result read.
    async fn range_cm(&mut self) -> Result<u16, SensorError> {
        self.i2c
            .write(self.address, &[REG_COMMAND, CMD_RANGE_CM])
            .await
            .map_err(|_| SensorError::Bus)?;

        self.delay.delay_ms(SETTLE_DELAY_MS).await;

        let mut result = [0u8; 2];
        self.i2c
            .write_read(self.address, &[REG_RANGE_HIGH], &mut result)
            .await
            .map_err(|_| SensorError::Bus)?;

        Ok(u16::from_be_bytes(result))
    }
}

impl<I: I2c, D: DelayNs> RangeSensor for Srf02<I, D> {
    async fn measure(&mut self) -> Result<u16, SensorError> {
        self.range_cm().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::block_on;

    use alloc::vec::Vec;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, Operation};

    struct NoopDelay;

    impl DelayNs for NoopDelay {
        async fn delay_ns(&mut self, _ns: u32) {}
    }

    #[derive(Debug, PartialEq)]
    enum BusOp {
        Write(u8, Vec<u8>),
        WriteRead(u8, Vec<u8>, usize),
    }

    /// Bus double that records every operation and answers reads from a
    /// canned response.
    struct ScriptedBus {
        ops: Vec<BusOp>,
        response: Result<[u8; 2], ()>,
    }

    impl ScriptedBus {
        fn answering(response: [u8; 2]) -> Self {
            Self {
                ops: Vec::new(),
                response: Ok(response),
            }
        }

        fn failing() -> Self {
            Self {
                ops: Vec::new(),
                response: Err(()),
            }
        }
    }

    impl ErrorType for ScriptedBus {
        type Error = ErrorKind;
    }

    impl I2c for ScriptedBus {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            match operations {
                [Operation::Write(bytes)] => {
                    self.ops.push(BusOp::Write(address, bytes.to_vec()));
                    Ok(())
                }
                [Operation::Write(bytes), Operation::Read(buf)] => {
                    self.ops
                        .push(BusOp::WriteRead(address, bytes.to_vec(), buf.len()));
                    match self.response {
                        Ok(data) => {
                            buf.copy_from_slice(&data);
                            Ok(())
                        }
                        Err(()) => Err(ErrorKind::Other),
                    }
                }
                _ => Err(ErrorKind::Other),
            }
        }
    }

    #[test]
    fn test_ranging_exchange_sequence() {
        let mut sensor = Srf02::new(ScriptedBus::answering([0x00, 0x64]), NoopDelay);

        let cm = block_on(sensor.measure()).unwrap();
        assert_eq!(cm, 100);

        assert_eq!(
            sensor.i2c.ops,
            [
                BusOp::Write(SRF02_ADDRESS, [REG_COMMAND, CMD_RANGE_CM].to_vec()),
                BusOp::WriteRead(SRF02_ADDRESS, [REG_RANGE_HIGH].to_vec(), 2),
            ]
        );
    }

    #[test]
    fn test_bus_failure_maps_to_sensor_error() {
        let mut sensor = Srf02::new(ScriptedBus::failing(), NoopDelay);
        assert_eq!(block_on(sensor.measure()), Err(SensorError::Bus));
    }

    #[test]
    fn test_custom_address_is_used() {
        let mut sensor = Srf02::with_address(ScriptedBus::answering([0x01, 0x2C]), NoopDelay, 0x71);

        assert_eq!(block_on(sensor.measure()), Ok(300));
        assert!(matches!(sensor.i2c.ops[0], BusOp::Write(0x71, _)));
    }
}
