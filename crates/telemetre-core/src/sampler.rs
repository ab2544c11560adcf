//! Measurement sampler.
//!
//! One sampler instance owns the range sensor and turns ranging exchanges
//! into [`Measurement`]s. Every exchange, successful or not, overwrites the
//! session's last measurement; a transient bus error therefore erases the
//! last known good value (documented contract of the device).

use log::warn;

use crate::app_state::SessionState;
use crate::measure::Measurement;
use crate::sensors::RangeSensor;

pub struct Sampler<S> {
    sensor: S,
}

impl<S: RangeSensor> Sampler<S> {
    pub fn new(sensor: S) -> Self {
        Self { sensor }
    }

    /// Perform one ranging exchange and record the outcome.
    ///
    /// Returns the measurement so the caller can push the readout update.
    /// Failure is not retried or escalated; it only shows up as the error
    /// readout and the invalid sentinel.
    pub async fn sample(&mut self, session: &mut SessionState) -> Measurement {
        let m = match self.sensor.measure().await {
            Ok(cm) => Measurement::Distance(cm),
            Err(e) => {
                warn!("ranging exchange failed: {:?}", e);
                Measurement::Invalid
            }
        };

        session.record_measurement(m);
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::SensorError;
    use crate::test_util::block_on;

    use alloc::collections::VecDeque;

    /// Sensor double that replays a scripted sequence of outcomes.
    struct ScriptedSensor {
        outcomes: VecDeque<Result<u16, SensorError>>,
    }

    impl ScriptedSensor {
        fn new(outcomes: impl IntoIterator<Item = Result<u16, SensorError>>) -> Self {
            Self {
                outcomes: outcomes.into_iter().collect(),
            }
        }
    }

    impl RangeSensor for ScriptedSensor {
        async fn measure(&mut self) -> Result<u16, SensorError> {
            self.outcomes.pop_front().expect("script exhausted")
        }
    }

    #[test]
    fn test_successful_sample_updates_last_measurement() {
        let mut sampler = Sampler::new(ScriptedSensor::new([Ok(100)]));
        let mut session = SessionState::new();

        let m = block_on(sampler.sample(&mut session));
        assert_eq!(m, Measurement::Distance(100));
        assert_eq!(session.last_measurement(), Measurement::Distance(100));
    }

    #[test]
    fn test_failure_overwrites_last_known_good_value() {
        let mut sampler = Sampler::new(ScriptedSensor::new([Ok(100), Err(SensorError::Bus)]));
        let mut session = SessionState::new();

        let _ = block_on(sampler.sample(&mut session));
        let m = block_on(sampler.sample(&mut session));

        assert_eq!(m, Measurement::Invalid);
        // The previous good value is gone, per the documented contract.
        assert_eq!(session.last_measurement(), Measurement::Invalid);
    }
}
