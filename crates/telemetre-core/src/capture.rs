//! Capture slots and the derived surface computation.
//!
//! Two named slots, A and B, each latch a copy of the last measurement when
//! their capture action fires. The slots have independent lifetimes: a slot
//! is only ever overwritten by its own capture action. While both slots hold
//! valid distances their product in meters gives the measured surface.

use crate::measure::Measurement;

/// Copy of both slots plus the derived surface, for display updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureSnapshot {
    pub a: Measurement,
    pub b: Measurement,
    /// `Some` only while both slots hold a valid distance.
    pub area_m2: Option<f32>,
}

/// The two capture slots.
#[derive(Debug, Default)]
pub struct CaptureSlots {
    a: Measurement,
    b: Measurement,
}

impl CaptureSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch `last` into slot A. The sentinel is copied as-is, clearing any
    /// previously captured distance.
    pub fn capture_a(&mut self, last: Measurement) {
        self.a = last;
    }

    /// Latch `last` into slot B.
    pub fn capture_b(&mut self, last: Measurement) {
        self.b = last;
    }

    pub fn slot_a(&self) -> Measurement {
        self.a
    }

    pub fn slot_b(&self) -> Measurement {
        self.b
    }

    /// Surface in square meters, `(a/100) * (b/100)`, while both slots are
    /// valid.
    pub fn area_m2(&self) -> Option<f32> {
        match (self.a.meters(), self.b.meters()) {
            (Some(a), Some(b)) => Some(a * b),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> CaptureSnapshot {
        CaptureSnapshot {
            a: self.a,
            b: self.b,
            area_m2: self.area_m2(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_from_both_slots() {
        let mut slots = CaptureSlots::new();
        slots.capture_a(Measurement::Distance(300));
        slots.capture_b(Measurement::Distance(400));

        // 3 m * 4 m
        assert_eq!(slots.area_m2(), Some(12.0));
    }

    #[test]
    fn test_no_area_until_both_captured() {
        let mut slots = CaptureSlots::new();
        slots.capture_a(Measurement::Distance(300));

        assert_eq!(slots.area_m2(), None);
        assert_eq!(slots.snapshot().area_m2, None);
    }

    #[test]
    fn test_capturing_sentinel_clears_the_slot() {
        let mut slots = CaptureSlots::new();
        slots.capture_a(Measurement::Distance(300));
        slots.capture_b(Measurement::Distance(400));
        slots.capture_a(Measurement::Invalid);

        assert_eq!(slots.slot_a(), Measurement::Invalid);
        // B keeps its value, but the surface is no longer defined.
        assert_eq!(slots.slot_b(), Measurement::Distance(400));
        assert_eq!(slots.area_m2(), None);
    }

    #[test]
    fn test_recapture_overwrites_only_its_own_slot() {
        let mut slots = CaptureSlots::new();
        slots.capture_a(Measurement::Distance(100));
        slots.capture_b(Measurement::Distance(200));
        slots.capture_a(Measurement::Distance(150));

        assert_eq!(slots.slot_a(), Measurement::Distance(150));
        assert_eq!(slots.slot_b(), Measurement::Distance(200));
        assert_eq!(slots.area_m2(), Some(1.5 * 2.0));
    }
}
