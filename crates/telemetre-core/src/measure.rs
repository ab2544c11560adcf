//! Distance measurement value type.
//!
//! The SRF02 reports distances as a big-endian 16-bit centimeter count.
//! A failed bus exchange produces the [`Measurement::Invalid`] sentinel,
//! which downstream consumers (history, capture slots) must ignore.

/// One decoded distance reading, or the invalid sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Measurement {
    /// No usable reading (startup, or the last bus exchange failed).
    #[default]
    Invalid,
    /// Distance to the nearest obstacle, in centimeters.
    Distance(u16),
}

impl Measurement {
    /// Decode the two result-register bytes as read off the bus (big-endian).
    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Measurement::Distance(u16::from_be_bytes(bytes))
    }

    /// Centimeter value, if this is a valid reading.
    pub fn cm(self) -> Option<u16> {
        match self {
            Measurement::Distance(cm) => Some(cm),
            Measurement::Invalid => None,
        }
    }

    /// Distance converted to meters, if valid.
    pub fn meters(self) -> Option<f32> {
        self.cm().map(|cm| cm as f32 / 100.0)
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Measurement::Distance(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_result_register() {
        // 0x0064 == 100 cm
        assert_eq!(
            Measurement::from_be_bytes([0x00, 0x64]),
            Measurement::Distance(100)
        );
        assert_eq!(
            Measurement::from_be_bytes([0x01, 0x2C]),
            Measurement::Distance(300)
        );
    }

    #[test]
    fn test_cm_and_meters() {
        assert_eq!(Measurement::Distance(250).cm(), Some(250));
        assert_eq!(Measurement::Distance(250).meters(), Some(2.5));
        assert_eq!(Measurement::Invalid.cm(), None);
        assert_eq!(Measurement::Invalid.meters(), None);
    }

    #[test]
    fn test_default_is_invalid() {
        assert_eq!(Measurement::default(), Measurement::Invalid);
        assert!(!Measurement::default().is_valid());
    }
}
