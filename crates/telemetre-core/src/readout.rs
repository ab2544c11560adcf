//! Readout text formatting.
//!
//! All user-visible strings are produced here so the pages only ever call
//! `set_text` with a ready-made line. The labels are French, matching the
//! rest of the device's front panel.

use heapless::String;

use crate::measure::Measurement;

/// One formatted readout line.
pub type ReadoutLine = String<32>;

/// Shown before the first measurement.
pub const DISTANCE_PLACEHOLDER: &str = "Distance : ---";

/// Shown when the bus exchange fails.
pub const BUS_ERROR: &str = "Erreur I2C !";

/// Shown when continuous sampling is switched off.
pub const SAMPLING_STOPPED: &str = "Mesure arrêtée";

/// Shown until a surface has been computed.
pub const AREA_PLACEHOLDER: &str = "Surface : ---";

/// Main distance readout: `"Distance : 100 cm"`, or the bus-error text.
pub fn distance_line(m: Measurement) -> ReadoutLine {
    let mut line = ReadoutLine::new();
    match m.cm() {
        Some(cm) => {
            let _ = core::fmt::write(&mut line, format_args!("Distance : {cm} cm"));
        }
        None => {
            let _ = line.push_str(BUS_ERROR);
        }
    }
    line
}

/// Capture-slot readout: `"A : 300 cm"`, or `"A : ---"` while the slot is
/// unset or holds the sentinel.
pub fn slot_line(label: char, m: Measurement) -> ReadoutLine {
    let mut line = ReadoutLine::new();
    match m.cm() {
        Some(cm) => {
            let _ = core::fmt::write(&mut line, format_args!("{label} : {cm} cm"));
        }
        None => {
            let _ = core::fmt::write(&mut line, format_args!("{label} : ---"));
        }
    }
    line
}

/// Derived-surface readout: `"Surface : 12.00 m2"`.
pub fn area_line(area_m2: f32) -> ReadoutLine {
    let mut line = ReadoutLine::new();
    let _ = core::fmt::write(&mut line, format_args!("Surface : {area_m2:.2} m2"));
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_line() {
        assert_eq!(
            distance_line(Measurement::Distance(100)).as_str(),
            "Distance : 100 cm"
        );
        assert_eq!(distance_line(Measurement::Invalid).as_str(), "Erreur I2C !");
    }

    #[test]
    fn test_slot_line() {
        assert_eq!(
            slot_line('A', Measurement::Distance(300)).as_str(),
            "A : 300 cm"
        );
        assert_eq!(slot_line('B', Measurement::Invalid).as_str(), "B : ---");
    }

    #[test]
    fn test_area_line() {
        assert_eq!(area_line(12.0).as_str(), "Surface : 12.00 m2");
        assert_eq!(area_line(0.25).as_str(), "Surface : 0.25 m2");
    }
}
