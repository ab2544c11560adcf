//! Bounded history of saved measurements.
//!
//! The history keeps the last [`HISTORY_CAPACITY`] distances the user
//! explicitly saved, oldest first. Once full, each save drops the single
//! oldest entry, so the log always holds the most recent saves in order.

use heapless::{Deque, String};

use crate::config::HISTORY_CAPACITY;
use crate::measure::Measurement;

/// Header line of the rendered history panel.
pub const HISTORY_HEADER: &str = "Historique :";

/// Rendered history panel text (header plus one line per entry).
pub type HistoryText = String<160>;

/// FIFO log of saved distances with eviction of the oldest entry when full.
#[derive(Debug, Default)]
pub struct HistoryBuffer {
    entries: Deque<u16, HISTORY_CAPACITY>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self {
            entries: Deque::new(),
        }
    }

    /// Append a measurement to the log.
    ///
    /// The invalid sentinel is silently ignored; a save while full evicts
    /// the oldest entry first.
    pub fn save(&mut self, m: Measurement) {
        let Some(cm) = m.cm() else {
            return;
        };

        if self.entries.is_full() {
            self.entries.pop_front();
        }
        // Cannot fail: a slot was just freed if the deque was full.
        let _ = self.entries.push_back(cm);
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Saved distances in save order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.entries.iter().copied()
    }

    /// Render the panel text: the fixed header followed by one
    /// `"<value> cm"` line per entry, oldest to newest.
    pub fn render(&self) -> HistoryText {
        let mut text = HistoryText::new();
        let _ = text.push_str(HISTORY_HEADER);
        for cm in self.iter() {
            let _ = core::fmt::write(&mut text, format_args!("\n{cm} cm"));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(history: &HistoryBuffer) -> heapless::Vec<u16, HISTORY_CAPACITY> {
        history.iter().collect()
    }

    #[test]
    fn test_save_appends_in_order() {
        let mut history = HistoryBuffer::new();
        history.save(Measurement::Distance(10));
        history.save(Measurement::Distance(20));
        history.save(Measurement::Distance(30));

        assert_eq!(saved(&history).as_slice(), &[10, 20, 30]);
    }

    #[test]
    fn test_full_buffer_evicts_oldest() {
        let mut history = HistoryBuffer::new();
        for cm in 0..HISTORY_CAPACITY as u16 {
            history.save(Measurement::Distance(cm));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);

        history.save(Measurement::Distance(100));
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(
            saved(&history).as_slice(),
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 100]
        );
    }

    #[test]
    fn test_holds_last_capacity_values_in_save_order() {
        let mut history = HistoryBuffer::new();
        for cm in 1..=25u16 {
            history.save(Measurement::Distance(cm));
        }
        assert_eq!(
            saved(&history).as_slice(),
            &[16, 17, 18, 19, 20, 21, 22, 23, 24, 25]
        );
    }

    #[test]
    fn test_invalid_is_never_saved() {
        let mut history = HistoryBuffer::new();
        history.save(Measurement::Distance(42));
        history.save(Measurement::Invalid);

        assert_eq!(history.len(), 1);
        assert_eq!(saved(&history).as_slice(), &[42]);
    }

    #[test]
    fn test_clear_empties_regardless_of_state() {
        let mut history = HistoryBuffer::new();
        for cm in 0..20u16 {
            history.save(Measurement::Distance(cm));
        }

        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.render().as_str(), HISTORY_HEADER);
    }

    #[test]
    fn test_render_lists_entries_oldest_first() {
        let mut history = HistoryBuffer::new();
        history.save(Measurement::Distance(300));
        history.save(Measurement::Distance(125));

        assert_eq!(history.render().as_str(), "Historique :\n300 cm\n125 cm");
    }
}
