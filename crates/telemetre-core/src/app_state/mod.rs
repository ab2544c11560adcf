//! Application session state and action dispatch.
//!
//! All mutable state of the running application lives in [`SessionState`],
//! owned by the platform loop and passed by reference to the dispatcher —
//! there are no ambient globals. The only static is the touch-event channel
//! the firmware uses to hand events from the touch-controller task to the
//! application task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::capture::{CaptureSlots, CaptureSnapshot};
use crate::history::{HistoryBuffer, HistoryText};
use crate::measure::Measurement;
use crate::ui::core::{Action, TouchEvent};

pub const TOUCH_CHANNEL_DEPTH: usize = 8;

/// Touch events from the touch-controller task to the application loop.
/// Only the firmware uses this; the simulator feeds its window events in
/// directly.
pub static TOUCH_CHANNEL: Channel<CriticalSectionRawMutex, TouchEvent, TOUCH_CHANNEL_DEPTH> =
    Channel::new();

/// Continuous-sampling controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMode {
    #[default]
    Idle,
    Running,
}

/// What the platform loop must do after dispatching an action.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Perform one ranging exchange now and push the distance readout.
    SampleNow,
    /// Create the periodic sampling trigger.
    StartContinuous,
    /// Cancel the periodic sampling trigger.
    StopContinuous,
    /// The history log changed; re-render and push the panel text.
    HistoryChanged,
    /// A capture slot (and possibly the derived surface) changed.
    CapturesChanged,
}

/// All state of one application session.
///
/// History, capture slots and the last measurement are independent: saving
/// never touches the slots and capturing never touches the history.
#[derive(Default)]
pub struct SessionState {
    last: Measurement,
    sampling: SamplingMode,
    pub history: HistoryBuffer,
    pub captures: CaptureSlots,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent sample, valid or not. A failed exchange overwrites
    /// any previous good value.
    pub fn last_measurement(&self) -> Measurement {
        self.last
    }

    /// Store the outcome of a ranging exchange as the last measurement.
    pub fn record_measurement(&mut self, m: Measurement) {
        self.last = m;
    }

    pub fn sampling_mode(&self) -> SamplingMode {
        self.sampling
    }

    /// Dispatch one user action.
    ///
    /// Navigation variants are the page manager's concern and produce no
    /// effect here. Start/stop transitions are idempotent: only an actual
    /// transition asks the loop to create or cancel its trigger, so at most
    /// one periodic trigger can ever exist.
    pub fn handle_action(&mut self, action: Action) -> Effect {
        match action {
            Action::NavigateToPage(_) | Action::GoBack => Effect::None,
            Action::Sample => Effect::SampleNow,
            Action::ToggleContinuous(true) => match self.sampling {
                SamplingMode::Idle => {
                    self.sampling = SamplingMode::Running;
                    Effect::StartContinuous
                }
                SamplingMode::Running => Effect::None,
            },
            Action::ToggleContinuous(false) => match self.sampling {
                SamplingMode::Running => {
                    self.sampling = SamplingMode::Idle;
                    Effect::StopContinuous
                }
                SamplingMode::Idle => Effect::None,
            },
            Action::SaveToHistory => {
                self.history.save(self.last);
                Effect::HistoryChanged
            }
            Action::ClearHistory => {
                self.history.clear();
                Effect::HistoryChanged
            }
            Action::CaptureA => {
                self.captures.capture_a(self.last);
                Effect::CapturesChanged
            }
            Action::CaptureB => {
                self.captures.capture_b(self.last);
                Effect::CapturesChanged
            }
        }
    }

    /// Rendered history panel text.
    pub fn history_text(&self) -> HistoryText {
        self.history.render()
    }

    /// Capture slots plus derived surface, for display updates.
    pub fn capture_snapshot(&self) -> CaptureSnapshot {
        self.captures.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_sample_requests_an_exchange() {
        let mut session = SessionState::new();
        assert_eq!(session.handle_action(Action::Sample), Effect::SampleNow);
    }

    #[test]
    fn test_continuous_start_is_idempotent() {
        let mut session = SessionState::new();

        assert_eq!(
            session.handle_action(Action::ToggleContinuous(true)),
            Effect::StartContinuous
        );
        // A second "on" without an intervening "off" must not create a
        // second trigger.
        assert_eq!(
            session.handle_action(Action::ToggleContinuous(true)),
            Effect::None
        );
        assert_eq!(session.sampling_mode(), SamplingMode::Running);
    }

    #[test]
    fn test_continuous_stop_is_idempotent() {
        let mut session = SessionState::new();
        let _ = session.handle_action(Action::ToggleContinuous(true));

        assert_eq!(
            session.handle_action(Action::ToggleContinuous(false)),
            Effect::StopContinuous
        );
        assert_eq!(
            session.handle_action(Action::ToggleContinuous(false)),
            Effect::None
        );
        assert_eq!(session.sampling_mode(), SamplingMode::Idle);
    }

    #[test]
    fn test_save_uses_the_last_measurement() {
        let mut session = SessionState::new();
        session.record_measurement(Measurement::Distance(42));

        assert_eq!(
            session.handle_action(Action::SaveToHistory),
            Effect::HistoryChanged
        );
        assert_eq!(session.history.len(), 1);
    }

    #[test]
    fn test_failed_sample_then_save_leaves_history_unchanged() {
        let mut session = SessionState::new();
        session.record_measurement(Measurement::Distance(42));
        let _ = session.handle_action(Action::SaveToHistory);

        // Bus failure invalidates the shared last measurement...
        session.record_measurement(Measurement::Invalid);
        // ...so an immediate save has nothing to add.
        let _ = session.handle_action(Action::SaveToHistory);
        assert_eq!(session.history.len(), 1);
    }

    #[test]
    fn test_clear_resets_the_log() {
        let mut session = SessionState::new();
        session.record_measurement(Measurement::Distance(7));
        let _ = session.handle_action(Action::SaveToHistory);

        assert_eq!(
            session.handle_action(Action::ClearHistory),
            Effect::HistoryChanged
        );
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_captures_are_independent_snapshots() {
        let mut session = SessionState::new();

        session.record_measurement(Measurement::Distance(300));
        let _ = session.handle_action(Action::CaptureA);
        // Surface needs both slots.
        assert_eq!(session.capture_snapshot().area_m2, None);

        session.record_measurement(Measurement::Distance(400));
        let _ = session.handle_action(Action::CaptureB);
        assert_eq!(session.capture_snapshot().area_m2, Some(12.0));

        // Saving does not clear the slots.
        let _ = session.handle_action(Action::SaveToHistory);
        assert_eq!(session.capture_snapshot().area_m2, Some(12.0));
    }

    #[test]
    fn test_navigation_actions_have_no_session_effect() {
        let mut session = SessionState::new();
        assert_eq!(session.handle_action(Action::GoBack), Effect::None);
    }
}
