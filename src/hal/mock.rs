//! Mock hardware implementations for testing and desktop development.
//!
//! Every hardware trait gets a recording double here: the power mock keeps
//! a command history, the display mock keeps every request it was asked to
//! draw, and the clock is advanced by hand so timing paths are
//! deterministic.

use alloc::vec::Vec;

use crate::traits::{Clock, DisplayRequest, EncoderInput, PanelDisplay, PowerState, TrackPower};

/// Manually advanced clock.
///
/// # Example
///
/// ```rust
/// use rs_yardz::hal::MockClock;
/// use rs_yardz::traits::Clock;
///
/// let mut clock = MockClock::new();
/// clock.advance(250);
/// assert_eq!(clock.now_ms(), 250);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MockClock {
    /// Current time in milliseconds.
    pub current_ms: u64,
}

impl MockClock {
    /// Create a clock starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the absolute time.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advance the clock by `ms`.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms = self.current_ms.wrapping_add(ms);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

/// Scriptable encoder: tests write `position` and `button` directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockEncoder {
    /// Absolute position in detents.
    pub position: i32,
    /// Push switch level.
    pub button: bool,
}

impl MockEncoder {
    /// Create an encoder at position zero, switch released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: start at `position`.
    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    /// Set the push switch level.
    pub fn set_button(&mut self, pressed: bool) {
        self.button = pressed;
    }
}

impl EncoderInput for MockEncoder {
    fn position(&self) -> i32 {
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }

    fn button_pressed(&self) -> bool {
        self.button
    }
}

/// Recording track power output.
///
/// Keeps every commanded state in `history`, which lets tests assert the
/// exact command sequence (e.g. `[On, Off]` for one clean transit).
#[derive(Clone, Debug, Default)]
pub struct MockTrackPower {
    /// Last commanded state.
    pub state: PowerState,
    /// Every state commanded, in order.
    pub history: Vec<PowerState>,
    /// Total `set_power` calls.
    pub call_count: usize,
    fail: bool,
}

impl MockTrackPower {
    /// Create an output that starts off and succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: make every `set_power` call fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl TrackPower for MockTrackPower {
    type Error = ();

    fn set_power(&mut self, state: PowerState) -> Result<(), ()> {
        self.call_count += 1;
        if self.fail {
            return Err(());
        }
        self.state = state;
        self.history.push(state);
        Ok(())
    }
}

/// Recording display.
#[derive(Clone, Debug, Default)]
pub struct MockDisplay {
    /// Every request drawn, in order.
    pub requests: Vec<DisplayRequest>,
    /// Whether `init` has succeeded.
    pub initialized: bool,
    /// Number of `clear` calls.
    pub cleared: usize,
    /// Make `init` fail (simulates a dead or unwired screen).
    pub fail_init: bool,
}

impl MockDisplay {
    /// Create a working display.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PanelDisplay for MockDisplay {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        if self.fail_init {
            return Err(());
        }
        self.initialized = true;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ()> {
        self.cleared += 1;
        Ok(())
    }

    fn draw(&mut self, request: &DisplayRequest) -> Result<(), ()> {
        self.requests.push(request.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_advances() {
        let mut clock = MockClock::new();
        assert_eq!(clock.now_ms(), 0);
        clock.advance(20);
        clock.advance(20);
        assert_eq!(clock.now_ms(), 40);
        clock.set(1_000);
        assert_eq!(clock.now_ms(), 1_000);
    }

    #[test]
    fn encoder_round_trips_position() {
        let mut encoder = MockEncoder::new().with_position(9);
        assert_eq!(encoder.position(), 9);
        encoder.set_position(12);
        assert_eq!(encoder.position(), 12);
        assert!(!encoder.button_pressed());
        encoder.set_button(true);
        assert!(encoder.button_pressed());
    }

    #[test]
    fn power_records_history() {
        let mut power = MockTrackPower::new();
        power.set_power(PowerState::On).unwrap();
        power.set_power(PowerState::Off).unwrap();
        assert_eq!(power.state, PowerState::Off);
        assert_eq!(power.history, [PowerState::On, PowerState::Off]);
        assert_eq!(power.call_count, 2);
    }

    #[test]
    fn failing_power_still_counts_calls() {
        let mut power = MockTrackPower::new().failing();
        assert!(power.set_power(PowerState::On).is_err());
        assert_eq!(power.call_count, 1);
        assert!(power.history.is_empty());
    }

    #[test]
    fn display_records_requests() {
        let mut display = MockDisplay::new();
        display.init().unwrap();
        assert!(display.initialized);
        display.draw(&DisplayRequest::new("STOP", 0, 0, 3, false)).unwrap();
        display.clear().unwrap();
        assert_eq!(display.requests.len(), 1);
        assert_eq!(display.requests[0].text.as_str(), "STOP");
        assert_eq!(display.cleared, 1);
    }

    #[test]
    fn display_init_failure() {
        let mut display = MockDisplay {
            fail_init: true,
            ..MockDisplay::default()
        };
        assert!(display.init().is_err());
        assert!(!display.initialized);
    }
}
