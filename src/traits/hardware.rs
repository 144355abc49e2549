//! Hardware abstraction traits for track power, the selector encoder, and time.
//!
//! This module defines the hardware interfaces that allow rs-yardz to
//! run against real panel hardware or desktop mocks.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`TrackPower`] | Relay/driver output energizing the selected track |
//! | [`EncoderInput`] | Rotary encoder with push switch for track selection |
//! | [`Clock`] | Monotonic time source for `no_std` environments |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. Hardware backends implement the same traits
//! against their GPIO layer.
//!
//! # Example
//!
//! ```rust
//! use rs_yardz::traits::{TrackPower, PowerState};
//! use rs_yardz::hal::MockTrackPower;
//!
//! let mut power = MockTrackPower::new();
//! power.set_power(PowerState::On).unwrap();
//! assert_eq!(power.state, PowerState::On);
//! ```

/// Track power output state.
///
/// The panel energizes exactly one staging track at a time; this enum is
/// the commanded state of that output.
///
/// # Default
///
/// Defaults to [`Off`](Self::Off) for safety.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PowerState {
    /// Track power energized.
    On,
    /// Track power withheld.
    #[default]
    Off,
}

impl PowerState {
    /// Returns the state as a lowercase string.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_yardz::PowerState;
    ///
    /// assert_eq!(PowerState::On.as_str(), "on");
    /// assert_eq!(PowerState::Off.as_str(), "off");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PowerState::On => "on",
            PowerState::Off => "off",
        }
    }

    /// True when the output is energized.
    #[inline]
    pub const fn is_on(&self) -> bool {
        matches!(self, PowerState::On)
    }
}

/// Track power output trait.
///
/// Implement this for the relay or driver board that feeds the selected
/// staging track. The sequencer commands this output only on state changes,
/// so implementations do not need to de-duplicate writes.
///
/// # Safety posture
///
/// The sequencer withholds power whenever yard occupancy is asserted
/// unexpectedly; implementations must treat `set_power(Off)` as the
/// always-safe operation and never fail it spuriously.
pub trait TrackPower {
    /// Error type for power operations.
    type Error;

    /// Command the track power output.
    fn set_power(&mut self, state: PowerState) -> Result<(), Self::Error>;

    /// Convenience method to force power off.
    fn shut_off(&mut self) -> Result<(), Self::Error> {
        self.set_power(PowerState::Off)
    }
}

/// Rotary encoder input trait for the track selector.
///
/// Abstracts a quadrature encoder with a momentary push switch. The selector
/// works with *absolute* positions so that out-of-range motion can be
/// clamped by rewriting the position back into the encoder; subsequent
/// relative motion then stays consistent with the clamp.
///
/// # Implementation Notes
///
/// - `position()` returns the accumulated logical position (detents).
/// - `set_position()` must overwrite the accumulated position so the next
///   detent moves relative to the written value.
/// - The push switch is momentary and typically wired active-low;
///   implementations translate the wiring so `button_pressed()` is true
///   while the switch is held.
pub trait EncoderInput {
    /// Current absolute encoder position in detents.
    fn position(&self) -> i32;

    /// Overwrite the absolute encoder position.
    fn set_position(&mut self, position: i32);

    /// Returns true while the push switch reads active.
    fn button_pressed(&self) -> bool;
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for debounce and sequencer
/// deadlines. On desktop this can wrap `std::time::Instant`; on embedded,
/// a hardware timer. Deadline comparisons use wrapping subtraction, so the
/// epoch is arbitrary.
///
/// # Example
///
/// ```rust
/// use rs_yardz::traits::Clock;
/// use rs_yardz::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_state_default_is_off() {
        assert_eq!(PowerState::default(), PowerState::Off);
    }

    #[test]
    fn power_state_as_str() {
        assert_eq!(PowerState::On.as_str(), "on");
        assert_eq!(PowerState::Off.as_str(), "off");
    }

    #[test]
    fn power_state_is_on() {
        assert!(PowerState::On.is_on());
        assert!(!PowerState::Off.is_on());
    }

    struct TestPower {
        state: PowerState,
        writes: usize,
    }

    impl TrackPower for TestPower {
        type Error = ();

        fn set_power(&mut self, state: PowerState) -> Result<(), ()> {
            self.state = state;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn shut_off_default_impl() {
        let mut power = TestPower {
            state: PowerState::On,
            writes: 0,
        };
        power.shut_off().unwrap();
        assert_eq!(power.state, PowerState::Off);
        assert_eq!(power.writes, 1);
    }
}
