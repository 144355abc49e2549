//! Track selector: clamped rotary choice plus confirmation switch.
//!
//! Wraps an [`EncoderInput`] and exposes a track number bounded to the
//! yard's range. Out-of-range encoder motion is clamped, and the clamp is
//! written back into the encoder so further detents move relative to the
//! boundary instead of an invisible out-of-range position.

use crate::config::TrackRange;
use crate::traits::EncoderInput;

/// Bounded track selector.
///
/// # Example
///
/// ```rust
/// use rs_yardz::{config::TrackRange, TrackSelector};
/// use rs_yardz::hal::MockEncoder;
///
/// let encoder = MockEncoder::new().with_position(20);
/// let mut selector = TrackSelector::new(encoder, TrackRange::default());
///
/// // 20 is past the top of the 7..=12 yard; first poll clamps and reports.
/// assert_eq!(selector.poll(), Some(12));
/// assert_eq!(selector.encoder().position, 12);
///
/// // No motion, no event.
/// assert_eq!(selector.poll(), None);
/// ```
pub struct TrackSelector<E: EncoderInput> {
    encoder: E,
    range: TrackRange,
    last_pos: Option<i32>,
}

impl<E: EncoderInput> TrackSelector<E> {
    /// Create a selector over `encoder` bounded to `range`.
    pub fn new(encoder: E, range: TrackRange) -> Self {
        Self {
            encoder,
            range,
            last_pos: None,
        }
    }

    /// Poll the encoder; returns the new track number only on change.
    ///
    /// Clamping rewrites the underlying encoder position, so a knob spun
    /// past the end reports the boundary once and stays consistent after.
    pub fn poll(&mut self) -> Option<u8> {
        let mut pos = self.encoder.position();
        let lo = i32::from(self.range.min);
        let hi = i32::from(self.range.max);

        if pos < lo {
            self.encoder.set_position(lo);
            pos = lo;
        } else if pos > hi {
            self.encoder.set_position(hi);
            pos = hi;
        }

        if self.last_pos != Some(pos) {
            self.last_pos = Some(pos);
            Some(pos as u8)
        } else {
            None
        }
    }

    /// Rewrite the encoder to `track` without emitting a change event.
    ///
    /// Used when the sequencer re-syncs the knob to the active track during
    /// housekeeping.
    pub fn sync(&mut self, track: u8) {
        let pos = i32::from(track);
        self.encoder.set_position(pos);
        self.last_pos = Some(pos);
    }

    /// True while the push switch reads active.
    ///
    /// Level-triggered: the sequencer keeps observing this each tick rather
    /// than consuming a single edge.
    pub fn confirmed(&self) -> bool {
        self.encoder.button_pressed()
    }

    /// The configured track range.
    pub fn range(&self) -> TrackRange {
        self.range
    }

    /// Borrow the wrapped encoder.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Mutably borrow the wrapped encoder.
    pub fn encoder_mut(&mut self) -> &mut E {
        &mut self.encoder
    }
}
