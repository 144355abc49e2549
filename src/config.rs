//! Configuration for the yard panel.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic on desktop. Defaults match the installed hardware at the
//! McKenzie Division staging yards: tracks 7 through 12, 6 ms sensor
//! settle time.
//!
//! # Example
//!
//! ```rust
//! use rs_yardz::config::{TimingConfig, TrackRange, YardConfig};
//!
//! // Use defaults
//! let config = YardConfig::default();
//! assert_eq!(config.tracks.max, 12);
//!
//! // Or customize
//! let config = YardConfig::default()
//!     .with_tracks(TrackRange::new(1, 4))
//!     .with_timing(TimingConfig::default().with_transit_ms(15_000));
//! ```

use heapless::String as HString;

/// Maximum length for short config strings (panel names, IDs)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete panel configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YardConfig {
    /// Selectable staging track range
    pub tracks: TrackRange,
    /// Debounce and sequencer timing
    pub timing: TimingConfig,
    /// Panel identification
    pub device: DeviceConfig,
}

impl YardConfig {
    /// Set the track range
    pub fn with_tracks(mut self, tracks: TrackRange) -> Self {
        self.tracks = tracks;
        self
    }

    /// Set the timing configuration
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Set the device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// Track Range
// ============================================================================

/// Inclusive range of selectable track numbers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackRange {
    /// Lowest selectable track number
    pub min: u8,
    /// Highest selectable track number
    pub max: u8,
}

impl Default for TrackRange {
    fn default() -> Self {
        // Staging tracks 7-12 fan out from the yard lead.
        Self { min: 7, max: 12 }
    }
}

impl TrackRange {
    /// Create a range; `min` and `max` are swapped if given out of order
    pub fn new(min: u8, max: u8) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Whether `track` falls within the range
    pub fn contains(&self, track: u8) -> bool {
        track >= self.min && track <= self.max
    }

    /// Number of selectable tracks
    pub fn count(&self) -> u8 {
        self.max - self.min + 1
    }
}

// ============================================================================
// Timing Config
// ============================================================================

/// Debounce and sequencer timing, all in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingConfig {
    /// Sensor debounce settle interval
    pub settle_ms: u64,
    /// Turnout alignment wait before energizing the selected track
    pub alignment_ms: u64,
    /// Transit window during which a departing train is expected to clear
    pub transit_ms: u64,
    /// Control loop cadence hint for the outer scheduler
    pub loop_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_ms: 6,
            alignment_ms: 3_000,
            transit_ms: 10_000,
            loop_interval_ms: 20,
        }
    }
}

impl TimingConfig {
    /// Set the debounce settle interval
    pub fn with_settle_ms(mut self, ms: u64) -> Self {
        self.settle_ms = ms;
        self
    }

    /// Set the alignment wait
    pub fn with_alignment_ms(mut self, ms: u64) -> Self {
        self.alignment_ms = ms;
        self
    }

    /// Set the transit window
    pub fn with_transit_ms(mut self, ms: u64) -> Self {
        self.transit_ms = ms;
        self
    }

    /// Set the loop cadence hint
    pub fn with_loop_interval_ms(mut self, ms: u64) -> Self {
        self.loop_interval_ms = ms;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Panel identification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable panel name
    pub name: ShortString,
    /// Yard ID (for layouts with several staging yards)
    pub id: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("rs-yardz"),
            id: short_string("yard1"),
        }
    }
}

impl DeviceConfig {
    /// Set the panel name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the yard ID
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = short_string(id);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = YardConfig::default();
        assert_eq!(config.tracks.min, 7);
        assert_eq!(config.tracks.max, 12);
        assert_eq!(config.timing.settle_ms, 6);
        assert_eq!(config.timing.alignment_ms, 3_000);
        assert_eq!(config.timing.transit_ms, 10_000);
    }

    #[test]
    fn track_range_contains() {
        let range = TrackRange::default();
        assert!(range.contains(7));
        assert!(range.contains(12));
        assert!(!range.contains(6));
        assert!(!range.contains(13));
        assert_eq!(range.count(), 6);
    }

    #[test]
    fn track_range_swaps_inverted_bounds() {
        let range = TrackRange::new(12, 7);
        assert_eq!(range.min, 7);
        assert_eq!(range.max, 12);
    }

    #[test]
    fn builder_pattern() {
        let config = YardConfig::default()
            .with_tracks(TrackRange::new(1, 4))
            .with_timing(
                TimingConfig::default()
                    .with_settle_ms(10)
                    .with_alignment_ms(2_000)
                    .with_transit_ms(8_000)
                    .with_loop_interval_ms(10),
            )
            .with_device(DeviceConfig::default().with_name("North Yard").with_id("yard3"));

        assert_eq!(config.tracks.count(), 4);
        assert_eq!(config.timing.settle_ms, 10);
        assert_eq!(config.timing.alignment_ms, 2_000);
        assert_eq!(config.timing.transit_ms, 8_000);
        assert_eq!(config.device.name.as_str(), "North Yard");
        assert_eq!(config.device.id.as_str(), "yard3");
    }

    #[test]
    fn short_string_truncation() {
        let long_input = "a".repeat(100);
        let s = short_string(&long_input);
        assert!(s.len() <= MAX_SHORT_STRING);
    }

    #[test]
    fn short_string_utf8_boundary() {
        let input = "🚂".repeat(20); // 4 bytes each
        let s = short_string(&input);
        assert!(s.len() <= MAX_SHORT_STRING);
        assert!(core::str::from_utf8(s.as_bytes()).is_ok());
    }
}
