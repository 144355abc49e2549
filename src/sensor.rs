//! Sensor pair tracking: occupancy, direction, and pass-by detection.
//!
//! Each monitored point (the yard throat "main" and the reverse loop "rev")
//! has a pair of photo sensors, inner and outer. From the order in which
//! the two debounced lines toggle, [`SensorPairTracker`] derives:
//!
//! - **occupancy**: a 2-bit mask, bit 0 = inner active, bit 1 = outer active
//! - **direction**: [`Direction::Inbound`] / [`Direction::Outbound`] while a
//!   train is inside the pair, [`Direction::Clear`] once it has left
//! - **last direction**: the direction of the most recent train, held across
//!   clear until the next train latches one
//! - **pass-by**: a sticky flag set only when a train fully traverses the
//!   pair without backing out
//!
//! # Encoding
//!
//! The tracker keeps a running total that accumulates the occupancy mask on
//! every sensor edge while the mask is nonzero, and resets to zero when the
//! pair clears. A clean traversal toggles both sensors on then off in order,
//! which accumulates to exactly [`FULL_PASS_TOTAL`] (inbound: 1, 4, 6;
//! outbound: 2, 5, 6) at the moment the mask returns to zero. A train that
//! enters and backs out clears the mask at some other total (1, 2, or 5),
//! so pass-by does not latch. The constants 1, 2, and 6 are load-bearing;
//! do not re-derive them without reproducing the full toggle-order table
//! (see the reachable-totals tests below).
//!
//! # Example
//!
//! ```rust
//! use rs_yardz::{Direction, SensorPairTracker};
//!
//! let mut tracker = SensorPairTracker::new();
//!
//! // Outbound traversal: outer fires first. Lines are active-low.
//! tracker.update(true, false); // outer on
//! assert_eq!(tracker.direction(), Direction::Outbound);
//! tracker.update(false, false); // inner on
//! tracker.update(false, true); // outer off
//! tracker.update(true, true); // inner off, pair clear
//!
//! assert!(tracker.pass_by());
//! assert_eq!(tracker.direction(), Direction::Clear);
//! assert_eq!(tracker.last_direction(), Direction::Outbound);
//! ```

/// Occupancy bit for the inner sensor.
pub const INNER_BIT: u8 = 0b01;

/// Occupancy bit for the outer sensor.
pub const OUTER_BIT: u8 = 0b10;

/// Running-total value that encodes a complete traversal.
pub const FULL_PASS_TOTAL: u8 = 6;

/// Train direction at a sensor pair.
///
/// Inbound is always toward the point between the yard throat and the
/// reverse loop; outbound is away from it. The numeric values match the
/// occupancy mask of the sensor that fires first (inner = 1 inbound,
/// outer = 2 outbound) and feed the direction inference rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Direction {
    /// No train within the sensor pair.
    #[default]
    Clear = 0,
    /// Moving toward the yard center point.
    Inbound = 1,
    /// Moving away from the yard center point.
    Outbound = 2,
}

impl Direction {
    /// Returns the direction as an uppercase string for panel/telemetry text.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_yardz::Direction;
    ///
    /// assert_eq!(Direction::Inbound.as_str(), "INBOUND");
    /// assert_eq!(Direction::Outbound.as_str(), "OUTBOUND");
    /// assert_eq!(Direction::Clear.as_str(), "CLEAR");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::Clear => "CLEAR",
            Direction::Inbound => "INBOUND",
            Direction::Outbound => "OUTBOUND",
        }
    }

    /// Numeric code used by the inference rules and telemetry.
    #[inline]
    pub const fn code(&self) -> u8 {
        *self as u8
    }
}

/// Point-in-time counters of one tracker, for telemetry and UI.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackerStatus {
    /// Occupancy mask (bit 0 inner, bit 1 outer).
    pub occupancy: u8,
    /// Running crossing total.
    pub total: u8,
    /// Accumulated total held for the pass-by check.
    pub pass_total: u8,
    /// Latched pass-by flag.
    pub pass_by: bool,
    /// Direction of the train currently in the pair.
    pub direction: Direction,
    /// Direction of the most recent train.
    pub last_direction: Direction,
    /// True while either sensor is active.
    pub busy: bool,
}

/// Tracks one inner/outer sensor pair.
///
/// Feed it freshly debounced stable values once per poll tick with
/// [`update`](Self::update). Lines are active-low: stable `false` means an
/// object is present. The tracker is created once at startup and lives for
/// the life of the process; the pass-by latch is cleared externally by the
/// panel sequencer (after consuming a transit completion) or by the manual
/// reset input.
#[derive(Clone, Debug)]
pub struct SensorPairTracker {
    report: u8,
    total: u8,
    pass_total: u8,
    pass_by: bool,
    direction: Direction,
    last_direction: Direction,
    inner_last: bool,
    outer_last: bool,
}

impl Default for SensorPairTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPairTracker {
    /// Create a tracker with both lines idle (high).
    pub fn new() -> Self {
        Self {
            report: 0,
            total: 0,
            pass_total: 0,
            pass_by: false,
            direction: Direction::Clear,
            last_direction: Direction::Clear,
            inner_last: true,
            outer_last: true,
        }
    }

    /// Fold in one tick's debounced stable values.
    ///
    /// Order within a tick matters for the sequencer: call this on both
    /// trackers before evaluating panel transitions.
    pub fn update(&mut self, inner_stable: bool, outer_stable: bool) {
        // A backed-out train left a partial total behind; drop it once the
        // pair is clear and no pass-by is pending consumption.
        if !self.pass_by && self.total == 0 {
            self.pass_total = 0;
        }

        if inner_stable != self.inner_last {
            self.inner_last = inner_stable;
            self.fold_edge(inner_stable, INNER_BIT);
        }
        if outer_stable != self.outer_last {
            self.outer_last = outer_stable;
            self.fold_edge(outer_stable, OUTER_BIT);
        }

        if self.total == 0 && self.pass_total == FULL_PASS_TOTAL {
            self.pass_by = true;
            self.pass_total = 0;
        }

        self.infer_direction();
    }

    /// Apply one sensor edge: toggle the occupancy bit and accumulate.
    fn fold_edge(&mut self, stable: bool, bit: u8) {
        if !stable {
            self.report |= bit;
        } else {
            self.report &= !bit;
        }
        if self.report > 0 {
            self.total = self.total.wrapping_add(self.report);
            self.pass_total = self.total;
        } else {
            self.total = 0;
        }
    }

    /// Direction inference over the (mask, total) pair.
    ///
    /// The first two rules latch on the signature of whichever sensor fired
    /// first; the next two hold the latched direction while the train is
    /// still accumulating; the last clears it once the pair empties.
    fn infer_direction(&mut self) {
        let outbound = Direction::Outbound.code();
        let inbound = Direction::Inbound.code();

        if self.total == outbound && self.report == outbound {
            self.latch(Direction::Outbound);
        } else if self.total == inbound && self.report == inbound {
            self.latch(Direction::Inbound);
        } else if self.direction == Direction::Outbound && self.total > outbound {
            self.latch(Direction::Outbound);
        } else if self.direction == Direction::Inbound && self.total > 0 {
            self.latch(Direction::Inbound);
        } else if self.direction != Direction::Clear && self.report == 0 {
            self.direction = Direction::Clear;
        }
    }

    fn latch(&mut self, dir: Direction) {
        self.direction = dir;
        self.last_direction = dir;
    }

    /// Occupancy mask: bit 0 inner, bit 1 outer.
    pub fn occupancy(&self) -> u8 {
        self.report
    }

    /// True while either sensor of the pair is active.
    pub fn busy(&self) -> bool {
        self.report > 0
    }

    /// Direction of the train currently within the pair.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction of the most recent train to touch the pair.
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    /// Latched pass-by flag; sticky until cleared.
    pub fn pass_by(&self) -> bool {
        self.pass_by
    }

    /// True when a full outbound traversal has been latched.
    ///
    /// This is the condition the sequencer watches for to end a transit
    /// early: the train left completely in the outbound direction.
    pub fn passed_outbound(&self) -> bool {
        self.pass_by && self.last_direction == Direction::Outbound
    }

    /// Clear the pass-by latch (sequencer consumption or manual reset).
    pub fn clear_pass_by(&mut self) {
        self.pass_by = false;
    }

    /// Forget the last train's direction.
    pub fn reset_last_direction(&mut self) {
        self.last_direction = Direction::Clear;
    }

    /// Snapshot the counters for telemetry.
    pub fn status(&self) -> TrackerStatus {
        TrackerStatus {
            occupancy: self.report,
            total: self.total,
            pass_total: self.pass_total,
            pass_by: self.pass_by,
            direction: self.direction,
            last_direction: self.last_direction,
            busy: self.busy(),
        }
    }
}
