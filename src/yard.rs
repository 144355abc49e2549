//! Yard occupancy aggregation over the two sensor pairs.

use crate::sensor::SensorPairTracker;

/// Combined busy/clear view of the yard's two monitored points.
///
/// Derived fresh each tick from the trackers; holds no state of its own.
/// The sequencer blocks on [`busy`](Self::busy), and panel detail (which
/// side is occupied) uses the per-point flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YardOccupancy {
    /// Yard throat pair has a train within it.
    pub main_busy: bool,
    /// Reverse loop pair has a train within it.
    pub rev_busy: bool,
}

impl YardOccupancy {
    /// Derive the aggregate from both trackers.
    pub fn of(main: &SensorPairTracker, rev: &SensorPairTracker) -> Self {
        Self {
            main_busy: main.busy(),
            rev_busy: rev.busy(),
        }
    }

    /// True while either sensor pair reports presence.
    pub fn busy(&self) -> bool {
        self.main_busy || self.rev_busy
    }
}
