//! Line-oriented status reporting for the serial console.
//!
//! [`StatusReport`] borrows a [`YardStatus`] snapshot and renders the
//! counter dump the panel has always printed over its debug serial line:
//! one field per line, both sensor pairs side by side. Works in `no_std`
//! through `core::fmt`, so the same report feeds a UART writer on hardware
//! and `println!` on the desktop simulator.

use core::fmt;

use crate::controller::YardStatus;

/// Display adapter for a [`YardStatus`] snapshot.
///
/// # Example
///
/// ```rust
/// use rs_yardz::{SensorSample, StatusReport, YardConfig, YardController};
/// use rs_yardz::hal::{MockEncoder, MockTrackPower};
///
/// let mut yard = YardController::new(
///     MockTrackPower::new(),
///     MockEncoder::new().with_position(9),
///     YardConfig::default(),
/// );
/// yard.tick(&SensorSample::idle(), 0).unwrap();
///
/// let status = yard.status();
/// let text = format!("{}", StatusReport::new(&status));
/// assert!(text.contains("mode: STAND_BY"));
/// ```
pub struct StatusReport<'a> {
    status: &'a YardStatus,
}

impl<'a> StatusReport<'a> {
    /// Wrap a snapshot for formatting.
    pub fn new(status: &'a YardStatus) -> Self {
        Self { status }
    }
}

impl fmt::Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.status;
        writeln!(f, "mode: {}", s.mode.as_str())?;
        writeln!(f, "track: selected={} active={}", s.selected_track, s.active_track)?;
        writeln!(f, "power: {}", s.power.as_str())?;
        writeln!(f, "status led: {}", if s.status_led { "lit" } else { "dark" })?;
        writeln!(f, "yard busy: {}", s.busy)?;
        for (label, t) in [("main", &s.main), ("rev", &s.rev)] {
            writeln!(
                f,
                "{label}: report={} total={} passTotal={} passBy={} dir={} last={}",
                t.occupancy,
                t.total,
                t.pass_total,
                t.pass_by,
                t.direction.as_str(),
                t.last_direction.as_str(),
            )?;
        }
        Ok(())
    }
}
