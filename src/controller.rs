//! Yard controller that ties everything together.
//!
//! [`YardController`] owns the four sensor debouncers, the two
//! [`SensorPairTracker`]s, the [`TrackSelector`], and the
//! [`PanelSequencer`], and enforces the per-tick ordering that keeps
//! decisions fresh: debounce, then tracker update, then occupancy
//! aggregation, then sequencer evaluation. Power commands are applied to
//! the [`TrackPower`] output inside the tick; display requests are returned
//! to the caller, which renders them through its display collaborator.
//!
//! # Example
//!
//! ```rust
//! use rs_yardz::{
//!     PanelMode, SensorSample, YardConfig, YardController,
//!     hal::{MockEncoder, MockTrackPower},
//! };
//!
//! let mut yard = YardController::new(
//!     MockTrackPower::new(),
//!     MockEncoder::new().with_position(9),
//!     YardConfig::default(),
//! );
//!
//! // One idle tick takes the panel out of housekeeping.
//! let displays = yard.tick(&SensorSample::idle(), 0).unwrap();
//! assert_eq!(yard.status().mode, PanelMode::StandBy);
//! assert!(!displays.is_empty()); // the "select track" screen
//! ```

use crate::config::YardConfig;
use crate::debounce::DebouncedInput;
use crate::panel::{DisplayBatch, PanelInputs, PanelMode, PanelSequencer};
use crate::selector::TrackSelector;
use crate::sensor::{SensorPairTracker, TrackerStatus};
use crate::traits::{EncoderInput, PowerState, TrackPower};
use crate::yard::YardOccupancy;

/// Raw input levels for one poll tick.
///
/// Sensor lines are active-low (true = no train); the manual inputs are
/// plain asserted/not-asserted booleans.
#[derive(Clone, Copy, Debug)]
pub struct SensorSample {
    /// Yard-throat inner sensor raw level.
    pub main_in: bool,
    /// Yard-throat outer sensor raw level.
    pub main_out: bool,
    /// Reverse-loop inner sensor raw level.
    pub rev_in: bool,
    /// Reverse-loop outer sensor raw level.
    pub rev_out: bool,
    /// Manual bail-out input (ends a transit window early).
    pub bail_out: bool,
    /// Manual pass-by reset input.
    pub pass_by_reset: bool,
}

impl SensorSample {
    /// All sensor lines idle (high), manual inputs released.
    pub const fn idle() -> Self {
        Self {
            main_in: true,
            main_out: true,
            rev_in: true,
            rev_out: true,
            bail_out: false,
            pass_by_reset: false,
        }
    }
}

impl Default for SensorSample {
    fn default() -> Self {
        Self::idle()
    }
}

/// Full state snapshot for telemetry and UI.
///
/// Implements `serde::Serialize` when the `serde` feature is enabled.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YardStatus {
    /// Sequencer mode.
    pub mode: PanelMode,
    /// Track the operator has dialed.
    pub selected_track: u8,
    /// Track the yard is set up for.
    pub active_track: u8,
    /// Commanded track power.
    pub power: PowerState,
    /// Panel status LED (lit while track power is on).
    pub status_led: bool,
    /// Yard-throat tracker counters.
    pub main: TrackerStatus,
    /// Reverse-loop tracker counters.
    pub rev: TrackerStatus,
    /// Aggregate occupancy.
    pub busy: bool,
}

/// Main yard controller.
///
/// # Type Parameters
///
/// - `P`: track power output ([`TrackPower`] trait)
/// - `E`: selector encoder ([`EncoderInput`] trait)
///
/// # Thread Safety
///
/// Everything runs on the single control thread; the controller is not
/// `Sync` and does not need to be.
pub struct YardController<P: TrackPower, E: EncoderInput> {
    power: P,
    selector: TrackSelector<E>,
    main_in: DebouncedInput,
    main_out: DebouncedInput,
    rev_in: DebouncedInput,
    rev_out: DebouncedInput,
    main: SensorPairTracker,
    rev: SensorPairTracker,
    sequencer: PanelSequencer,
}

impl<P: TrackPower, E: EncoderInput> YardController<P, E> {
    /// Create a controller; all state boots to housekeeping defaults.
    pub fn new(power: P, encoder: E, config: YardConfig) -> Self {
        let settle = config.timing.settle_ms;
        Self {
            power,
            selector: TrackSelector::new(encoder, config.tracks),
            main_in: DebouncedInput::new(true, settle),
            main_out: DebouncedInput::new(true, settle),
            rev_in: DebouncedInput::new(true, settle),
            rev_out: DebouncedInput::new(true, settle),
            main: SensorPairTracker::new(),
            rev: SensorPairTracker::new(),
            sequencer: PanelSequencer::new(config.tracks, config.timing),
        }
    }

    /// Run one poll tick; returns the display requests to render.
    ///
    /// Ordering within the tick is load-bearing: sensors are debounced and
    /// folded into the trackers before the sequencer evaluates, so a
    /// transition committed this tick is acted on this tick.
    pub fn tick(&mut self, sample: &SensorSample, now_ms: u64) -> Result<DisplayBatch, P::Error> {
        if sample.pass_by_reset {
            self.main.clear_pass_by();
            self.rev.clear_pass_by();
        }

        let main_in = self.main_in.sample(sample.main_in, now_ms);
        let main_out = self.main_out.sample(sample.main_out, now_ms);
        let rev_in = self.rev_in.sample(sample.rev_in, now_ms);
        let rev_out = self.rev_out.sample(sample.rev_out, now_ms);

        self.main.update(main_in, main_out);
        self.rev.update(rev_in, rev_out);

        let occupancy = YardOccupancy::of(&self.main, &self.rev);

        let inputs = PanelInputs {
            busy: occupancy.busy(),
            main_passed_outbound: self.main.passed_outbound(),
            rev_passed_outbound: self.rev.passed_outbound(),
            selector_change: self.selector.poll(),
            confirmed: self.selector.confirmed(),
            bail_out: sample.bail_out,
        };

        let fx = self.sequencer.tick(&inputs, now_ms);

        if fx.reset_last_direction {
            self.main.reset_last_direction();
            self.rev.reset_last_direction();
        }
        if fx.clear_pass_by {
            self.main.clear_pass_by();
            self.rev.clear_pass_by();
        }
        if let Some(track) = fx.sync_selector {
            self.selector.sync(track);
        }
        if let Some(state) = fx.power {
            self.power.set_power(state)?;
        }

        Ok(fx.displays)
    }

    /// Snapshot the full panel state for telemetry/UI.
    pub fn status(&self) -> YardStatus {
        let power = self.sequencer.power();
        YardStatus {
            mode: self.sequencer.mode(),
            selected_track: self.sequencer.selected_track(),
            active_track: self.sequencer.active_track(),
            power,
            status_led: power.is_on(),
            main: self.main.status(),
            rev: self.rev.status(),
            busy: self.main.busy() || self.rev.busy(),
        }
    }

    /// Yard-throat tracker.
    pub fn main_tracker(&self) -> &SensorPairTracker {
        &self.main
    }

    /// Reverse-loop tracker.
    pub fn rev_tracker(&self) -> &SensorPairTracker {
        &self.rev
    }

    /// The track selector (e.g. to reach the encoder in tests).
    pub fn selector_mut(&mut self) -> &mut TrackSelector<E> {
        &mut self.selector
    }

    /// The track power output.
    pub fn power_output(&self) -> &P {
        &self.power
    }
}
