//! Panel sequencer: the five-mode control machine for the staging yard.
//!
//! The sequencer owns track selection, track power, and the two timers
//! (turnout alignment and train transit). It is written as an explicit tick
//! function: each call evaluates at most one mode, mutates internal state,
//! and returns the effects for the caller to apply — no blocking waits, no
//! recursion between mode handlers. The outer scheduler calls
//! [`PanelSequencer::tick`] once per poll loop after the sensor trackers
//! have been updated, so decisions never act on stale occupancy.
//!
//! # Modes
//!
//! | Mode | Purpose |
//! |------|---------|
//! | `Housekeep` | power down, sync selection to the active track |
//! | `StandBy` | wait for the operator to pick and confirm a track |
//! | `TrackSetup` | wait out turnout alignment, then energize |
//! | `TrackActive` | transit window: watch for the train to pass out |
//! | `Occupied` | fail-safe hold while any sensor pair reports a train |
//!
//! `Occupied` is reachable from the waiting modes whenever yard occupancy
//! asserts; power is withheld for as long as it lasts.

use heapless::Vec as HVec;

use crate::config::{TimingConfig, TrackRange};
use crate::traits::{DisplayRequest, PowerState};

/// Maximum display requests one tick can emit.
pub const DISPLAY_QUEUE: usize = 4;

/// Display requests produced by one tick.
pub type DisplayBatch = HVec<DisplayRequest, DISPLAY_QUEUE>;

/// Sequencer mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PanelMode {
    /// Power-down and selection sync; passes straight to `StandBy`.
    #[default]
    Housekeep,
    /// Waiting for track selection and confirmation.
    StandBy,
    /// Turnout alignment wait before power-up.
    TrackSetup,
    /// Track energized; transit window running.
    TrackActive,
    /// Yard occupancy asserted; power withheld.
    Occupied,
}

impl PanelMode {
    /// Uppercase name for telemetry, matching the panel's historical labels.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PanelMode::Housekeep => "HOUSEKEEP",
            PanelMode::StandBy => "STAND_BY",
            PanelMode::TrackSetup => "TRACK_SETUP",
            PanelMode::TrackActive => "TRACK_ACTIVE",
            PanelMode::Occupied => "OCCUPIED",
        }
    }
}

/// Per-tick inputs to the sequencer, gathered after sensor updates.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanelInputs {
    /// Either sensor pair reports a train.
    pub busy: bool,
    /// Yard-throat pair latched a complete outbound pass.
    pub main_passed_outbound: bool,
    /// Reverse-loop pair latched a complete outbound pass.
    pub rev_passed_outbound: bool,
    /// Selector reported a new track number this tick.
    pub selector_change: Option<u8>,
    /// Selector push switch reads active.
    pub confirmed: bool,
    /// Manual bail-out input asserted (ends the transit window early).
    pub bail_out: bool,
}

/// Effects of one tick, applied by the owning controller.
#[derive(Clone, Debug, Default)]
pub struct PanelEffects {
    /// Track power command, emitted only on change.
    pub power: Option<PowerState>,
    /// Display requests for this tick.
    pub displays: DisplayBatch,
    /// Clear both trackers' pass-by latches (transit consumed).
    pub clear_pass_by: bool,
    /// Rewrite the selector (and its encoder) to this track.
    pub sync_selector: Option<u8>,
    /// Reset both trackers' last-direction (new transit starting).
    pub reset_last_direction: bool,
}

/// The five-mode panel control machine.
///
/// # Example
///
/// ```rust
/// use rs_yardz::{config::{TimingConfig, TrackRange}, PanelInputs, PanelMode, PanelSequencer};
///
/// let mut panel = PanelSequencer::new(TrackRange::default(), TimingConfig::default());
/// assert_eq!(panel.mode(), PanelMode::Housekeep);
///
/// let fx = panel.tick(&PanelInputs::default(), 0);
/// assert_eq!(panel.mode(), PanelMode::StandBy);
/// assert!(fx.power.is_none()); // first boot: output already off
/// ```
pub struct PanelSequencer {
    mode: PanelMode,
    selected: u8,
    active: u8,
    displayed: u8,
    power: PowerState,
    first_boot: bool,
    timer_start_ms: u64,
    timing: TimingConfig,
}

impl PanelSequencer {
    /// Create a sequencer; boot selection defaults to the highest track.
    pub fn new(tracks: TrackRange, timing: TimingConfig) -> Self {
        Self {
            mode: PanelMode::Housekeep,
            selected: tracks.max,
            active: tracks.max,
            displayed: tracks.max,
            power: PowerState::Off,
            first_boot: true,
            timer_start_ms: 0,
            timing,
        }
    }

    /// Evaluate one tick. Inputs must reflect this tick's sensor state.
    pub fn tick(&mut self, inputs: &PanelInputs, now_ms: u64) -> PanelEffects {
        let mut fx = PanelEffects::default();

        match self.mode {
            PanelMode::Housekeep => self.run_housekeep(&mut fx),
            PanelMode::StandBy => self.run_stand_by(inputs, now_ms, &mut fx),
            PanelMode::TrackSetup => self.run_track_setup(inputs, now_ms, &mut fx),
            PanelMode::TrackActive => self.run_track_active(inputs, now_ms, &mut fx),
            PanelMode::Occupied => self.run_occupied(inputs),
        }

        fx
    }

    fn run_housekeep(&mut self, fx: &mut PanelEffects) {
        if self.first_boot {
            // Output hardware comes up de-energized; no command needed.
            self.first_boot = false;
        } else {
            self.set_power(PowerState::Off, fx);
        }
        self.selected = self.active;
        self.displayed = self.selected;
        // Pull the physical knob back to the active track so the next detent
        // moves relative to what the screen shows.
        fx.sync_selector = Some(self.selected);
        push(fx, DisplayRequest::new("SELECT TRACK", 0, 0, 2, false));
        push(fx, track_line(self.selected));
        self.mode = PanelMode::StandBy;
    }

    fn run_stand_by(&mut self, inputs: &PanelInputs, now_ms: u64, fx: &mut PanelEffects) {
        if inputs.busy {
            self.enter_occupied(fx);
            return;
        }
        if let Some(track) = inputs.selector_change {
            self.selected = track;
            if self.selected != self.displayed {
                self.displayed = self.selected;
                push(fx, track_line(self.selected));
            }
        }
        if inputs.confirmed {
            self.enter_track_setup(now_ms, fx);
        }
    }

    fn run_track_setup(&mut self, inputs: &PanelInputs, now_ms: u64, fx: &mut PanelEffects) {
        if !self.elapsed(now_ms, self.timing.alignment_ms) {
            return;
        }
        if inputs.busy {
            self.enter_occupied(fx);
            return;
        }
        // Turnouts aligned and the approach is clear: energize.
        self.set_power(PowerState::On, fx);
        push(fx, DisplayRequest::new("PROCEED", 0, 0, 2, false));
        push(fx, track_line(self.active));
        fx.reset_last_direction = true;
        self.timer_start_ms = now_ms;
        self.mode = PanelMode::TrackActive;
    }

    fn run_track_active(&mut self, inputs: &PanelInputs, now_ms: u64, fx: &mut PanelEffects) {
        let passed_out = inputs.main_passed_outbound || inputs.rev_passed_outbound;
        let expired = self.elapsed(now_ms, self.timing.transit_ms);

        if !(passed_out || inputs.bail_out || expired) {
            return;
        }

        fx.clear_pass_by = true;
        if inputs.busy {
            self.enter_occupied(fx);
        } else {
            self.mode = PanelMode::Housekeep;
        }
    }

    fn run_occupied(&mut self, inputs: &PanelInputs) {
        if !inputs.busy {
            self.mode = PanelMode::Housekeep;
        }
    }

    fn enter_track_setup(&mut self, now_ms: u64, fx: &mut PanelEffects) {
        self.active = self.selected;
        self.set_power(PowerState::Off, fx);
        push(fx, DisplayRequest::new("ALIGNING", 0, 0, 2, false));
        push(fx, track_line(self.active));
        self.timer_start_ms = now_ms;
        self.mode = PanelMode::TrackSetup;
    }

    fn enter_occupied(&mut self, fx: &mut PanelEffects) {
        // Fail-safe: a train inside either pair means no track power,
        // whatever mode we came from.
        self.set_power(PowerState::Off, fx);
        push(fx, DisplayRequest::new("STOP", 0, 0, 3, false));
        push(fx, DisplayRequest::new("YARD OCCUPIED", 0, 40, 1, true));
        self.mode = PanelMode::Occupied;
    }

    fn set_power(&mut self, state: PowerState, fx: &mut PanelEffects) {
        if self.power != state {
            self.power = state;
            fx.power = Some(state);
        }
    }

    fn elapsed(&self, now_ms: u64, interval_ms: u64) -> bool {
        now_ms.wrapping_sub(self.timer_start_ms) >= interval_ms
    }

    /// Current mode.
    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    /// Track number the operator has dialed.
    pub fn selected_track(&self) -> u8 {
        self.selected
    }

    /// Track number the yard is set up for.
    pub fn active_track(&self) -> u8 {
        self.active
    }

    /// Commanded track power state.
    pub fn power(&self) -> PowerState {
        self.power
    }
}

fn track_line(track: u8) -> DisplayRequest {
    DisplayRequest::format(format_args!("TRACK {track}"), 0, 24, 3, true)
}

fn push(fx: &mut PanelEffects, request: DisplayRequest) {
    // Capacity covers the largest screen; an overflow would only drop text.
    let _ = fx.displays.push(request);
}
