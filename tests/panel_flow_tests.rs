//! End-to-end panel flow tests: the full controller against mock hardware.

use rs_yardz::hal::{MockEncoder, MockTrackPower};
use rs_yardz::{
    PanelMode, PowerState, SensorSample, TimingConfig, YardConfig, YardController,
};

const STEP_MS: u64 = 20;

struct Bench {
    yard: YardController<MockTrackPower, MockEncoder>,
    now: u64,
}

impl Bench {
    fn new() -> Self {
        Self {
            yard: YardController::new(
                MockTrackPower::new(),
                MockEncoder::new(),
                YardConfig::default(),
            ),
            now: 0,
        }
    }

    fn tick(&mut self, sample: &SensorSample) {
        self.now += STEP_MS;
        self.yard
            .tick(sample, self.now)
            .expect("mock power never fails");
    }

    fn run_idle(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick(&SensorSample::idle());
        }
    }

    fn hold(&mut self, sample: &SensorSample, ticks: u32) {
        for _ in 0..ticks {
            self.tick(sample);
        }
    }

    fn mode(&self) -> PanelMode {
        self.yard.status().mode
    }

    /// Dial `track`, confirm, and wait out the alignment timer.
    fn select_and_align(&mut self, track: i32) {
        self.yard.selector_mut().encoder_mut().position = track;
        self.run_idle(1);
        self.yard.selector_mut().encoder_mut().set_button(true);
        self.run_idle(1);
        self.yard.selector_mut().encoder_mut().set_button(false);
        assert_eq!(self.mode(), PanelMode::TrackSetup);

        let ticks = (TimingConfig::default().alignment_ms / STEP_MS) as u32 + 1;
        self.run_idle(ticks);
        assert_eq!(self.mode(), PanelMode::TrackActive);
    }
}

#[test]
fn boot_lands_in_stand_by_with_select_screen() {
    let mut bench = Bench::new();
    bench.now += STEP_MS;
    let displays = bench
        .yard
        .tick(&SensorSample::idle(), bench.now)
        .expect("mock power never fails");

    assert_eq!(bench.mode(), PanelMode::StandBy);
    assert_eq!(displays[0].text.as_str(), "SELECT TRACK");
    assert_eq!(displays[1].text.as_str(), "TRACK 12");
    // Housekeeping synced the knob to the boot selection.
    assert_eq!(bench.yard.selector_mut().encoder_mut().position, 12);
    // No power command was issued: the output boots de-energized.
    assert!(bench.yard.power_output().history.is_empty());
}

#[test]
fn unexpected_train_blocks_and_releases_panel() {
    let mut bench = Bench::new();
    bench.run_idle(1);

    let train = SensorSample {
        rev_in: false,
        ..SensorSample::idle()
    };
    bench.hold(&train, 3);
    assert_eq!(bench.mode(), PanelMode::Occupied);

    // Held as long as the sensor reads a train.
    bench.hold(&train, 10);
    assert_eq!(bench.mode(), PanelMode::Occupied);

    // Clearing the sensor releases the panel through housekeeping.
    bench.run_idle(1);
    assert_eq!(bench.mode(), PanelMode::Occupied); // release still settling
    bench.run_idle(2);
    assert_eq!(bench.mode(), PanelMode::StandBy);
    assert!(bench.yard.power_output().history.is_empty());
}

#[test]
fn full_outbound_session_powers_on_then_off() {
    let mut bench = Bench::new();
    bench.run_idle(1);
    bench.select_and_align(9);

    let status = bench.yard.status();
    assert_eq!(status.active_track, 9);
    assert_eq!(status.power, PowerState::On);
    assert!(status.status_led);

    // Outbound through the throat: outer first, then both, then inner only.
    let phases = [
        SensorSample {
            main_out: false,
            ..SensorSample::idle()
        },
        SensorSample {
            main_in: false,
            main_out: false,
            ..SensorSample::idle()
        },
        SensorSample {
            main_in: false,
            ..SensorSample::idle()
        },
        SensorSample::idle(),
    ];
    for sample in &phases {
        bench.hold(sample, 3);
    }

    // The completed pass ended the transit; housekeeping powered down.
    bench.run_idle(2);
    assert_eq!(bench.mode(), PanelMode::StandBy);
    let status = bench.yard.status();
    assert_eq!(status.power, PowerState::Off);
    assert!(!status.status_led);
    // The pass-by latch was consumed by the sequencer.
    assert!(!bench.yard.main_tracker().pass_by());
    assert_eq!(
        bench.yard.power_output().history,
        [PowerState::On, PowerState::Off]
    );
}

#[test]
fn inbound_arrival_does_not_end_transit_early() {
    let mut bench = Bench::new();
    bench.run_idle(1);
    bench.select_and_align(10);

    // A train arrives inbound over the reverse loop during the window.
    let phases = [
        SensorSample {
            rev_in: false,
            ..SensorSample::idle()
        },
        SensorSample {
            rev_in: false,
            rev_out: false,
            ..SensorSample::idle()
        },
        SensorSample {
            rev_out: false,
            ..SensorSample::idle()
        },
        SensorSample::idle(),
    ];
    for sample in &phases {
        bench.hold(sample, 3);
    }

    // Inbound pass-by latched, but the transit window keeps running: only
    // an outbound pass, bail-out, or expiry ends it.
    assert!(bench.yard.rev_tracker().pass_by());
    assert!(!bench.yard.rev_tracker().passed_outbound());
    assert_eq!(bench.mode(), PanelMode::TrackActive);
    assert_eq!(bench.yard.status().power, PowerState::On);
}

#[test]
fn bail_out_ends_transit_and_powers_down() {
    let mut bench = Bench::new();
    bench.run_idle(1);
    bench.select_and_align(11);

    let bail = SensorSample {
        bail_out: true,
        ..SensorSample::idle()
    };
    bench.tick(&bail);
    assert_eq!(bench.mode(), PanelMode::Housekeep);
    bench.run_idle(1);
    assert_eq!(bench.mode(), PanelMode::StandBy);
    assert_eq!(
        bench.yard.power_output().history,
        [PowerState::On, PowerState::Off]
    );
}

#[test]
fn transit_timeout_with_clear_yard_returns_to_stand_by() {
    let mut bench = Bench::new();
    bench.run_idle(1);
    bench.select_and_align(7);

    let ticks = (TimingConfig::default().transit_ms / STEP_MS) as u32 + 1;
    bench.run_idle(ticks);
    bench.run_idle(2);
    assert_eq!(bench.mode(), PanelMode::StandBy);
    assert_eq!(bench.yard.status().power, PowerState::Off);
}

#[test]
fn transit_timeout_with_stalled_train_goes_occupied() {
    let mut bench = Bench::new();
    bench.run_idle(1);
    bench.select_and_align(8);

    // The departing train stalls across the throat's inner sensor.
    let stalled = SensorSample {
        main_in: false,
        ..SensorSample::idle()
    };
    let ticks = (TimingConfig::default().transit_ms / STEP_MS) as u32 + 1;
    bench.hold(&stalled, ticks);
    assert_eq!(bench.mode(), PanelMode::Occupied);
    assert_eq!(bench.yard.status().power, PowerState::Off);
    assert_eq!(
        bench.yard.power_output().history,
        [PowerState::On, PowerState::Off]
    );
}

#[test]
fn reselection_after_session_starts_from_active_track() {
    let mut bench = Bench::new();
    bench.run_idle(1);
    bench.select_and_align(9);

    let bail = SensorSample {
        bail_out: true,
        ..SensorSample::idle()
    };
    bench.tick(&bail);
    bench.run_idle(1);
    assert_eq!(bench.mode(), PanelMode::StandBy);

    // Housekeeping synced selection and the knob back to the active track.
    let status = bench.yard.status();
    assert_eq!(status.selected_track, 9);
    assert_eq!(bench.yard.selector_mut().encoder_mut().position, 9);
}
