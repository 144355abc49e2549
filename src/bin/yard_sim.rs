//! Desktop simulator for the staging yard panel.
//!
//! Runs the full controller against mock hardware and a console display,
//! scripting one complete session: select track 9, confirm, wait out
//! turnout alignment, and send a train outbound through the yard throat.
//! Prints every display request and a status report at each phase so the
//! sequencer can be watched end to end without a soldering iron.

use std::io::{self, Write};

use anyhow::Context;

use rs_yardz::hal::{MockClock, MockEncoder, MockTrackPower};
use rs_yardz::{
    Clock, DisplayRequest, PanelDisplay, PanelMode, SensorSample, StatusReport, YardConfig,
    YardController,
};

/// Renders display requests as console lines.
struct ConsoleDisplay {
    out: io::Stdout,
}

impl ConsoleDisplay {
    fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl PanelDisplay for ConsoleDisplay {
    type Error = io::Error;

    fn init(&mut self) -> Result<(), io::Error> {
        writeln!(self.out, "[display] ready")
    }

    fn clear(&mut self) -> Result<(), io::Error> {
        writeln!(self.out, "[display] ----------------")
    }

    fn draw(&mut self, request: &DisplayRequest) -> Result<(), io::Error> {
        writeln!(
            self.out,
            "[display] ({:>3},{:>3}) x{} {}{}",
            request.x,
            request.y,
            request.size,
            request.text,
            if request.commit { "  *" } else { "" },
        )
    }
}

struct Sim {
    yard: YardController<MockTrackPower, MockEncoder>,
    clock: MockClock,
    display: ConsoleDisplay,
    step_ms: u64,
}

impl Sim {
    /// Advance one loop tick with the given raw sample.
    fn tick(&mut self, sample: &SensorSample) -> anyhow::Result<()> {
        self.clock.advance(self.step_ms);
        let displays = self
            .yard
            .tick(sample, self.clock.now_ms())
            .map_err(|_| anyhow::anyhow!("track power output rejected command"))?;
        for request in &displays {
            self.display.draw(request).context("display write failed")?;
            if request.commit {
                self.display.clear().context("display write failed")?;
            }
        }
        Ok(())
    }

    fn run_idle(&mut self, ticks: u32) -> anyhow::Result<()> {
        let idle = SensorSample::idle();
        for _ in 0..ticks {
            self.tick(&idle)?;
        }
        Ok(())
    }

    /// Hold one raw sensor phase long enough for the debouncer to commit.
    fn hold_phase(&mut self, sample: &SensorSample, ticks: u32) -> anyhow::Result<()> {
        for _ in 0..ticks {
            self.tick(sample)?;
        }
        Ok(())
    }

    fn report(&self, phase: &str) {
        let status = self.yard.status();
        println!("--- {phase} (t={} ms) ---", self.clock.now_ms());
        print!("{}", StatusReport::new(&status));
    }
}

fn main() -> anyhow::Result<()> {
    let config = YardConfig::default();
    println!(
        "{} [{}] tracks {}-{}",
        config.device.name, config.device.id, config.tracks.min, config.tracks.max
    );

    let mut display = ConsoleDisplay::new();
    display
        .init()
        .context("display init failed, refusing to start")?;

    let step_ms = config.timing.loop_interval_ms;
    let alignment_ticks = (config.timing.alignment_ms / step_ms) as u32 + 1;
    let mut sim = Sim {
        yard: YardController::new(MockTrackPower::new(), MockEncoder::new(), config),
        clock: MockClock::new(),
        display,
        step_ms,
    };

    // Boot: housekeeping syncs the knob and lands in stand-by.
    sim.run_idle(1)?;
    sim.report("boot");

    // Operator dials down to track 9 and confirms.
    sim.yard.selector_mut().encoder_mut().position = 9;
    sim.run_idle(1)?;
    sim.yard.selector_mut().encoder_mut().set_button(true);
    sim.run_idle(1)?;
    sim.yard.selector_mut().encoder_mut().set_button(false);
    sim.report("confirmed");

    // Turnouts align, then the track energizes.
    sim.run_idle(alignment_ticks)?;
    sim.report("aligned");
    anyhow::ensure!(
        sim.yard.status().mode == PanelMode::TrackActive,
        "expected TRACK_ACTIVE after alignment, got {}",
        sim.yard.status().mode.as_str()
    );

    // Outbound departure through the throat: outer sensor first, active-low.
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
        sim.hold_phase(sample, 4)?;
    }
    sim.report("train passed out");

    // The pass-by ends the transit; one more tick runs housekeeping.
    sim.run_idle(2)?;
    sim.report("back to stand-by");
    anyhow::ensure!(
        sim.yard.status().mode == PanelMode::StandBy,
        "expected STAND_BY after transit, got {}",
        sim.yard.status().mode.as_str()
    );

    let history = &sim.yard.power_output().history;
    println!("power command history: {history:?}");
    Ok(())
}
