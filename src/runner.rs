//! Frame loop
//!
//! Turns measured frame time into fixed `SIM_DT` substeps and hands a
//! snapshot to the renderer after each frame. Quit is only observed here,
//! between frames, never in the middle of a tick.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::platform::{EventSource, FrameClock, Renderer};
use crate::sim::{SimEvent, SimState, TickInput, tick};

/// Totals reported when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub frames: u64,
    pub ticks: u64,
    pub bounces: u64,
}

/// Owns a simulation and its time accumulator
#[derive(Debug)]
pub struct Runner {
    pub state: SimState,
    accumulator: f32,
    frames: u64,
    /// Events from this frame's substeps, logged at the end of the frame
    pending: Vec<SimEvent>,
}

impl Runner {
    pub fn new(state: SimState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            frames: 0,
            pending: Vec::new(),
        }
    }

    /// Run simulation ticks covering `dt` seconds of wall time
    ///
    /// Returns the number of substeps taken. Time the substep cap could not
    /// cover is dropped rather than carried into the next frame.
    pub fn update(&mut self, dt: f32) -> u32 {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let input = TickInput::default();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &input, SIM_DT);
            self.pending.append(&mut self.state.events);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.4}s of frame time", self.accumulator);
            self.accumulator = 0.0;
        }

        substeps
    }

    /// One full frame: poll quit, advance, log events, draw
    ///
    /// Returns false once the simulation has stopped.
    pub fn frame(
        &mut self,
        clock: &mut impl FrameClock,
        events: &mut impl EventSource,
        renderer: &mut impl Renderer,
    ) -> bool {
        let dt = clock.frame_dt();

        if events.quit_requested() {
            tick(&mut self.state, &TickInput { quit: true }, 0.0);
            self.pending.append(&mut self.state.events);
        } else {
            self.update(dt);
        }
        self.frames += 1;

        for event in self.pending.drain(..) {
            match event {
                SimEvent::Bounce { edge, normal, speed } => {
                    log::debug!(
                        "Frame {}: bounce edge {} n={:?} speed={:.2}",
                        self.frames,
                        edge,
                        normal,
                        speed
                    );
                }
                SimEvent::Stopped => log::info!("Frame {}: stopped", self.frames),
            }
        }

        renderer.draw(&self.state.snapshot());
        self.state.is_running()
    }

    /// Loop frames until the simulation stops
    pub fn run(
        &mut self,
        clock: &mut impl FrameClock,
        events: &mut impl EventSource,
        renderer: &mut impl Renderer,
    ) -> RunSummary {
        while self.frame(clock, events, renderer) {}

        let summary = self.summary();
        log::info!(
            "Run finished: {} frames, {} ticks, {} bounces",
            summary.frames,
            summary.ticks,
            summary.bounces
        );
        summary
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.frames,
            ticks: self.state.time_ticks,
            bounces: self.state.bounces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FixedClock, FrameLimit, NullRenderer};
    use crate::settings::Settings;
    use crate::sim::{SimPhase, Snapshot};

    /// Keeps every snapshot it is handed
    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<Snapshot>,
    }

    impl Renderer for RecordingRenderer {
        fn draw(&mut self, snapshot: &Snapshot) {
            self.frames.push(snapshot.clone());
        }
    }

    fn runner() -> Runner {
        Runner::new(SimState::new(&Settings::default()).unwrap())
    }

    #[test]
    fn test_update_runs_whole_substeps() {
        let mut runner = runner();
        // 60 Hz frame = two 120 Hz substeps
        assert_eq!(runner.update(1.0 / 60.0 + 1e-6), 2);
        assert_eq!(runner.state.time_ticks, 2);

        // Less than a substep accumulates without ticking
        assert_eq!(runner.update(SIM_DT * 0.5), 0);
        assert_eq!(runner.update(SIM_DT * 0.6), 1);
    }

    #[test]
    fn test_update_caps_substeps() {
        let mut runner = runner();
        assert_eq!(runner.update(10.0), MAX_SUBSTEPS);
        // Dropped, not carried over
        assert_eq!(runner.update(0.0), 0);
    }

    #[test]
    fn test_update_collects_substep_events() {
        let mut settings = Settings::default();
        settings.ball.position = Some(glam::Vec2::new(300.0, 478.0));
        settings.ball.velocity = glam::Vec2::new(0.0, 300.0);
        let mut runner = Runner::new(SimState::new(&settings).unwrap());

        // Bounce lands in the first substep, the second one leaves nothing
        assert_eq!(runner.update(1.0 / 60.0 + 1e-6), 2);
        assert!(runner.state.events.is_empty());
        assert!(matches!(
            runner.pending.as_slice(),
            [SimEvent::Bounce { edge: 0, .. }]
        ));
    }

    #[test]
    fn test_update_ignores_bad_dt() {
        let mut runner = runner();
        assert_eq!(runner.update(f32::NAN), 0);
        assert_eq!(runner.update(-1.0), 0);
        assert_eq!(runner.state.time_ticks, 0);
    }

    #[test]
    fn test_run_until_frame_limit() {
        let mut runner = runner();
        let mut renderer = RecordingRenderer::default();
        let summary = runner.run(
            &mut FixedClock::new(60.0),
            &mut FrameLimit::new(30),
            &mut renderer,
        );

        // 30 running frames plus the frame that observed quit
        assert_eq!(summary.frames, 31);
        assert_eq!(renderer.frames.len(), 31);
        assert_eq!(runner.state.phase, SimPhase::Stopped);
        assert_eq!(renderer.frames.last().unwrap().phase, SimPhase::Stopped);
        assert!(summary.ticks >= 59 && summary.ticks <= 60);
    }

    #[test]
    fn test_quit_on_first_frame() {
        let mut runner = runner();
        let start = runner.state.ball.pos;
        let summary = runner.run(
            &mut FixedClock::new(60.0),
            &mut FrameLimit::new(0),
            &mut NullRenderer,
        );
        assert_eq!(summary.ticks, 0);
        assert_eq!(runner.state.ball.pos, start);
    }
}
