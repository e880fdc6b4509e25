//! Platform abstraction layer
//!
//! The simulation never talks to a window directly. The frame loop reaches
//! the outside world through three seams:
//! - `FrameClock`: elapsed wall time per frame
//! - `EventSource`: the quit signal, polled once per frame
//! - `Renderer`: draws a snapshot
//!
//! Only headless implementations ship here.

use std::time::Instant;

use crate::sim::Snapshot;

/// Elapsed time between frames
pub trait FrameClock {
    /// Seconds since the previous call
    fn frame_dt(&mut self) -> f32;
}

/// Source of external control events
pub trait EventSource {
    /// Whether the user asked to quit since the last poll
    fn quit_requested(&mut self) -> bool;
}

/// Consumer of per-frame snapshots
pub trait Renderer {
    fn draw(&mut self, snapshot: &Snapshot);
}

/// Clock that reports the same dt every frame
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub dt: f32,
}

impl FixedClock {
    pub fn new(hz: f32) -> Self {
        Self { dt: 1.0 / hz }
    }
}

impl FrameClock for FixedClock {
    fn frame_dt(&mut self) -> f32 {
        self.dt
    }
}

/// Wall clock based on `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn frame_dt(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// Requests quit once a fixed number of frames have been polled
#[derive(Debug, Clone, Copy)]
pub struct FrameLimit {
    remaining: u64,
}

impl FrameLimit {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }
}

impl EventSource for FrameLimit {
    fn quit_requested(&mut self) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        false
    }
}

/// Logs the ball every `every` frames
#[derive(Debug, Clone)]
pub struct LogRenderer {
    every: u64,
    frames: u64,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, snapshot: &Snapshot) {
        if self.frames % self.every == 0 {
            log::info!(
                "tick {:>6}  pos=({:7.2}, {:7.2})  vel=({:7.2}, {:7.2})",
                snapshot.time_ticks,
                snapshot.ball.pos.x,
                snapshot.ball.pos.y,
                snapshot.ball.vel.x,
                snapshot.ball.vel.y
            );
        }
        self.frames += 1;
    }
}

/// Discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _snapshot: &Snapshot) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let mut clock = FixedClock::new(60.0);
        assert!((clock.frame_dt() - 1.0 / 60.0).abs() < 1e-7);
        assert_eq!(clock.frame_dt(), clock.frame_dt());
    }

    #[test]
    fn test_system_clock_is_non_negative() {
        let mut clock = SystemClock::new();
        assert!(clock.frame_dt() >= 0.0);
    }

    #[test]
    fn test_frame_limit() {
        let mut events = FrameLimit::new(2);
        assert!(!events.quit_requested());
        assert!(!events.quit_requested());
        assert!(events.quit_requested());
        assert!(events.quit_requested());
    }
}
