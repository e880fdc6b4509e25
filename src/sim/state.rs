//! Simulation state and snapshot types
//!
//! `SimState` is the explicit context object: it owns the container and the
//! ball, and is the only thing `tick` mutates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::container::Container;
use crate::error::{Error, Result};
use crate::settings::{ContactTest, Resolution, Settings};

/// Lifecycle of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// Advancing one tick per call
    Running,
    /// Quit was requested; terminal
    Stopped,
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Velocity was reflected off an edge (or one of its corners)
    Bounce { edge: usize, normal: Vec2, speed: f32 },
    /// Simulation entered the Stopped phase
    Stopped,
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Plain-value copy of the ball for renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SimPhase,
    pub time_ticks: u64,
    pub ball: BallSnapshot,
    pub vertices: Vec<Vec2>,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct SimState {
    pub phase: SimPhase,
    pub container: Container,
    pub ball: Ball,
    pub contact_test: ContactTest,
    pub resolution: Resolution,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Total velocity reflections so far
    pub bounces: u64,
    /// Events from the most recent tick; `tick` clears it on entry
    pub events: Vec<SimEvent>,
}

impl SimState {
    /// Build a running simulation from validated settings
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let container = Container::new(&settings.vertices)?;

        let pos = settings.ball.position.unwrap_or_else(|| container.centroid());
        if !container.contains(pos) {
            log::warn!("Ball starts outside the container at {:?}", pos);
        }

        log::info!(
            "Simulation ready: {} edges, ball r={} at {:?}, {} contacts, {} resolution",
            container.len(),
            settings.ball.radius,
            pos,
            settings.contact_test.as_str(),
            settings.resolution.as_str()
        );

        Ok(Self {
            phase: SimPhase::Running,
            container,
            ball: Ball::new(pos, settings.ball.velocity, settings.ball.radius),
            contact_test: settings.contact_test,
            resolution: settings.resolution,
            time_ticks: 0,
            bounces: 0,
            events: Vec::new(),
        })
    }

    /// Build from a ready container and ball, with the reference policies
    pub fn with_ball(container: Container, ball: Ball) -> Result<Self> {
        if !ball.radius.is_finite() || ball.radius <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "ball radius must be finite and > 0, got {}",
                ball.radius
            )));
        }
        if !ball.pos.is_finite() || !ball.vel.is_finite() {
            return Err(Error::InvalidParam(
                "ball position and velocity must be finite".to_string(),
            ));
        }
        Ok(Self {
            phase: SimPhase::Running,
            container,
            ball,
            contact_test: ContactTest::default(),
            resolution: Resolution::default(),
            time_ticks: 0,
            bounces: 0,
            events: Vec::new(),
        })
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == SimPhase::Running
    }

    /// Take the last tick's events
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            time_ticks: self.time_ticks,
            ball: BallSnapshot {
                pos: self.ball.pos,
                vel: self.ball.vel,
                radius: self.ball.radius,
            },
            vertices: self.container.vertices().to_vec(),
        }
    }
}
