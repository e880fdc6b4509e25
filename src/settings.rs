//! Simulation settings
//!
//! Everything needed to build a [`SimState`](crate::sim::SimState): the
//! container outline, the ball, and the collision policy. Stored as JSON.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How ball-versus-edge contact is detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactTest {
    /// Distance to the finite segment (handles corners)
    #[default]
    Segment,
    /// Signed distance to the infinite edge line along its inward normal.
    /// Approximation: ignores segment ends, fine when hits land mid-edge.
    Plane,
}

impl ContactTest {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactTest::Segment => "segment",
            ContactTest::Plane => "plane",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "segment" | "seg" => Some(ContactTest::Segment),
            "plane" | "line" => Some(ContactTest::Plane),
            _ => None,
        }
    }
}

/// How many edge responses a single tick may apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Respond to the first approaching contact in edge order, then stop
    #[default]
    FirstHit,
    /// Respond to every approaching contact, in edge index order
    AllEdges,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::FirstHit => "first_hit",
            Resolution::AllEdges => "all_edges",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "first_hit" | "first" => Some(Resolution::FirstHit),
            "all_edges" | "all" => Some(Resolution::AllEdges),
            _ => None,
        }
    }
}

/// Initial ball configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    /// Ball radius (pixels, > 0)
    pub radius: f32,
    /// Start position; `None` starts at the container centroid
    pub position: Option<Vec2>,
    /// Start velocity (pixels/second)
    pub velocity: Vec2,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: 20.0,
            position: None,
            // 3 px per frame at 60 fps
            velocity: Vec2::new(180.0, 180.0),
        }
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Container outline, any winding, convex, at least 3 points
    pub vertices: Vec<Vec2>,
    pub ball: BallSettings,
    pub contact_test: ContactTest,
    pub resolution: Resolution,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vertices: vec![
                Vec2::new(100.0, 500.0),
                Vec2::new(500.0, 500.0),
                Vec2::new(300.0, 100.0),
            ],
            ball: BallSettings::default(),
            contact_test: ContactTest::default(),
            resolution: Resolution::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Boundary checks for values `tick` will not re-check.
    ///
    /// Vertex count is left to [`Container::new`](crate::sim::Container::new).
    pub fn validate(&self) -> Result<()> {
        let radius = self.ball.radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "ball radius must be finite and > 0, got {radius}"
            )));
        }
        if !self.ball.velocity.is_finite() {
            return Err(Error::InvalidParam("ball velocity must be finite".to_string()));
        }
        if let Some(pos) = self.ball.position {
            if !pos.is_finite() {
                return Err(Error::InvalidParam("ball position must be finite".to_string()));
            }
        }
        if let Some(i) = self.vertices.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidParam(format!("vertex {i} is not finite")));
        }
        Ok(())
    }
}
