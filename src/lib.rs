//! Polybounce - a ball bouncing inside a convex polygon
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, container, tick)
//! - `platform`: Frame clock, input and renderer seams plus headless stand-ins
//! - `runner`: Frame loop feeding measured time through fixed substeps
//! - `settings`: JSON configuration

pub mod error;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use runner::{RunSummary, Runner};
pub use settings::{BallSettings, ContactTest, Resolution, Settings};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the runner will account for (seconds); longer stalls are dropped
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Overlap below this (pixels) counts as touching, not penetrating
    pub const CONTACT_SLOP: f32 = 1e-3;
}
