//! Deterministic simulation module
//!
//! Everything that moves the ball lives here:
//! - Measured-time integration only
//! - Stable edge iteration order (declaration order)
//! - No rendering or platform dependencies

pub mod container;
pub mod geometry;
pub mod state;
pub mod tick;

pub use container::{Container, Edge};
pub use geometry::{
    SegmentProjection, closest_point_on_segment, derive_inward_normal, reflect,
    segment_projection, signed_distance_to_line,
};
pub use state::{Ball, BallSnapshot, SimEvent, SimPhase, SimState, Snapshot};
pub use tick::{Contact, TickInput, overlaps, probe_edge, tick};
