use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or configuring a simulation.
///
/// Ticking never fails; everything here surfaces at construction time.
#[derive(Debug, Error)]
pub enum Error {
    /// A container needs at least three vertices to enclose anything.
    #[error("invalid geometry: a container needs at least 3 vertices, got {vertices}")]
    InvalidGeometry { vertices: usize },

    /// Invalid user or settings parameter (radius, position, velocity, frame limits).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
