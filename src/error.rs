//! Error types for the physics core.
//!
//! The simulation itself only fails on bad parameters; the JSON and IO
//! variants come from config loading. Degenerate geometry and grid overflow
//! are recovered inside a substep and never surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
