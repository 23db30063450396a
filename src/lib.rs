//! Verlet Bowl - real-time 2D particle physics in a circular container
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, boundary, broad-phase grid, collisions)
//! - `settings`: World configuration (JSON-loadable)
//! - `clock`: Fixed-cadence driver for the simulation step
//! - `error`: Error types

pub mod clock;
pub mod error;
pub mod settings;
pub mod sim;

pub use clock::FixedStepper;
pub use error::{PhysicsError, Result};
pub use settings::WorldConfig;
pub use sim::{BodyId, BodySnapshot, PhysicsWorld, WorldStats};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed physics timestep handed to `PhysicsWorld::step` (30 Hz)
    pub const PHYSICS_DT: f32 = 1.0 / 30.0;
    /// Maximum physics steps per frame to prevent spiral of death
    pub const MAX_STEPS_PER_FRAME: u32 = 4;
    /// Frame deltas above this are treated as a stall and clamped
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Substeps per `step` call
    pub const SUBSTEPS: u32 = 8;

    /// Container defaults
    pub const BOUNDARY_CENTER: Vec2 = Vec2::new(400.0, 300.0);
    pub const BOUNDARY_RADIUS: f32 = 300.0;

    /// Radius of every spawned body
    pub const BODY_RADIUS: f32 = 4.0;

    /// Default gravity (pixels/s², +y is down)
    pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, 1000.0);
    /// Gravity change per nudge
    pub const GRAVITY_NUDGE: f32 = 100.0;

    /// Fraction of overlap closed per pair visit, in [0, 1].
    /// Lower is softer and more stable, higher is stiffer.
    pub const RESPONSE_COEFFICIENT: f32 = 0.75;

    /// Squared lengths below this have no usable direction
    pub const DEGENERATE_EPSILON: f32 = 1e-6;

    /// Burst spawn: body count and horizontal spacing
    pub const BURST_COUNT: usize = 100;
    pub const BURST_SPACING: f32 = 2.0;

    /// Broad-phase grid size limits. Configs whose container/body radius
    /// ratio needs more cells than this are rejected.
    pub const MAX_GRID_CELLS_PER_AXIS: usize = 1024;
    pub const MAX_GRID_CELLS: usize = MAX_GRID_CELLS_PER_AXIS * MAX_GRID_CELLS_PER_AXIS;

    /// How far past the container radius a body may sit between steps.
    ///
    /// The boundary is clamped before collisions and integration, so a body
    /// pushed outward by a crowd, or moving fast at impact, ends a step
    /// outside the wall and is pulled back by the next clamp. Dense piles
    /// under default gravity stay well under one body radius past the wall;
    /// bursts of overlapping spawns have reached about 7 body radii.
    pub const WALL_OVERSHOOT_ALLOWANCE: f32 = 20.0 * BODY_RADIUS;
}

/// Split `v` into its length and unit direction.
///
/// Returns `None` when `v` is too short to have a usable direction.
#[inline]
pub fn length_and_direction(v: Vec2) -> Option<(f32, Vec2)> {
    let len_sq = v.length_squared();
    if len_sq <= consts::DEGENERATE_EPSILON {
        return None;
    }
    let len = len_sq.sqrt();
    Some((len, v / len))
}
