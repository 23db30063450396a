//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed substep count per step
//! - Stable iteration order (bodies in spawn order)
//! - No rendering, platform or I/O dependencies

pub mod body;
pub mod boundary;
pub mod collision;
pub mod grid;
pub mod world;

pub use body::{Body, BodyId};
pub use boundary::{Boundary, ClampOutcome};
pub use collision::{PairOutcome, ResolveStats, resolve_all, resolve_pair};
pub use grid::{CellCoord, SpatialGrid};
pub use world::{BodySnapshot, PhysicsWorld, WorldStats};
