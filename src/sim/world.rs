//! Physics world and the fixed substep loop
//!
//! Every substep runs the same five stages in a fixed order:
//! gravity, boundary clamp, grid rebuild, collision resolution, integration.
//! Reordering them changes the numerical behavior. In particular the
//! boundary is not re-applied after collision resolution, so a body pushed
//! past the wall stays there until the next substep's clamp.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId};
use super::boundary::{Boundary, ClampOutcome};
use super::collision::resolve_all;
use super::grid::SpatialGrid;
use crate::consts::*;
use crate::error::Result;
use crate::settings::WorldConfig;

/// Read-only view of a body for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub position: Vec2,
    pub radius: f32,
}

/// HUD readout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldStats {
    pub body_count: usize,
    pub gravity: Vec2,
    /// Completed `step` calls
    pub steps: u64,
}

/// Owns every body and drives the simulation
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    config: WorldConfig,
    boundary: Boundary,
    gravity: Vec2,
    /// Bodies in spawn order; the grid refers to them by index
    bodies: Vec<Body>,
    grid: SpatialGrid,
    next_id: u32,
    steps: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::from_valid(WorldConfig::default())
    }
}

impl PhysicsWorld {
    /// Create an empty world, rejecting an invalid config
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: WorldConfig) -> Self {
        let boundary = Boundary::new(config.boundary_center, config.boundary_radius);
        let grid = SpatialGrid::new(&boundary, config.body_radius);
        let (cols, rows) = grid.dimensions();
        log::debug!(
            "World created: boundary r={} at {}, {}x{} grid, {} substeps",
            boundary.radius,
            boundary.center,
            cols,
            rows,
            config.substeps
        );

        Self {
            gravity: config.gravity,
            boundary,
            grid,
            bodies: Vec::new(),
            next_id: 1,
            steps: 0,
            config,
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            body_count: self.bodies.len(),
            gravity: self.gravity,
            steps: self.steps,
        }
    }

    /// Positions and radii of every body, in spawn order
    pub fn body_snapshots(&self) -> Vec<BodySnapshot> {
        self.bodies
            .iter()
            .map(|b| BodySnapshot {
                id: b.id,
                position: b.pos,
                radius: b.radius(),
            })
            .collect()
    }

    // === Mutation (between steps only) ===

    /// Add a body at rest at `position`
    pub fn add_body(&mut self, position: Vec2) -> Result<BodyId> {
        let id = BodyId(self.next_id);
        let body = Body::new(id, position, self.config.body_radius)?;
        self.next_id += 1;
        self.bodies.push(body);
        Ok(id)
    }

    /// Add a body only if `position` is inside the container
    pub fn spawn(&mut self, position: Vec2) -> Result<Option<BodyId>> {
        if !self.boundary.contains(position) {
            return Ok(None);
        }
        self.add_body(position).map(Some)
    }

    /// Add a horizontal row of bodies starting at `position`.
    ///
    /// Gated on `position` alone; the tail of the row may start outside the
    /// container and gets clamped back in on the next substep.
    pub fn spawn_burst(&mut self, position: Vec2) -> Result<Vec<BodyId>> {
        if !self.boundary.contains(position) {
            return Ok(Vec::new());
        }
        let ids = (0..BURST_COUNT)
            .map(|i| self.add_body(position + Vec2::new(i as f32 * BURST_SPACING, 0.0)))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("Burst of {} bodies at {}", ids.len(), position);
        Ok(ids)
    }

    /// Remove every body and release their storage. Ids are not reused.
    pub fn clear_bodies(&mut self) {
        log::debug!("Clearing {} bodies", self.bodies.len());
        self.bodies.clear();
        self.bodies.shrink_to_fit();
    }

    /// Replace gravity; takes effect from the next substep.
    /// Non-finite values are ignored.
    pub fn set_gravity(&mut self, gravity: Vec2) {
        if !gravity.is_finite() {
            log::warn!("Ignoring non-finite gravity {}", gravity);
            return;
        }
        self.gravity = gravity;
    }

    /// Add `delta` to the current gravity
    pub fn nudge_gravity(&mut self, delta: Vec2) {
        self.set_gravity(self.gravity + delta);
    }

    /// Restore the configured gravity
    pub fn reset_gravity(&mut self) {
        self.gravity = self.config.gravity;
    }

    // === Simulation ===

    /// Advance by `dt`, split into the configured number of substeps
    pub fn step(&mut self, dt: f32) {
        if !(dt.is_finite() && dt >= 0.0) {
            log::warn!("Ignoring step with invalid dt {}", dt);
            return;
        }
        let sub_dt = dt / self.config.substeps as f32;
        for _ in 0..self.config.substeps {
            self.substep(sub_dt);
        }
        self.steps += 1;
    }

    fn substep(&mut self, dt: f32) {
        // 1. Gravity
        let gravity = self.gravity;
        for body in &mut self.bodies {
            body.accumulate_force(gravity);
        }

        // 2. Container
        for body in &mut self.bodies {
            if self.boundary.clamp(body) == ClampOutcome::Degenerate {
                log::trace!("Body {} at container center, clamp skipped", body.id);
            }
        }

        // 3. Broad phase
        let overflow = self.grid.rebuild(&self.bodies);
        if overflow > 0 {
            log::trace!("{} bodies outside the grid this substep", overflow);
        }

        // 4. Collisions
        resolve_all(&self.grid, &mut self.bodies, self.config.response_coefficient);

        // 5. Integration
        for body in &mut self.bodies {
            body.integrate(dt);
        }
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    /// Non-overlapping lattice around the container center
    fn populate(world: &mut PhysicsWorld, count: usize) {
        let center = world.boundary().center;
        for k in 0..count {
            let offset = Vec2::new((k % 8) as f32 - 4.0, (k / 8) as f32 - 3.0) * 12.0;
            world.add_body(center + offset).unwrap();
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn bodies_stay_finite_near_container(
            count in 0usize..40,
            bursts in prop::collection::vec((-250.0f32..50.0, -150.0f32..150.0), 1..=3),
            steps in 1usize..150,
        ) {
            let mut world = PhysicsWorld::default();
            populate(&mut world, count);
            let center = world.boundary().center;
            // Origins keep the whole row inside the container
            for (dx, dy) in bursts {
                let ids = world.spawn_burst(center + Vec2::new(dx, dy)).unwrap();
                prop_assert_eq!(ids.len(), BURST_COUNT);
            }

            let boundary = *world.boundary();
            let bound = boundary.radius + WALL_OVERSHOOT_ALLOWANCE;
            for step in 0..steps {
                world.step(PHYSICS_DT);
                for snap in world.body_snapshots() {
                    prop_assert!(snap.position.is_finite());
                    let d = (snap.position - boundary.center).length();
                    prop_assert!(
                        d <= bound,
                        "step {}: body {} at distance {}", step, snap.id, d
                    );
                }
            }
        }

        #[test]
        fn identical_worlds_stay_identical(
            count in 1usize..40,
            gx in -1000.0f32..1000.0,
            gy in -1000.0f32..1000.0,
            steps in 1usize..60,
        ) {
            let mut a = PhysicsWorld::default();
            let mut b = PhysicsWorld::default();
            for world in [&mut a, &mut b] {
                world.set_gravity(Vec2::new(gx, gy));
                populate(world, count);
            }

            for _ in 0..steps {
                a.step(PHYSICS_DT);
                b.step(PHYSICS_DT);
                prop_assert_eq!(a.body_snapshots(), b.body_snapshots());
            }
        }
    }
}
