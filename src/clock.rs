//! Fixed-cadence driver
//!
//! Decouples the physics rate from the frame rate: frame time is banked and
//! spent in whole `PHYSICS_DT` steps.

use crate::consts::*;
use crate::sim::PhysicsWorld;

#[derive(Debug, Clone)]
pub struct FixedStepper {
    step_dt: f32,
    max_steps: u32,
    accumulator: f32,
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self::new(PHYSICS_DT, MAX_STEPS_PER_FRAME)
    }
}

impl FixedStepper {
    /// Non-positive or non-finite `step_dt` falls back to `PHYSICS_DT`
    pub fn new(step_dt: f32, max_steps: u32) -> Self {
        let step_dt = if step_dt.is_finite() && step_dt > 0.0 {
            step_dt
        } else {
            log::warn!("Invalid physics step {}, using {}", step_dt, PHYSICS_DT);
            PHYSICS_DT
        };
        Self {
            step_dt,
            max_steps,
            accumulator: 0.0,
        }
    }

    /// Bank `frame_dt` and run as many whole steps as it covers.
    ///
    /// Returns the number of steps taken. Time beyond `max_steps` steps is
    /// dropped rather than carried into later frames.
    pub fn advance(&mut self, world: &mut PhysicsWorld, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut steps = 0;
        while self.accumulator >= self.step_dt && steps < self.max_steps {
            world.step(self.step_dt);
            self.accumulator -= self.step_dt;
            steps += 1;
        }

        if steps == self.max_steps && self.accumulator >= self.step_dt {
            log::debug!("Physics falling behind, dropping {:.3}s", self.accumulator);
            self.accumulator %= self.step_dt;
        }
        steps
    }

    /// Fraction of a step left in the accumulator (0.0 - 1.0)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step_dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
