//! World configuration
//!
//! Loaded from JSON by the headless driver; validated once when a world is
//! created so the simulation loop never has to re-check it.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{PhysicsError, Result};
use crate::sim::grid::cells_per_axis;

/// Physics world configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // === Container ===
    /// Center of the circular container
    pub boundary_center: Vec2,
    /// Radius of the circular container
    pub boundary_radius: f32,

    // === Bodies ===
    /// Radius given to every spawned body; also sizes the grid cells
    pub body_radius: f32,

    // === Solver ===
    /// Substeps per `step` call
    pub substeps: u32,
    /// Initial gravity, and the value `reset_gravity` restores
    pub gravity: Vec2,
    /// Fraction of overlap closed per pair visit (0.0 - 1.0)
    pub response_coefficient: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            boundary_center: BOUNDARY_CENTER,
            boundary_radius: BOUNDARY_RADIUS,

            body_radius: BODY_RADIUS,

            substeps: SUBSTEPS,
            gravity: DEFAULT_GRAVITY,
            response_coefficient: RESPONSE_COEFFICIENT,
        }
    }
}

impl WorldConfig {
    /// Check every field, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        if !self.boundary_center.is_finite() {
            return Err(invalid(format!(
                "boundary center must be finite, got {}",
                self.boundary_center
            )));
        }
        if !(self.boundary_radius.is_finite() && self.boundary_radius > 0.0) {
            return Err(invalid(format!(
                "boundary radius must be positive, got {}",
                self.boundary_radius
            )));
        }
        if !(self.body_radius.is_finite() && self.body_radius > 0.0) {
            return Err(invalid(format!(
                "body radius must be positive, got {}",
                self.body_radius
            )));
        }
        if self.body_radius >= self.boundary_radius {
            return Err(invalid(format!(
                "body radius {} does not fit inside boundary radius {}",
                self.body_radius, self.boundary_radius
            )));
        }
        if cells_per_axis(self.boundary_radius, self.body_radius).is_none() {
            return Err(invalid(format!(
                "body radius {} is too small for boundary radius {} (grid limit {} cells per axis)",
                self.body_radius, self.boundary_radius, MAX_GRID_CELLS_PER_AXIS
            )));
        }
        if self.substeps == 0 {
            return Err(invalid("substep count must be at least 1".to_string()));
        }
        if !self.gravity.is_finite() {
            return Err(invalid(format!("gravity must be finite, got {}", self.gravity)));
        }
        if !(0.0..=1.0).contains(&self.response_coefficient) {
            return Err(invalid(format!(
                "response coefficient must be in [0, 1], got {}",
                self.response_coefficient
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded world config from {}", path.display());
        Ok(config)
    }
}

fn invalid(msg: String) -> PhysicsError {
    PhysicsError::InvalidParameter(msg)
}
