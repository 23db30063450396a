//! Verlet body
//!
//! Velocity is never stored: it is the difference between the current and
//! previous position. Anything that moves `pos` directly (boundary clamp,
//! collision correction) therefore changes the velocity seen by the next
//! `integrate`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Stable body identifier, allocated monotonically and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u32);

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single simulated particle
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    /// Current position
    pub pos: Vec2,
    /// Position before the last integration
    prev_pos: Vec2,
    /// Acceleration accumulated since the last integration
    acc: Vec2,
    radius: f32,
}

impl Body {
    /// Create a body at rest
    pub fn new(id: BodyId, pos: Vec2, radius: f32) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "body radius must be positive, got {radius}"
            )));
        }
        if !pos.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "body position must be finite, got {pos}"
            )));
        }
        Ok(Self {
            id,
            pos,
            prev_pos: pos,
            acc: Vec2::ZERO,
            radius,
        })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn prev_pos(&self) -> Vec2 {
        self.prev_pos
    }

    /// Pending acceleration (cleared by `integrate`)
    #[inline]
    pub fn pending_acceleration(&self) -> Vec2 {
        self.acc
    }

    /// Implicit per-step displacement
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.pos - self.prev_pos
    }

    /// Add to the pending acceleration; takes effect at the next `integrate`
    #[inline]
    pub fn accumulate_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    /// Verlet update: pos += (pos - prev) + acc * dt²
    pub fn integrate(&mut self, dt: f32) {
        let velocity = self.pos - self.prev_pos;
        self.prev_pos = self.pos;
        self.pos = self.pos + velocity + self.acc * (dt * dt);
        self.acc = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_body_at_rest() {
        let body = Body::new(BodyId(1), Vec2::new(10.0, 20.0), 4.0).unwrap();
        assert_eq!(body.pos, body.prev_pos());
        assert_eq!(body.pending_acceleration(), Vec2::ZERO);
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert_eq!(body.radius(), 4.0);
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert!(matches!(
            Body::new(BodyId(1), Vec2::ZERO, 0.0),
            Err(PhysicsError::InvalidParameter(_))
        ));
        assert!(Body::new(BodyId(1), Vec2::ZERO, -1.0).is_err());
        assert!(Body::new(BodyId(1), Vec2::ZERO, f32::NAN).is_err());
    }

    #[test]
    fn test_rejects_non_finite_position() {
        assert!(Body::new(BodyId(1), Vec2::new(f32::INFINITY, 0.0), 4.0).is_err());
    }

    #[test]
    fn test_force_is_deferred_until_integrate() {
        let mut body = Body::new(BodyId(1), Vec2::ZERO, 1.0).unwrap();
        body.accumulate_force(Vec2::new(0.0, 10.0));
        body.accumulate_force(Vec2::new(0.0, 10.0));
        assert_eq!(body.pos, Vec2::ZERO);
        assert_eq!(body.pending_acceleration(), Vec2::new(0.0, 20.0));

        body.integrate(0.5);
        // 20 * 0.25
        assert!((body.pos - Vec2::new(0.0, 5.0)).length() < 1e-6);
        assert_eq!(body.prev_pos(), Vec2::ZERO);
        assert_eq!(body.pending_acceleration(), Vec2::ZERO);
    }

    #[test]
    fn test_integrate_keeps_implicit_velocity() {
        let mut body = Body::new(BodyId(1), Vec2::ZERO, 1.0).unwrap();
        body.pos = Vec2::new(1.0, 0.0);
        body.integrate(0.1);
        assert!((body.pos - Vec2::new(2.0, 0.0)).length() < 1e-6);
        body.integrate(0.1);
        assert!((body.pos - Vec2::new(3.0, 0.0)).length() < 1e-6);
    }
}
