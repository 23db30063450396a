//! Circular container
//!
//! Bodies are projected back onto the circle of radius `radius - body.radius`.
//! Only the current position moves, so a wall hit also rewrites the body's
//! implicit velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::length_and_direction;

/// What a clamp did to a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampOutcome {
    /// Body was already inside
    Inside,
    /// Body was projected back onto the inner circle
    Projected,
    /// Body sits on the center with no usable direction; left alone
    Degenerate,
}

/// Circular containment constraint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub center: Vec2,
    pub radius: f32,
}

impl Boundary {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if a point lies inside the container (edge inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    /// Lower-left corner of the container's bounding square
    #[inline]
    pub fn min_corner(&self) -> Vec2 {
        self.center - Vec2::splat(self.radius)
    }

    /// Side length of the container's bounding square
    #[inline]
    pub fn extent(&self) -> f32 {
        self.radius * 2.0
    }

    /// Pull a body back inside the container
    pub fn clamp(&self, body: &mut Body) -> ClampOutcome {
        let limit = self.radius - body.radius();
        let offset = body.pos - self.center;

        if limit >= 0.0 && offset.length_squared() <= limit * limit {
            return ClampOutcome::Inside;
        }

        match length_and_direction(offset) {
            Some((_, dir)) => {
                body.pos = self.center + dir * limit;
                ClampOutcome::Projected
            }
            None => ClampOutcome::Degenerate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BodyId;

    fn boundary() -> Boundary {
        Boundary::new(Vec2::new(400.0, 300.0), 300.0)
    }

    #[test]
    fn test_inside_untouched() {
        let b = boundary();
        let mut body = Body::new(BodyId(1), Vec2::new(450.0, 320.0), 4.0).unwrap();
        assert_eq!(b.clamp(&mut body), ClampOutcome::Inside);
        assert_eq!(body.pos, Vec2::new(450.0, 320.0));
    }

    #[test]
    fn test_outside_projected() {
        let b = boundary();
        let mut body = Body::new(BodyId(1), Vec2::new(400.0, 700.0), 4.0).unwrap();
        assert_eq!(b.clamp(&mut body), ClampOutcome::Projected);
        assert!((body.pos - Vec2::new(400.0, 596.0)).length() < 1e-3);
    }

    #[test]
    fn test_clamp_moves_position_only() {
        let b = boundary();
        let mut body = Body::new(BodyId(1), Vec2::new(400.0, 590.0), 4.0).unwrap();
        body.pos = Vec2::new(400.0, 610.0);
        b.clamp(&mut body);
        assert_eq!(body.prev_pos(), Vec2::new(400.0, 590.0));
        // Outward motion is mostly absorbed by the wall
        assert!((body.velocity().y - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_skipped() {
        // Body bigger than the container: any offset is outside the limit,
        // but at the exact center there is no direction to push along.
        let b = Boundary::new(Vec2::ZERO, 2.0);
        let mut body = Body::new(BodyId(1), Vec2::ZERO, 3.0).unwrap();
        assert_eq!(b.clamp(&mut body), ClampOutcome::Degenerate);
        assert_eq!(body.pos, Vec2::ZERO);
    }

    #[test]
    fn test_contains() {
        let b = boundary();
        assert!(b.contains(Vec2::new(400.0, 300.0)));
        assert!(b.contains(Vec2::new(700.0, 300.0)));
        assert!(!b.contains(Vec2::new(701.0, 300.0)));
        assert!(!b.contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_bounding_square() {
        let b = boundary();
        assert_eq!(b.min_corner(), Vec2::new(100.0, 0.0));
        assert_eq!(b.extent(), 600.0);
    }
}
