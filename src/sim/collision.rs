//! Body-body collision response
//!
//! Overlaps are resolved by moving positions apart along the contact normal.
//! No impulses are exchanged; the displacement becomes velocity on the next
//! Verlet integration.

use super::body::Body;
use super::grid::SpatialGrid;
use crate::consts::DEGENERATE_EPSILON;

/// Result of testing one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    /// Not touching
    Separate,
    /// Overlap found and partially corrected
    Corrected,
    /// Centers coincide, no normal to push along; skipped
    Degenerate,
}

/// Push two overlapping bodies apart.
///
/// Each body moves in proportion to the other's radius, so the smaller body
/// gives way more. `response` is the fraction of half the overlap closed by
/// this call.
pub fn resolve_pair(a: &mut Body, b: &mut Body, response: f32) -> PairOutcome {
    let v = a.pos - b.pos;
    let dist_sq = v.length_squared();
    let min_dist = a.radius() + b.radius();

    if dist_sq >= min_dist * min_dist {
        return PairOutcome::Separate;
    }
    if dist_sq <= DEGENERATE_EPSILON {
        log::trace!("Bodies {} and {} share a center, skipping", a.id, b.id);
        return PairOutcome::Degenerate;
    }

    let dist = dist_sq.sqrt();
    let n = v / dist;
    let ratio_a = b.radius() / min_dist;
    let ratio_b = a.radius() / min_dist;
    let delta = response * 0.5 * (min_dist - dist);

    a.pos += n * (ratio_a * delta);
    b.pos -= n * (ratio_b * delta);
    PairOutcome::Corrected
}

/// Counters from one `resolve_all` pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Pair visits that moved bodies
    pub corrected: usize,
    /// Pair visits skipped for coincident centers
    pub degenerate: usize,
}

/// Resolve every near-neighbor overlap found through the grid.
///
/// Each body scans the 3x3 cells around its own, so every pair is visited
/// once from each side. The second visit relaxes what is left of the
/// overlap after the first. Bodies the grid could not place are skipped.
pub fn resolve_all(grid: &SpatialGrid, bodies: &mut [Body], response: f32) -> ResolveStats {
    let mut stats = ResolveStats::default();

    for i in 0..bodies.len() {
        let Some(cell) = grid.placement(i) else {
            continue;
        };
        for j in grid.neighborhood(cell) {
            if j == i {
                continue;
            }
            let (a, b) = pair_mut(bodies, i, j);
            match resolve_pair(a, b, response) {
                PairOutcome::Corrected => stats.corrected += 1,
                PairOutcome::Degenerate => stats.degenerate += 1,
                PairOutcome::Separate => {}
            }
        }
    }

    stats
}

/// Borrow two distinct bodies mutably, in (i, j) order
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::sim::{BodyId, Boundary};
    use glam::Vec2;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn separated_bodies_are_left_alone(
            jitter in prop::collection::vec((-0.9f32..0.9, -0.9f32..0.9), 1..60),
        ) {
            // Lattice spacing 10 minus two jitters still clears one diameter
            let mut bodies: Vec<Body> = jitter
                .iter()
                .enumerate()
                .map(|(k, &(jx, jy))| {
                    let pos = Vec2::new(
                        350.0 + (k % 10) as f32 * 10.0 + jx,
                        270.0 + (k / 10) as f32 * 10.0 + jy,
                    );
                    Body::new(BodyId(k as u32 + 1), pos, 4.0).unwrap()
                })
                .collect();
            let before: Vec<Vec2> = bodies.iter().map(|b| b.pos).collect();

            let mut grid = SpatialGrid::new(&Boundary::new(Vec2::new(400.0, 300.0), 300.0), 4.0);
            prop_assert_eq!(grid.rebuild(&bodies), 0);
            let stats = resolve_all(&grid, &mut bodies, 0.75);

            prop_assert_eq!(stats, ResolveStats::default());
            for (body, pos) in bodies.iter().zip(&before) {
                prop_assert_eq!(body.pos, *pos);
            }
        }
    }
}
