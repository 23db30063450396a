//! Uniform-cell broad phase
//!
//! Cells are one body diameter wide, so any two overlapping bodies sit in
//! the same or adjacent cells and a 3x3 scan finds every candidate pair.
//! The grid covers the container's bounding square and is rebuilt from
//! scratch every substep. Cell buffers are allocated once and cleared in
//! place, so a rebuild does not allocate once the cells have warmed up.

use glam::Vec2;

use super::body::Body;
use super::boundary::Boundary;
use crate::consts::{MAX_GRID_CELLS, MAX_GRID_CELLS_PER_AXIS};

/// Cells per axis needed to cover a container of `boundary_radius` with
/// cells one body diameter wide.
///
/// Returns `None` when the count is not finite or exceeds the grid limits.
pub fn cells_per_axis(boundary_radius: f32, body_radius: f32) -> Option<usize> {
    let count = (boundary_radius / body_radius).ceil();
    if !count.is_finite() || count > MAX_GRID_CELLS_PER_AXIS as f32 {
        return None;
    }
    let axis = (count as usize).max(1);
    axis.checked_mul(axis)
        .filter(|&total| total <= MAX_GRID_CELLS)
        .map(|_| axis)
}

/// Column/row of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
}

/// Broad-phase index of body indices by cell
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    origin: Vec2,
    cell_size: f32,
    cols: usize,
    rows: usize,
    /// Row-major cell contents (indices into the world's body list)
    cells: Vec<Vec<usize>>,
    /// Cell of each body from the last rebuild, `None` if it fell outside
    placements: Vec<Option<CellCoord>>,
}

impl SpatialGrid {
    /// Size a grid over `boundary` for bodies of `body_radius`.
    ///
    /// Past the grid limits the cells grow beyond one diameter instead; the
    /// 3x3 scan stays complete, it just checks more candidates.
    pub fn new(boundary: &Boundary, body_radius: f32) -> Self {
        let (cols, cell_size) = match cells_per_axis(boundary.radius, body_radius) {
            Some(cols) => (cols, body_radius * 2.0),
            None => {
                log::warn!(
                    "Body radius {} too small for boundary radius {}, using coarse grid",
                    body_radius,
                    boundary.radius
                );
                let cols = MAX_GRID_CELLS_PER_AXIS;
                (cols, boundary.extent() / cols as f32)
            }
        };
        let rows = cols;

        Self {
            origin: boundary.min_corner(),
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
            placements: Vec::new(),
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Grid dimensions as (columns, rows)
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Map a world position to its cell, or `None` outside the grid
    pub fn cell_of(&self, pos: Vec2) -> Option<CellCoord> {
        let rel = (pos - self.origin) / self.cell_size;
        // Also rejects NaN
        if !(rel.x >= 0.0 && rel.y >= 0.0) {
            return None;
        }
        let x = rel.x as usize;
        let y = rel.y as usize;
        if x >= self.cols || y >= self.rows {
            return None;
        }
        Some(CellCoord { x, y })
    }

    /// Clear every cell and re-insert all bodies by current position.
    ///
    /// Returns how many bodies fell outside the grid. Those bodies are left
    /// out of this substep's collision pass only.
    pub fn rebuild(&mut self, bodies: &[Body]) -> usize {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.placements.clear();

        let mut overflow = 0;
        for (index, body) in bodies.iter().enumerate() {
            let coord = self.cell_of(body.pos);
            match coord {
                Some(c) => self.cells[c.y * self.cols + c.x].push(index),
                None => {
                    overflow += 1;
                    log::trace!("Body {} at {} is outside the grid", body.id, body.pos);
                }
            }
            self.placements.push(coord);
        }
        overflow
    }

    /// Cell a body landed in during the last rebuild
    #[inline]
    pub fn placement(&self, index: usize) -> Option<CellCoord> {
        self.placements.get(index).copied().flatten()
    }

    /// Body indices stored in one cell
    pub fn cell(&self, coord: CellCoord) -> &[usize] {
        &self.cells[coord.y * self.cols + coord.x]
    }

    /// Body indices in the 3x3 block of cells around `coord`
    pub fn neighborhood(&self, coord: CellCoord) -> impl Iterator<Item = usize> + '_ {
        let x0 = coord.x.saturating_sub(1);
        let x1 = (coord.x + 1).min(self.cols - 1);
        let y0 = coord.y.saturating_sub(1);
        let y1 = (coord.y + 1).min(self.rows - 1);

        (y0..=y1).flat_map(move |y| {
            (x0..=x1).flat_map(move |x| self.cells[y * self.cols + x].iter().copied())
        })
    }
}
