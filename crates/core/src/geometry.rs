//! Geometry module - pixel space helpers
//!
//! Stateless conversions between device pixels and grid coordinates, shared by
//! the selection engine and any render adapter. Cell `(row, col)` occupies the
//! pixel box starting at `(col * cell_width, row * cell_height)`.

use crate::types::{GameConfig, Point};

/// Fixed cell dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width: f32,
    pub cell_height: f32,
}

impl CellMetrics {
    pub const fn new(cell_width: f32, cell_height: f32) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.cell_width, config.cell_height)
    }

    /// Top-left pixel of a cell.
    pub fn cell_origin(&self, row: u16, col: u16) -> Point {
        Point::new(
            col as f32 * self.cell_width,
            row as f32 * self.cell_height,
        )
    }

    /// Geometric center of a cell.
    pub fn cell_center(&self, row: u16, col: u16) -> Point {
        let o = self.cell_origin(row, col);
        Point::new(o.x + self.cell_width / 2.0, o.y + self.cell_height / 2.0)
    }

    /// Unbounded `(row, col)` of the cell containing `p`.
    ///
    /// Negative or too-large results mean the point is off the grid; callers
    /// bounds-check against their own grid.
    pub fn locate(&self, p: Point) -> (i32, i32) {
        (
            (p.y / self.cell_height).floor() as i32,
            (p.x / self.cell_width).floor() as i32,
        )
    }

    /// `(row, col)` of the cell containing `p`, if it lies on a `rows x cols` grid.
    pub fn cell_at(&self, p: Point, rows: u16, cols: u16) -> Option<(u16, u16)> {
        let (row, col) = self.locate(p);
        if row < 0 || col < 0 || row >= rows as i32 || col >= cols as i32 {
            return None;
        }
        Some((row as u16, col as u16))
    }

    /// Pixel size of a whole grid.
    pub fn board_size(&self, rows: u16, cols: u16) -> (f32, f32) {
        (cols as f32 * self.cell_width, rows as f32 * self.cell_height)
    }
}

/// Axis-aligned drag rectangle, normalized so `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRect {
    pub min: Point,
    pub max: Point,
}

impl DragRect {
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Closed containment: edges count as inside.
    #[inline(always)]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}
