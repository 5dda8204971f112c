//! Selection module - rectangular drag selection and sum validation
//!
//! A drag rectangle (pixel space) covers a live token when the token's cell
//! center lies inside the closed rectangle. The covered set is recomputed from
//! scratch on every update and never accumulates across moves of one drag.
//!
//! Indices into the grid's flat token array are kept in a vector sized for the
//! whole grid up front, so updates and validation do not allocate.

use log::debug;

use crate::geometry::{CellMetrics, DragRect};
use crate::grid::Grid;
use crate::types::Point;

/// Result of validating the current selection on drag release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Nothing was selected; no-op.
    Empty,
    /// The selection summed to the target and was removed.
    Match { points: u32 },
    /// The selection summed to something else and was dropped.
    Miss { sum: u32 },
}

/// Tracks the currently selected tokens of one grid.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    target: u32,
    selected: Vec<usize>,
}

impl SelectionEngine {
    /// Create an engine for a grid of `capacity` tokens.
    pub fn new(target: u32, capacity: usize) -> Self {
        Self {
            target,
            selected: Vec::with_capacity(capacity),
        }
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Flat grid indices of the selected tokens, in row-major order.
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Sum of the selected token values.
    pub fn sum(&self, grid: &Grid) -> u32 {
        let tokens = grid.tokens();
        self.selected
            .iter()
            .filter_map(|&i| tokens.get(i))
            .map(|t| t.value() as u32)
            .sum()
    }

    /// Recompute the selection for the rectangle spanned by `start` and `end`.
    pub fn update(
        &mut self,
        grid: &mut Grid,
        metrics: CellMetrics,
        start: Point,
        end: Point,
    ) -> &[usize] {
        self.clear(grid);

        let rect = DragRect::from_corners(start, end);
        let len = grid.len();
        for idx in 0..len {
            let Some(token) = grid.token_mut(idx) else {
                continue;
            };
            if token.removed() {
                continue;
            }
            let center = metrics.cell_center(token.row(), token.col());
            if rect.contains(center) && token.select() {
                self.selected.push(idx);
            }
        }

        &self.selected
    }

    /// Deselect everything. Idempotent.
    pub fn clear(&mut self, grid: &mut Grid) {
        for &idx in &self.selected {
            if let Some(token) = grid.token_mut(idx) {
                token.deselect();
            }
        }
        self.selected.clear();
    }

    /// Accept or reject the current selection.
    pub fn validate(&mut self, grid: &mut Grid) -> Validation {
        if self.selected.is_empty() {
            return Validation::Empty;
        }

        let sum = self.sum(grid);
        if sum != self.target {
            debug!("miss: {} tokens summing to {}", self.selected.len(), sum);
            self.clear(grid);
            return Validation::Miss { sum };
        }

        let points = self.selected.len() as u32;
        for &idx in &self.selected {
            if let Some(token) = grid.token_mut(idx) {
                token.remove();
            }
        }
        self.selected.clear();
        debug!("match: {} tokens cleared", points);
        Validation::Match { points }
    }
}
