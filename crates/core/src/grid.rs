//! Grid module - owns the matrix of tokens
//!
//! The grid is a `rows x cols` matrix of [`Token`]s stored in a flat vector in
//! row-major order (`row * cols + col`). It works purely in grid coordinates;
//! pixel geometry lives in [`crate::geometry`].

use crate::rng::ValueSource;
use crate::types::{CoreError, ValueRange};

/// A single numbered, grid-positioned piece.
///
/// `value`, `row` and `col` are fixed at creation. `removed` flips once, and a
/// removed token is never selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    value: u8,
    row: u16,
    col: u16,
    removed: bool,
    selected: bool,
}

impl Token {
    fn new(value: u8, row: u16, col: u16) -> Self {
        Self {
            value,
            row,
            col,
            removed: false,
            selected: false,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn col(&self) -> u16 {
        self.col
    }

    pub fn removed(&self) -> bool {
        self.removed
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn is_live(&self) -> bool {
        !self.removed
    }

    /// Mark selected. Removed tokens refuse.
    pub(crate) fn select(&mut self) -> bool {
        if self.removed {
            return false;
        }
        self.selected = true;
        true
    }

    pub(crate) fn deselect(&mut self) {
        self.selected = false;
    }

    pub(crate) fn remove(&mut self) {
        self.removed = true;
        self.selected = false;
    }
}

/// The token matrix for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: u16,
    cols: u16,
    range: ValueRange,
    /// Flat array of tokens, row-major order (row * cols + col)
    tokens: Vec<Token>,
}

impl Grid {
    /// Populate a fresh grid, drawing every value from `source`.
    pub fn generate(
        rows: u16,
        cols: u16,
        range: ValueRange,
        source: &mut impl ValueSource,
    ) -> Result<Self, CoreError> {
        if rows == 0 || cols == 0 {
            return Err(CoreError::InvalidConfiguration {
                reason: "grid dimensions must be positive",
            });
        }
        if range.min == 0 || range.span() == 0 {
            return Err(CoreError::InvalidConfiguration {
                reason: "value range must be non-empty and start at 1 or above",
            });
        }

        let mut grid = Self {
            rows,
            cols,
            range,
            tokens: Vec::with_capacity(rows as usize * cols as usize),
        };
        grid.fill(source);
        Ok(grid)
    }

    /// Discard every token and draw a new board of the same shape.
    pub fn regenerate(&mut self, source: &mut impl ValueSource) {
        self.fill(source);
    }

    fn fill(&mut self, source: &mut impl ValueSource) {
        self.tokens.clear();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let value = self.range.clamp(source.next_value(self.range));
                self.tokens.push(Token::new(value, row, col));
            }
        }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn value_range(&self) -> ValueRange {
        self.range
    }

    /// Total number of tokens (live and removed).
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    pub fn index(&self, row: u16, col: u16) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    /// Token at `(row, col)`.
    pub fn token_at(&self, row: u16, col: u16) -> Result<&Token, CoreError> {
        self.index(row, col)
            .map(|idx| &self.tokens[idx])
            .ok_or(CoreError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
    }

    /// All tokens in row-major order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Non-removed tokens in row-major order.
    ///
    /// The iterator is lazy and borrows the grid, so every call starts over
    /// from the current state.
    pub fn live_tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|t| t.is_live())
    }

    pub fn live_count(&self) -> usize {
        self.live_tokens().count()
    }

    pub(crate) fn token_mut(&mut self, idx: usize) -> Option<&mut Token> {
        self.tokens.get_mut(idx)
    }
}
