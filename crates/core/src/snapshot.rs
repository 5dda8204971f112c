use crate::geometry::{CellMetrics, DragRect};
use crate::types::{EndReason, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellSnapshot {
    pub value: u8,
    pub removed: bool,
    pub selected: bool,
}

/// Read-only view of a round for render adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub rows: u16,
    pub cols: u16,
    /// Row-major, `rows * cols` entries.
    pub cells: Vec<CellSnapshot>,
    pub metrics: CellMetrics,
    pub drag: Option<DragRect>,
    pub score: u32,
    pub time_remaining: u32,
    pub duration_secs: u32,
    pub active: bool,
    pub end_reason: Option<EndReason>,
    pub selected_count: u32,
    pub selected_sum: u32,
    pub match_target: u32,
}

impl RoundSnapshot {
    pub fn clear(&mut self) {
        self.rows = 0;
        self.cols = 0;
        self.cells.clear();
        self.metrics = CellMetrics::new(DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT);
        self.drag = None;
        self.score = 0;
        self.time_remaining = 0;
        self.duration_secs = 0;
        self.active = false;
        self.end_reason = None;
        self.selected_count = 0;
        self.selected_sum = 0;
        self.match_target = 0;
    }

    pub fn cell(&self, row: u16, col: u16) -> Option<CellSnapshot> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells
            .get(row as usize * self.cols as usize + col as usize)
            .copied()
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.removed).count()
    }

    /// Stable FNV-1a hash of everything a frame depends on.
    pub fn fingerprint(&self) -> u64 {
        const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
        const PRIME: u64 = 0x100000001b3;

        let mut h = OFFSET_BASIS;
        let mut feed = |bytes: &[u8]| {
            for &b in bytes {
                h ^= b as u64;
                h = h.wrapping_mul(PRIME);
            }
        };

        for c in &self.cells {
            feed(&[c.value, c.removed as u8, c.selected as u8]);
        }
        if let Some(r) = self.drag {
            for v in [r.min.x, r.min.y, r.max.x, r.max.y] {
                feed(&v.to_bits().to_le_bytes());
            }
        }
        feed(&self.score.to_le_bytes());
        feed(&self.time_remaining.to_le_bytes());
        feed(&[self.active as u8]);
        h
    }
}

impl Default for RoundSnapshot {
    fn default() -> Self {
        let mut s = Self {
            rows: 0,
            cols: 0,
            cells: Vec::new(),
            metrics: CellMetrics::new(DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT),
            drag: None,
            score: 0,
            time_remaining: 0,
            duration_secs: 0,
            active: false,
            end_reason: None,
            selected_count: 0,
            selected_sum: 0,
            match_target: 0,
        };
        s.clear();
        s
    }
}
