//! GameView: maps a `core::RoundSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). The same [`BoardLayout`] that places tokens
//! on screen converts mouse positions back into board pixels, so what the
//! player sees under the cursor is what the selection engine tests.

use crate::core::{CellMetrics, RoundSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{EndReason, Point};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board landed in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left of the border.
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub rows: u16,
    pub cols: u16,
    pub cell_w: u16,
    pub cell_h: u16,
}

impl BoardLayout {
    pub fn inner_x(&self) -> u16 {
        self.frame_x + 1
    }

    pub fn inner_y(&self) -> u16 {
        self.frame_y + 1
    }

    /// Terminal cell of a token's top-left character.
    pub fn token_origin(&self, row: u16, col: u16) -> (u16, u16) {
        (
            self.inner_x().saturating_add(col.saturating_mul(self.cell_w)),
            self.inner_y().saturating_add(row.saturating_mul(self.cell_h)),
        )
    }

    /// Board pixel at the center of terminal cell `(column, row)`.
    ///
    /// The result is unclamped: cells left of or above the board map to
    /// negative pixels, which select nothing.
    pub fn to_pixel(&self, column: u16, row: u16, metrics: CellMetrics) -> Point {
        let dx = column as f32 - self.inner_x() as f32 + 0.5;
        let dy = row as f32 - self.inner_y() as f32 + 0.5;
        Point::new(
            dx * metrics.cell_width / self.cell_w.max(1) as f32,
            dy * metrics.cell_height / self.cell_h.max(1) as f32,
        )
    }

    /// Whether `(column, row)` lies inside the border.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.inner_x()
            && row >= self.inner_y()
            && column < self.inner_x().saturating_add(self.cols.saturating_mul(self.cell_w))
            && row < self.inner_y().saturating_add(self.rows.saturating_mul(self.cell_h))
    }
}

/// A lightweight terminal renderer for the board.
pub struct GameView {
    /// Token width in terminal columns.
    cell_w: u16,
    /// Token height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

const BOARD_BG: Rgb = Rgb::new(24, 36, 24);
const DRAG_BG: Rgb = Rgb::new(50, 60, 110);
const PANEL_W: u16 = 14;

impl Default for GameView {
    fn default() -> Self {
        // 3x1 leaves room for a centered digit with a column either side.
        Self {
            cell_w: 3,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, rows: u16, cols: u16, viewport: Viewport) -> BoardLayout {
        let frame_w = cols.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = rows.saturating_mul(self.cell_h).saturating_add(2);
        let total_w = frame_w.saturating_add(2 + PANEL_W);

        let frame_x = if total_w <= viewport.width {
            (viewport.width - total_w) / 2
        } else {
            viewport.width.saturating_sub(frame_w) / 2
        };
        let frame_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        BoardLayout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            rows,
            cols,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
        }
    }

    /// Render the round into an existing framebuffer.
    ///
    /// Allocation-free once `fb` has reached the viewport size.
    pub fn render_into(&self, snap: &RoundSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(snap.rows, snap.cols, viewport);

        let bg = CellStyle::new(Rgb::new(80, 90, 80), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(
            layout.inner_x(),
            layout.inner_y(),
            snap.cols.saturating_mul(self.cell_w),
            snap.rows.saturating_mul(self.cell_h),
            ' ',
            bg,
        );
        fb.draw_border(
            layout.frame_x,
            layout.frame_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        for row in 0..snap.rows {
            for col in 0..snap.cols {
                if let Some(cell) = snap.cell(row, col) {
                    let (x, y) = layout.token_origin(row, col);
                    if x >= viewport.width || y >= viewport.height {
                        continue;
                    }
                    self.draw_token(fb, &layout, row, col, cell.value, cell.removed, cell.selected);
                }
            }
        }

        if let Some(rect) = snap.drag {
            self.tint_drag(fb, &layout, snap, rect);
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if snap.end_reason == Some(EndReason::TimeUp) {
            self.draw_overlay_text(fb, &layout, "TIME UP");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &RoundSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_token(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        row: u16,
        col: u16,
        value: u8,
        removed: bool,
        selected: bool,
    ) {
        let (x, y) = layout.token_origin(row, col);
        let mid_x = x.saturating_add(self.cell_w / 2);
        let mid_y = y.saturating_add(self.cell_h / 2);

        if removed {
            let style = CellStyle::new(Rgb::new(70, 90, 70), BOARD_BG).dim();
            fb.put_char(mid_x, mid_y, '·', style);
            return;
        }

        let style = if selected {
            CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(255, 215, 0)).bold()
        } else {
            CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(200, 50, 50)).bold()
        };
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', style);
        let digit = char::from_digit(value as u32, 10).unwrap_or('?');
        fb.put_char(mid_x, mid_y, digit, style);
    }

    fn tint_drag(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        snap: &RoundSnapshot,
        rect: crate::core::DragRect,
    ) {
        for row in 0..snap.rows {
            for col in 0..snap.cols {
                let selected = snap.cell(row, col).map(|c| c.selected).unwrap_or(false);
                if selected {
                    continue;
                }
                let (x, y) = layout.token_origin(row, col);
                if x >= fb.width() || y >= fb.height() {
                    continue;
                }
                for dy in 0..self.cell_h {
                    for dx in 0..self.cell_w {
                        let (cx, cy) = (x.saturating_add(dx), y.saturating_add(dy));
                        let p = layout.to_pixel(cx, cy, snap.metrics);
                        if rect.contains(p) {
                            fb.tint_rect(cx, cy, 1, 1, DRAG_BG);
                        }
                    }
                }
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &RoundSnapshot,
        viewport: Viewport,
        layout: &BoardLayout,
    ) {
        let panel_x = layout.frame_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = layout.frame_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        let time_style = if snap.time_remaining <= 10 {
            CellStyle {
                fg: Rgb::new(255, 110, 90),
                ..value
            }
        } else {
            value
        };
        fb.put_u32(panel_x, y, snap.time_remaining, time_style);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SELECTED", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.selected_count, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SUM", label);
        y = y.saturating_add(1);
        let sum_style = if snap.selected_count > 0 && snap.selected_sum == snap.match_target {
            CellStyle {
                fg: Rgb::new(120, 230, 120),
                ..value
            }
            .bold()
        } else {
            value
        };
        let x = fb.put_u32(panel_x, y, snap.selected_sum, sum_style);
        let x = fb.put_str(x, y, " / ", value.dim());
        fb.put_u32(x, y, snap.match_target, value.dim());
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ESC menu", value.dim());
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &BoardLayout, text: &str) {
        let mid_y = layout.frame_y.saturating_add(layout.frame_h / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let padded_w = text.chars().count() as u16 + 4;
        let x = layout
            .frame_x
            .saturating_add(layout.frame_w.saturating_sub(padded_w) / 2);
        fb.fill_rect(x, mid_y, padded_w, 1, ' ', style);
        fb.put_str_centered(layout.frame_x, layout.frame_w, mid_y, text, style);
    }
}
