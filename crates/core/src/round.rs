//! Round module - one play session from grid generation to session end
//!
//! `Round` is the single source of truth for a round: it owns the grid, the
//! selection engine, the session and the drag state, and it is the only way
//! pointer events and timer ticks reach them. Every entry point returns a
//! fixed-capacity batch of [`RoundEvent`]s for the caller to dispatch to
//! collaborators (audio, leaderboard, UI).
//!
//! Ordering guarantees:
//! - `pointer_down` clears any prior selection before the gesture's first move.
//! - `pointer_up` validates the selection exactly as the preceding move left it.
//! - Once the session is not active, pointer input is ignored.

use arrayvec::ArrayVec;
use log::info;

use crate::geometry::{CellMetrics, DragRect};
use crate::grid::Grid;
use crate::rng::ValueSource;
use crate::selection::{SelectionEngine, Validation};
use crate::session::{RoundResult, Session};
use crate::snapshot::{CellSnapshot, RoundSnapshot};
use crate::types::{CoreError, Cue, GameConfig, Point, PointerEvent};

/// Something collaborators may want to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundEvent {
    Cue(Cue),
    Matched { points: u32, score: u32 },
    Missed { sum: u32 },
    Ended(RoundResult),
}

/// Events produced by a single call (never more than four).
pub type RoundEvents = ArrayVec<RoundEvent, 4>;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    start: Point,
    end: Point,
}

#[derive(Debug, Clone)]
pub struct Round {
    config: GameConfig,
    metrics: CellMetrics,
    grid: Grid,
    selection: SelectionEngine,
    session: Session,
    drag: Option<Drag>,
}

impl Round {
    /// Validate `config`, generate the grid and start the clock.
    pub fn new(config: GameConfig, source: &mut impl ValueSource) -> Result<Self, CoreError> {
        config.validate()?;

        let grid = Grid::generate(config.rows, config.cols, config.value_range, source)?;
        let session = Session::new(config.round_duration_secs)?;
        let selection = SelectionEngine::new(config.match_target, grid.len());

        info!(
            "round started: {}x{} grid, {}s, target {}",
            config.rows, config.cols, config.round_duration_secs, config.match_target
        );

        Ok(Self {
            config,
            metrics: CellMetrics::from_config(&config),
            grid,
            selection,
            session,
            drag: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn time_remaining(&self) -> u32 {
        self.session.time_remaining()
    }

    /// Current drag rectangle, if a gesture is in progress.
    pub fn drag_rect(&self) -> Option<DragRect> {
        self.drag.map(|d| DragRect::from_corners(d.start, d.end))
    }

    /// Sum of the selected values.
    pub fn selected_sum(&self) -> u32 {
        self.selection.sum(&self.grid)
    }

    pub fn handle(&mut self, event: PointerEvent) -> RoundEvents {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p),
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up(p) => self.pointer_up(p),
        }
    }

    /// Begin a gesture at `p`.
    ///
    /// The press itself acts as a zero-size selection, so it covers a token
    /// only when `p` sits exactly on that token's center.
    pub fn pointer_down(&mut self, p: Point) -> RoundEvents {
        let mut events = RoundEvents::new();
        if !self.session.is_active() {
            return events;
        }

        if let Some((row, col)) = self.metrics.cell_at(p, self.grid.rows(), self.grid.cols()) {
            if self.grid.token_at(row, col).map(|t| t.is_live()).unwrap_or(false) {
                events.push(RoundEvent::Cue(Cue::Click));
            }
        }

        self.selection.clear(&mut self.grid);
        self.drag = Some(Drag { start: p, end: p });
        self.selection.update(&mut self.grid, self.metrics, p, p);
        events
    }

    /// Stretch the current gesture to `p`.
    pub fn pointer_move(&mut self, p: Point) -> RoundEvents {
        let events = RoundEvents::new();
        if !self.session.is_active() {
            return events;
        }
        let Some(drag) = self.drag.as_mut() else {
            return events;
        };

        drag.end = p;
        let start = drag.start;
        self.selection.update(&mut self.grid, self.metrics, start, p);
        events
    }

    /// Release the gesture and validate the selection.
    ///
    /// The release point is not folded into the selection.
    pub fn pointer_up(&mut self, _p: Point) -> RoundEvents {
        let mut events = RoundEvents::new();
        if !self.session.is_active() || self.drag.take().is_none() {
            return events;
        }

        match self.selection.validate(&mut self.grid) {
            Validation::Empty => {}
            Validation::Match { points } => {
                self.session.on_match(points);
                events.push(RoundEvent::Matched {
                    points,
                    score: self.session.score(),
                });
                events.push(RoundEvent::Cue(Cue::Match));
            }
            Validation::Miss { sum } => {
                events.push(RoundEvent::Missed { sum });
            }
        }
        events
    }

    /// One elapsed second.
    pub fn tick(&mut self) -> RoundEvents {
        let ended = self.session.tick();
        self.after_timer(ended)
    }

    /// Feed frame time to the session clock.
    pub fn advance(&mut self, elapsed_ms: u32) -> RoundEvents {
        let ended = self.session.advance(elapsed_ms);
        self.after_timer(ended)
    }

    /// Stop the round without end-of-round presentation.
    pub fn abort(&mut self) -> Option<RoundResult> {
        let result = self.session.abort();
        if result.is_some() {
            self.cancel_gesture();
        }
        result
    }

    /// Acknowledge the finished round's result.
    pub fn take_result(&mut self) -> Option<RoundResult> {
        self.session.take_result()
    }

    fn after_timer(&mut self, ended: Option<RoundResult>) -> RoundEvents {
        let mut events = RoundEvents::new();
        if let Some(result) = ended {
            self.cancel_gesture();
            events.push(RoundEvent::Ended(result));
        }
        events
    }

    /// Drop an in-progress drag and its highlighted tokens.
    pub fn cancel_gesture(&mut self) {
        self.drag = None;
        self.selection.clear(&mut self.grid);
    }

    /// Fill a reusable snapshot for rendering.
    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.rows = self.grid.rows();
        out.cols = self.grid.cols();
        out.cells.clear();
        out.cells
            .extend(self.grid.tokens().iter().map(|t| CellSnapshot {
                value: t.value(),
                removed: t.removed(),
                selected: t.selected(),
            }));
        out.metrics = self.metrics;
        out.drag = self.drag_rect();
        out.score = self.session.score();
        out.time_remaining = self.session.time_remaining();
        out.duration_secs = self.session.duration_secs();
        out.active = self.session.is_active();
        out.end_reason = self.session.end_reason();
        out.selected_count = self.selection.len() as u32;
        out.selected_sum = self.selection.sum(&self.grid);
        out.match_target = self.selection.target();
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut s = RoundSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedValues;
    use crate::types::EndReason;

    fn round(values: &[u8], cols: u16) -> Round {
        let config = GameConfig {
            rows: 1,
            cols,
            round_duration_secs: 5,
            ..GameConfig::default()
        };
        Round::new(config, &mut ScriptedValues::new(values.to_vec())).unwrap()
    }

    fn c(col: u16) -> Point {
        Point::new(col as f32 * 40.0 + 20.0, 20.0)
    }

    #[test]
    fn test_new_validates_config() {
        let bad = GameConfig {
            rows: 0,
            ..GameConfig::default()
        };
        assert!(Round::new(bad, &mut ScriptedValues::new(vec![1])).is_err());
    }

    #[test]
    fn test_drag_match_flow() {
        let mut r = round(&[4, 6, 5], 3);
        let ev = r.pointer_down(c(0));
        assert_eq!(ev.as_slice(), &[RoundEvent::Cue(Cue::Click)]);
        assert!(r.is_dragging());

        r.pointer_move(c(1));
        assert_eq!(r.selected_sum(), 10);

        let ev = r.pointer_up(c(1));
        assert_eq!(
            ev.as_slice(),
            &[
                RoundEvent::Matched {
                    points: 2,
                    score: 2
                },
                RoundEvent::Cue(Cue::Match)
            ]
        );
        assert_eq!(r.score(), 2);
        assert!(!r.is_dragging());
        assert_eq!(r.grid().live_count(), 1);
    }

    #[test]
    fn test_up_uses_selection_from_last_move() {
        let mut r = round(&[4, 6, 5], 3);
        r.pointer_down(c(0));
        r.pointer_move(c(1));
        // Release far away: selection stays as the last move left it.
        let ev = r.pointer_up(c(2));
        assert!(matches!(ev[0], RoundEvent::Matched { points: 2, .. }));
    }

    #[test]
    fn test_down_clears_previous_selection() {
        let mut r = round(&[4, 6, 5], 3);
        r.pointer_down(c(0));
        r.pointer_move(c(2));
        assert_eq!(r.selection().len(), 3);

        r.pointer_down(Point::new(-50.0, -50.0));
        assert_eq!(r.selection().len(), 0);
        assert!(r.grid().tokens().iter().all(|t| !t.selected()));
    }

    #[test]
    fn test_click_without_move_is_single_token_selection() {
        let mut r = round(&[4, 6], 2);
        r.pointer_down(c(0));
        assert_eq!(r.selection().selected(), &[0]);
        let ev = r.pointer_up(c(0));
        assert_eq!(ev.as_slice(), &[RoundEvent::Missed { sum: 4 }]);
        assert_eq!(r.grid().live_count(), 2);
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut r = round(&[4, 6], 2);
        r.pointer_move(c(1));
        assert!(r.selection().is_empty());
        assert!(r.pointer_up(c(1)).is_empty());
    }

    #[test]
    fn test_no_click_cue_over_removed_token() {
        let mut r = round(&[4, 6], 2);
        r.pointer_down(c(0));
        r.pointer_move(c(1));
        r.pointer_up(c(1));
        assert!(r.pointer_down(c(0)).is_empty());
    }

    #[test]
    fn test_timeout_cancels_gesture_and_blocks_input() {
        let mut r = round(&[4, 6, 5], 3);
        r.pointer_down(c(0));
        r.pointer_move(c(1));

        for _ in 0..4 {
            assert!(r.tick().is_empty());
        }
        let ev = r.tick();
        match ev.as_slice() {
            [RoundEvent::Ended(res)] => {
                assert_eq!(res.reason, EndReason::TimeUp);
                assert_eq!(res.score, 0);
            }
            other => panic!("unexpected events: {:?}", other),
        }
        assert!(!r.is_dragging());
        assert!(r.selection().is_empty());

        assert!(r.pointer_down(c(0)).is_empty());
        assert!(!r.is_dragging());
        assert!(r.tick().is_empty());
        assert_eq!(r.time_remaining(), 0);
    }

    #[test]
    fn test_abort_returns_result_once() {
        let mut r = round(&[4, 6], 2);
        r.pointer_down(c(0));
        let res = r.abort().unwrap();
        assert_eq!(res.reason, EndReason::Aborted);
        assert!(r.abort().is_none());
        assert!(r.advance(10_000).is_empty());
        assert_eq!(r.take_result(), Some(res));
    }

    #[test]
    fn test_cancel_gesture_keeps_round_running() {
        let mut r = round(&[4, 6], 2);
        r.pointer_down(c(0));
        r.pointer_move(c(1));
        r.cancel_gesture();

        assert!(!r.is_dragging());
        assert_eq!(r.selected_sum(), 0);
        assert!(r.pointer_up(c(1)).is_empty());
        assert!(r.is_active());
        assert_eq!(r.grid().live_count(), 2);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut r = round(&[4, 6, 5], 3);
        r.pointer_down(c(0));
        r.pointer_move(c(1));

        let s = r.snapshot();
        assert_eq!((s.rows, s.cols), (1, 3));
        assert_eq!(s.cells.len(), 3);
        assert!(s.cells[0].selected && s.cells[1].selected && !s.cells[2].selected);
        assert_eq!(s.selected_count, 2);
        assert_eq!(s.selected_sum, 10);
        assert_eq!(s.match_target, 10);
        assert!(s.active);
        assert_eq!(s.time_remaining, 5);
        let rect = s.drag.unwrap();
        assert_eq!(rect.min, c(0));
        assert_eq!(rect.max, c(1));
    }
}
