//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the grid, selection rules, the timed session state
//! machine and the round orchestrator. It has **no dependencies** on terminal
//! I/O, audio or persistence, which makes it:
//!
//! - **Deterministic**: grid generation draws from an injected [`ValueSource`]
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: render adapters only read a [`RoundSnapshot`]
//! - **Allocation-free on input**: pointer and timer paths reuse buffers and
//!   return fixed-capacity [`RoundEvents`]
//!
//! # Module Structure
//!
//! - [`grid`]: `rows x cols` token matrix with bounds-checked lookup
//! - [`geometry`]: pixel/cell conversions and the drag rectangle
//! - [`selection`]: rectangle coverage and sum validation
//! - [`clock`]: cancellable once-per-second tick source
//! - [`session`]: score, countdown and the `Active`/`Ended` state machine
//! - [`round`]: pointer/timer entry points tying the above together
//! - [`snapshot`]: read-only view for rendering
//! - [`rng`]: seeded LCG and scripted value sources
//! - [`cues`]: audio collaborator trait
//!
//! # Game Rules
//!
//! - Tokens hold values drawn uniformly from the configured range (1..=9)
//! - A drag covers every live token whose cell center lies in the rectangle
//! - Releasing a selection that sums to the target (10) removes it and scores
//!   one point per token; any other sum just drops the selection
//! - The round lasts a fixed number of seconds; input stops when it ends
//!
//! # Example
//!
//! ```
//! use tui_apples_core::{Round, RoundEvent, ScriptedValues};
//! use tui_apples_types::{GameConfig, Point};
//!
//! let config = GameConfig { rows: 1, cols: 3, ..GameConfig::default() };
//! let mut round = Round::new(config, &mut ScriptedValues::new(vec![4, 6, 9])).unwrap();
//!
//! round.pointer_down(Point::new(20.0, 20.0));
//! round.pointer_move(Point::new(60.0, 20.0));
//! let events = round.pointer_up(Point::new(60.0, 20.0));
//!
//! assert!(matches!(events[0], RoundEvent::Matched { points: 2, score: 2 }));
//! assert_eq!(round.grid().live_count(), 1);
//! ```
//!
//! # Timing
//!
//! The frame loop calls [`Round::advance`] with elapsed milliseconds; the
//! session clock turns that into one tick per second. [`Round::tick`] drives a
//! single second directly (tests, external timers).

pub mod clock;
pub mod cues;
pub mod geometry;
pub mod grid;
pub mod rng;
pub mod round;
pub mod selection;
pub mod session;
pub mod snapshot;

pub use tui_apples_types as types;

// Re-export commonly used types for convenience
pub use clock::RoundClock;
pub use cues::{CueLog, CueSink, NoCues};
pub use geometry::{CellMetrics, DragRect};
pub use grid::{Grid, Token};
pub use rng::{ScriptedValues, SimpleRng, ValueSource};
pub use round::{Round, RoundEvent, RoundEvents};
pub use selection::{SelectionEngine, Validation};
pub use session::{RoundResult, Session, SessionState};
pub use snapshot::{CellSnapshot, RoundSnapshot};
