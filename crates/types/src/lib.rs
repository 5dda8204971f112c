//! Core types module - shared data structures and constants
//!
//! This module defines the plain data shared by every crate in the workspace.
//! All types are pure data structures with no external dependencies, so they can
//! be used by core logic, terminal rendering and persistence alike.
//!
//! # Reference Configuration
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 8 | Grid rows |
//! | `DEFAULT_COLS` | 15 | Grid columns |
//! | `DEFAULT_CELL_WIDTH` | 40.0 | Cell width in pixels |
//! | `DEFAULT_CELL_HEIGHT` | 40.0 | Cell height in pixels |
//! | `DEFAULT_ROUND_SECS` | 60 | Round duration |
//! | `DEFAULT_MATCH_TARGET` | 10 | Sum that clears a selection |
//! | `DEFAULT_VALUE_MIN..=DEFAULT_VALUE_MAX` | 1..=9 | Token values |
//!
//! # Examples
//!
//! ```
//! use tui_apples_types::{GameConfig, Point, ValueRange};
//!
//! let config = GameConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.rows * config.cols, 120);
//!
//! let range = ValueRange::new(1, 9);
//! assert!(range.contains(9));
//! assert!(!range.contains(10));
//!
//! let p = Point::new(20.0, 20.0);
//! assert_eq!(p.x, 20.0);
//! ```

use std::fmt;

/// Grid rows in the reference configuration
pub const DEFAULT_ROWS: u16 = 8;

/// Grid columns in the reference configuration
pub const DEFAULT_COLS: u16 = 15;

/// Cell width in pixels
pub const DEFAULT_CELL_WIDTH: f32 = 40.0;

/// Cell height in pixels
pub const DEFAULT_CELL_HEIGHT: f32 = 40.0;

/// Round duration in seconds
pub const DEFAULT_ROUND_SECS: u32 = 60;

/// Sum a selection must hit exactly to be cleared
pub const DEFAULT_MATCH_TARGET: u32 = 10;

/// Smallest token value
pub const DEFAULT_VALUE_MIN: u8 = 1;

/// Largest token value
pub const DEFAULT_VALUE_MAX: u8 = 9;

/// Round timer period (one tick per elapsed second)
pub const TICK_MS: u32 = 1000;

/// Frame loop interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Maximum player name length on the leaderboard (in characters)
pub const MAX_NAME_CHARS: usize = 8;

/// Number of entries kept on the leaderboard
pub const LEADERBOARD_CAPACITY: usize = 10;

/// A point in device pixel space.
///
/// The origin is the top-left corner of the grid; `x` grows to the right and
/// `y` grows downwards. Points outside the grid are legal (a drag may leave it).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Inclusive range of token values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    pub min: u8,
    pub max: u8,
}

impl ValueRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Number of distinct values in the range (0 when `min > max`).
    pub fn span(&self) -> u32 {
        if self.min > self.max {
            0
        } else {
            (self.max - self.min) as u32 + 1
        }
    }

    pub fn contains(&self, value: u8) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value into the range.
    pub fn clamp(&self, value: u8) -> u8 {
        value.clamp(self.min, self.max.max(self.min))
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new(DEFAULT_VALUE_MIN, DEFAULT_VALUE_MAX)
    }
}

/// Everything a round reads from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub rows: u16,
    pub cols: u16,
    pub cell_width: f32,
    pub cell_height: f32,
    pub round_duration_secs: u32,
    pub match_target: u32,
    pub value_range: ValueRange,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            round_duration_secs: DEFAULT_ROUND_SECS,
            match_target: DEFAULT_MATCH_TARGET,
            value_range: ValueRange::default(),
        }
    }
}

impl GameConfig {
    /// Overlay environment variables on the defaults.
    ///
    /// Reads `APPLES_ROWS`, `APPLES_COLS`, `APPLES_ROUND_SECS`, `APPLES_TARGET`,
    /// `APPLES_VALUE_MIN` and `APPLES_VALUE_MAX`. Values that fail to parse keep
    /// their default; range checks are left to [`GameConfig::validate`].
    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let d = Self::default();
        Self {
            rows: parsed("APPLES_ROWS").unwrap_or(d.rows),
            cols: parsed("APPLES_COLS").unwrap_or(d.cols),
            cell_width: d.cell_width,
            cell_height: d.cell_height,
            round_duration_secs: parsed("APPLES_ROUND_SECS").unwrap_or(d.round_duration_secs),
            match_target: parsed("APPLES_TARGET").unwrap_or(d.match_target),
            value_range: ValueRange::new(
                parsed("APPLES_VALUE_MIN").unwrap_or(d.value_range.min),
                parsed("APPLES_VALUE_MAX").unwrap_or(d.value_range.max),
            ),
        }
    }

    /// Reject configurations a round cannot be started with.
    pub fn validate(&self) -> Result<(), CoreError> {
        let reason = if self.rows == 0 || self.cols == 0 {
            Some("grid dimensions must be positive")
        } else if !(self.cell_width.is_finite() && self.cell_width > 0.0)
            || !(self.cell_height.is_finite() && self.cell_height > 0.0)
        {
            Some("cell dimensions must be positive")
        } else if self.round_duration_secs == 0 {
            Some("round duration must be positive")
        } else if self.match_target == 0 {
            Some("match target must be positive")
        } else if self.value_range.min == 0 || self.value_range.span() == 0 {
            Some("value range must be non-empty and start at 1 or above")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CoreError::InvalidConfiguration { reason }),
            None => Ok(()),
        }
    }

    /// Total number of grid cells.
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

/// Core error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Grid coordinate outside `rows x cols`.
    OutOfBounds {
        row: u16,
        col: u16,
        rows: u16,
        cols: u16,
    },
    /// Configuration rejected before grid generation.
    InvalidConfiguration { reason: &'static str },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "cell ({row}, {col}) is outside the {rows}x{cols} grid"
            ),
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

/// Pointer events delivered by an input source, in device pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The countdown reached zero; end-of-round presentation should be shown.
    TimeUp,
    /// The round was stopped from outside (e.g. returning to the menu).
    Aborted,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::TimeUp => "timeUp",
            EndReason::Aborted => "aborted",
        }
    }
}

/// Advisory audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Generic interaction (pressing on a token, pressing a menu button).
    Click,
    /// A selection was cleared for points.
    Match,
}

/// Keyboard input used by the menu screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    /// Enter
    Confirm,
    /// Escape
    Back,
    /// Backspace (name entry)
    Erase,
    /// Any printable character
    Char(char),
}
