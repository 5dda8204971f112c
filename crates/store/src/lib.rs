//! Leaderboard store - persisted top scores
//!
//! Finished rounds are recorded as `(name, score)` pairs on a top-10 board
//! saved as pretty-printed JSON. Loading is forgiving (a missing or corrupt
//! file is an empty board); saving reports errors so the caller can log and
//! move on without blocking the game.
//!
//! # Environment Variables
//!
//! - `APPLES_LEADERBOARD_PATH`: explicit score file path
//! - otherwise `$XDG_DATA_HOME/tui-apples/scores.json`, then
//!   `$HOME/.local/share/tui-apples/scores.json`, then `./scores.json`

pub mod leaderboard;
pub mod name;

pub use tui_apples_types as types;

pub use leaderboard::{Leaderboard, LeaderboardStore, ScoreEntry};
pub use name::{validate_name, NameError};
