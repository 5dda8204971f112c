//! Terminal render module.
//!
//! A small framebuffer renderer for the board and the menu screens. Nothing
//! here touches game rules: views read a [`core::RoundSnapshot`] and the
//! layout doubles as the inverse mapping from terminal cells back to board
//! pixels for mouse input.
//!
//! - [`fb`]: styled character framebuffer
//! - [`renderer`]: crossterm flush with run-length diffing
//! - [`game_view`]: board, drag tint, side panel, pointer mapping
//! - [`screens`]: intro, dialogs, name entry and leaderboard panels
//! - [`render_throttle`]: skip redraws of unchanged static frames

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;
pub mod screens;

pub use tui_apples_core as core;
pub use tui_apples_store as store;
pub use tui_apples_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screens::{render_screen, ScreenView};
