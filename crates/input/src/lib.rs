//! Terminal input module.
//!
//! Maps `crossterm` mouse and key events into the game's input vocabulary.
//! Mouse positions stay in terminal cells here; turning them into board
//! pixels needs the render layout and happens in `tui-apples-term`.

pub mod map;

pub use tui_apples_types as types;

pub use map::{map_key_event, map_mouse_event, should_quit, PointerKind, TermPointer};
