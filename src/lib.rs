//! TUI Apples (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_apples::{core,input,store,term,types}`
//! and hosts the pieces that need all of them: the screen-flow [`app::App`]
//! and the JSON-lines [`logging`] backend used by the binary.

pub mod app;
pub mod logging;

pub use tui_apples_core as core;
pub use tui_apples_input as input;
pub use tui_apples_store as store;
pub use tui_apples_term as term;
pub use tui_apples_types as types;
