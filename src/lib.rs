//! Terminal 2048 (workspace facade crate).
//!
//! The game logic and its collaborators live in dedicated crates under `crates/`;
//! this package re-exports them as `tui_2048::{core,input,store,term,types}` and adds
//! the interactive driver in [`app`].

pub mod app;

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_store as store;
pub use tui_2048_term as term;
pub use tui_2048_types as types;
