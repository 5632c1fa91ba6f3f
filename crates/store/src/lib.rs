//! Persistence: the JSON config file and the numbered save slots.
//!
//! Everything here is fallible and returns `anyhow::Result`; the driver turns
//! failures into a status message and a log line. Nothing in this crate mutates a
//! live [`core::Game`] until the data has been fully validated.

pub mod config;
pub mod save;

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_types as types;

pub use config::{load_config, save_config, Config, DEFAULT_THEME};
pub use save::{sanitize_name, SaveData, SaveStore, SlotEntry, SlotSummary};
