//! Terminal input module.
//!
//! Turns `crossterm` key events into [`crate::types::GameAction`]s according to the
//! user's key bindings. Bindings are read from the config as plain key names
//! ([`KeyConfig`]) and validated once into a typed lookup table ([`KeyBindings`]).

pub mod bindings;
pub mod keys;
pub mod map;

pub use tui_2048_types as types;

pub use bindings::{ActionKeys, KeyBindings, KeyConfig, MovementKeys};
pub use keys::KeySpec;
pub use map::{bindable_key, handle_key_event, should_quit};
