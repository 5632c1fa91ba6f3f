//! Terminal rendering for the 2048 game.
//!
//! Screens are drawn into a plain framebuffer by pure view types (`GameView`,
//! `MenuView`) and flushed by `TerminalRenderer`, which only writes changed cells.
//! No widget toolkit is involved.

pub mod fb;
pub mod game_view;
pub mod menu_view;
pub mod render_throttle;
pub mod renderer;
pub mod theme;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Hud, Viewport};
pub use menu_view::MenuView;
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use theme::{Theme, ThemeKind, TileStyle};
