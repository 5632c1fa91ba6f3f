//! Core game logic - pure, deterministic when seeded, and testable
//!
//! This crate contains the board model, the move/merge engine and the game-state
//! machine. It has no dependencies on the terminal, the file system or global state.
//!
//! # Module Structure
//!
//! - [`board`]: square tile grid with empty-cell lookup, random placement and rotation
//! - [`game`]: score, game-over/endless flags and the directional move algorithm
//! - [`history`]: bounded log of recent score gains (display only)
//! - [`spawn`]: spawn-value policy (2 or 4 depending on score)
//! - [`turn`]: one driver turn (move, spawn, game-over check)
//! - [`snapshot`]: owned read-only copy of the state for renderers
//!
//! # Example
//!
//! ```
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use tui_2048_core::{play_turn, Game, SpawnPolicy};
//! use tui_2048_types::Direction;
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let mut game = Game::new(4);
//! game.start_with(&mut rng);
//! assert_eq!(game.board().empty_cells().len(), 14);
//!
//! let policy = SpawnPolicy::default();
//! for dir in Direction::ALL {
//!     play_turn(&mut game, dir, &policy, &mut rng);
//! }
//! assert!(!game.game_over());
//! ```

pub mod board;
pub mod game;
pub mod history;
pub mod snapshot;
pub mod spawn;
pub mod turn;

pub use tui_2048_types as types;

pub use board::Board;
pub use game::{slide_row_left, Game, Phase};
pub use history::{Fade, ScoreChange, ScoreHistory};
pub use snapshot::GameSnapshot;
pub use spawn::SpawnPolicy;
pub use turn::{play_turn, TurnOutcome};
