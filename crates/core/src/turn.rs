//! One player turn: move, spawn on success, then check for game over.

use rand::Rng;

use crate::game::Game;
use crate::spawn::SpawnPolicy;
use crate::types::{Direction, Tile};

/// What happened during a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnOutcome {
    pub moved: bool,
    pub spawned: Option<(usize, usize, Tile)>,
    pub gained: u64,
    /// The win tile appeared during this turn (and endless mode was switched on).
    pub won_now: bool,
    pub game_over: bool,
}

/// Run a full turn in the driver order.
///
/// Holding the win tile outside endless mode switches endless mode on, so play continues.
pub fn play_turn<R: Rng + ?Sized>(
    game: &mut Game,
    direction: Direction,
    policy: &SpawnPolicy,
    rng: &mut R,
) -> TurnOutcome {
    let before = game.score();

    let moved = game.apply_move(direction);
    let mut outcome = TurnOutcome {
        moved,
        gained: game.score() - before,
        ..TurnOutcome::default()
    };

    if moved {
        let value = policy.choose_value(game.score(), rng);
        outcome.spawned = game
            .place_new_tile_with(value, rng)
            .map(|(row, col)| (row, col, value));
    }

    if game.has_won() && !game.endless_mode() {
        game.enable_endless_mode();
        outcome.won_now = true;
    }

    outcome.game_over = game.check_game_over();
    outcome
}
