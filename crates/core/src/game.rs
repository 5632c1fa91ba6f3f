//! Game module - score, win/endless/game-over state and the move algorithm
//!
//! Every direction is reduced to a single "slide left" pass: the board is rotated so
//! the requested direction faces left, each row is compressed and merged, and the
//! board is rotated back (see [`Direction::rotations`]).

use std::time::Instant;

use rand::Rng;

use crate::board::Board;
use crate::history::ScoreHistory;
use crate::snapshot::GameSnapshot;
use crate::types::{
    is_valid_tile, Direction, Tile, DEFAULT_BOARD_SIZE, INITIAL_TILE_VALUE, MAX_TILE_VALUE,
    WIN_TILE_VALUE,
};

/// Lifecycle phase, derived from the flags rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    GameOver,
}

/// Slide one row to the left in place.
///
/// Compresses out zeros, merges equal neighbours in a single left-to-right pass (a
/// merged tile never merges again in the same pass), then pads with zeros. Tiles at
/// [`MAX_TILE_VALUE`] stay put. Returns `(changed, points)` where `points` is the sum of merged values.
pub fn slide_row_left(row: &mut [Tile]) -> (bool, u64) {
    let mut line: Vec<Tile> = row.iter().copied().filter(|&t| t != 0).collect();
    let mut points = 0u64;

    let mut i = 0;
    while i + 1 < line.len() {
        if line[i] == line[i + 1] && line[i] < MAX_TILE_VALUE {
            line[i] *= 2;
            points += u64::from(line[i]);
            line.remove(i + 1);
        }
        i += 1;
    }

    line.resize(row.len(), 0);
    let changed = line.as_slice() != &*row;
    row.copy_from_slice(&line);
    (changed, points)
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    score: u64,
    game_over: bool,
    endless_mode: bool,
    started: bool,
    history: ScoreHistory,
}

impl Game {
    /// Create a game with an empty `size x size` board.
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            score: 0,
            game_over: false,
            endless_mode: false,
            started: false,
            history: ScoreHistory::new(),
        }
    }

    /// Place the two starting tiles using the thread RNG.
    pub fn start(&mut self) {
        self.start_with(&mut rand::thread_rng());
    }

    /// Place the two starting tiles using an injected random source.
    pub fn start_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board.place_new_tile_with(INITIAL_TILE_VALUE, rng);
        self.board.place_new_tile_with(INITIAL_TILE_VALUE, rng);
        self.started = true;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// The stored game-over flag (set by the driver via [`Game::check_game_over`]).
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn endless_mode(&self) -> bool {
        self.endless_mode
    }

    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.started {
            Phase::InProgress
        } else {
            Phase::NotStarted
        }
    }

    /// Spawn a tile into a random empty cell (no-op when the board is full).
    pub fn place_new_tile(&mut self, value: Tile) -> Option<(usize, usize)> {
        self.board.place_new_tile(value)
    }

    pub fn place_new_tile_with<R: Rng + ?Sized>(
        &mut self,
        value: Tile,
        rng: &mut R,
    ) -> Option<(usize, usize)> {
        self.board.place_new_tile_with(value, rng)
    }

    /// Slide the board in `direction`. Returns whether any tile moved or merged.
    ///
    /// Does not spawn a tile and does not update the game-over flag.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        self.apply_move_at(direction, Instant::now())
    }

    /// [`Game::apply_move`] with an explicit timestamp for the score history.
    pub fn apply_move_at(&mut self, direction: Direction, now: Instant) -> bool {
        let (pre, post) = direction.rotations();
        self.board.rotate(pre);
        let (moved, points) = self.slide_left();
        self.board.rotate(post);

        if points > 0 {
            self.score = self.score.saturating_add(points);
            self.history.push(points, now);
        }
        moved
    }

    /// Parse a direction token and apply it. Unknown tokens are a no-op returning false.
    pub fn apply_named_move(&mut self, token: &str) -> bool {
        match Direction::from_str(token) {
            Some(direction) => self.apply_move(direction),
            None => false,
        }
    }

    fn slide_left(&mut self) -> (bool, u64) {
        let mut moved = false;
        let mut points: u64 = 0;
        for row in self.board.rows_mut() {
            let (changed, gained) = slide_row_left(row);
            moved |= changed;
            points = points.saturating_add(gained);
        }
        (moved, points)
    }

    /// True when no move is possible and endless mode is off. Pure query.
    pub fn is_game_over(&self) -> bool {
        if self.endless_mode {
            return false;
        }
        !self.board.has_empty_cell() && !self.board.has_adjacent_pair()
    }

    /// Store the result of [`Game::is_game_over`] in the game-over flag and return it.
    pub fn check_game_over(&mut self) -> bool {
        self.game_over = self.is_game_over();
        self.game_over
    }

    /// True if any tile has reached the win value.
    pub fn has_won(&self) -> bool {
        self.board.max_tile() >= WIN_TILE_VALUE
    }

    /// Disable game-over detection for the rest of this game.
    pub fn enable_endless_mode(&mut self) {
        self.endless_mode = true;
        self.game_over = false;
    }

    /// Replace grid and flags from persisted data.
    ///
    /// Rejects (leaving the game untouched) unless `grid` matches the board size and
    /// every cell is 0 or a power of two up to [`MAX_TILE_VALUE`].
    /// The score history is cleared since its timestamps belong to another session.
    pub fn restore(
        &mut self,
        grid: &[Vec<Tile>],
        score: u64,
        game_over: bool,
        endless_mode: bool,
    ) -> bool {
        if grid.iter().flatten().any(|&tile| !is_valid_tile(tile)) {
            return false;
        }
        if !self.board.replace_rows(grid) {
            return false;
        }
        self.score = score;
        self.game_over = game_over;
        self.endless_mode = endless_mode;
        self.started = true;
        self.history.clear();
        true
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.size = self.board.size();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.score = self.score;
        out.game_over = self.game_over;
        out.endless_mode = self.endless_mode;
        out.won = self.has_won();
        out.history = self.history.clone();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(row: &[Tile]) -> (Vec<Tile>, u64) {
        let mut row = row.to_vec();
        let (_, points) = slide_row_left(&mut row);
        (row, points)
    }

    #[test]
    fn slide_compresses_without_merge() {
        let mut row = vec![0, 2, 0, 4];
        assert_eq!(slide_row_left(&mut row), (true, 0));
        assert_eq!(row, vec![2, 4, 0, 0]);
    }

    #[test]
    fn slide_merges_each_tile_once() {
        assert_eq!(slide(&[2, 2, 0, 0]), (vec![4, 0, 0, 0], 4));
        assert_eq!(slide(&[2, 2, 2, 2]), (vec![4, 4, 0, 0], 8));
        assert_eq!(slide(&[4, 2, 2, 4]), (vec![4, 4, 4, 0], 4));
        assert_eq!(slide(&[2, 2, 2, 0]), (vec![4, 2, 0, 0], 4));
        assert_eq!(slide(&[4, 4, 8, 0]), (vec![8, 8, 0, 0], 8));
    }

    #[test]
    fn slide_reports_unchanged_row() {
        let mut row = vec![2, 4, 8, 16];
        assert_eq!(slide_row_left(&mut row), (false, 0));
        let mut empty = vec![0, 0, 0, 0];
        assert_eq!(slide_row_left(&mut empty), (false, 0));
    }

    #[test]
    fn slide_leaves_largest_tiles_unmerged() {
        let mut row = vec![MAX_TILE_VALUE, MAX_TILE_VALUE, 0, 0];
        assert_eq!(slide_row_left(&mut row), (false, 0));
        let half = MAX_TILE_VALUE / 2;
        assert_eq!(
            slide(&[0, half, half, 0]),
            (vec![MAX_TILE_VALUE, 0, 0, 0], u64::from(MAX_TILE_VALUE))
        );
    }

    #[test]
    fn restore_rejects_out_of_range_tiles() {
        let mut game = Game::new(2);
        assert!(!game.restore(&[vec![MAX_TILE_VALUE * 2, 0], vec![0, 0]], 0, false, false));
        assert!(!game.restore(&[vec![3, 0], vec![0, 0]], 0, false, false));
        assert!(!game.restore(&[vec![1, 0], vec![0, 0]], 0, false, false));
        assert_eq!(game.board().cells(), &[0, 0, 0, 0]);
        assert!(game.restore(&[vec![MAX_TILE_VALUE, 0], vec![0, 2]], 0, false, false));
    }

    #[test]
    fn score_saturates_instead_of_wrapping() {
        let mut game = Game::new(2);
        assert!(game.restore(&[vec![2, 2], vec![0, 0]], u64::MAX - 1, false, false));
        assert!(game.apply_move(Direction::Left));
        assert_eq!(game.score(), u64::MAX);
        assert_eq!(game.board().to_rows(), vec![vec![4, 0], vec![0, 0]]);
    }

    #[test]
    fn phase_follows_flags() {
        let mut game = Game::new(2);
        assert_eq!(game.phase(), Phase::NotStarted);
        game.start();
        assert_eq!(game.phase(), Phase::InProgress);
        game.board_mut().replace_rows(&[vec![2, 4], vec![4, 2]]);
        assert!(game.check_game_over());
        assert_eq!(game.phase(), Phase::GameOver);
        game.enable_endless_mode();
        assert_eq!(game.phase(), Phase::InProgress);
    }

    #[test]
    fn merges_are_recorded_in_history() {
        let mut game = Game::new(4);
        game.board_mut().replace_rows(&[
            vec![2, 2, 4, 4],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        assert!(game.apply_move(Direction::Left));
        assert_eq!(game.score(), 12);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history().entries()[0].points, 12);

        // Slide without merge adds no entry.
        assert!(game.apply_move(Direction::Right));
        assert_eq!(game.history().len(), 1);
    }
}
