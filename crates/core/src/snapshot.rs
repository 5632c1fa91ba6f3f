//! Read-only copy of the game state for rendering.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::history::ScoreHistory;
use crate::types::{Tile, DEFAULT_BOARD_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub size: usize,
    /// Row-major tiles, `size * size` long.
    pub cells: Vec<Tile>,
    pub score: u64,
    pub game_over: bool,
    pub endless_mode: bool,
    pub won: bool,
    pub history: ScoreHistory,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cells.clear();
        self.cells.resize(self.size * self.size, 0);
        self.score = 0;
        self.game_over = false;
        self.endless_mode = false;
        self.won = false;
        self.history.clear();
    }

    pub fn tile(&self, row: usize, col: usize) -> Tile {
        if row >= self.size || col >= self.size {
            return 0;
        }
        self.cells.get(row * self.size + col).copied().unwrap_or(0)
    }

    /// Hash of everything visible; used to skip redundant redraws.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            size: DEFAULT_BOARD_SIZE,
            cells: Vec::new(),
            score: 0,
            game_over: false,
            endless_mode: false,
            won: false,
            history: ScoreHistory::new(),
        };
        s.clear();
        s
    }
}
