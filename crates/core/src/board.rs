//! Board module - manages the tile grid
//!
//! The board is a square `size x size` grid of tiles. Each cell holds 0 (empty) or a
//! power of two >= 2. Storage is a flat row-major vector; the edge length is fixed at
//! construction and every mutation keeps the cell count at `size * size`.
//! Coordinates are `(row, col)` with row 0 at the top and col 0 at the left.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Tile, DEFAULT_BOARD_SIZE, MAX_TILE_VALUE};

/// The game board - a square grid using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Tile>,
}

impl Board {
    /// Create a new empty board. A size of 0 is bumped to 1.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a board from explicit rows.
    ///
    /// Returns `None` unless the rows form a non-empty square.
    pub fn from_rows(rows: &[Vec<Tile>]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(row * self.size + col)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the tile at `(row, col)`, or `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set the tile at `(row, col)`. Returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, tile: Tile) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = tile;
                true
            }
            None => false,
        }
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    pub fn row(&self, row: usize) -> Option<&[Tile]> {
        if row >= self.size {
            return None;
        }
        let start = row * self.size;
        Some(&self.cells[start..start + self.size])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks_exact(self.size)
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Tile]> {
        self.cells.chunks_exact_mut(self.size)
    }

    /// Copy the grid out as nested rows (the persisted shape).
    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.rows().map(<[Tile]>::to_vec).collect()
    }

    /// Replace the whole grid in place.
    ///
    /// Rejects (and leaves the board untouched) unless `rows` is exactly `size x size`.
    pub fn replace_rows(&mut self, rows: &[Vec<Tile>]) -> bool {
        if rows.len() != self.size || rows.iter().any(|row| row.len() != self.size) {
            return false;
        }
        for (dst, src) in self.cells.chunks_exact_mut(self.size).zip(rows) {
            dst.copy_from_slice(src);
        }
        true
    }

    /// All empty coordinates, row-major ascending.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &tile)| tile == 0)
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().any(|&tile| tile == 0)
    }

    /// True if two horizontally or vertically adjacent cells hold the same mergeable value.
    pub fn has_adjacent_pair(&self) -> bool {
        let n = self.size;
        for row in 0..n {
            for col in 0..n {
                let tile = self.cells[row * n + col];
                if tile >= MAX_TILE_VALUE {
                    continue;
                }
                if col + 1 < n && self.cells[row * n + col + 1] == tile {
                    return true;
                }
                if row + 1 < n && self.cells[(row + 1) * n + col] == tile {
                    return true;
                }
            }
        }
        false
    }

    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Place `value` into a uniformly random empty cell using the thread RNG.
    ///
    /// No-op on a full board. Returns the chosen coordinate.
    pub fn place_new_tile(&mut self, value: Tile) -> Option<(usize, usize)> {
        self.place_new_tile_with(value, &mut rand::thread_rng())
    }

    /// Same as [`Board::place_new_tile`] with an injected random source.
    pub fn place_new_tile_with<R: Rng + ?Sized>(
        &mut self,
        value: Tile,
        rng: &mut R,
    ) -> Option<(usize, usize)> {
        let empty = self.empty_cells();
        let &(row, col) = empty.choose(rng)?;
        self.set(row, col, value);
        Some((row, col))
    }

    /// Rotate the grid 90° clockwise, `times` times.
    pub fn rotate(&mut self, times: u8) {
        for _ in 0..times % 4 {
            self.rotate_once();
        }
    }

    fn rotate_once(&mut self) {
        let n = self.size;
        let src = self.cells.clone();
        for row in 0..n {
            for col in 0..n {
                self.cells[row * n + col] = src[(n - 1 - col) * n + row];
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, tile) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", tile)?;
            }
        }
        Ok(())
    }
}
