//! Save slots: one JSON file per numbered slot.
//!
//! A save is validated completely before it touches the live game: the grid must
//! match the board size and every cell must be 0 or a power of two between 2 and
//! [`MAX_TILE_VALUE`](crate::types::MAX_TILE_VALUE). A failed
//! load leaves the game exactly as it was.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::Game;
use crate::types::{is_valid_tile, Tile, MAX_SAVE_NAME_LEN, MAX_TILE_VALUE, SAVE_SLOTS};

/// On-disk save record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub grid: Vec<Vec<u64>>,
    pub score: u64,
    pub game_over: bool,
    /// Older saves predate endless mode.
    #[serde(default)]
    pub endless_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<u64>,
}

impl SaveData {
    pub fn from_game(game: &Game, name: Option<&str>) -> Self {
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .map(|d| d.as_secs());
        Self {
            grid: game
                .board()
                .rows()
                .map(|row| row.iter().map(|&t| u64::from(t)).collect())
                .collect(),
            score: game.score(),
            game_over: game.game_over(),
            endless_mode: game.endless_mode(),
            name: name.map(sanitize_name).filter(|n| !n.is_empty()),
            saved_at,
        }
    }

    /// Check the grid against `size` and convert it to tiles.
    pub fn validated_grid(&self, size: usize) -> Result<Vec<Vec<Tile>>> {
        ensure!(
            self.grid.len() == size,
            "grid has {} rows, expected {}",
            self.grid.len(),
            size
        );
        let mut rows = Vec::with_capacity(size);
        for (r, row) in self.grid.iter().enumerate() {
            ensure!(
                row.len() == size,
                "grid row {} has {} cells, expected {}",
                r,
                row.len(),
                size
            );
            let mut tiles = Vec::with_capacity(size);
            for (c, &value) in row.iter().enumerate() {
                tiles.push(to_tile(value).with_context(|| format!("cell ({}, {})", r, c))?);
            }
            rows.push(tiles);
        }
        Ok(rows)
    }

    /// Apply to `game` if valid; otherwise leave `game` untouched.
    ///
    /// A game-over save that already holds the win tile comes back in endless mode.
    pub fn apply_to(&self, game: &mut Game) -> Result<()> {
        let grid = self.validated_grid(game.size())?;
        ensure!(
            game.restore(&grid, self.score, self.game_over, self.endless_mode),
            "grid does not fit the board"
        );
        if game.game_over() && game.has_won() {
            game.enable_endless_mode();
        }
        Ok(())
    }
}

fn to_tile(value: u64) -> Result<Tile> {
    let tile = match Tile::try_from(value) {
        Ok(tile) if tile <= MAX_TILE_VALUE => tile,
        _ => bail!("tile {} is larger than {}", value, MAX_TILE_VALUE),
    };
    if !is_valid_tile(tile) {
        bail!("tile {} is not a power of two", tile);
    }
    Ok(tile)
}

/// Keep printable characters only and cap the length.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_control())
        .take(MAX_SAVE_NAME_LEN)
        .collect::<String>()
        .trim()
        .to_string()
}

/// What the slot picker shows for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotSummary {
    pub slot: u8,
    /// `None` for an empty (or unreadable) slot.
    pub entry: Option<SlotEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotEntry {
    pub name: Option<String>,
    pub score: u64,
    pub game_over: bool,
    pub endless_mode: bool,
}

/// Directory of numbered save slots.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
    slots: u8,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            slots: SAVE_SLOTS,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slots(&self) -> u8 {
        self.slots
    }

    pub fn slot_path(&self, slot: u8) -> PathBuf {
        self.dir.join(format!("slot_{}.json", slot))
    }

    fn check_slot(&self, slot: u8) -> Result<()> {
        ensure!(
            (1..=self.slots).contains(&slot),
            "slot {} is outside 1..={}",
            slot,
            self.slots
        );
        Ok(())
    }

    pub fn save(&self, game: &Game, slot: u8, name: Option<&str>) -> Result<()> {
        self.check_slot(slot)?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create {}", self.dir.display()))?;
        let data = SaveData::from_game(game, name);
        let path = self.slot_path(slot);
        let text = serde_json::to_string_pretty(&data)?;
        fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
        info!(slot, score = data.score, path = %path.display(), "game saved");
        Ok(())
    }

    /// Read a slot without touching any game.
    pub fn load(&self, slot: u8) -> Result<SaveData> {
        self.check_slot(slot)?;
        let path = self.slot_path(slot);
        let text =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
    }

    /// Load a slot into `game`; on any error `game` is unchanged.
    pub fn load_into(&self, game: &mut Game, slot: u8) -> Result<()> {
        let data = self.load(slot)?;
        data.apply_to(game)
            .with_context(|| format!("slot {} does not fit this board", slot))?;
        info!(slot, score = game.score(), endless = game.endless_mode(), "game loaded");
        Ok(())
    }

    /// One summary per slot, in slot order.
    pub fn list_slots(&self) -> Vec<SlotSummary> {
        (1..=self.slots)
            .map(|slot| SlotSummary {
                slot,
                entry: self.load(slot).ok().map(|data| SlotEntry {
                    name: data.name,
                    score: data.score,
                    game_over: data.game_over,
                    endless_mode: data.endless_mode,
                }),
            })
            .collect()
    }
}
