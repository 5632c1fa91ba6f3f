//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no external dependencies, so it can be
//! used from the core engine, the input layer, persistence and rendering alike.
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_SIZE` | 4 | Canonical board edge length |
//! | `INITIAL_TILE_VALUE` | 2 | Value of the two starting tiles and of normal spawns |
//! | `SPECIAL_TILE_VALUE` | 4 | Occasional doubled spawn |
//! | `WIN_TILE_VALUE` | 2048 | Reaching this tile wins the game |
//! | `MAX_TILE_VALUE` | 2^30 | Largest tile a board may hold |
//!
//! # Spawn Probability
//!
//! Below `SCORE_THRESHOLD_FOR_SPECIAL_TILES` every spawn is a 2. Above it the chance
//! of a 4 grows by `CHANCE_INCREASE_RATE` for every whole `CHANCE_SCORE_INTERVAL`
//! points, capped at `MAX_SPECIAL_TILE_CHANCE`.
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction};
//!
//! assert_eq!(Direction::from_str("left"), Some(Direction::Left));
//! assert_eq!(Direction::from_str("sideways"), None);
//!
//! assert_eq!(GameAction::MoveUp.direction(), Some(Direction::Up));
//! assert_eq!(GameAction::Save.direction(), None);
//! ```

/// A tile value: 0 for an empty cell, otherwise a power of two >= 2.
pub type Tile = u32;

/// Canonical board edge length.
pub const DEFAULT_BOARD_SIZE: usize = 4;

/// Smallest supported board edge length.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest supported board edge length (keeps the tile grid on an 80x24 terminal reachable).
pub const MAX_BOARD_SIZE: usize = 8;

/// Value of the starting tiles and of regular spawns.
pub const INITIAL_TILE_VALUE: Tile = 2;

/// Value of the occasional doubled spawn.
pub const SPECIAL_TILE_VALUE: Tile = 4;

/// Reaching a tile of at least this value wins the game.
pub const WIN_TILE_VALUE: Tile = 2048;

/// Largest tile a board may hold. Two of these do not merge, so every tile and every
/// merge result fits in [`Tile`].
pub const MAX_TILE_VALUE: Tile = 1 << 30;

/// True for 0 (empty) or a power of two in `2..=MAX_TILE_VALUE`.
///
/// ```
/// use tui_2048_types::{is_valid_tile, MAX_TILE_VALUE};
///
/// assert!(is_valid_tile(0));
/// assert!(is_valid_tile(MAX_TILE_VALUE));
/// assert!(!is_valid_tile(3));
/// assert!(!is_valid_tile(MAX_TILE_VALUE * 2));
/// ```
pub fn is_valid_tile(value: Tile) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two() && value <= MAX_TILE_VALUE)
}

/// Score below which every spawn is `INITIAL_TILE_VALUE`.
pub const SCORE_THRESHOLD_FOR_SPECIAL_TILES: u64 = 2000;

/// Score step at which the special-tile chance increases.
pub const CHANCE_SCORE_INTERVAL: u64 = 2000;

/// Chance added per whole `CHANCE_SCORE_INTERVAL` above the threshold.
pub const CHANCE_INCREASE_RATE: f64 = 0.05;

/// Cap on the special-tile chance.
pub const MAX_SPECIAL_TILE_CHANCE: f64 = 0.5;

/// Score-change history capacity (oldest entries are evicted first).
pub const MAX_SCORE_HISTORY_ENTRIES: usize = 5;

/// How many recent score changes the game screen shows.
pub const MAX_VISIBLE_SCORE_CHANGES: usize = 4;

/// Score changes older than this are no longer displayed.
pub const SCORE_CHANGE_DISPLAY_MS: u64 = 10_000;

/// Score changes younger than this are drawn bright.
pub const SCORE_FADE_RECENT_MS: u64 = 2_000;

/// Score changes younger than this (and older than recent) are drawn normally.
pub const SCORE_FADE_MEDIUM_MS: u64 = 5_000;

/// Number of manual save slots (numbered from 1).
pub const SAVE_SLOTS: u8 = 5;

/// Maximum length of a save name.
pub const MAX_SAVE_NAME_LEN: usize = 30;

/// Input poll interval for the driver loop.
pub const TICK_MS: u64 = 100;

/// Minimum redraw interval when nothing but time has changed.
pub const STATIC_REDRAW_MS: u64 = 250;

/// The four move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Parse a movement token (case-insensitive).
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str(""), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Quarter turns applied before and after the left-move, as `(pre, post)`.
    ///
    /// Each pair sums to a multiple of four so a full move leaves the board
    /// orientation unchanged.
    pub fn rotations(&self) -> (u8, u8) {
        match self {
            Direction::Left => (0, 0),
            Direction::Right => (2, 2),
            Direction::Up => (3, 1),
            Direction::Down => (1, 3),
        }
    }
}

/// Actions produced by the input layer.
///
/// Only the four `Move*` actions reach the game engine; the rest are handled by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Quit,
    Save,
    Load,
    ReturnToTitle,
    Settings,
}

impl GameAction {
    pub const ALL: [GameAction; 9] = [
        GameAction::MoveUp,
        GameAction::MoveDown,
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Quit,
        GameAction::Save,
        GameAction::Load,
        GameAction::ReturnToTitle,
        GameAction::Settings,
    ];

    /// Parse an action from its config name.
    ///
    /// ```
    /// use tui_2048_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("return_to_title"), Some(GameAction::ReturnToTitle));
    /// assert_eq!(GameAction::from_str("down"), Some(GameAction::MoveDown));
    /// assert_eq!(GameAction::from_str("change_theme"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(GameAction::MoveUp),
            "down" => Some(GameAction::MoveDown),
            "left" => Some(GameAction::MoveLeft),
            "right" => Some(GameAction::MoveRight),
            "quit" => Some(GameAction::Quit),
            "save" => Some(GameAction::Save),
            "load" => Some(GameAction::Load),
            "return_to_title" => Some(GameAction::ReturnToTitle),
            "settings" => Some(GameAction::Settings),
            _ => None,
        }
    }

    /// Config name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveUp => "up",
            GameAction::MoveDown => "down",
            GameAction::MoveLeft => "left",
            GameAction::MoveRight => "right",
            GameAction::Quit => "quit",
            GameAction::Save => "save",
            GameAction::Load => "load",
            GameAction::ReturnToTitle => "return_to_title",
            GameAction::Settings => "settings",
        }
    }

    /// Human-readable label for help text.
    pub fn label(&self) -> &'static str {
        match self {
            GameAction::MoveUp => "Move Up",
            GameAction::MoveDown => "Move Down",
            GameAction::MoveLeft => "Move Left",
            GameAction::MoveRight => "Move Right",
            GameAction::Quit => "Quit",
            GameAction::Save => "Save",
            GameAction::Load => "Load",
            GameAction::ReturnToTitle => "Title",
            GameAction::Settings => "Settings",
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameAction::MoveUp => Some(Direction::Up),
            GameAction::MoveDown => Some(Direction::Down),
            GameAction::MoveLeft => Some(Direction::Left),
            GameAction::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_pairs_are_full_turns() {
        for dir in Direction::ALL {
            let (pre, post) = dir.rotations();
            assert_eq!((pre + post) % 4, 0, "{:?}", dir);
        }
    }

    #[test]
    fn up_and_down_mirror_each_other() {
        let (up_pre, up_post) = Direction::Up.rotations();
        let (down_pre, down_post) = Direction::Down.rotations();
        assert_eq!(up_pre, down_post);
        assert_eq!(up_post, down_pre);
    }

    #[test]
    fn action_names_round_trip() {
        for action in GameAction::ALL {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn spawn_constants_match_classic_rules() {
        assert_eq!(INITIAL_TILE_VALUE, 2);
        assert_eq!(SPECIAL_TILE_VALUE, 4);
        assert_eq!(WIN_TILE_VALUE, 2048);
        assert_eq!(SCORE_THRESHOLD_FOR_SPECIAL_TILES, 2000);
        assert!(MAX_SPECIAL_TILE_CHANCE <= 1.0);
    }
}
