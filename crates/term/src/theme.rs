//! Tile and UI colours.
//!
//! Two themes are available: `modern` draws each tile as a coloured outline on a dark
//! background, `classic` fills the tile face with its colour.

use crate::fb::{CellStyle, Rgb};
use crate::types::Tile;

const BLACK: Rgb = Rgb::new(0, 0, 0);
const EMPTY: Rgb = Rgb::new(58, 58, 58);

/// Outline colour per tile value, lowest first (2, 4, 8, ...).
const TILE_COLORS: [Rgb; 12] = [
    Rgb::new(188, 188, 188),
    Rgb::new(255, 255, 0),
    Rgb::new(135, 255, 0),
    Rgb::new(255, 175, 0),
    Rgb::new(255, 0, 0),
    Rgb::new(175, 0, 255),
    Rgb::new(255, 215, 0),
    Rgb::new(255, 135, 0),
    Rgb::new(215, 0, 0),
    Rgb::new(135, 0, 255),
    Rgb::new(80, 80, 255),
    Rgb::new(175, 40, 40),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Modern,
    Classic,
}

impl ThemeKind {
    pub const ALL: [ThemeKind; 2] = [ThemeKind::Modern, ThemeKind::Classic];

    /// Config name.
    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Modern => "modern",
            ThemeKind::Classic => "classic",
        }
    }

    /// The theme after this one, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            ThemeKind::Modern => ThemeKind::Classic,
            ThemeKind::Classic => ThemeKind::Modern,
        }
    }
}

/// How to draw one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileStyle {
    /// Outline (modern) or face (classic) style.
    pub frame: CellStyle,
    /// Style of the number.
    pub label: CellStyle,
    /// Whether the whole tile face is filled with `frame.bg`.
    pub filled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub kind: ThemeKind,
    pub text: CellStyle,
    pub title: CellStyle,
    pub score: CellStyle,
    pub accent: CellStyle,
    pub controls: CellStyle,
    pub highlight: CellStyle,
}

impl Theme {
    pub fn modern() -> Self {
        Self {
            kind: ThemeKind::Modern,
            text: CellStyle::new(Rgb::new(220, 220, 220), BLACK),
            title: CellStyle::new(Rgb::new(128, 128, 128), BLACK).bold(),
            score: CellStyle::new(Rgb::new(188, 188, 188), BLACK).bold(),
            accent: CellStyle::new(Rgb::new(255, 255, 0), BLACK),
            controls: CellStyle::new(Rgb::new(128, 128, 128), BLACK),
            highlight: CellStyle::new(BLACK, Rgb::new(188, 188, 188)).bold(),
        }
    }

    pub fn classic() -> Self {
        Self {
            kind: ThemeKind::Classic,
            title: CellStyle::new(Rgb::new(238, 228, 218), BLACK).bold(),
            score: CellStyle::new(Rgb::new(238, 228, 218), BLACK).bold(),
            accent: CellStyle::new(Rgb::new(237, 194, 46), BLACK),
            highlight: CellStyle::new(BLACK, Rgb::new(237, 194, 46)).bold(),
            ..Self::modern()
        }
    }

    pub fn from_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Modern => Self::modern(),
            ThemeKind::Classic => Self::classic(),
        }
    }

    /// Look up a theme by config name; unknown names get the modern theme.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        ThemeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .map(Self::from_kind)
            .unwrap_or_else(Self::modern)
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn tile_style(&self, value: Tile) -> TileStyle {
        let color = tile_color(value);
        match self.kind {
            ThemeKind::Modern => {
                let frame = CellStyle::new(color, BLACK);
                TileStyle {
                    frame,
                    label: if value == 0 { frame } else { frame.bold() },
                    filled: false,
                }
            }
            ThemeKind::Classic => {
                let text = if value <= 4 {
                    Rgb::new(60, 58, 50)
                } else {
                    Rgb::new(249, 246, 242)
                };
                let face = CellStyle::new(text, color);
                TileStyle {
                    frame: face,
                    label: face.bold(),
                    filled: true,
                }
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}

/// Colour for a tile value; values past the palette reuse the last colour.
pub fn tile_color(value: Tile) -> Rgb {
    if value < 2 {
        return EMPTY;
    }
    let idx = (value.trailing_zeros() as usize).saturating_sub(1);
    TILE_COLORS[idx.min(TILE_COLORS.len() - 1)]
}

/// Tile number that fits in `width` columns (`16384` becomes `16k`).
pub fn tile_label(value: Tile, width: usize) -> String {
    if value == 0 {
        return String::new();
    }
    let full = value.to_string();
    if full.len() <= width {
        return full;
    }
    format!("{}k", value / 1024)
}
