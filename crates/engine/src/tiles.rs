//! Tiles and the multiset that every tile holder is built on.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TileError;

/// Tile colors (order fixed; it is the default wall palette)
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Orange,
    Blue,
    White,
    Black,
    Red,
}

pub const ALL_COLORS: [Color; 5] = [
    Color::Orange,
    Color::Blue,
    Color::White,
    Color::Black,
    Color::Red,
];

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Color::Orange => "orange",
            Color::Blue => "blue",
            Color::White => "white",
            Color::Black => "black",
            Color::Red => "red",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ALL_COLORS
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| format!("unknown tile color '{}'", s.trim()))
    }
}

/// A tile in play. Tiles have no identity: two tiles of one color are equal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    Colored(Color),
    /// Whoever takes it starts the next round; it always lands on the floor
    FirstPlayerMarker,
}

impl Tile {
    /// The tile's color, `None` for the first-player marker
    pub fn color(self) -> Option<Color> {
        match self {
            Tile::Colored(c) => Some(c),
            Tile::FirstPlayerMarker => None,
        }
    }

    pub fn is_first_player_marker(self) -> bool {
        matches!(self, Tile::FirstPlayerMarker)
    }
}

impl From<Color> for Tile {
    fn from(color: Color) -> Self {
        Tile::Colored(color)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Colored(c) => write!(f, "{c}"),
            Tile::FirstPlayerMarker => f.write_str("1stplayer"),
        }
    }
}

/// Unordered multiset of tiles.
///
/// Removal swaps the removed tile with the last one, so the internal order
/// changes after every draw. Callers must not depend on it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TileCollection {
    tiles: Vec<Tile>,
}

impl TileCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tile(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    pub fn add_tiles(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles.extend(tiles);
    }

    /// Remove and return one uniformly random tile
    pub fn draw_random_tile(&mut self, rng: &mut impl Rng) -> Result<Tile, TileError> {
        if self.tiles.is_empty() {
            return Err(TileError::NoTiles);
        }
        let idx = rng.random_range(0..self.tiles.len());
        Ok(self.tiles.swap_remove(idx))
    }

    pub fn draw_all_tiles(&mut self) -> Vec<Tile> {
        std::mem::take(&mut self.tiles)
    }

    /// Remove every tile of `color`, plus the first-player marker if present.
    ///
    /// On error nothing is removed, the marker included.
    pub fn draw_all_tiles_by_color(&mut self, color: Color) -> Result<Vec<Tile>, TileError> {
        if self.tiles.is_empty() {
            return Err(TileError::NoTiles);
        }
        if !self.has_tiles_of_color(color) {
            return Err(TileError::NoTilesOfColor(color));
        }

        let mut drawn = Vec::new();
        // Walk backwards so swap_remove only pulls in tiles already examined
        for i in (0..self.tiles.len()).rev() {
            let tile = self.tiles[i];
            if tile == Tile::Colored(color) || tile.is_first_player_marker() {
                drawn.push(self.tiles.swap_remove(i));
            }
        }
        Ok(drawn)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn has_tiles(&self) -> bool {
        !self.tiles.is_empty()
    }

    pub fn has_tiles_of_color(&self, color: Color) -> bool {
        self.tiles.contains(&Tile::Colored(color))
    }

    pub fn count_of(&self, color: Color) -> usize {
        self.tiles
            .iter()
            .filter(|&&t| t == Tile::Colored(color))
            .count()
    }

    /// Number of colored tiles, i.e. ignoring the first-player marker
    pub fn colored_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.color().is_some()).count()
    }

    pub fn has_first_player_marker(&self) -> bool {
        self.tiles.contains(&Tile::FirstPlayerMarker)
    }

    /// Distinct colors present, in palette order
    pub fn colors(&self) -> Vec<Color> {
        ALL_COLORS
            .into_iter()
            .filter(|&c| self.has_tiles_of_color(c))
            .collect()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

impl FromIterator<Tile> for TileCollection {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        TileCollection {
            tiles: iter.into_iter().collect(),
        }
    }
}
