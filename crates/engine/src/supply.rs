//! Tile holders: bag, lid, factories and the center of the table.
//!
//! Each holder wraps a [`TileCollection`] and exposes only what its role
//! allows. Errors from the collection are turned into player-facing
//! [`AzulError::InvalidAction`]s through a per-holder message table.

use rand::Rng;
use serde::Serialize;

use crate::error::{AzulError, TileError};
use crate::tiles::{Color, Tile, TileCollection};

/// Which holder a collection error came from
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Holder {
    Bag,
    Factory,
    Center,
}

impl Holder {
    fn translate(self, err: TileError) -> AzulError {
        let message = match (self, err) {
            (Holder::Bag, _) => "The bag is empty".to_string(),
            (Holder::Factory, TileError::NoTiles) => "This factory has no tiles".to_string(),
            (Holder::Factory, TileError::NoTilesOfColor(c)) => {
                format!("There are no {c} tiles on this factory")
            }
            (Holder::Center, TileError::NoTiles) => {
                "The center of the table has no tiles".to_string()
            }
            (Holder::Center, TileError::NoTilesOfColor(c)) => {
                format!("There are no {c} tiles in the center of the table")
            }
        };
        AzulError::InvalidAction(message)
    }
}

// =============================================================================
// Bag and lid
// =============================================================================

/// The hidden supply. Draws are uniformly random over its contents.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Bag {
    tiles: TileCollection,
}

impl Bag {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bag holding `tiles_per_color` tiles of every color in `colors`
    pub fn filled(colors: &[Color], tiles_per_color: usize) -> Self {
        let mut bag = Bag::new();
        for &color in colors {
            for _ in 0..tiles_per_color {
                bag.add_tile(Tile::Colored(color));
            }
        }
        bag
    }

    pub fn add_tile(&mut self, tile: Tile) {
        self.tiles.add_tile(tile);
    }

    pub fn draw(&mut self, rng: &mut impl Rng) -> Result<Tile, AzulError> {
        self.tiles
            .draw_random_tile(rng)
            .map_err(|e| Holder::Bag.translate(e))
    }

    /// Pour every tile from the lid back into the bag
    pub fn refill_from(&mut self, lid: &mut Lid) {
        self.tiles.add_tiles(lid.tiles.draw_all_tiles());
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.tile_count()
    }

    pub fn count_of(&self, color: Color) -> usize {
        self.tiles.count_of(color)
    }

    pub fn is_empty(&self) -> bool {
        !self.tiles.has_tiles()
    }

    /// Take out one tile of `color`, for tests that lay out a known table
    #[cfg(test)]
    pub(crate) fn take(&mut self, color: Color) -> Option<Tile> {
        let mut drawn = self.tiles.draw_all_tiles_by_color(color).ok()?;
        let tile = drawn.pop();
        self.tiles.add_tiles(drawn);
        tile
    }
}

/// The box lid: discarded tiles waiting to go back into the bag.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Lid {
    tiles: TileCollection,
}

impl Lid {
    /// Discard tiles. The first-player marker never goes in the lid.
    pub fn discard(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles
            .add_tiles(tiles.into_iter().filter(|t| !t.is_first_player_marker()));
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.tile_count()
    }

    pub fn count_of(&self, color: Color) -> usize {
        self.tiles.count_of(color)
    }
}

// =============================================================================
// Factories
// =============================================================================

/// A display filled from the bag at the start of every round.
///
/// The fill size is enforced by the game when it refills, not by the type.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Factory {
    tiles: TileCollection,
}

impl Factory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tile(&mut self, tile: Tile) {
        self.tiles.add_tile(tile);
    }

    pub fn draw_all_tiles_by_color(&mut self, color: Color) -> Result<Vec<Tile>, AzulError> {
        self.tiles
            .draw_all_tiles_by_color(color)
            .map_err(|e| Holder::Factory.translate(e))
    }

    /// Empty the factory, returning whatever was left on it
    pub fn draw_all_tiles(&mut self) -> Vec<Tile> {
        self.tiles.draw_all_tiles()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.tile_count()
    }

    pub fn has_tiles(&self) -> bool {
        self.tiles.has_tiles()
    }

    pub fn has_tiles_of_color(&self, color: Color) -> bool {
        self.tiles.has_tiles_of_color(color)
    }

    pub fn count_of(&self, color: Color) -> usize {
        self.tiles.count_of(color)
    }

    pub fn colors(&self) -> Vec<Color> {
        self.tiles.colors()
    }

    pub fn tiles(&self) -> &[Tile] {
        self.tiles.tiles()
    }
}

// =============================================================================
// Center of the table
// =============================================================================

/// Communal pool of factory leftovers, plus the first-player marker.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CenterOfTheTable {
    tiles: TileCollection,
}

impl CenterOfTheTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tiles(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles.add_tiles(tiles);
    }

    /// Clear leftovers of the previous round and put the marker back.
    /// Returns any colored tiles that were still here.
    pub fn reset_with_marker(&mut self) -> Vec<Tile> {
        let leftovers: Vec<Tile> = self
            .tiles
            .draw_all_tiles()
            .into_iter()
            .filter(|t| !t.is_first_player_marker())
            .collect();
        self.tiles.add_tile(Tile::FirstPlayerMarker);
        leftovers
    }

    /// Take every tile of `color`; the marker comes along if it is still here
    pub fn draw_all_tiles_by_color(&mut self, color: Color) -> Result<Vec<Tile>, AzulError> {
        self.tiles
            .draw_all_tiles_by_color(color)
            .map_err(|e| Holder::Center.translate(e))
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.tile_count()
    }

    /// True when no colored tile is left (a lone marker does not count)
    pub fn is_empty(&self) -> bool {
        self.tiles.colored_count() == 0
    }

    pub fn has_tiles_of_color(&self, color: Color) -> bool {
        self.tiles.has_tiles_of_color(color)
    }

    pub fn count_of(&self, color: Color) -> usize {
        self.tiles.count_of(color)
    }

    pub fn has_first_player_marker(&self) -> bool {
        self.tiles.has_first_player_marker()
    }

    pub fn colors(&self) -> Vec<Color> {
        self.tiles.colors()
    }

    pub fn tiles(&self) -> &[Tile] {
        self.tiles.tiles()
    }
}
