//! Static ruleset of a game.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AzulError, AzulResult};
use crate::tiles::{Color, ALL_COLORS};
use crate::BOARD_SIZE;

/// Largest bag composition a ruleset may ask for
pub const MAX_TILES_PER_COLOR: usize = 1_000;
/// Largest factory fill a ruleset may ask for
pub const MAX_TILES_PER_FACTORY: usize = 100;
/// Largest number of factories a ruleset may ask for
pub const MAX_FACTORIES: usize = 100;

/// Ruleset fixed for the whole game
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Palette, in wall-layout order. Must name five distinct colors.
    pub tile_colors: Vec<Color>,

    /// Bag composition: this many tiles of every color
    pub tiles_per_color: usize,

    /// Factory fill size
    pub tiles_per_factory: usize,

    pub min_number_of_players: usize,
    pub max_number_of_players: usize,

    /// Number of factories by number of players
    pub players_to_factories: BTreeMap<usize, usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tile_colors: ALL_COLORS.to_vec(),
            tiles_per_color: 20,
            tiles_per_factory: 4,
            min_number_of_players: 2,
            max_number_of_players: 4,
            players_to_factories: BTreeMap::from([(2, 5), (3, 7), (4, 9)]),
        }
    }
}

impl GameConfig {
    /// Reject rulesets the engine cannot play
    pub fn validate(&self) -> AzulResult<()> {
        self.wall_palette()?;

        if !(1..=MAX_TILES_PER_COLOR).contains(&self.tiles_per_color) {
            return Err(AzulError::invalid_config(format!(
                "tiles_per_color must be between 1 and {MAX_TILES_PER_COLOR}, got {}",
                self.tiles_per_color
            )));
        }
        if !(1..=MAX_TILES_PER_FACTORY).contains(&self.tiles_per_factory) {
            return Err(AzulError::invalid_config(format!(
                "tiles_per_factory must be between 1 and {MAX_TILES_PER_FACTORY}, got {}",
                self.tiles_per_factory
            )));
        }
        if self.min_number_of_players == 0
            || self.min_number_of_players > self.max_number_of_players
        {
            return Err(AzulError::invalid_config(format!(
                "invalid player bounds {}..={}",
                self.min_number_of_players, self.max_number_of_players
            )));
        }
        for players in self.min_number_of_players..=self.max_number_of_players {
            match self.players_to_factories.get(&players) {
                Some(&n) if (1..=MAX_FACTORIES).contains(&n) => {}
                Some(&n) => {
                    return Err(AzulError::invalid_config(format!(
                        "{n} factories for {players} players; expected 1 to {MAX_FACTORIES}"
                    )))
                }
                None => {
                    return Err(AzulError::invalid_config(format!(
                        "no factory count for {players} players"
                    )))
                }
            }
        }
        Ok(())
    }

    /// The palette as the fixed-size array the wall layout is built from
    pub fn wall_palette(&self) -> AzulResult<[Color; BOARD_SIZE]> {
        let palette: [Color; BOARD_SIZE] =
            self.tile_colors.as_slice().try_into().map_err(|_| {
                AzulError::invalid_config(format!(
                    "expected {BOARD_SIZE} tile colors, got {}",
                    self.tile_colors.len()
                ))
            })?;
        for (i, color) in palette.iter().enumerate() {
            if palette[..i].contains(color) {
                return Err(AzulError::invalid_config(format!(
                    "tile color {color} is listed twice"
                )));
            }
        }
        Ok(palette)
    }

    /// Number of factories for `players`, if that player count is allowed
    pub fn factories_for(&self, players: usize) -> AzulResult<usize> {
        if !(self.min_number_of_players..=self.max_number_of_players).contains(&players) {
            return Err(AzulError::invalid_config(format!(
                "{players} players is outside the allowed {}..={}",
                self.min_number_of_players, self.max_number_of_players
            )));
        }
        self.players_to_factories
            .get(&players)
            .copied()
            .ok_or_else(|| AzulError::invalid_config(format!("no factory count for {players} players")))
    }

    /// Size of the full bag
    pub fn total_tiles(&self) -> AzulResult<usize> {
        self.tile_colors
            .len()
            .checked_mul(self.tiles_per_color)
            .ok_or_else(|| AzulError::invalid_config("the bag size overflows"))
    }

    /// Tiles needed to fill every factory for `players`
    pub fn tiles_per_round(&self, players: usize) -> AzulResult<usize> {
        self.factories_for(players)?
            .checked_mul(self.tiles_per_factory)
            .ok_or_else(|| AzulError::invalid_config("the factory fill overflows"))
    }
}
