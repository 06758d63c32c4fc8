//! Azul Game Engine
//!
//! Rules engine for the tile-drafting board game Azul. A [`Game`] owns the
//! bag, the lid, the factories, the center of the table and one [`Board`] per
//! player, and moves tiles between them one drafting turn at a time.
//!
//! Randomness only enters through bag draws, and the bag draws from a seeded
//! [`rand::rngs::StdRng`], so a seed and a move list replay a game exactly.

mod board;
mod config;
mod error;
mod game;
mod supply;
mod tiles;
mod wall;

pub use board::{
    Board, FinalBonus, Floor, FloorScoring, FloorSpace, PatternLine, PatternLineScoring,
};
pub use config::GameConfig;
pub use error::{AzulError, AzulResult, TileError};
pub use game::{
    Destination, DrawSource, Game, GameEnd, GameResult, Move, Phase, Player, RoundScore,
    Standing, TurnOutcome,
};
pub use supply::{Bag, CenterOfTheTable, Factory, Lid};
pub use tiles::{Color, Tile, TileCollection, ALL_COLORS};
pub use wall::{Wall, WallCoordinate, WallScore, WallSpace};

// =============================================================================
// Constants
// =============================================================================

/// Wall width and height, and the number of pattern lines
pub const BOARD_SIZE: usize = 5;

pub const FLOOR_CAPACITY: usize = 7;

/// Floor penalties (fixed table), one per slot from the left. The first slot is free.
pub const FLOOR_PENALTY: [i32; FLOOR_CAPACITY] = [0, -1, -2, -2, -2, -3, -3];

/// End-of-game bonus per complete horizontal row
pub const ROW_BONUS: i32 = 2;
/// End-of-game bonus per complete vertical column
pub const COLUMN_BONUS: i32 = 7;
/// End-of-game bonus per color with all five tiles on the wall
pub const COLOR_BONUS: i32 = 10;
