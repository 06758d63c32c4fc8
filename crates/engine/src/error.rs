//! Error types for the engine.
//!
//! `TileError` is raised by the raw [`TileCollection`](crate::TileCollection)
//! primitives. Each tile holder (bag, factory, center) translates it into an
//! [`AzulError::InvalidAction`] carrying a message fit for the player.

use thiserror::Error;

use crate::Color;

/// Failures of the raw tile collection primitives.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum TileError {
    /// A draw was attempted on an empty collection
    #[error("there are no tiles")]
    NoTiles,

    /// A color-filtered draw found no tile of that color
    #[error("there are no {0} tiles")]
    NoTilesOfColor(Color),
}

/// Errors surfaced to callers of the engine.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AzulError {
    /// A rule violation; the turn has to be redone with different input
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// The configuration or player setup cannot start a game
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A mutating call arrived after the game ended
    #[error("the game is over")]
    GameOver,
}

impl AzulError {
    pub(crate) fn invalid_action(message: impl Into<String>) -> Self {
        AzulError::InvalidAction(message.into())
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        AzulError::InvalidConfig(message.into())
    }
}

pub type AzulResult<T> = Result<T, AzulError>;
