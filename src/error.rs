//! Generation errors

use thiserror::Error;

/// Everything that can go wrong before a dungeon is walked or classified.
#[derive(Debug, Error, PartialEq)]
pub enum DungeonError {
    /// Configuration is inconsistent as a whole (negative iteration count,
    /// empty room catalog where generic rooms are needed).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A single parameter is out of its allowed range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Shorthand result type for dungeon generation.
pub type DungeonResult<T> = Result<T, DungeonError>;
