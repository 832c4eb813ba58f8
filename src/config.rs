//! Generation settings

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DungeonError, DungeonResult};
use crate::rng::SEED_SENTINEL;

/// Opaque room description, handed to the room factory as is
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub struct RoomDescriptor {
    pub name: String,
}

impl RoomDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for RoomDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Everything needed to generate one dungeon
///
/// Fields missing from a JSON document take the [Default] values.
///
/// # Examples
/// ```
/// use dungeon_runners::DungeonConfig;
///
/// let config: DungeonConfig =
///     serde_json::from_str(r#"{"seed": 7, "runners": [0.3, 0.6]}"#).unwrap();
/// assert_eq!(config.iterations, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Random seed, `-1` for a different dungeon on every run
    pub seed: i64,
    /// Number of steps every runner takes
    pub iterations: i64,
    /// Turn probability of each runner; the order fixes the draw order
    pub runners: Vec<f64>,
    /// World-space edge length of one room
    pub room_size: i32,
    /// Variants for rooms that are neither start nor boss
    pub room_catalog: Vec<RoomDescriptor>,
    pub start_room: RoomDescriptor,
    pub boss_room: RoomDescriptor,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            seed: SEED_SENTINEL,
            iterations: 10,
            runners: Vec::new(),
            room_size: 10,
            room_catalog: Vec::new(),
            start_room: RoomDescriptor::new("start"),
            boss_room: RoomDescriptor::new("boss"),
        }
    }
}

impl DungeonConfig {
    /// Parse configuration from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Check all parameters that can be checked before walking.
    ///
    /// An empty room catalog is accepted here; whether generic rooms are
    /// needed is only known after the walk.
    pub fn validate(&self) -> DungeonResult<()> {
        if self.iterations < 0 {
            return Err(DungeonError::Configuration(format!(
                "iterations must not be negative, got {}",
                self.iterations
            )));
        }
        if let Some((i, p)) = self
            .runners
            .iter()
            .enumerate()
            .find(|(_, p)| !(0.0..=1.0).contains(*p))
        {
            return Err(DungeonError::InvalidParameter(format!(
                "turn probability of runner {} must be within [0, 1], got {}",
                i, p
            )));
        }
        if self.room_size <= 0 {
            return Err(DungeonError::InvalidParameter(format!(
                "room size must be positive, got {}",
                self.room_size
            )));
        }
        Ok(())
    }

    /// Iteration count as used by the walk. Call after [Self::validate].
    pub(crate) fn iteration_count(&self) -> usize {
        usize::try_from(self.iterations).unwrap_or(0)
    }
}
