//! Dungeon layouts traced by random-walking runners
//!
//! A number of runners start from the origin of a grid. On every iteration
//! each runner may turn, with its own probability, and then moves one cell.
//! All visited cells become rooms: the origin is the start room, the cell
//! farthest from the origin is the boss room, and the rest are generic
//! rooms picked from a catalog.
//!
//! # Examples
//! ```
//! use dungeon_runners::{Dungeon, DungeonConfig, GridCell, RoomDescriptor, RoomRole};
//!
//! let config = DungeonConfig {
//!     seed: 2024,
//!     iterations: 20,
//!     runners: vec![0.2, 0.5, 0.8],
//!     room_catalog: vec![RoomDescriptor::new("hall"), RoomDescriptor::new("crypt")],
//!     ..Default::default()
//! };
//! let dungeon = Dungeon::generate(&config).unwrap();
//!
//! assert!(dungeon.rooms.contains(&GridCell::ORIGIN));
//! assert_eq!(dungeon.placements[0].role, RoomRole::Start);
//! assert_eq!(dungeon.placements.len(), dungeon.rooms.len());
//!
//! // Same seed, same dungeon
//! let again = Dungeon::generate(&config).unwrap();
//! assert_eq!(dungeon.placements, again.placements);
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod grid;
pub mod render;
pub mod rng;
pub mod walk;

pub use classify::{RoomFactory, RoomPlacement, RoomRole, WorldPosition};
pub use config::{DungeonConfig, RoomDescriptor};
pub use error::{DungeonError, DungeonResult};
pub use grid::{Direction, GridCell};
pub use rng::{DungeonRng, RandomSource, SEED_SENTINEL};
pub use walk::{FurthestCell, RoomSet, WalkEngine, WalkStep};

use serde::Serialize;

/// A generated dungeon
#[derive(Clone, Debug, Serialize)]
pub struct Dungeon {
    /// Every visited cell, in order of first visit
    pub rooms: RoomSet,
    /// Cell farthest from the origin
    pub furthest: FurthestCell,
    /// Classified rooms, in the same order as [Self::rooms]
    pub placements: Vec<RoomPlacement>,
    /// Runner steps, in the order they were taken; only kept by the
    /// `generate_traced*` constructors
    #[serde(skip)]
    pub steps: Vec<WalkStep>,
}

impl Dungeon {
    /// Validate `config` and generate with the RNG its seed selects.
    pub fn generate(config: &DungeonConfig) -> DungeonResult<Self> {
        let mut rng = DungeonRng::new(config.seed);
        Self::build(config, &mut rng, false)
    }

    /// As [Self::generate], also keeping every runner step in [Self::steps].
    pub fn generate_traced(config: &DungeonConfig) -> DungeonResult<Self> {
        let mut rng = DungeonRng::new(config.seed);
        Self::build(config, &mut rng, true)
    }

    /// Validate `config` and generate, drawing from `rng`.
    ///
    /// The walk and the classification share the same stream.
    pub fn generate_with<R: RandomSource + ?Sized>(
        config: &DungeonConfig,
        rng: &mut R,
    ) -> DungeonResult<Self> {
        Self::build(config, rng, false)
    }

    /// As [Self::generate_with], also keeping every runner step.
    pub fn generate_traced_with<R: RandomSource + ?Sized>(
        config: &DungeonConfig,
        rng: &mut R,
    ) -> DungeonResult<Self> {
        Self::build(config, rng, true)
    }

    fn build<R: RandomSource + ?Sized>(
        config: &DungeonConfig,
        rng: &mut R,
        trace: bool,
    ) -> DungeonResult<Self> {
        config.validate()?;
        log::info!(
            "generating dungeon: seed {}, {} runners, {} iterations",
            config.seed,
            config.runners.len(),
            config.iterations
        );

        let mut engine = WalkEngine::new(&config.runners, config.iteration_count());
        if trace {
            engine = engine.with_trace();
        }
        let walk = engine.run(rng);
        let placements = classify::classify(
            &walk.rooms,
            &walk.furthest,
            config.room_catalog.len(),
            config.room_size,
            rng,
        )?;

        Ok(Self {
            rooms: walk.rooms,
            furthest: walk.furthest,
            placements,
            steps: walk.steps,
        })
    }

    /// Boss cell, if any room was classified as boss.
    ///
    /// `None` when no runner ever left the origin.
    pub fn boss(&self) -> Option<GridCell> {
        self.placements
            .iter()
            .find(|p| p.role == RoomRole::Boss)
            .map(|p| p.cell)
    }

    /// Build all rooms with `factory`, in placement order.
    pub fn spawn<F: RoomFactory>(
        &self,
        config: &DungeonConfig,
        factory: &mut F,
    ) -> DungeonResult<Vec<F::Handle>> {
        classify::spawn(&self.placements, config, factory)
    }
}
