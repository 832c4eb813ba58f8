//! Room roles and placement
//!
//! The walk only produces cells. Here each cell gets a role and a world
//! position, and an external [RoomFactory] turns the result into actual
//! rooms.

use serde::Serialize;

use crate::config::{DungeonConfig, RoomDescriptor};
use crate::error::{DungeonError, DungeonResult};
use crate::grid::GridCell;
use crate::rng::RandomSource;
use crate::walk::{FurthestCell, RoomSet};

/// What a room is used for
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
pub enum RoomRole {
    Start,
    Boss,
    /// Ordinary room, index into the room catalog
    Generic(usize),
}

/// Point in world space; rooms lie on the `y = 0` plane
///
/// Wider than [GridCell] so that any cell times any room size fits.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
pub struct WorldPosition {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl WorldPosition {
    pub fn of_cell(cell: GridCell, room_size: i32) -> Self {
        let size = i64::from(room_size);
        Self {
            x: i64::from(cell.x) * size,
            y: 0,
            z: i64::from(cell.y) * size,
        }
    }
}

/// One classified room, ready to be built
#[derive(PartialEq, Clone, Copy, Debug, Serialize)]
pub struct RoomPlacement {
    pub cell: GridCell,
    pub role: RoomRole,
    pub world: WorldPosition,
}

impl RoomPlacement {
    /// Catalog index of a generic room
    pub fn variant(&self) -> Option<usize> {
        match self.role {
            RoomRole::Generic(variant) => Some(variant),
            _ => None,
        }
    }
}

/// Builds rooms in the host environment
pub trait RoomFactory {
    type Handle;

    /// Create one room from its descriptor.
    fn create(
        &mut self,
        role: RoomRole,
        descriptor: &RoomDescriptor,
        world: WorldPosition,
    ) -> Self::Handle;
}

/// Role of `cell`, without the variant draw.
///
/// The origin is always the start, even if it is also the furthest cell.
fn fixed_role(cell: &GridCell, furthest: &FurthestCell) -> Option<RoomRole> {
    if *cell == GridCell::ORIGIN {
        Some(RoomRole::Start)
    } else if *cell == furthest.cell {
        Some(RoomRole::Boss)
    } else {
        None
    }
}

/// Assign roles and world positions to every room, in room set order.
///
/// Draws one catalog index per generic room from `rng`. Fails before any
/// draw if a generic room is needed but the catalog is empty.
pub fn classify<R: RandomSource + ?Sized>(
    rooms: &RoomSet,
    furthest: &FurthestCell,
    catalog_len: usize,
    room_size: i32,
    rng: &mut R,
) -> DungeonResult<Vec<RoomPlacement>> {
    let generic_rooms = rooms
        .iter()
        .filter(|cell| fixed_role(cell, furthest).is_none())
        .count();
    if generic_rooms > 0 && catalog_len == 0 {
        return Err(DungeonError::Configuration(format!(
            "room catalog is empty but {} generic rooms are needed",
            generic_rooms
        )));
    }

    let placements = rooms
        .iter()
        .map(|&cell| RoomPlacement {
            cell,
            role: fixed_role(&cell, furthest)
                .unwrap_or_else(|| RoomRole::Generic(rng.int_range(0, catalog_len))),
            world: WorldPosition::of_cell(cell, room_size),
        })
        .collect();
    log::debug!(
        "classified {} rooms, {} generic",
        rooms.len(),
        generic_rooms
    );
    Ok(placements)
}

/// Hand every placement to `factory`, with the descriptor its role selects.
pub fn spawn<F: RoomFactory>(
    placements: &[RoomPlacement],
    config: &DungeonConfig,
    factory: &mut F,
) -> DungeonResult<Vec<F::Handle>> {
    placements
        .iter()
        .map(|placement| -> DungeonResult<F::Handle> {
            let descriptor = match placement.role {
                RoomRole::Start => &config.start_room,
                RoomRole::Boss => &config.boss_room,
                RoomRole::Generic(variant) => {
                    config.room_catalog.get(variant).ok_or_else(|| {
                        DungeonError::Configuration(format!(
                            "room variant {} not in catalog of {}",
                            variant,
                            config.room_catalog.len()
                        ))
                    })?
                }
            };
            Ok(factory.create(placement.role, descriptor, placement.world))
        })
        .collect()
}
