//! Seeded room/corridor/wall generation for one Area
//!
//! 1. Propose rooms at random positions and sizes, keeping those that do not
//!    intersect an accepted room, until the target count or the attempt
//!    budget is reached.
//! 2. Join the rooms with L-shaped corridors into one connected component.
//! 3. Wall in every empty cell touching floor, diagonals included.

use serde::{Deserialize, Serialize};

use super::corridor::connect_rooms;
use super::{Room, TileCell, TileGrid};
use crate::config::GeneratorConfig;
use crate::error::{AreaError, ConfigError};
use crate::grid::Point;
use crate::rng::GenRng;

/// Output of one generator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLayout {
    pub seed: u64,
    pub tiles: TileGrid,
    /// Accepted rooms, first accepted first
    pub rooms: Vec<Room>,
    /// Corridor floor cells, in carving order
    pub corridors: Vec<Point>,
}

impl GeneratedLayout {
    /// Rooms actually placed; may fall short of the configured minimum
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

/// Deterministic layout generator. The same seed always yields the same
/// layout for a given config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomGenerator {
    config: GeneratorConfig,
}

impl RoomGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self, seed: u64) -> Result<GeneratedLayout, AreaError> {
        let mut rng = GenRng::new(seed);
        let mut tiles = TileGrid::new(self.config.width, self.config.height);

        let rooms = self.place_rooms(&mut rng);
        if rooms.len() < self.config.min_rooms {
            tracing::warn!(
                "seed {}: placed {}/{} rooms within {} attempts",
                seed,
                rooms.len(),
                self.config.min_rooms,
                self.config.max_attempts
            );
        }

        for room in &rooms {
            for cell in room.cells() {
                tiles.set(cell, TileCell::Floor)?;
            }
        }

        let corridors = connect_rooms(&mut tiles, &rooms, &mut rng)?;
        let walls = stamp_walls(&mut tiles)?;

        tracing::debug!(
            "seed {}: {} rooms, {} corridor cells, {} wall cells",
            seed,
            rooms.len(),
            corridors.len(),
            walls
        );

        Ok(GeneratedLayout {
            seed,
            tiles,
            rooms,
            corridors,
        })
    }

    /// Rejection-sample rooms. Rooms keep a one-cell margin from the grid
    /// edge so their walls always fit.
    fn place_rooms(&self, rng: &mut GenRng) -> Vec<Room> {
        let config = &self.config;
        // validate() bounds every size by MAX_AREA_SIDE, so the casts are exact
        let width = config.width as i32;
        let height = config.height as i32;
        let min_size = config.room_min_size as i32;
        let max_size = config.room_max_size as i32;
        let spacing = config.room_spacing as i32;

        let mut rooms: Vec<Room> = Vec::with_capacity(config.target_rooms.min(config.max_attempts));
        for _ in 0..config.max_attempts {
            if rooms.len() >= config.target_rooms {
                break;
            }

            let length = rng.range_inclusive(min_size, max_size);
            let room_height = rng.range_inclusive(min_size, max_size);
            let x = rng.range_inclusive(1, width - 1 - length);
            let y = rng.range_inclusive(1, height - 1 - room_height);

            let candidate = Room::new(
                Point::new(x, y),
                Point::new(x + length - 1, y + room_height - 1),
            );
            let padded = candidate.expanded(spacing);
            if rooms.iter().any(|r| padded.intersects(r)) {
                continue;
            }
            rooms.push(candidate);
        }
        rooms
    }
}

/// Turn every empty cell with a floor neighbor (8-way) into wall.
/// Returns the number of walls placed.
fn stamp_walls(tiles: &mut TileGrid) -> Result<usize, AreaError> {
    let targets: Vec<Point> = tiles
        .iter()
        .filter(|(p, cell)| {
            cell.is_empty()
                && (-1..=1).any(|dx| {
                    (-1..=1).any(|dy| tiles.get_or_empty(*p + Point::new(dx, dy)).is_floor())
                })
        })
        .map(|(p, _)| p)
        .collect();

    for p in &targets {
        tiles.set(*p, TileCell::BorderWall)?;
    }
    Ok(targets.len())
}
