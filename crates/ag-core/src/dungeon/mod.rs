//! Area layout: tiles, rooms, corridors and the seeded generator

mod cell;
mod corridor;
mod generation;
mod room;
mod tiles;

pub use cell::TileCell;
pub use corridor::{dig_corridor, ConnectivityTracker};
pub use generation::{GeneratedLayout, RoomGenerator};
pub use room::{QuestPayload, Room, RoomState};
pub use tiles::TileGrid;
