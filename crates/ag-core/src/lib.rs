//! ag-core: seeded dungeon-area generation
//!
//! Generates the room/corridor/wall layout of each Area in a world grid and
//! manages the lifecycle (generate, show, hide, release) of that data.
//! Rendering, input and world topology live outside this crate and are
//! reached only through the traits in [`world`].

pub mod config;
pub mod dungeon;
pub mod error;
pub mod grid;
pub mod world;

mod consts;
mod rng;

pub use config::GeneratorConfig;
pub use consts::*;
pub use error::{AreaError, ConfigError, ConfigLoadError};
pub use grid::{Direction, Point};
pub use rng::GenRng;
