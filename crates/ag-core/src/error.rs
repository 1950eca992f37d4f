//! Error types for generation and area lifecycle operations
//!
//! Lifecycle no-ops (hiding an Area that is already hidden and so on) are
//! not errors and never show up here.

use thiserror::Error;

use crate::grid::{Direction, Point};
use crate::world::Biome;

/// Errors returned by generation, portal carving and display
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AreaError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} tile grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration errors. The operation is aborted without touching state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("area at {position} has no area group")]
    MissingGroup { position: Point },

    #[error("no tile set for biome {0}")]
    UnknownBiome(Biome),

    #[error("{direction} portal cell {cell} lies outside the tile grid")]
    PortalOutOfBounds { direction: Direction, cell: Point },

    #[error("invalid generator config: {0}")]
    InvalidGenerator(String),

    #[error("area at {position} has no rooms")]
    NoRooms { position: Point },
}

/// Errors loading a generator config file
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_wraps_into_area_error() {
        let err: AreaError = ConfigError::UnknownBiome(Biome::NotAssigned).into();
        assert!(matches!(err, AreaError::Config(ConfigError::UnknownBiome(_))));
        assert_eq!(err.to_string(), "configuration error: no tile set for biome NotAssigned");
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = AreaError::OutOfBounds { x: -1, y: 3, width: 10, height: 8 };
        assert_eq!(err.to_string(), "cell (-1, 3) is outside the 10x8 tile grid");
    }
}
