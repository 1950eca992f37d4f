//! Tile-set themes resolved from an Area's biome

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::Biome;
use crate::error::ConfigError;

/// Something the scene can instantiate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prototype {
    pub name: String,
    /// Vertical placement offset in world units
    pub y_offset: f32,
}

impl Prototype {
    pub fn new(name: impl Into<String>, y_offset: f32) -> Self {
        Self {
            name: name.into(),
            y_offset,
        }
    }
}

/// Prototypes used to materialize one Area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSet {
    pub name: String,
    pub floor: Prototype,
    pub wall: Prototype,
    pub portal: Prototype,
    /// Props scattered in rooms when they are first shown
    #[serde(default)]
    pub decor: Vec<Prototype>,
}

impl TileSet {
    /// Stone path with grass borders, the stock theme
    pub fn grassy_path() -> Self {
        Self {
            name: "grassy_path".to_string(),
            floor: Prototype::new("path_floor", 0.0),
            wall: Prototype::new("hedge_wall", 5.0),
            portal: Prototype::new("portal", 0.5),
            decor: vec![
                Prototype::new("rock", 0.5),
                Prototype::new("bush", 1.0),
                Prototype::new("crate", 1.0),
            ],
        }
    }
}

/// Resolves the tile set for a biome
pub trait ThemeCatalog {
    fn tile_set(&self, biome: Biome) -> Result<&TileSet, ConfigError>;
}

/// Catalog keyed by biome; starts with every assigned biome on the grassy path
#[derive(Debug, Clone)]
pub struct DefaultThemes {
    sets: HashMap<Biome, TileSet>,
}

impl DefaultThemes {
    pub fn new() -> Self {
        let mut sets = HashMap::new();
        for biome in [Biome::C, Biome::Html, Biome::Python] {
            sets.insert(biome, TileSet::grassy_path());
        }
        Self { sets }
    }

    /// Catalog with no themes registered
    pub fn empty() -> Self {
        Self {
            sets: HashMap::new(),
        }
    }

    /// Register or replace the tile set for a biome
    pub fn insert(&mut self, biome: Biome, set: TileSet) {
        self.sets.insert(biome, set);
    }
}

impl Default for DefaultThemes {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeCatalog for DefaultThemes {
    fn tile_set(&self, biome: Biome) -> Result<&TileSet, ConfigError> {
        self.sets.get(&biome).ok_or(ConfigError::UnknownBiome(biome))
    }
}
