//! Area groups: Areas sharing a biome

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Thematic category of an area group. Parses case-insensitively from its
/// variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Biome {
    #[default]
    NotAssigned,
    C,
    Html,
    Python,
}

/// A set of Areas sharing a biome. Areas refer to their group weakly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaGroup {
    pub id: u32,
    pub biome: Biome,
}

impl AreaGroup {
    pub fn new(id: u32, biome: Biome) -> Self {
        Self { id, biome }
    }

    pub fn biome(&self) -> Biome {
        self.biome
    }
}
