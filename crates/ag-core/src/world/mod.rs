//! World-facing side of the generator
//!
//! Areas and their lifecycle, plus the narrow contracts through which they
//! reach collaborators owned elsewhere: the world map, area groups, tile-set
//! themes, the scene and quest spawn commands.

mod area;
mod group;
mod lifecycle;
mod map;
mod scene;
mod spawn;
mod theme;

pub use area::{Area, Connections, Portal};
pub use group::{AreaGroup, Biome};
pub use lifecycle::{AreaState, Lifecycle, ReleaseOutcome, Residency};
pub use map::{GridMap, WorldMap};
pub use scene::{MemoryScene, ObjectHandle, SceneObject, SceneSink, WorldPos};
pub use spawn::SpawnCommand;
pub use theme::{DefaultThemes, Prototype, ThemeCatalog, TileSet};
