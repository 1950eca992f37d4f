//! Generator and world-scale constants

/// World units per grid cell. Scene consumers must use the same factor.
pub const CELL_SIZE: i32 = 10;

/// Default tile grid dimensions for an Area
pub const DEFAULT_AREA_WIDTH: usize = 40;
pub const DEFAULT_AREA_HEIGHT: usize = 40;

/// Largest accepted tile grid side. Keeps every coordinate, plus any room
/// spacing, well inside `i32`.
pub const MAX_AREA_SIDE: usize = 4096;

/// Seed of the rng that jitters portal placement along a room edge.
/// Fixed so portal cells do not depend on the Area seed.
pub const PORTAL_JITTER_SEED: u64 = 100;

/// Number of decoration variants a room can draw when first shown
pub const DECORATION_VARIANTS: usize = 10;

/// Map symbols used by the ASCII renderer
pub const S_EMPTY: char = ' ';
pub const S_FLOOR: char = '.';
pub const S_WALL: char = '#';
pub const S_PORTAL_UP: char = '^';
pub const S_PORTAL_DOWN: char = 'v';
pub const S_PORTAL_LEFT: char = '<';
pub const S_PORTAL_RIGHT: char = '>';
