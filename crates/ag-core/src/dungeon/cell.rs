//! Per-cell classification of an Area's tile grid

use serde::{Deserialize, Serialize};

use crate::grid::Direction;
use crate::{
    S_EMPTY, S_FLOOR, S_PORTAL_DOWN, S_PORTAL_LEFT, S_PORTAL_RIGHT, S_PORTAL_UP, S_WALL,
};

/// What occupies one grid cell. Exactly one classification at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileCell {
    #[default]
    Empty,
    /// Room or corridor floor
    Floor,
    BorderWall,
    /// Crossing point to the neighboring Area in `facing`
    Portal(Direction),
}

impl TileCell {
    pub const fn is_empty(&self) -> bool {
        matches!(self, TileCell::Empty)
    }

    pub const fn is_floor(&self) -> bool {
        matches!(self, TileCell::Floor)
    }

    pub const fn is_wall(&self) -> bool {
        matches!(self, TileCell::BorderWall)
    }

    pub const fn portal_facing(&self) -> Option<Direction> {
        match self {
            TileCell::Portal(dir) => Some(*dir),
            _ => None,
        }
    }

    /// Floors and portals can be walked on
    pub const fn is_walkable(&self) -> bool {
        matches!(self, TileCell::Floor | TileCell::Portal(_))
    }

    /// Display character for the ASCII renderer
    pub const fn symbol(&self) -> char {
        match self {
            TileCell::Empty => S_EMPTY,
            TileCell::Floor => S_FLOOR,
            TileCell::BorderWall => S_WALL,
            TileCell::Portal(Direction::Up) => S_PORTAL_UP,
            TileCell::Portal(Direction::Down) => S_PORTAL_DOWN,
            TileCell::Portal(Direction::Left) => S_PORTAL_LEFT,
            TileCell::Portal(Direction::Right) => S_PORTAL_RIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert_eq!(TileCell::default(), TileCell::Empty);
        assert!(TileCell::default().is_empty());
    }

    #[test]
    fn test_walkable() {
        assert!(TileCell::Floor.is_walkable());
        assert!(TileCell::Portal(Direction::Left).is_walkable());
        assert!(!TileCell::BorderWall.is_walkable());
        assert!(!TileCell::Empty.is_walkable());
    }

    #[test]
    fn test_portal_facing() {
        assert_eq!(TileCell::Portal(Direction::Down).portal_facing(), Some(Direction::Down));
        assert_eq!(TileCell::Floor.portal_facing(), None);
    }

    #[test]
    fn test_symbols_distinct() {
        let cells = [
            TileCell::Empty,
            TileCell::Floor,
            TileCell::BorderWall,
            TileCell::Portal(Direction::Up),
            TileCell::Portal(Direction::Down),
            TileCell::Portal(Direction::Left),
            TileCell::Portal(Direction::Right),
        ];
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                assert_ne!(a.symbol(), b.symbol());
            }
        }
    }
}
