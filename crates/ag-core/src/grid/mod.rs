//! Integer grid coordinates and cardinal directions

mod direction;
mod point;

pub use direction::Direction;
pub use point::Point;
