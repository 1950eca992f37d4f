//! Corridor carving and room connectivity
//!
//! Rooms are visited in generation order. Each one that is not yet connected
//! to everything is joined by an L-shaped corridor to the nearest room in a
//! different connectivity class. Every join merges two classes, so the
//! passes end with one class after at most `rooms - 1` corridors.

use super::{Room, TileCell, TileGrid};
use crate::error::AreaError;
use crate::grid::Point;
use crate::rng::GenRng;

/// Tracks room connectivity using equivalence classes
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    /// Each room's equivalence class (rooms in same class are connected)
    classes: Vec<usize>,
}

impl ConnectivityTracker {
    /// Create a tracker where every room is its own class
    pub fn new(num_rooms: usize) -> Self {
        Self {
            classes: (0..num_rooms).collect(),
        }
    }

    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        if a >= self.classes.len() || b >= self.classes.len() {
            return false;
        }
        self.classes[a] == self.classes[b]
    }

    /// Merge the classes of two rooms
    pub fn merge(&mut self, a: usize, b: usize) {
        if a >= self.classes.len() || b >= self.classes.len() {
            return;
        }

        let old_class = self.classes[b];
        let new_class = self.classes[a];
        for class in &mut self.classes {
            if *class == old_class {
                *class = new_class;
            }
        }
    }

    pub fn all_connected(&self) -> bool {
        match self.classes.first() {
            None => true,
            Some(&first) => self.classes.iter().all(|&c| c == first),
        }
    }
}

/// Cells from `a` to `b` inclusive, along a single axis
fn straight(a: Point, b: Point) -> impl Iterator<Item = Point> {
    let step = Point::new((b.x - a.x).signum(), (b.y - a.y).signum());
    let len = a.manhattan(b);
    (0..=len as i32).map(move |i| a + step * i)
}

/// Carve an L-shaped corridor between two cells, bending once.
///
/// Only empty cells are carved; room floor along the way is left alone.
/// Returns the newly carved cells in path order.
pub fn dig_corridor(
    tiles: &mut TileGrid,
    from: Point,
    to: Point,
    horizontal_first: bool,
) -> Result<Vec<Point>, AreaError> {
    let corner = if horizontal_first {
        Point::new(to.x, from.y)
    } else {
        Point::new(from.x, to.y)
    };

    let mut carved = Vec::new();
    for p in straight(from, corner).chain(straight(corner, to)) {
        if tiles.get(p)?.is_empty() {
            tiles.set(p, TileCell::Floor)?;
            carved.push(p);
        }
    }
    Ok(carved)
}

/// Room closest to `rooms[from]` (Manhattan distance between centers) that
/// is not yet connected to it. Ties go to the earlier room.
fn nearest_unconnected(rooms: &[Room], from: usize, tracker: &ConnectivityTracker) -> Option<usize> {
    let center = rooms[from].center();
    rooms
        .iter()
        .enumerate()
        .filter(|(idx, _)| !tracker.are_connected(from, *idx))
        .min_by_key(|(idx, room)| (center.manhattan(room.center()), *idx))
        .map(|(idx, _)| idx)
}

/// Join every room to the layout and return all carved corridor cells
pub fn connect_rooms(
    tiles: &mut TileGrid,
    rooms: &[Room],
    rng: &mut GenRng,
) -> Result<Vec<Point>, AreaError> {
    let mut tracker = ConnectivityTracker::new(rooms.len());
    let mut corridors = Vec::new();

    while !tracker.all_connected() {
        for from in 0..rooms.len() {
            let Some(to) = nearest_unconnected(rooms, from, &tracker) else {
                break;
            };
            let horizontal_first = rng.coin();
            let carved = dig_corridor(tiles, rooms[from].center(), rooms[to].center(), horizontal_first)?;
            tracing::trace!("corridor {} -> {}: {} cells", from, to, carved.len());
            corridors.extend(carved);
            tracker.merge(from, to);
        }
    }

    Ok(corridors)
}
