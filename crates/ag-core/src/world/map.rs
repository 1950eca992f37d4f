//! World map contract and a plain rectangular implementation

use std::sync::Arc;

use super::{Area, AreaGroup, Connections};
use crate::grid::{Direction, Point};
use crate::rng::GenRng;

/// World-level topology that owns every Area
pub trait WorldMap {
    fn within_bounds(&self, p: Point) -> bool;

    /// The Area at `p`. Must be `Some` for any in-bounds position.
    fn area(&self, p: Point) -> Option<&Area>;

    /// Map seed, for diagnostics
    fn seed(&self) -> u64;
}

/// Rectangular grid of Areas, each connected to all of its in-bounds
/// neighbors. Areas are stored row-major.
#[derive(Debug)]
pub struct GridMap {
    width: usize,
    height: usize,
    seed: u64,
    areas: Vec<Area>,
}

impl GridMap {
    /// Build the grid, deriving one area seed per cell from `seed` in
    /// row-major order
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        let mut rng = GenRng::new(seed);
        let mut areas = Vec::with_capacity(width * height);

        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let position = Point::new(x, y);
                let mut connections = Connections::empty();
                for dir in Direction::ALL {
                    let n = position.step(dir);
                    if n.x >= 0 && n.y >= 0 && (n.x as usize) < width && (n.y as usize) < height {
                        connections |= Connections::of(dir);
                    }
                }
                areas.push(Area::new(position, rng.next_seed(), connections));
            }
        }

        tracing::debug!("map {}x{} built from seed {}", width, height, seed);
        Self {
            width,
            height,
            seed,
            areas,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        if self.within_bounds(p) {
            Some(p.y as usize * self.width + p.x as usize)
        } else {
            None
        }
    }

    pub fn area_mut(&mut self, p: Point) -> Option<&mut Area> {
        let idx = self.index(p)?;
        self.areas.get_mut(idx)
    }

    pub fn areas(&self) -> impl Iterator<Item = &Area> {
        self.areas.iter()
    }

    pub fn areas_mut(&mut self) -> impl Iterator<Item = &mut Area> {
        self.areas.iter_mut()
    }

    /// Put every Area of the map into `group`
    pub fn assign_group(&mut self, group: &Arc<AreaGroup>) {
        for area in &mut self.areas {
            area.set_group(group);
        }
    }
}

impl WorldMap for GridMap {
    fn within_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    fn area(&self, p: Point) -> Option<&Area> {
        let idx = self.index(p)?;
        self.areas.get(idx)
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Biome;

    #[test]
    fn test_grid_connections() {
        let map = GridMap::new(3, 3, 1);
        let corner = map.area(Point::new(0, 0)).unwrap();
        assert_eq!(corner.connections(), Connections::NORTH | Connections::EAST);

        let middle = map.area(Point::new(1, 1)).unwrap();
        assert_eq!(middle.connections(), Connections::all());

        let top = map.area(Point::new(1, 2)).unwrap();
        assert_eq!(top.connections(), Connections::EAST | Connections::SOUTH | Connections::WEST);
    }

    #[test]
    fn test_area_seeds_are_derived_from_map_seed() {
        let a = GridMap::new(4, 2, 9);
        let b = GridMap::new(4, 2, 9);
        let seeds_a: Vec<u64> = a.areas().map(|x| x.seed()).collect();
        let seeds_b: Vec<u64> = b.areas().map(|x| x.seed()).collect();
        assert_eq!(seeds_a, seeds_b);
        assert_ne!(seeds_a[0], seeds_a[1]);
        assert_eq!(a.seed(), 9);
        assert_eq!(a.area(Point::new(3, 1)).unwrap().position(), Point::new(3, 1));
    }

    #[test]
    fn test_neighbors() {
        let map = GridMap::new(3, 3, 1);
        let middle = map.area(Point::new(1, 1)).unwrap();
        let mut around: Vec<Point> = middle.neighbors(&map).iter().map(|a| a.position()).collect();
        around.sort();
        assert_eq!(
            around,
            vec![Point::new(0, 1), Point::new(1, 0), Point::new(1, 2), Point::new(2, 1)]
        );
    }

    #[test]
    fn test_neighbors_skip_out_of_bounds() {
        let map = GridMap::new(2, 2, 1);
        // claims every neighbor but sits in the map corner
        let stray = Area::new(Point::new(0, 0), 0, Connections::all());
        let around: Vec<Point> = stray.neighbors(&map).iter().map(|a| a.position()).collect();
        assert_eq!(around, vec![Point::new(0, 1), Point::new(1, 0)]);
    }

    #[test]
    fn test_out_of_bounds_lookup() {
        let mut map = GridMap::new(2, 2, 1);
        assert!(map.area(Point::new(2, 0)).is_none());
        assert!(map.area(Point::new(-1, 0)).is_none());
        assert!(map.area_mut(Point::new(0, 5)).is_none());
    }

    #[test]
    fn test_assign_group() {
        let mut map = GridMap::new(2, 2, 1);
        let group = Arc::new(AreaGroup::new(1, Biome::Python));
        map.assign_group(&group);
        assert!(map.areas().all(|a| a.biome() == Biome::Python));
    }
}
