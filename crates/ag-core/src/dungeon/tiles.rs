//! Owned tile grid with bounds-checked access

use serde::{Deserialize, Serialize};

use super::TileCell;
use crate::error::AreaError;
use crate::grid::Point;

/// Column-major grid of [`TileCell`]s, indexed `[x][y]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Vec<TileCell>>,
}

impl TileGrid {
    /// Create an all-empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![TileCell::Empty; height]; width],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    fn out_of_bounds(&self, p: Point) -> AreaError {
        AreaError::OutOfBounds {
            x: p.x,
            y: p.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn get(&self, p: Point) -> Result<TileCell, AreaError> {
        if !self.in_bounds(p) {
            return Err(self.out_of_bounds(p));
        }
        Ok(self.cells[p.x as usize][p.y as usize])
    }

    pub fn set(&mut self, p: Point, cell: TileCell) -> Result<(), AreaError> {
        if !self.in_bounds(p) {
            return Err(self.out_of_bounds(p));
        }
        self.cells[p.x as usize][p.y as usize] = cell;
        Ok(())
    }

    /// Cell at `p`, treating everything outside the grid as empty
    pub fn get_or_empty(&self, p: Point) -> TileCell {
        self.get(p).unwrap_or(TileCell::Empty)
    }

    /// All cells with their positions, x-major
    pub fn iter(&self) -> impl Iterator<Item = (Point, TileCell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(x, col)| {
            col.iter()
                .enumerate()
                .map(move |(y, cell)| (Point::new(x as i32, y as i32), *cell))
        })
    }

    /// Count cells matching a predicate
    pub fn count(&self, pred: impl Fn(&TileCell) -> bool) -> usize {
        self.cells.iter().flatten().filter(|c| pred(c)).count()
    }

    /// Render one line per row, northmost row first
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                out.push(self.cells[x][y].symbol());
            }
            out.push('\n');
        }
        out
    }
}
