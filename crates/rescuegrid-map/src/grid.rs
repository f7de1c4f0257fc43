//! Bounded square grid with blocked cells

use rescuegrid_core::Cell;
use std::collections::HashSet;

/// The disaster-area grid: a size x size square plus the set of blocked cells
#[derive(Clone, Debug, Default)]
pub struct GridMap {
    size: u32,
    blocked: HashSet<Cell>,
}

impl GridMap {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            blocked: HashSet::new(),
        }
    }

    pub fn with_blocked(size: u32, blocked: HashSet<Cell>) -> Self {
        Self { size, blocked }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.size && (cell.y as u32) < self.size
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocked.contains(&cell)
    }

    /// A cell a robot may occupy: inside the grid and not blocked
    pub fn is_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_blocked(cell)
    }

    pub fn block(&mut self, cell: Cell) {
        self.blocked.insert(cell);
    }

    pub fn blocked(&self) -> &HashSet<Cell> {
        &self.blocked
    }

    /// In-bounds, unblocked orthogonal neighbors of a cell
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.neighbors4().into_iter().filter(|c| self.is_free(*c))
    }
}
