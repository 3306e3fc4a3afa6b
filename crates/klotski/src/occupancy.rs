use core::fmt::{self, Display, Formatter};

use bevy::math::IVec2;

use crate::tile::{Footprint, TileId};

/// Grid-shaped lookup from a cell to the tile covering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMap {
    cols: i32,
    rows: i32,
    cells: Vec<Option<TileId>>,
}

impl OccupancyMap {
    pub fn new(cols: i32, rows: i32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        Self {
            cols,
            rows,
            cells: vec![None; (cols * rows) as usize],
        }
    }

    pub const fn cols(&self) -> i32 {
        self.cols
    }

    pub const fn rows(&self) -> i32 {
        self.rows
    }

    const fn index(&self, cell: IVec2) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.cols || cell.y >= self.rows {
            None
        } else {
            Some((cell.y * self.cols + cell.x) as usize)
        }
    }

    /// Tile at `cell`; `None` for empty cells and cells outside the grid.
    pub fn get(&self, cell: IVec2) -> Option<TileId> {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .copied()
            .flatten()
    }

    pub fn is_free(&self, cell: IVec2) -> bool {
        self.get(cell).is_none()
    }

    pub fn fill(&mut self, footprint: Footprint, id: TileId) {
        for cell in footprint.cells() {
            if let Some(slot) = self.index(cell).and_then(|index| self.cells.get_mut(index)) {
                *slot = Some(id);
            }
        }
    }

    pub fn vacate(&mut self, id: TileId) {
        for slot in &mut self.cells {
            if *slot == Some(id) {
                *slot = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn cells_of(&self, id: TileId) -> impl Iterator<Item = IVec2> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, slot)| **slot == Some(id))
            .map(move |(index, _)| IVec2::new(index as i32 % cols, index as i32 / cols))
    }
}

impl Display for OccupancyMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for x in 0..self.cols {
                match self.get(IVec2::new(x, y)) {
                    Some(id) => write!(f, "{:>02} ", id.get())?,
                    None => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
