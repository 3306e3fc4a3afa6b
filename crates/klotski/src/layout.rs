use bevy::math::IVec2;
use thiserror::Error;

use crate::occupancy::OccupancyMap;
use crate::tile::{Footprint, TileId};

/// Reasons a starting layout is refused.
///
/// Tiles are named by the id they would receive, i.e. their position in the layout plus one.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    #[error("the grid needs at least one row and one column, got {cols}x{rows}")]
    EmptyGrid { cols: i32, rows: i32 },
    #[error("tile {tile} has no area ({size})")]
    EmptyTile { tile: TileId, size: IVec2 },
    #[error("tile {tile} at {origin} does not fit in the {cols}x{rows} grid")]
    OutOfBounds {
        tile: TileId,
        origin: IVec2,
        cols: i32,
        rows: i32,
    },
    #[error("tile {tile} overlaps tile {other} at {cell}")]
    Overlap {
        tile: TileId,
        other: TileId,
        cell: IVec2,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpec {
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
}

impl TileSpec {
    pub const fn new(width: i32, height: i32, x: i32, y: i32) -> Self {
        Self {
            width,
            height,
            x,
            y,
        }
    }

    pub const fn footprint(&self) -> Footprint {
        Footprint::new(IVec2::new(self.x, self.y), IVec2::new(self.width, self.height))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub cols: i32,
    pub rows: i32,
    pub tiles: Vec<TileSpec>,
}

impl Layout {
    /// The starting puzzle: four columns, five rows and two free cells.
    ///
    /// ```text
    /// 01 02 02 03
    /// 01 04 05 03
    /// 06 06  . 07
    /// 06 06  . 07
    /// 08 09 10 10
    /// ```
    pub fn classic() -> Self {
        Self {
            cols: 4,
            rows: 5,
            tiles: vec![
                TileSpec::new(1, 2, 0, 0),
                TileSpec::new(2, 1, 1, 0),
                TileSpec::new(1, 2, 3, 0),
                TileSpec::new(1, 1, 1, 1),
                TileSpec::new(1, 1, 2, 1),
                TileSpec::new(2, 2, 0, 2),
                TileSpec::new(1, 2, 3, 2),
                TileSpec::new(1, 1, 0, 4),
                TileSpec::new(1, 1, 1, 4),
                TileSpec::new(2, 1, 2, 4),
            ],
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.cols <= 0 || self.rows <= 0 {
            return Err(LayoutError::EmptyGrid {
                cols: self.cols,
                rows: self.rows,
            });
        }

        let mut occupancy = OccupancyMap::new(self.cols, self.rows);
        for (index, spec) in self.tiles.iter().enumerate() {
            let tile = TileId::from_index(index);
            let footprint = spec.footprint();

            if footprint.size.x <= 0 || footprint.size.y <= 0 {
                return Err(LayoutError::EmptyTile {
                    tile,
                    size: footprint.size,
                });
            }
            if !footprint.fits(self.cols, self.rows) {
                return Err(LayoutError::OutOfBounds {
                    tile,
                    origin: footprint.origin,
                    cols: self.cols,
                    rows: self.rows,
                });
            }
            if let Some((cell, other)) = footprint
                .cells()
                .find_map(|cell| occupancy.get(cell).map(|other| (cell, other)))
            {
                return Err(LayoutError::Overlap { tile, other, cell });
            }

            occupancy.fill(footprint, tile);
        }
        Ok(())
    }
}
