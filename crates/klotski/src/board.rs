use core::fmt::{self, Display, Formatter};

use bevy::math::IVec2;
use thiserror::Error;

use crate::layout::{Layout, LayoutError, TileSpec};
use crate::occupancy::OccupancyMap;
use crate::tile::{Footprint, Tile, TileId};

/// Why a proposed position was refused. Never shown to the player, the tile just stays put.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("tile {0} is not on the board")]
    UnknownTile(TileId),
    #[error("a footprint at {origin} leaves the {cols}x{rows} grid")]
    OutOfBounds { origin: IVec2, cols: i32, rows: i32 },
    #[error("cell {cell} is taken by tile {by}")]
    Blocked { cell: IVec2, by: TileId },
    #[error("{from} to {to} is not a single step along one axis")]
    NotSingleStep { from: IVec2, to: IVec2 },
}

/// Occupancy that would result from placing `moving` at `footprint`.
///
/// The map is rebuilt from `tiles` with `moving` left out, so the tile never blocks itself and
/// nothing shared is touched.
pub fn proposed_occupancy(
    tiles: &[Tile],
    cols: i32,
    rows: i32,
    moving: TileId,
    footprint: Footprint,
) -> Result<OccupancyMap, MoveRejection> {
    if !footprint.fits(cols, rows) {
        return Err(MoveRejection::OutOfBounds {
            origin: footprint.origin,
            cols,
            rows,
        });
    }

    let mut occupancy = OccupancyMap::new(cols, rows);
    for tile in tiles.iter().filter(|tile| tile.id() != moving) {
        occupancy.fill(tile.footprint(), tile.id());
    }

    for cell in footprint.cells() {
        match occupancy.get(cell) {
            Some(by) if by != moving => return Err(MoveRejection::Blocked { cell, by }),
            _ => {}
        }
    }

    occupancy.fill(footprint, moving);
    Ok(occupancy)
}

/// The board validates moves but does not apply them; see [`crate::session::GameSession`].
#[derive(Debug, Clone)]
pub struct Board {
    cols: i32,
    rows: i32,
    tiles: Vec<Tile>,
    occupancy: OccupancyMap,
    next_id: TileId,
}

impl Board {
    pub fn new(cols: i32, rows: i32) -> Self {
        Self {
            cols,
            rows,
            tiles: Vec::new(),
            occupancy: OccupancyMap::new(cols, rows),
            next_id: TileId::FIRST,
        }
    }

    pub fn from_layout(layout: &Layout) -> Result<Self, LayoutError> {
        layout.validate()?;

        let mut board = Self::new(layout.cols, layout.rows);
        for spec in &layout.tiles {
            board.add_tile(*spec);
        }
        Ok(board)
    }

    /// Appends a tile and refreshes the occupancy map.
    ///
    /// Nothing is checked here: a tile overlapping another simply overwrites its cells in the
    /// map. Use [`Board::from_layout`] for checked construction.
    pub fn add_tile(&mut self, spec: TileSpec) -> TileId {
        let id = self.next_id;
        self.next_id = id.next();
        self.tiles.push(Tile::new(id, spec));
        self.recompute_occupancy();
        id
    }

    pub fn recompute_occupancy(&mut self) {
        self.occupancy.clear();
        for tile in &self.tiles {
            self.occupancy.fill(tile.footprint(), tile.id());
        }
    }

    pub fn vacate(&mut self, id: TileId) {
        self.occupancy.vacate(id);
    }

    /// Checks moving tile `id` so its top-left corner lands on `target`.
    ///
    /// The target must keep the tile inside the grid, only cover free cells (or cells the tile
    /// already covers) and be exactly one cell away along a single axis. Proposing the current
    /// position is a rejection, not a no-op success.
    pub fn check_move(&self, id: TileId, target: IVec2) -> Result<(), MoveRejection> {
        let tile = self.tile(id).ok_or(MoveRejection::UnknownTile(id))?;
        proposed_occupancy(
            &self.tiles,
            self.cols,
            self.rows,
            id,
            tile.footprint().moved_to(target),
        )?;

        let from = tile.position();
        let delta = target - from;
        let single_step =
            (delta.x == 0 && delta.y.abs() == 1) || (delta.y == 0 && delta.x.abs() == 1);
        if single_step {
            Ok(())
        } else {
            Err(MoveRejection::NotSingleStep { from, to: target })
        }
    }

    pub fn is_move_valid(&self, id: TileId, target: IVec2) -> bool {
        self.check_move(id, target).is_ok()
    }

    pub const fn cols(&self) -> i32 {
        self.cols
    }

    pub const fn rows(&self) -> i32 {
        self.rows
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id() == id)
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|tile| tile.id() == id)
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    pub const fn occupancy(&self) -> &OccupancyMap {
        &self.occupancy
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.occupancy)
    }
}
