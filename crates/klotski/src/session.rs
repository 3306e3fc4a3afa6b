use bevy::log::debug;
use bevy::prelude::*;
use bits_helpers::input::PointerEvent;

use crate::board::Board;
use crate::geometry::BoardGeometry;
use crate::layout::{Layout, LayoutError};
use crate::tile::TileId;

/// Sent whenever a dragged tile lands on a new cell.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCommitted {
    pub tile: TileId,
    pub from: IVec2,
    pub to: IVec2,
}

/// Everything one game needs: the board, how it maps to pixels and the layout to restart from.
///
/// Input handling goes through [`GameSession::handle`]; all positions are canvas pixels.
#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    board: Board,
    geometry: BoardGeometry,
    layout: Layout,
    dragging: Option<TileId>,
}

impl GameSession {
    pub fn new(layout: Layout, geometry: BoardGeometry) -> Result<Self, LayoutError> {
        let board = Board::from_layout(&layout)?;
        Ok(Self {
            board,
            geometry,
            layout,
            dragging: None,
        })
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub const fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub const fn dragging(&self) -> Option<TileId> {
        self.dragging
    }

    pub fn handle(&mut self, event: PointerEvent) -> Option<MoveCommitted> {
        match event {
            PointerEvent::Down(point) => {
                self.pointer_down(point);
                None
            }
            PointerEvent::Move(point) => self.pointer_move(point),
            PointerEvent::Up => {
                self.pointer_up();
                None
            }
        }
    }

    /// Picks up the first tile drawn under `point` and lifts it out of the occupancy map.
    ///
    /// A drag whose release was never seen is dropped first.
    pub fn pointer_down(&mut self, point: Vec2) -> Option<TileId> {
        if self.dragging.is_some() {
            self.pointer_up();
        }

        let geometry = self.geometry;
        let tile = self
            .board
            .tiles()
            .iter()
            .find(|tile| tile.contains_point(point, &geometry))?;
        let id = tile.id();
        let kind = tile.kind();
        let offset = point - geometry.cell_origin(tile.position());

        self.board.tile_mut(id)?.begin_drag(offset);
        self.board.vacate(id);
        self.dragging = Some(id);
        debug!("picked up {kind} tile {id}");
        Some(id)
    }

    /// Moves the dragged tile one cell towards the pointer if the board allows it.
    pub fn pointer_move(&mut self, point: Vec2) -> Option<MoveCommitted> {
        let id = self.dragging?;
        let tile = self.board.tile(id)?;
        let from = tile.position();
        let to = self.geometry.snap(point, tile.drag_offset()?, tile.size());
        if to == from {
            return None;
        }

        if let Err(rejection) = self.board.check_move(id, to) {
            debug!("tile {id} stays at {from}: {rejection}");
            return None;
        }

        self.board.tile_mut(id)?.set_position(to);
        self.board.recompute_occupancy();
        debug!("tile {id} moved {from} -> {to}\n{}", self.board);
        Some(MoveCommitted { tile: id, from, to })
    }

    pub fn pointer_up(&mut self) {
        for tile in self.board.tiles_mut() {
            tile.end_drag();
        }
        self.dragging = None;
        self.board.recompute_occupancy();
    }

    pub fn reset(&mut self) -> Result<(), LayoutError> {
        self.board = Board::from_layout(&self.layout)?;
        self.dragging = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TileSpec;

    /// Tile A is 1x2 at (0, 0), tile B is 2x1 at (1, 0), on a 4x5 grid of 50px cells.
    fn session() -> GameSession {
        let layout = Layout {
            cols: 4,
            rows: 5,
            tiles: vec![TileSpec::new(1, 2, 0, 0), TileSpec::new(2, 1, 1, 0)],
        };
        GameSession::new(layout, BoardGeometry::new(4, 5, 50.0, 10.0))
            .expect("test layout is valid")
    }

    fn tile_a() -> TileId {
        TileId::FIRST
    }

    fn position(session: &GameSession, id: TileId) -> Option<IVec2> {
        session.board().tile(id).map(crate::tile::Tile::position)
    }

    #[test]
    fn pressing_a_tile_lifts_it() {
        let mut session = session();

        let picked = session.handle(PointerEvent::Down(Vec2::new(20.0, 20.0)));

        assert_eq!(picked, None, "pressing never commits a move");
        assert_eq!(session.dragging(), Some(tile_a()), "a is under the pointer");
        assert!(
            session.board().occupancy().cells_of(tile_a()).next().is_none(),
            "a no longer occupies its cells while lifted"
        );
    }

    #[test]
    fn pressing_the_gutter_picks_nothing() {
        let mut session = session();

        assert_eq!(
            session.pointer_down(Vec2::new(65.0, 20.0)),
            None,
            "the gap between a and b belongs to no tile"
        );
        assert_eq!(session.dragging(), None, "nothing is dragged");
    }

    #[test]
    fn a_second_press_without_release_drops_the_first_drag() {
        let mut session = session();
        let tile_b = tile_a().next();
        session.handle(PointerEvent::Down(Vec2::new(20.0, 20.0)));

        session.handle(PointerEvent::Down(Vec2::new(100.0, 20.0)));

        let lifted: Vec<_> = session
            .board()
            .tiles()
            .iter()
            .filter(|tile| tile.is_dragging())
            .map(crate::tile::Tile::id)
            .collect();
        assert_eq!(lifted, vec![tile_b], "only the last pressed tile is lifted");
        assert_eq!(session.dragging(), Some(tile_b), "the session follows b");
        assert_eq!(
            session.board().occupancy().cells_of(tile_a()).count(),
            2,
            "a is back in the map"
        );
        assert!(
            session.board().occupancy().cells_of(tile_b).next().is_none(),
            "b is lifted out of the map"
        );
    }

    #[test]
    fn dragging_one_cell_down_commits_a_move() {
        let mut session = session();
        session.handle(PointerEvent::Down(Vec2::new(20.0, 20.0)));

        let committed = session.handle(PointerEvent::Move(Vec2::new(20.0, 70.0)));

        assert_eq!(
            committed,
            Some(MoveCommitted {
                tile: tile_a(),
                from: IVec2::ZERO,
                to: IVec2::new(0, 1),
            }),
            "a slides one cell down"
        );
        assert_eq!(position(&session, tile_a()), Some(IVec2::new(0, 1)), "position committed");
        assert_eq!(
            session.board().occupancy().get(IVec2::new(0, 2)),
            Some(tile_a()),
            "the map follows the move"
        );
    }

    #[test]
    fn dragging_onto_another_tile_does_nothing() {
        let mut session = session();
        session.handle(PointerEvent::Down(Vec2::new(20.0, 20.0)));

        let committed = session.handle(PointerEvent::Move(Vec2::new(80.0, 20.0)));

        assert_eq!(committed, None, "b blocks the way");
        assert_eq!(position(&session, tile_a()), Some(IVec2::ZERO), "a stays home");
    }

    #[test]
    fn far_drags_are_not_jumps() {
        let mut session = session();
        session.handle(PointerEvent::Down(Vec2::new(20.0, 20.0)));

        let committed = session.handle(PointerEvent::Move(Vec2::new(20.0, 140.0)));

        assert_eq!(committed, None, "two cells at once is refused");
        assert_eq!(position(&session, tile_a()), Some(IVec2::ZERO), "a stays home");
    }

    #[test]
    fn a_drag_can_walk_several_steps() {
        let mut session = session();
        session.handle(PointerEvent::Down(Vec2::new(20.0, 20.0)));

        let first = session.handle(PointerEvent::Move(Vec2::new(20.0, 80.0)));
        let second = session.handle(PointerEvent::Move(Vec2::new(20.0, 140.0)));

        assert!(first.is_some(), "first step commits");
        assert_eq!(
            second.map(|committed| committed.to),
            Some(IVec2::new(0, 2)),
            "second step continues from the new cell"
        );
    }

    #[test]
    fn releasing_restores_the_map() {
        let mut session = session();
        session.handle(PointerEvent::Down(Vec2::new(20.0, 20.0)));
        session.handle(PointerEvent::Up);

        assert_eq!(session.dragging(), None, "nothing is dragged after release");
        assert!(
            session.board().tiles().iter().all(|tile| !tile.is_dragging()),
            "every tile is idle"
        );
        assert_eq!(
            session.board().occupancy().cells_of(tile_a()).count(),
            2,
            "a is back in the map"
        );
    }

    #[test]
    fn moves_without_a_drag_are_ignored() {
        let mut session = session();

        assert_eq!(
            session.handle(PointerEvent::Move(Vec2::new(20.0, 70.0))),
            None,
            "hovering moves nothing"
        );
    }

    #[test]
    fn reset_restores_the_layout() {
        let mut session = session();
        session.handle(PointerEvent::Down(Vec2::new(20.0, 20.0)));
        session.handle(PointerEvent::Move(Vec2::new(20.0, 70.0)));

        assert_eq!(session.reset(), Ok(()), "the stored layout is valid");
        assert_eq!(position(&session, tile_a()), Some(IVec2::ZERO), "a is back home");
        assert_eq!(session.dragging(), None, "the drag is dropped");
    }

    #[test]
    fn overlapping_layouts_never_make_a_session() {
        let layout = Layout {
            cols: 2,
            rows: 2,
            tiles: vec![TileSpec::new(2, 2, 0, 0), TileSpec::new(1, 1, 1, 1)],
        };

        assert!(
            GameSession::new(layout, BoardGeometry::new(2, 2, 50.0, 10.0)).is_err(),
            "construction fails fast"
        );
    }
}
