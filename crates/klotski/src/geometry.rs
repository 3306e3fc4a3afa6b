use bevy::math::{IVec2, Rect, Vec2};

use crate::tile::{Footprint, Tile};

pub const SPACING: f32 = 10.0;

/// Pixel layout of the board.
///
/// Canvas coordinates start at the board's top-left corner with y pointing down. The board is
/// drawn centered on the world origin, where y points up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    cols: i32,
    rows: i32,
    cell_size: f32,
    spacing: f32,
}

impl BoardGeometry {
    pub const fn new(cols: i32, rows: i32, cell_size: f32, spacing: f32) -> Self {
        Self {
            cols,
            rows,
            cell_size,
            spacing,
        }
    }

    /// Largest square cells that let a `cols` x `rows` board fit in `available`.
    pub fn fit(available: Vec2, cols: i32, rows: i32, spacing: f32) -> Self {
        let (c, r) = (cols.max(1) as f32, rows.max(1) as f32);
        let cell_size = if available.x / c < available.y / r {
            (c + 1.0).mul_add(-spacing, available.x) / c
        } else {
            (r + 1.0).mul_add(-spacing, available.y) / r
        };
        Self::new(cols, rows, cell_size.max(0.0), spacing)
    }

    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub const fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.span(IVec2::new(self.cols, self.rows)) + 2.0 * self.spacing
    }

    pub fn cell_origin(&self, cell: IVec2) -> Vec2 {
        let cell = cell.as_vec2();
        cell * self.cell_size + (cell + 1.0) * self.spacing
    }

    pub fn span(&self, cells: IVec2) -> Vec2 {
        let cells = cells.as_vec2();
        cells * self.cell_size + (cells - 1.0) * self.spacing
    }

    pub fn footprint_rect(&self, footprint: Footprint) -> Rect {
        let min = self.cell_origin(footprint.origin);
        Rect::from_corners(min, min + self.span(footprint.size))
    }

    pub fn tile_rect(&self, tile: &Tile) -> Rect {
        self.footprint_rect(tile.footprint())
    }

    /// Cell a tile of `size` would snap to when dragged by a pointer at `pointer`.
    ///
    /// `drag_offset` is where the pointer grabbed the tile. The result is rounded to the
    /// nearest cell and clamped so the tile stays on the board.
    pub fn snap(&self, pointer: Vec2, drag_offset: Vec2, size: IVec2) -> IVec2 {
        let pitch = self.cell_size + self.spacing;
        let cell = ((pointer - drag_offset - self.spacing) / pitch)
            .round()
            .as_ivec2();
        let max = (IVec2::new(self.cols, self.rows) - size).max(IVec2::ZERO);
        cell.clamp(IVec2::ZERO, max)
    }

    pub fn canvas_to_world(&self, point: Vec2) -> Vec2 {
        let half = self.canvas_size() / 2.0;
        Vec2::new(point.x - half.x, half.y - point.y)
    }

    pub fn world_to_canvas(&self, point: Vec2) -> Vec2 {
        let half = self.canvas_size() / 2.0;
        Vec2::new(point.x + half.x, half.y - point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> BoardGeometry {
        BoardGeometry::new(4, 5, 50.0, 10.0)
    }

    #[test]
    fn fit_uses_the_tighter_dimension() {
        let narrow = BoardGeometry::fit(Vec2::new(340.0, 620.0), 4, 5, 10.0);
        let wide = BoardGeometry::fit(Vec2::new(1000.0, 310.0), 4, 5, 10.0);

        assert!(
            (narrow.cell_size() - 72.5).abs() < f32::EPSILON,
            "width limits a portrait window"
        );
        assert!(
            (wide.cell_size() - 50.0).abs() < f32::EPSILON,
            "height limits a landscape window"
        );
    }

    #[test]
    fn canvas_wraps_cells_and_gutters() {
        assert_eq!(
            geometry().canvas_size(),
            Vec2::new(250.0, 310.0),
            "4 * 50 + 5 * 10 by 5 * 50 + 6 * 10"
        );
    }

    #[test]
    fn cell_origins_skip_the_gutters() {
        let geometry = geometry();

        assert_eq!(geometry.cell_origin(IVec2::ZERO), Vec2::splat(10.0), "outer gutter");
        assert_eq!(
            geometry.cell_origin(IVec2::new(2, 1)),
            Vec2::new(130.0, 70.0),
            "two cells and three gutters across"
        );
    }

    #[test]
    fn snap_rounds_to_the_nearest_cell() {
        let geometry = geometry();
        let grab = Vec2::new(5.0, 5.0);

        // pitch is 60, so 40 pixels to the right of cell 0 is two thirds of the way to cell 1
        assert_eq!(
            geometry.snap(Vec2::new(55.0, 15.0), grab, IVec2::ONE),
            IVec2::new(1, 0),
            "two thirds of a pitch rounds up"
        );
        assert_eq!(
            geometry.snap(Vec2::new(35.0, 40.0), grab, IVec2::ONE),
            IVec2::ZERO,
            "a third of a pitch rounds down"
        );
    }

    #[test]
    fn snap_keeps_the_tile_on_the_board() {
        let geometry = geometry();

        assert_eq!(
            geometry.snap(Vec2::splat(1000.0), Vec2::ZERO, IVec2::splat(2)),
            IVec2::new(2, 3),
            "a 2x2 tile stops at the bottom-right corner"
        );
        assert_eq!(
            geometry.snap(Vec2::splat(-200.0), Vec2::ZERO, IVec2::ONE),
            IVec2::ZERO,
            "negative cells clamp to the origin"
        );
    }

    #[test]
    fn world_and_canvas_are_mirrored_around_the_center() {
        let geometry = geometry();
        let center = geometry.canvas_size() / 2.0;

        assert_eq!(geometry.canvas_to_world(center), Vec2::ZERO, "centers line up");
        assert_eq!(
            geometry.canvas_to_world(Vec2::ZERO),
            Vec2::new(-125.0, 155.0),
            "the canvas origin is the top-left corner"
        );
        assert_eq!(
            geometry.world_to_canvas(Vec2::new(-125.0, 155.0)),
            Vec2::ZERO,
            "and back"
        );
    }
}
