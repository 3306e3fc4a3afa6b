use core::fmt::{self, Formatter};

use bevy::math::{IVec2, Vec2};
use strum::{Display, EnumIter};

use crate::geometry::BoardGeometry;
use crate::layout::TileSpec;

/// Identifier of a tile, unique within its board. Ids start at 1 and follow creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(u32);

impl TileId {
    pub const FIRST: Self = Self(1);

    pub const fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TileKind {
    Single,
    Tall,
    Wide,
    Block,
    Other,
}

impl TileKind {
    pub const fn from_size(size: IVec2) -> Self {
        match (size.x, size.y) {
            (1, 1) => Self::Single,
            (1, 2) => Self::Tall,
            (2, 1) => Self::Wide,
            (2, 2) => Self::Block,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub origin: IVec2,
    pub size: IVec2,
}

impl Footprint {
    pub const fn new(origin: IVec2, size: IVec2) -> Self {
        Self { origin, size }
    }

    #[must_use]
    pub const fn moved_to(self, origin: IVec2) -> Self {
        Self {
            origin,
            size: self.size,
        }
    }

    /// Whether every cell lies inside a `cols` x `rows` grid.
    pub const fn fits(self, cols: i32, rows: i32) -> bool {
        // widened so far-off origins cannot overflow
        self.origin.x >= 0
            && self.origin.y >= 0
            && self.origin.x as i64 + self.size.x as i64 <= cols as i64
            && self.origin.y as i64 + self.size.y as i64 <= rows as i64
    }

    pub fn cells(self) -> impl Iterator<Item = IVec2> {
        let Self { origin, size } = self;
        (0..size.y).flat_map(move |dy| (0..size.x).map(move |dx| origin + IVec2::new(dx, dy)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    /// Pointer position relative to the tile's top-left pixel when the drag started.
    offset: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    id: TileId,
    size: IVec2,
    position: IVec2,
    drag: Option<Drag>,
}

impl Tile {
    pub(crate) const fn new(id: TileId, spec: TileSpec) -> Self {
        Self {
            id,
            size: IVec2::new(spec.width, spec.height),
            position: IVec2::new(spec.x, spec.y),
            drag: None,
        }
    }

    pub const fn id(&self) -> TileId {
        self.id
    }

    pub const fn width(&self) -> i32 {
        self.size.x
    }

    pub const fn height(&self) -> i32 {
        self.size.y
    }

    pub const fn size(&self) -> IVec2 {
        self.size
    }

    pub const fn position(&self) -> IVec2 {
        self.position
    }

    pub const fn kind(&self) -> TileKind {
        TileKind::from_size(self.size)
    }

    pub const fn footprint(&self) -> Footprint {
        Footprint::new(self.position, self.size)
    }

    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_offset(&self) -> Option<Vec2> {
        self.drag.map(|drag| drag.offset)
    }

    /// Whether a canvas pixel falls on the tile as drawn. Edges count as inside.
    pub fn contains_point(&self, point: Vec2, geometry: &BoardGeometry) -> bool {
        geometry.footprint_rect(self.footprint()).contains(point)
    }

    pub fn begin_drag(&mut self, offset: Vec2) {
        self.drag = Some(Drag { offset });
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub(crate) fn set_position(&mut self, position: IVec2) {
        self.position = position;
    }
}
