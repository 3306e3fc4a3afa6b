use bevy::prelude::*;

use crate::session::GameSession;
use crate::tile::{Footprint, TileId, TileKind};

const FRAME_COLOR: Color = Color::WHITE;
const CELL_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);
const LIFTED_ALPHA: f32 = 0.8;

const FRAME_Z: f32 = -10.;
const CELL_Z: f32 = -5.;
const TILE_Z: f32 = 0.;
const LIFTED_TILE_Z: f32 = 1.;

#[derive(Component)]
struct TileVisual {
    id: TileId,
}

pub struct BoardRenderPlugin;

impl Plugin for BoardRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_board).add_systems(
            Update,
            sync_tiles.run_if(resource_changed::<GameSession>),
        );
    }
}

fn tile_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Single => Color::srgb_u8(0xFF, 0xE2, 0x48),
        TileKind::Tall => Color::srgb_u8(0x00, 0xA3, 0xFF),
        TileKind::Wide => Color::srgb_u8(0x23, 0xFF, 0x89),
        TileKind::Block => Color::srgb_u8(0xFF, 0x50, 0x50),
        TileKind::Other => Color::srgb_u8(0xB0, 0xB0, 0xB0),
    }
}

fn spawn_board(mut commands: Commands, session: Res<GameSession>) {
    commands.spawn(Camera2d);

    let geometry = session.geometry();
    let board = session.board();

    commands.spawn((
        Sprite::from_color(FRAME_COLOR, geometry.canvas_size()),
        Transform::from_xyz(0., 0., FRAME_Z),
    ));

    for y in 0..board.rows() {
        for x in 0..board.cols() {
            let rect = geometry.footprint_rect(Footprint::new(IVec2::new(x, y), IVec2::ONE));
            commands.spawn((
                Sprite::from_color(CELL_COLOR, rect.size()),
                Transform::from_translation(geometry.canvas_to_world(rect.center()).extend(CELL_Z)),
            ));
        }
    }

    for tile in board.tiles() {
        let rect = geometry.tile_rect(tile);
        commands.spawn((
            Sprite::from_color(tile_color(tile.kind()), rect.size()),
            Transform::from_translation(geometry.canvas_to_world(rect.center()).extend(TILE_Z)),
            TileVisual { id: tile.id() },
        ));
    }

    info!("board ready:\n{board}");
}

fn sync_tiles(
    session: Res<GameSession>,
    mut visuals: Query<(&TileVisual, &mut Transform, &mut Sprite)>,
) {
    let geometry = session.geometry();
    for (visual, mut transform, mut sprite) in &mut visuals {
        let Some(tile) = session.board().tile(visual.id) else {
            continue;
        };

        let rect = geometry.tile_rect(tile);
        let (z, alpha) = if tile.is_dragging() {
            (LIFTED_TILE_Z, LIFTED_ALPHA)
        } else {
            (TILE_Z, 1.)
        };
        transform.translation = geometry.canvas_to_world(rect.center()).extend(z);
        sprite.color = tile_color(tile.kind()).with_alpha(alpha);
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_kind_has_its_own_color() {
        let colors: Vec<_> = TileKind::iter().map(tile_color).collect();

        for (i, color) in colors.iter().enumerate() {
            assert!(
                !colors.iter().skip(i + 1).any(|other| other == color),
                "{color:?} is used by two tile kinds"
            );
        }
    }
}
