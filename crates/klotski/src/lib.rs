//! Klotski-style sliding blocks: drag a tile and it follows the pointer one free cell at a time.
//!
//! The rules live in [`board`] and [`session`] and know nothing about Bevy's schedule; the
//! private plugins only translate input, draw sprites and play sounds.

mod audio;
pub mod board;
pub mod geometry;
mod input;
pub mod layout;
pub mod occupancy;
mod render;
pub mod session;
pub mod tile;

use audio::TickAudioPlugin;
use bevy::prelude::*;
use geometry::{BoardGeometry, SPACING};
use input::PointerInputPlugin;
use layout::{Layout, LayoutError};
use render::BoardRenderPlugin;
use session::GameSession;

pub fn run() -> Result<(), LayoutError> {
    let layout = Layout::classic();
    let geometry = BoardGeometry::fit(
        bits_helpers::playable_area(),
        layout.cols,
        layout.rows,
        SPACING,
    );
    let session = GameSession::new(layout, geometry)?;

    bits_helpers::get_default_app(env!("CARGO_PKG_NAME"), Color::BLACK)
        .insert_resource(session)
        .add_plugins(PointerInputPlugin)
        .add_plugins(BoardRenderPlugin)
        .add_plugins(TickAudioPlugin)
        .run();

    Ok(())
}
