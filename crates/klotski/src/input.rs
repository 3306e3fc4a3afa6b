use bevy::prelude::*;
use bits_helpers::input::pointer_events;

use crate::session::{GameSession, MoveCommitted};

pub struct PointerInputPlugin;

impl Plugin for PointerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MoveCommitted>()
            .add_systems(Update, (drive_session, restart_on_key));
    }
}

fn drive_session(
    windows: Query<&Window>,
    buttons: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut session: ResMut<GameSession>,
    mut moves: EventWriter<MoveCommitted>,
) {
    let events = pointer_events(&buttons, &touch_input, &windows, &camera_q);
    if events.is_empty() {
        return;
    }

    let geometry = *session.geometry();
    for event in events {
        let event = event.map_position(|position| geometry.world_to_canvas(position));
        if let Some(committed) = session.handle(event) {
            moves.send(committed);
        }
    }
}

fn restart_on_key(keycode: Res<ButtonInput<KeyCode>>, mut session: ResMut<GameSession>) {
    if !keycode.just_pressed(KeyCode::KeyR) {
        return;
    }

    match session.reset() {
        Ok(()) => info!("puzzle restarted"),
        Err(err) => error!("could not restart the puzzle: {err}"),
    }
}
