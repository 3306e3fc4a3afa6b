use bevy::prelude::*;

/// A mouse or touch interaction reduced to the position it happened at.
///
/// Mouse button and first-finger touches produce the same events, so game code never
/// has to look at the raw input resources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
}

impl PointerEvent {
    /// Converts the carried position, e.g. from world space into a board's own space.
    #[must_use]
    pub fn map_position(self, f: impl FnOnce(Vec2) -> Vec2) -> Self {
        match self {
            Self::Down(position) => Self::Down(f(position)),
            Self::Move(position) => Self::Move(f(position)),
            Self::Up => Self::Up,
        }
    }

    pub const fn position(&self) -> Option<Vec2> {
        match *self {
            Self::Down(position) | Self::Move(position) => Some(position),
            Self::Up => None,
        }
    }
}

pub fn just_pressed_screen_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.just_pressed(MouseButton::Left) {
        let cursor_position = windows.single().cursor_position()?;
        Some(cursor_position)
    } else if touch_input.any_just_pressed() {
        let touch = touch_input.iter_just_pressed().next()?;
        Some(touch.position())
    } else {
        None
    }
}

/// Position of a pointer that is currently held down, mouse first.
pub fn held_screen_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.pressed(MouseButton::Left) {
        windows.single().cursor_position()
    } else {
        touch_input.iter().next().map(bevy::input::touch::Touch::position)
    }
}

pub fn just_released(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
) -> bool {
    button_input.just_released(MouseButton::Left)
        || touch_input.any_just_released()
        || touch_input.any_just_canceled()
}

pub fn screen_to_world(
    camera: &Query<(&Camera, &GlobalTransform)>,
    position: Vec2,
) -> Option<Vec2> {
    let (camera, camera_transform) = camera.single();

    camera
        .viewport_to_world(camera_transform, position)
        .map(|ray| ray.origin.truncate())
        .ok()
}

pub fn just_pressed_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let position = just_pressed_screen_position(button_input, touch_input, windows)?;
    screen_to_world(camera, position)
}

/// Reads this frame's pointer interactions in world coordinates.
///
/// A quick click or tap can press and release within one frame, in which case both a `Down`
/// and an `Up` are returned. While a pointer is held a `Move` is reported every frame.
pub fn pointer_events(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Vec<PointerEvent> {
    let pressed = just_pressed_world_position(button_input, touch_input, windows, camera);
    let released = just_released(button_input, touch_input);
    let held = if pressed.is_none() && !released {
        held_screen_position(button_input, touch_input, windows)
            .and_then(|position| screen_to_world(camera, position))
    } else {
        None
    };
    frame_events(pressed, released, held)
}

fn frame_events(pressed: Option<Vec2>, released: bool, held: Option<Vec2>) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    if let Some(position) = pressed {
        events.push(PointerEvent::Down(position));
    }
    if released {
        events.push(PointerEvent::Up);
    } else if pressed.is_none() {
        events.extend(held.map(PointerEvent::Move));
    }
    events
}
