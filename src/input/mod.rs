use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, read_player_input);
    }
}

/// The single point where hardware input becomes game intent.
fn read_player_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut input: ResMut<PlayerInput>,
    mut claimed: ResMut<InteractionClaimed>,
) {
    *input = PlayerInput::default();
    claimed.0 = false;

    input.click = mouse.just_pressed(MouseButton::Left);
    input.ui_up = keys.just_pressed(KeyCode::ArrowUp) || keys.just_pressed(KeyCode::KeyW);
    input.ui_down = keys.just_pressed(KeyCode::ArrowDown) || keys.just_pressed(KeyCode::KeyS);
    input.ui_confirm =
        keys.just_pressed(KeyCode::Enter) || keys.just_pressed(KeyCode::Space);
    input.ui_cancel = keys.just_pressed(KeyCode::Escape);
    input.quicksave = keys.just_pressed(KeyCode::F5);
    input.quickload = keys.just_pressed(KeyCode::F9);

    // Cursor → world. Headless runs have neither a window nor a camera;
    // the cursor then simply stays unknown.
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    input.cursor_screen = window.cursor_position();
    input.cursor_world = input
        .cursor_screen
        .and_then(|screen| camera.viewport_to_world_2d(camera_transform, screen).ok());
}
