//! Input facade — the single point where hardware input becomes game actions.
//!
//! Gameplay and menu systems read the `PlayerInput` resource instead of
//! touching `ButtonInput<KeyCode>` directly, so headless tests can drive the
//! game by writing this resource.

use bevy::prelude::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .add_systems(PreUpdate, read_input);
    }
}

/// Current-frame input state for the fixed key set the game uses.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    // Held movement keys (cardinal only).
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    // Edge-triggered actions.
    pub tool_use: bool,
    pub tool_switch: bool,
    pub seed_use: bool,
    pub seed_switch: bool,
    pub interact: bool,
    // Menu navigation (shop).
    pub menu_up: bool,
    pub menu_down: bool,
    pub menu_select: bool,
    pub escape: bool,
}

fn read_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    *input = PlayerInput {
        up: keys.pressed(KeyCode::ArrowUp) || keys.pressed(KeyCode::KeyW),
        down: keys.pressed(KeyCode::ArrowDown) || keys.pressed(KeyCode::KeyS),
        left: keys.pressed(KeyCode::ArrowLeft) || keys.pressed(KeyCode::KeyA),
        right: keys.pressed(KeyCode::ArrowRight) || keys.pressed(KeyCode::KeyD),
        tool_use: keys.just_pressed(KeyCode::Space),
        tool_switch: keys.just_pressed(KeyCode::KeyQ),
        seed_use: keys.just_pressed(KeyCode::ControlLeft),
        seed_switch: keys.just_pressed(KeyCode::KeyE),
        interact: keys.just_pressed(KeyCode::Enter),
        menu_up: keys.just_pressed(KeyCode::ArrowUp),
        menu_down: keys.just_pressed(KeyCode::ArrowDown),
        menu_select: keys.just_pressed(KeyCode::Space),
        escape: keys.just_pressed(KeyCode::Escape),
    };
}
