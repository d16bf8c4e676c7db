//! Player domain: movement and collision, timed tool/seed actions, gear
//! selection, interaction zones, animation, and the follow camera.

use bevy::prelude::*;

use crate::shared::*;
use crate::timer::ActionTimer;

pub mod animation;
pub mod camera;
pub mod interaction;
pub mod movement;
pub mod tools;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GearState>()
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                (
                    movement::move_player,
                    tools::handle_actions,
                    interaction::handle_interact,
                    interaction::apply_item_pickups,
                    animation::animate_player,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(PostUpdate, camera::follow_player);
    }
}

/// Per-player action cooldowns. Use timers gate the action and delay its
/// effect to the swing's end; switch timers only debounce selection keys.
#[derive(Component, Debug)]
pub struct PlayerTimers {
    pub tool_use: ActionTimer,
    pub tool_switch: ActionTimer,
    pub seed_use: ActionTimer,
    pub seed_switch: ActionTimer,
}

impl Default for PlayerTimers {
    fn default() -> Self {
        Self {
            tool_use: ActionTimer::new(TOOL_USE_MS),
            tool_switch: ActionTimer::new(TOOL_SWITCH_MS),
            seed_use: ActionTimer::new(SEED_USE_MS),
            seed_switch: ActionTimer::new(SEED_SWITCH_MS),
        }
    }
}

/// Mutable per-frame player state shared by the systems in this domain.
#[derive(Component, Debug, Default)]
pub struct PlayerState {
    pub facing: Facing,
    pub direction: Vec2,
    /// Fractional animation cursor, reset when an action starts.
    pub frame: f32,
}

fn spawn_player(spawn: Res<PlayerSpawn>, mut commands: Commands) {
    let pos = spawn.0;
    commands.spawn((
        Player,
        Sprite {
            color: animation::PLAYER_BASE_COLOR,
            custom_size: Some(Vec2::new(TILE_SIZE * 0.8, TILE_SIZE * 1.2)),
            ..default()
        },
        Transform::from_translation(pos.extend(depth_z(Layer::Main, pos.y))),
        LogicalPosition(pos),
        Layer::Main,
        Hitbox::new(PLAYER_HITBOX),
        PlayerState::default(),
        PlayerTimers::default(),
    ));
}
