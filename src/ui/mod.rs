//! UI domain: the gameplay HUD, the trader shop menu, and audio playback.

use bevy::prelude::*;

use crate::shared::GameState;

pub mod audio;
pub mod hud;
pub mod shop;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (hud::spawn_hud, audio::start_music))
            .add_systems(
                Update,
                (
                    hud::update_tool_label,
                    hud::update_seed_label,
                    hud::update_money_label,
                    audio::handle_play_sfx,
                    audio::handle_play_music,
                ),
            )
            .add_systems(OnEnter(GameState::Shop), shop::open_shop)
            .add_systems(OnExit(GameState::Shop), shop::close_shop)
            .add_systems(
                Update,
                (shop::navigate, shop::select, shop::handle_escape, shop::refresh_rows)
                    .chain()
                    .run_if(in_state(GameState::Shop)),
            );
    }
}
