//! Level orchestration: the overnight reset.
//!
//! Every overnight effect listens for `DayEndEvent`, but their relative
//! order matters: growth must see yesterday's water, and rain watering must
//! see the fresh weather roll. This plugin pins the whole sequence in one
//! chain so the ordering lives in exactly one place.

use bevy::prelude::*;

use crate::daynight;
use crate::farming;
use crate::shared::GameState;
use crate::world;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                daynight::advance_sleep_transition,
                farming::plants::grow_on_day_end,
                daynight::reroll_weather_on_day_end,
                farming::soil::handle_day_end,
                world::trees::respawn_fruit_on_day_end,
                daynight::reset_sky_on_day_end,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}
