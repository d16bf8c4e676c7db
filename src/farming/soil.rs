//! Hoe and watering-can responses on the soil grid.

use bevy::prelude::*;

use crate::shared::*;
use super::SoilGrid;

/// Hoe use: till the farmable tile under the target point. The autotile
/// rebuild happens via change detection in `render::sync_soil_sprites`.
/// When it is raining, a freshly tilled tile is watered immediately.
pub fn handle_hoe(
    mut tool_events: EventReader<ToolUseEvent>,
    mut soil_grid: ResMut<SoilGrid>,
    rain: Res<RainState>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in tool_events.read() {
        if event.tool != ToolKind::Hoe {
            continue;
        }

        // The hoe thunks on any farmable ground, even already-tilled.
        if soil_grid.is_farmable_at(event.target) {
            sfx_events.send(PlaySfxEvent { sfx_id: "hoe".to_string() });
        }

        if let Some((col, row)) = soil_grid.till(event.target) {
            if rain.raining {
                soil_grid.water(tile_center(col, row));
            }
        }
    }
}

/// Watering-can use: water the tilled tile under the target point.
/// The overlay sprite spawns from `render::sync_water_sprites`.
pub fn handle_watering_can(
    mut tool_events: EventReader<ToolUseEvent>,
    mut soil_grid: ResMut<SoilGrid>,
) {
    for event in tool_events.read() {
        if event.tool != ToolKind::WateringCan {
            continue;
        }
        soil_grid.water(event.target);
    }
}

/// Day reset: clear every watered flag, then re-water everything if the new
/// day is rainy. Growth must have been applied before this runs — the level
/// orchestrator chains the day-end systems in that order.
pub fn handle_day_end(
    mut day_events: EventReader<DayEndEvent>,
    mut soil_grid: ResMut<SoilGrid>,
    rain: Res<RainState>,
) {
    for _ in day_events.read() {
        soil_grid.remove_water();
        if rain.raining {
            soil_grid.water_all();
        }
    }
}
