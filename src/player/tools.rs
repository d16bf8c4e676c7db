//! Timed tool and seed actions.
//!
//! Pressing an action key arms a use timer; the effect lands when the timer
//! expires, matching the swing animation length. Switch keys act at once
//! and a short cooldown debounces key repeat.

use bevy::prelude::*;

use crate::input::PlayerInput;
use crate::shared::*;
use crate::timer::now_ms;

use super::{PlayerState, PlayerTimers};

pub fn handle_actions(
    time: Res<Time>,
    input: Res<PlayerInput>,
    sleep: Res<SleepState>,
    inventory: Res<Inventory>,
    mut gear: ResMut<GearState>,
    mut players: Query<(&LogicalPosition, &mut PlayerTimers, &mut PlayerState), With<Player>>,
    mut tool_events: EventWriter<ToolUseEvent>,
    mut seed_events: EventWriter<PlantSeedEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let now = now_ms(&time);

    for (pos, mut timers, mut state) in &mut players {
        // All action keys are ignored mid-swing and while asleep, so a
        // swing resolves with the gear it started with.
        let busy = timers.tool_use.is_active() || timers.seed_use.is_active();
        if !busy && !sleep.sleeping {
            if input.tool_use {
                timers.tool_use.activate(now);
                state.frame = 0.0;
            }
            if input.seed_use {
                timers.seed_use.activate(now);
                state.frame = 0.0;
            }
            if input.tool_switch && !timers.tool_switch.is_active() {
                timers.tool_switch.activate(now);
                gear.next_tool();
            }
            if input.seed_switch && !timers.seed_switch.is_active() {
                timers.seed_switch.activate(now);
                gear.next_seed();
            }
        }

        let target = pos.0 + tool_target_offset(state.facing);

        if timers.tool_use.update(now) {
            let tool = gear.selected_tool();
            if tool == ToolKind::WateringCan {
                sfx.send(PlaySfxEvent { sfx_id: "water".into() });
            }
            tool_events.send(ToolUseEvent { tool, target });
        }

        if timers.seed_use.update(now) {
            let seed = gear.selected_seed();
            if inventory.seed_count(seed) > 0 {
                seed_events.send(PlantSeedEvent { seed, target });
            }
        }

        // Cooldowns with no deferred effect.
        timers.tool_switch.update(now);
        timers.seed_switch.update(now);
    }
}
