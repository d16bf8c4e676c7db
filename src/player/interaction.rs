//! Interaction zones and inventory pickups.

use bevy::prelude::*;

use crate::input::PlayerInput;
use crate::shared::*;

use super::PlayerState;

/// Enter over a trigger zone either opens the shop or starts the night.
pub fn handle_interact(
    input: Res<PlayerInput>,
    mut sleep: ResMut<SleepState>,
    mut next_state: ResMut<NextState<GameState>>,
    mut players: Query<(&LogicalPosition, &Hitbox, &mut PlayerState), With<Player>>,
    zones: Query<(&LogicalPosition, &Hitbox, &InteractionZone), Without<Player>>,
) {
    if !input.interact || sleep.sleeping {
        return;
    }

    for (pos, hitbox, mut state) in &mut players {
        let player_box = hitbox.aabb(pos.0);
        for (zone_pos, zone_box, zone) in &zones {
            if !player_box.intersects(&zone_box.aabb(zone_pos.0)) {
                continue;
            }
            match zone {
                InteractionZone::Trader => {
                    next_state.set(GameState::Shop);
                }
                InteractionZone::Bed => {
                    sleep.sleeping = true;
                    state.direction = Vec2::ZERO;
                    state.facing = Facing::Left;
                }
            }
            break;
        }
    }
}

/// Fold pickup events into the inventory with a success chime.
pub fn apply_item_pickups(
    mut events: EventReader<ItemPickupEvent>,
    mut inventory: ResMut<Inventory>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for event in events.read() {
        inventory.add_item(event.item);
        sfx.send(PlaySfxEvent { sfx_id: "success".into() });
    }
}
