//! Player locomotion with axis-separated collision resolution.

use bevy::prelude::*;

use crate::input::PlayerInput;
use crate::shared::*;

use super::{PlayerState, PlayerTimers};

/// Read held movement keys, update facing, and move the player with
/// per-axis push-out against every obstacle hitbox.
///
/// Movement is frozen while a use timer runs (mid-swing) and while asleep.
/// Diagonal input is normalized so it is no faster than cardinal movement.
pub fn move_player(
    time: Res<Time>,
    input: Res<PlayerInput>,
    sleep: Res<SleepState>,
    mut players: Query<
        (&mut LogicalPosition, &Hitbox, &mut PlayerState, &PlayerTimers),
        With<Player>,
    >,
    obstacles: Query<(&LogicalPosition, &Hitbox), (Without<Player>, Without<InteractionZone>)>,
) {
    for (mut pos, hitbox, mut state, timers) in &mut players {
        if sleep.sleeping || timers.tool_use.is_active() || timers.seed_use.is_active() {
            state.direction = Vec2::ZERO;
            continue;
        }

        let mut direction = Vec2::ZERO;
        if input.up {
            direction.y += 1.0;
            state.facing = Facing::Up;
        }
        if input.down {
            direction.y -= 1.0;
            state.facing = Facing::Down;
        }
        // Horizontal wins the facing when both axes are held.
        if input.left {
            direction.x -= 1.0;
            state.facing = Facing::Left;
        }
        if input.right {
            direction.x += 1.0;
            state.facing = Facing::Right;
        }
        direction = direction.normalize_or_zero();
        state.direction = direction;

        if direction == Vec2::ZERO {
            continue;
        }

        let step = direction * PLAYER_SPEED * time.delta_secs();

        // X pass, then Y pass. Resolving each axis independently lets the
        // player slide along walls instead of sticking to them.
        pos.0.x += step.x;
        pos.0.x = resolve_axis(pos.0, hitbox, &obstacles, step.x, Axis::X);
        pos.0.y += step.y;
        pos.0.y = resolve_axis(pos.0, hitbox, &obstacles, step.y, Axis::Y);
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Axis {
    X,
    Y,
}

/// Push the player box out of every overlapping obstacle along one axis,
/// against the direction of travel. Returns the corrected center coordinate.
fn resolve_axis(
    center: Vec2,
    hitbox: &Hitbox,
    obstacles: &Query<(&LogicalPosition, &Hitbox), (Without<Player>, Without<InteractionZone>)>,
    moved: f32,
    axis: Axis,
) -> f32 {
    let mut center = center;
    for (obstacle_pos, obstacle_box) in obstacles {
        let player = hitbox.aabb(center);
        let wall = obstacle_box.aabb(obstacle_pos.0);
        if !player.intersects(&wall) {
            continue;
        }
        match axis {
            Axis::X => {
                if moved > 0.0 {
                    center.x = wall.min.x - hitbox.size.x / 2.0 - hitbox.offset.x;
                } else if moved < 0.0 {
                    center.x = wall.max.x + hitbox.size.x / 2.0 - hitbox.offset.x;
                }
            }
            Axis::Y => {
                if moved > 0.0 {
                    center.y = wall.min.y - hitbox.size.y / 2.0 - hitbox.offset.y;
                } else if moved < 0.0 {
                    center.y = wall.max.y + hitbox.size.y / 2.0 - hitbox.offset.y;
                }
            }
        }
    }
    match axis {
        Axis::X => center.x,
        Axis::Y => center.y,
    }
}
