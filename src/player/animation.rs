//! Placeholder player animation.
//!
//! Until character art lands, the player sprite is a solid color whose
//! brightness steps through the frame cycle, so animation timing is still
//! visible and testable.

use bevy::prelude::*;

use crate::shared::*;

use super::{PlayerState, PlayerTimers};

pub const PLAYER_BASE_COLOR: Color = Color::srgb(0.85, 0.7, 0.5);

/// What the player is doing this frame, derived from timers and movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    Walking,
    UsingTool(ToolKind),
    UsingSeed,
}

pub fn current_activity(timers: &PlayerTimers, direction: Vec2, tool: ToolKind) -> Activity {
    if timers.tool_use.is_active() {
        Activity::UsingTool(tool)
    } else if timers.seed_use.is_active() {
        Activity::UsingSeed
    } else if direction != Vec2::ZERO {
        Activity::Walking
    } else {
        Activity::Idle
    }
}

pub fn animate_player(
    time: Res<Time>,
    gear: Res<GearState>,
    mut players: Query<(&mut PlayerState, &PlayerTimers, &mut Sprite), With<Player>>,
) {
    for (mut state, timers, mut sprite) in &mut players {
        let activity = current_activity(timers, state.direction, gear.selected_tool());
        if activity == Activity::Idle {
            state.frame = 0.0;
        } else {
            state.frame += PLAYER_ANIM_FPS * time.delta_secs();
        }

        let index = state.frame as usize % PLAYER_FRAMES_PER_STATUS;
        // Step brightness per frame so the cycle reads even on a flat quad.
        let pulse = 1.0 - 0.08 * index as f32;
        let base = PLAYER_BASE_COLOR.to_srgba();
        sprite.color = Color::srgb(base.red * pulse, base.green * pulse, base.blue * pulse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_priority() {
        let mut timers = PlayerTimers::default();
        assert_eq!(
            current_activity(&timers, Vec2::ZERO, ToolKind::Hoe),
            Activity::Idle
        );
        assert_eq!(
            current_activity(&timers, Vec2::X, ToolKind::Hoe),
            Activity::Walking
        );

        timers.tool_use.activate(0);
        // Mid-swing overrides movement.
        assert_eq!(
            current_activity(&timers, Vec2::X, ToolKind::Axe),
            Activity::UsingTool(ToolKind::Axe)
        );
    }
}
