//! Camera follow: the view is always centered on the player, with the
//! translation rounded to whole pixels to avoid tile-seam shimmer.

use bevy::prelude::*;

use crate::shared::*;

pub fn follow_player(
    players: Query<&LogicalPosition, With<Player>>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(player) = players.get_single() else {
        return;
    };
    for mut transform in &mut cameras {
        transform.translation.x = player.0.x.round();
        transform.translation.y = player.0.y.round();
    }
}
