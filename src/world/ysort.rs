//! Depth compositor.
//!
//! Gameplay code only moves `LogicalPosition`; this PostUpdate pass writes
//! the render transform, rounding to whole pixels and deriving z from the
//! entity's layer and its world y. Nothing else in the codebase writes
//! Transform z.

use bevy::prelude::*;

use crate::shared::*;

pub fn sync_transforms(mut drawables: Query<(&LogicalPosition, &Layer, &mut Transform)>) {
    for (pos, layer, mut transform) in &mut drawables {
        transform.translation.x = pos.0.x.round();
        transform.translation.y = pos.0.y.round();
        transform.translation.z = depth_z(*layer, pos.0.y);
    }
}
