//! Ambient world sprites: animated water, wildflowers, particle upkeep.

use bevy::prelude::*;

use crate::shared::*;

pub const WATER_ANIM_FPS: f32 = 5.0;
const WATER_FRAMES: [Color; 4] = [
    Color::srgb(0.2, 0.45, 0.75),
    Color::srgb(0.22, 0.48, 0.78),
    Color::srgb(0.24, 0.5, 0.8),
    Color::srgb(0.22, 0.48, 0.78),
];

#[derive(Component, Debug, Default)]
pub struct AnimatedWater {
    frame: f32,
}

#[derive(Component, Debug)]
pub struct Wildflower;

/// Visual only; the map spawn pass adds the collision for water cells.
pub fn spawn_water_tile(commands: &mut Commands, pos: Vec2) {
    commands.spawn((
        AnimatedWater::default(),
        Sprite {
            color: WATER_FRAMES[0],
            custom_size: Some(Vec2::splat(TILE_SIZE)),
            ..default()
        },
        Transform::from_translation(pos.extend(depth_z(Layer::Water, pos.y))),
        LogicalPosition(pos),
        Layer::Water,
    ));
}

pub fn spawn_wildflower(commands: &mut Commands, pos: Vec2) {
    commands.spawn((
        Wildflower,
        Sprite {
            color: Color::srgb(0.8, 0.6, 0.85),
            custom_size: Some(Vec2::new(TILE_SIZE * 0.4, TILE_SIZE * 0.7)),
            ..default()
        },
        Transform::from_translation(pos.extend(depth_z(Layer::Main, pos.y))),
        LogicalPosition(pos),
        Layer::Main,
        Hitbox::with_offset(
            Vec2::new(TILE_SIZE * 0.3, TILE_SIZE * 0.2),
            Vec2::new(0.0, -TILE_SIZE * 0.2),
        ),
    ));
}

pub fn animate_water(time: Res<Time>, mut tiles: Query<(&mut AnimatedWater, &mut Sprite)>) {
    for (mut water, mut sprite) in &mut tiles {
        water.frame += WATER_ANIM_FPS * time.delta_secs();
        sprite.color = WATER_FRAMES[water.frame as usize % WATER_FRAMES.len()];
    }
}

/// Age every particle, fading it out, and despawn the finished ones.
pub fn tick_particles(
    time: Res<Time>,
    mut particles: Query<(Entity, &mut Particle, &mut Sprite)>,
    mut commands: Commands,
) {
    for (entity, mut particle, mut sprite) in &mut particles {
        particle.lifetime.tick(time.delta());
        if particle.lifetime.finished() {
            commands.entity(entity).despawn();
        } else {
            let alpha = 1.0 - particle.lifetime.fraction();
            sprite.color = sprite.color.with_alpha(alpha);
        }
    }
}
