//! Plant entities: seeding, overnight growth, and harvest-by-touch.

use bevy::prelude::*;

use crate::shared::*;
use super::SoilGrid;

/// A growing crop anchored to one soil tile. Age advances only on watered
/// nights; at `max_age` the plant clamps and becomes harvestable.
#[derive(Component, Debug, Clone)]
pub struct Plant {
    pub seed: SeedKind,
    pub age: f32,
    pub harvestable: bool,
    pub tile: (i32, i32),
}

impl Plant {
    pub fn new(seed: SeedKind, tile: (i32, i32)) -> Self {
        Self { seed, age: 0.0, harvestable: false, tile }
    }

    /// Current visual stage index, clamped to the final frame.
    pub fn stage(&self) -> usize {
        (self.age as usize).min(self.seed.stage_count() - 1)
    }
}

/// Placeholder colour for a growth stage: pale seedling green ripening
/// toward the crop's colour.
pub fn plant_stage_color(seed: SeedKind, stage: usize) -> Color {
    let progress = stage as f32 / seed.max_age().max(1.0);
    let ripe = match seed {
        SeedKind::Corn => Vec3::new(0.95, 0.85, 0.25),
        SeedKind::Tomato => Vec3::new(0.85, 0.25, 0.2),
    };
    let seedling = Vec3::new(0.55, 0.75, 0.35);
    let c = seedling.lerp(ripe, progress);
    Color::srgb(c.x, c.y, c.z)
}

/// Placeholder size: sprouts start small and fill most of the tile.
pub fn plant_stage_size(seed: SeedKind, stage: usize) -> Vec2 {
    let progress = stage as f32 / seed.max_age().max(1.0);
    let side = TILE_SIZE * (0.25 + 0.55 * progress);
    Vec2::splat(side)
}

/// Plant a seed on the tilled, unoccupied tile under the target point and
/// take one seed from the inventory. The planted mark and the seed debit
/// happen together or not at all.
pub fn handle_plant_seed(
    mut plant_events: EventReader<PlantSeedEvent>,
    mut soil_grid: ResMut<SoilGrid>,
    mut inventory: ResMut<Inventory>,
    mut commands: Commands,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in plant_events.read() {
        if inventory.seed_count(event.seed) == 0 {
            continue;
        }
        let Some((col, row)) = soil_grid.plant(event.target) else {
            continue;
        };
        inventory.take_seed(event.seed);
        sfx_events.send(PlaySfxEvent { sfx_id: "plant".to_string() });

        let plant = Plant::new(event.seed, (col, row));
        let pos = tile_center(col, row);
        commands.spawn((
            Sprite {
                color: plant_stage_color(event.seed, 0),
                custom_size: Some(plant_stage_size(event.seed, 0)),
                ..default()
            },
            Transform::from_translation(pos.extend(depth_z(Layer::GroundPlant, pos.y))),
            LogicalPosition(pos),
            Layer::GroundPlant,
            plant,
        ));
    }
}

/// Overnight growth step. Each plant on a watered cell gains its grow
/// speed; past age 1 it joins the main layer and becomes an obstacle, and
/// at max age it clamps and turns harvestable.
pub fn grow_on_day_end(
    mut day_events: EventReader<DayEndEvent>,
    soil_grid: Res<SoilGrid>,
    mut plants: Query<(Entity, &mut Plant, &mut Sprite, &mut Layer)>,
    mut commands: Commands,
) {
    for _ in day_events.read() {
        for (entity, mut plant, mut sprite, mut layer) in &mut plants {
            let (col, row) = plant.tile;
            if !soil_grid.is_watered_tile(col, row) {
                continue;
            }

            plant.age += plant.seed.grow_speed();

            if plant.age as i32 > 0 && *layer != Layer::Main {
                // Grown past the sprout stage: collidable and y-sorted with
                // the other main-layer entities.
                *layer = Layer::Main;
                commands
                    .entity(entity)
                    .insert(Hitbox::new(Vec2::new(TILE_SIZE * 0.4, TILE_SIZE * 0.3)));
            }

            if plant.age >= plant.seed.max_age() {
                plant.age = plant.seed.max_age();
                plant.harvestable = true;
            }

            let stage = plant.stage();
            sprite.color = plant_stage_color(plant.seed, stage);
            sprite.custom_size = Some(plant_stage_size(plant.seed, stage));
        }
    }
}

/// Walk-over harvest: a harvestable plant touching the player's hitbox is
/// collected, its tile freed, and a short particle flash left behind.
pub fn harvest_collision(
    player: Query<(&LogicalPosition, &Hitbox), With<Player>>,
    plants: Query<(Entity, &Plant, &LogicalPosition, &Sprite)>,
    mut soil_grid: ResMut<SoilGrid>,
    mut pickup_events: EventWriter<ItemPickupEvent>,
    mut commands: Commands,
) {
    let Ok((player_pos, player_hitbox)) = player.get_single() else {
        return;
    };
    let player_box = player_hitbox.aabb(player_pos.0);

    for (entity, plant, pos, sprite) in &plants {
        if !plant.harvestable {
            continue;
        }
        let size = sprite.custom_size.unwrap_or(Vec2::splat(TILE_SIZE));
        let bounds = Aabb::from_center_size(pos.0, size);
        if !bounds.intersects(&player_box) {
            continue;
        }

        pickup_events.send(ItemPickupEvent { item: plant.seed.crop_item() });
        soil_grid.clear_planted(plant.tile.0, plant.tile.1);
        commands.entity(entity).despawn();

        commands.spawn((
            Sprite {
                color: Color::WHITE,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.0.extend(depth_z(Layer::Main, pos.0.y))),
            LogicalPosition(pos.0),
            Layer::Main,
            Particle::default(),
        ));
    }
}
