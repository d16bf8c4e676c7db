//! Trees: axe damage, fruit drops, stump conversion, overnight regrowth.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::shared::*;

pub const TREE_HEALTH: i32 = 5;
/// Fruit regrows per slot with probability `2 / (FRUIT_ROLL_MAX + 1)`.
pub const FRUIT_ROLL_MAX: u32 = 10;
const STUMP_DISSOLVE_MS: u64 = 300;

/// Fruit anchor points relative to the tree center.
pub const FRUIT_SLOTS_LARGE: [Vec2; 6] = [
    Vec2::new(-30.0, 38.0),
    Vec2::new(0.0, 50.0),
    Vec2::new(30.0, 40.0),
    Vec2::new(-20.0, 14.0),
    Vec2::new(14.0, 20.0),
    Vec2::new(36.0, 8.0),
];
pub const FRUIT_SLOTS_SMALL: [Vec2; 4] = [
    Vec2::new(-18.0, 26.0),
    Vec2::new(8.0, 34.0),
    Vec2::new(24.0, 18.0),
    Vec2::new(-8.0, 10.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeSize {
    Large,
    Small,
}

impl TreeSize {
    pub fn sprite_size(self) -> Vec2 {
        match self {
            TreeSize::Large => Vec2::new(TILE_SIZE * 1.5, TILE_SIZE * 2.2),
            TreeSize::Small => Vec2::new(TILE_SIZE, TILE_SIZE * 1.6),
        }
    }

    pub fn fruit_slots(self) -> &'static [Vec2] {
        match self {
            TreeSize::Large => &FRUIT_SLOTS_LARGE,
            TreeSize::Small => &FRUIT_SLOTS_SMALL,
        }
    }
}

#[derive(Component, Debug)]
pub struct Tree {
    pub size: TreeSize,
    pub health: i32,
    pub alive: bool,
}

impl Tree {
    pub fn new(size: TreeSize) -> Self {
        Self { size, health: TREE_HEALTH, alive: true }
    }
}

/// A fruit hanging on a tree, despawned when shaken loose or overnight.
#[derive(Component, Debug)]
pub struct TreeFruit {
    pub tree: Entity,
}

const TRUNK_COLOR: Color = Color::srgb(0.35, 0.5, 0.25);
const STUMP_COLOR: Color = Color::srgb(0.4, 0.28, 0.16);
const FRUIT_COLOR: Color = Color::srgb(0.85, 0.2, 0.2);

pub fn spawn_tree(commands: &mut Commands, pos: Vec2, size: TreeSize) {
    let sprite_size = size.sprite_size();
    let tree = commands
        .spawn((
            Tree::new(size),
            Sprite {
                color: TRUNK_COLOR,
                custom_size: Some(sprite_size),
                ..default()
            },
            Transform::from_translation(pos.extend(depth_z(Layer::Main, pos.y))),
            LogicalPosition(pos),
            Layer::Main,
            // Only the trunk base blocks; the canopy can overlap the player.
            Hitbox::with_offset(
                Vec2::new(sprite_size.x * 0.5, TILE_SIZE * 0.4),
                Vec2::new(0.0, -sprite_size.y / 2.0 + TILE_SIZE * 0.2),
            ),
        ))
        .id();

    let mut rng = rand::thread_rng();
    for &slot in size.fruit_slots() {
        if rng.gen_range(0..=FRUIT_ROLL_MAX) < 2 {
            spawn_fruit(commands, tree, pos + slot);
        }
    }
}

fn spawn_fruit(commands: &mut Commands, tree: Entity, pos: Vec2) {
    commands.spawn((
        TreeFruit { tree },
        Sprite {
            color: FRUIT_COLOR,
            custom_size: Some(Vec2::splat(TILE_SIZE * 0.25)),
            ..default()
        },
        Transform::from_translation(pos.extend(depth_z(Layer::Fruit, pos.y))),
        LogicalPosition(pos),
        Layer::Fruit,
    ));
}

/// Apply axe hits: each hit costs one health and shakes a random fruit
/// loose; at zero health the tree collapses into a stump, once.
pub fn handle_axe_hits(
    mut events: EventReader<ToolUseEvent>,
    mut trees: Query<(Entity, &mut Tree, &LogicalPosition, &mut Sprite, &mut Hitbox)>,
    fruit: Query<(Entity, &TreeFruit, &LogicalPosition), Without<Tree>>,
    mut pickups: EventWriter<ItemPickupEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
    mut commands: Commands,
) {
    for event in events.read() {
        if event.tool != ToolKind::Axe {
            continue;
        }
        for (tree_entity, mut tree, pos, mut sprite, mut hitbox) in &mut trees {
            if !tree.alive {
                continue;
            }
            let bounds = Aabb::from_center_size(pos.0, tree.size.sprite_size());
            if !bounds.contains(event.target) {
                continue;
            }

            sfx.send(PlaySfxEvent { sfx_id: "axe".into() });
            tree.health -= 1;

            let hanging: Vec<_> = fruit
                .iter()
                .filter(|(_, f, _)| f.tree == tree_entity)
                .collect();
            if let Some(&(fruit_entity, _, fruit_pos)) =
                hanging.choose(&mut rand::thread_rng())
            {
                commands.entity(fruit_entity).despawn();
                spawn_flash(&mut commands, fruit_pos.0, Layer::Fruit, PARTICLE_DEFAULT_MS);
                pickups.send(ItemPickupEvent { item: ItemKind::Apple });
            }

            if tree.health <= 0 {
                tree.alive = false;
                spawn_flash(&mut commands, pos.0, Layer::Main, STUMP_DISSOLVE_MS);
                let stump_size = Vec2::new(
                    tree.size.sprite_size().x * 0.6,
                    TILE_SIZE * 0.5,
                );
                sprite.color = STUMP_COLOR;
                sprite.custom_size = Some(stump_size);
                hitbox.size = Vec2::new(stump_size.x * 0.8, stump_size.y * 0.6);
                pickups.send(ItemPickupEvent { item: ItemKind::Wood });
            }
        }
    }
}

/// Overnight: drop all remaining fruit and reroll fresh fruit on every
/// living tree.
pub fn respawn_fruit_on_day_end(
    mut events: EventReader<DayEndEvent>,
    trees: Query<(Entity, &Tree, &LogicalPosition)>,
    fruit: Query<Entity, With<TreeFruit>>,
    mut commands: Commands,
) {
    if events.read().next().is_none() {
        return;
    }

    for entity in &fruit {
        commands.entity(entity).despawn();
    }

    let mut rng = rand::thread_rng();
    for (tree_entity, tree, pos) in &trees {
        if !tree.alive {
            continue;
        }
        for &slot in tree.size.fruit_slots() {
            if rng.gen_range(0..=FRUIT_ROLL_MAX) < 2 {
                spawn_fruit(&mut commands, tree_entity, pos.0 + slot);
            }
        }
    }
}

fn spawn_flash(commands: &mut Commands, pos: Vec2, layer: Layer, duration_ms: u64) {
    commands.spawn((
        Particle::new(duration_ms),
        Sprite {
            color: Color::WHITE,
            custom_size: Some(Vec2::splat(TILE_SIZE * 0.5)),
            ..default()
        },
        Transform::from_translation(pos.extend(depth_z(layer, pos.y))),
        LogicalPosition(pos),
        layer,
    ));
}
