//! World domain: map loading, static scenery, trees, water, particles, and
//! the depth compositor.

use bevy::prelude::*;

use crate::shared::*;

pub mod map;
pub mod sprites;
pub mod trees;
pub mod ysort;

use map::{FarmMap, MapCell};

const FARM_MAP_RON: &str = include_str!("../../assets/maps/farm.ron");

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        // The map is baked into the binary; a broken map is a build defect,
        // so fail loudly before any system runs.
        let map = FarmMap::parse(FARM_MAP_RON)
            .unwrap_or_else(|e| panic!("failed to load farm map: {e}"));

        app.insert_resource(MapBounds { size: map.pixel_size() })
            .insert_resource(PlayerSpawn(map.player_start_world()))
            .insert_resource(FarmLayout {
                width: map.width(),
                height: map.height(),
                farmable: map.farmable_tiles().collect(),
            })
            .insert_resource(map)
            .add_systems(Startup, spawn_world)
            .add_systems(
                Update,
                (sprites::animate_water, sprites::tick_particles)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                trees::handle_axe_hits.run_if(in_state(GameState::Playing)),
            )
            .add_systems(PostUpdate, ysort::sync_transforms);
    }
}

const GRASS_COLOR: Color = Color::srgb(0.35, 0.6, 0.3);
const FENCE_COLOR: Color = Color::srgb(0.55, 0.4, 0.25);
const FLOOR_COLOR: Color = Color::srgb(0.6, 0.5, 0.35);
const WALL_COLOR: Color = Color::srgb(0.5, 0.35, 0.3);
const BED_COLOR: Color = Color::srgb(0.7, 0.25, 0.3);
const TRADER_COLOR: Color = Color::srgb(0.3, 0.3, 0.6);

fn spawn_world(farm_map: Res<FarmMap>, mut commands: Commands) {
    info!(
        "spawning farm map: {}x{} tiles",
        farm_map.width(),
        farm_map.height()
    );

    // One ground quad under everything.
    let size = farm_map.pixel_size();
    let center = size / 2.0;
    commands.spawn((
        Sprite {
            color: GRASS_COLOR,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center.extend(depth_z(Layer::Ground, center.y))),
        LogicalPosition(center),
        Layer::Ground,
    ));

    for (col, row, cell) in farm_map.tiles() {
        let pos = tile_center(col, row);

        // Full-tile collision for the static obstacle cells (the map
        // border stays invisible; trees carry their own trunk hitboxes).
        if cell.blocks_movement() {
            commands.spawn((
                LogicalPosition(pos),
                Hitbox::new(Vec2::splat(TILE_SIZE)),
            ));
        }

        match cell {
            MapCell::Grass | MapCell::Farmable | MapCell::PlayerStart | MapCell::Border => {}
            MapCell::Water => sprites::spawn_water_tile(&mut commands, pos),
            MapCell::Wildflower => sprites::spawn_wildflower(&mut commands, pos),
            MapCell::TreeLarge => trees::spawn_tree(&mut commands, pos, trees::TreeSize::Large),
            MapCell::TreeSmall => trees::spawn_tree(&mut commands, pos, trees::TreeSize::Small),
            MapCell::Fence => {
                spawn_tile_sprite(&mut commands, pos, FENCE_COLOR, TILE_SIZE * 0.9, Layer::Main);
            }
            MapCell::HouseFloor => {
                spawn_tile_sprite(&mut commands, pos, FLOOR_COLOR, TILE_SIZE, Layer::HouseBottom);
            }
            MapCell::HouseWall => {
                // Walls live in the top band so the player walks behind them.
                spawn_tile_sprite(&mut commands, pos, WALL_COLOR, TILE_SIZE, Layer::HouseTop);
            }
            MapCell::Bed => {
                spawn_tile_sprite(&mut commands, pos, FLOOR_COLOR, TILE_SIZE, Layer::HouseBottom);
                spawn_tile_sprite(&mut commands, pos, BED_COLOR, TILE_SIZE * 0.8, Layer::Main);
                commands.spawn((
                    InteractionZone::Bed,
                    LogicalPosition(pos),
                    Hitbox::new(Vec2::splat(TILE_SIZE * 1.4)),
                ));
            }
            MapCell::Trader => {
                spawn_tile_sprite(&mut commands, pos, TRADER_COLOR, TILE_SIZE * 0.7, Layer::Main);
                commands.spawn((
                    InteractionZone::Trader,
                    LogicalPosition(pos),
                    Hitbox::new(Vec2::splat(TILE_SIZE * 1.4)),
                ));
            }
        }
    }
}

fn spawn_tile_sprite(commands: &mut Commands, pos: Vec2, color: Color, size: f32, layer: Layer) {
    commands.spawn((
        Sprite {
            color,
            custom_size: Some(Vec2::splat(size)),
            ..default()
        },
        Transform::from_translation(pos.extend(depth_z(layer, pos.y))),
        LogicalPosition(pos),
        layer,
    ));
}
