//! Headless integration tests for Sproutvale.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems under test, and drive them through the same events
//! the gameplay systems use.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use sproutvale::daynight::{self, SkyTint, SleepFade};
use sproutvale::farming::autotile::SoilVariant;
use sproutvale::farming::plants::{self, Plant};
use sproutvale::farming::render::{self, variant_for};
use sproutvale::farming::soil;
use sproutvale::farming::{SoilGrid, SoilSprite, WaterSprite};
use sproutvale::input::PlayerInput;
use sproutvale::player::interaction::apply_item_pickups;
use sproutvale::player::{tools, PlayerState, PlayerTimers};
use sproutvale::shared::*;
use sproutvale::ui::shop::{self, ShopMenu};
use sproutvale::world::trees::{self, Tree, TreeSize, TREE_HEALTH};

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with the shared resources and events
/// registered but NO rendering, windowing, or asset loading. Systems are
/// added per-test depending on what's being exercised.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    app.init_state::<GameState>();

    app.init_resource::<Inventory>()
        .init_resource::<SleepState>()
        .init_resource::<GearState>()
        .init_resource::<PlayerInput>()
        .insert_resource(RainState { raining: false });

    app.add_event::<ToolUseEvent>()
        .add_event::<PlantSeedEvent>()
        .add_event::<DayEndEvent>()
        .add_event::<ItemPickupEvent>()
        .add_event::<PlaySfxEvent>()
        .add_event::<PlayMusicEvent>();

    app
}

/// A fully farmable `size x size` grid.
fn open_field(size: usize) -> SoilGrid {
    let s = size as i32;
    SoilGrid::new(
        size,
        size,
        (0..s).flat_map(|row| (0..s).map(move |col| (col, row))),
    )
}

fn use_tool(app: &mut App, tool: ToolKind, target: Vec2) {
    app.world_mut().send_event(ToolUseEvent { tool, target });
    app.update();
}

// ─────────────────────────────────────────────────────────────────────────────
// Soil
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hoe_then_water_then_dry_on_isolated_tile() {
    let mut app = build_test_app();
    app.insert_resource(open_field(5));
    app.add_systems(Update, (soil::handle_hoe, soil::handle_watering_can));

    let target = tile_center(2, 2);
    use_tool(&mut app, ToolKind::Hoe, target);

    let grid = app.world().resource::<SoilGrid>();
    assert!(grid.is_tilled(2, 2));
    assert!(!grid.is_watered(target));
    // All four neighbours untilled: the isolated shape.
    assert_eq!(variant_for(grid, 2, 2), SoilVariant::O);
    assert_eq!(variant_for(grid, 2, 2).name(), "o");

    use_tool(&mut app, ToolKind::WateringCan, target);
    let grid = app.world().resource::<SoilGrid>();
    assert!(grid.is_watered(target));

    let mut grid = app.world_mut().resource_mut::<SoilGrid>();
    grid.remove_water();
    assert!(!grid.is_watered(target));
    assert!(grid.invariants_hold());
}

#[test]
fn test_hoe_outside_farmable_ground_is_a_noop() {
    let mut app = build_test_app();
    // Nothing farmable at all.
    app.insert_resource(SoilGrid::new(4, 4, []));
    app.add_systems(Update, soil::handle_hoe);

    use_tool(&mut app, ToolKind::Hoe, tile_center(1, 1));

    let grid = app.world().resource::<SoilGrid>();
    assert_eq!(grid.tilled_tiles().count(), 0);
    assert!(grid.invariants_hold());
}

#[test]
fn test_tilling_during_rain_waters_immediately() {
    let mut app = build_test_app();
    app.insert_resource(open_field(4));
    app.insert_resource(RainState { raining: true });
    app.add_systems(Update, soil::handle_hoe);

    use_tool(&mut app, ToolKind::Hoe, tile_center(1, 1));

    let grid = app.world().resource::<SoilGrid>();
    assert!(grid.is_tilled(1, 1));
    assert!(grid.is_watered_tile(1, 1));
}

#[test]
fn test_rainy_day_end_waters_every_tilled_tile() {
    let mut app = build_test_app();
    app.insert_resource(open_field(4));
    app.insert_resource(RainState { raining: true });
    app.add_systems(Update, soil::handle_day_end);

    {
        let mut grid = app.world_mut().resource_mut::<SoilGrid>();
        grid.till(tile_center(0, 0));
        grid.till(tile_center(2, 3));
        grid.water(tile_center(0, 0));
    }

    app.world_mut().send_event(DayEndEvent);
    app.update();

    let grid = app.world().resource::<SoilGrid>();
    assert!(grid.is_watered_tile(0, 0));
    assert!(grid.is_watered_tile(2, 3));
    assert_eq!(grid.watered_tiles().count(), 2);
}

#[test]
fn test_soil_and_water_sprites_track_the_grid() {
    let mut app = build_test_app();
    app.insert_resource(open_field(3));
    app.add_systems(Update, (soil::handle_hoe, soil::handle_watering_can));
    app.add_systems(
        PostUpdate,
        (render::sync_soil_sprites, render::sync_water_sprites),
    );
    // Consume the grid-insertion change tick.
    app.update();

    let target = Vec2::new(32.0, 32.0);
    use_tool(&mut app, ToolKind::Hoe, target);
    {
        let mut soil_sprites = app.world_mut().query::<&SoilSprite>();
        let sprites: Vec<_> = soil_sprites.iter(app.world()).collect();
        assert_eq!(sprites.len(), 1);
        assert_eq!((sprites[0].col, sprites[0].row), (0, 0));
        assert_eq!(sprites[0].variant, SoilVariant::O);
    }

    use_tool(&mut app, ToolKind::WateringCan, target);
    assert_eq!(
        app.world_mut()
            .query::<&WaterSprite>()
            .iter(app.world())
            .count(),
        1
    );

    app.world_mut().resource_mut::<SoilGrid>().remove_water();
    app.update();
    assert_eq!(
        app.world_mut()
            .query::<&WaterSprite>()
            .iter(app.world())
            .count(),
        0
    );
    // The soil sprite survives drying out.
    assert_eq!(
        app.world_mut()
            .query::<&SoilSprite>()
            .iter(app.world())
            .count(),
        1
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Plants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_seed_debited_only_when_planting_succeeds() {
    let mut app = build_test_app();
    app.insert_resource(open_field(4));
    app.add_systems(Update, plants::handle_plant_seed);

    // Untilled tile: nothing happens, no seed spent.
    app.world_mut().send_event(PlantSeedEvent {
        seed: SeedKind::Corn,
        target: tile_center(1, 1),
    });
    app.update();
    assert_eq!(app.world().resource::<Inventory>().corn_seeds, 5);

    app.world_mut()
        .resource_mut::<SoilGrid>()
        .till(tile_center(1, 1));

    app.world_mut().send_event(PlantSeedEvent {
        seed: SeedKind::Corn,
        target: tile_center(1, 1),
    });
    app.update();
    assert_eq!(app.world().resource::<Inventory>().corn_seeds, 4);

    // Occupied tile: rejected, no second debit.
    app.world_mut().send_event(PlantSeedEvent {
        seed: SeedKind::Corn,
        target: tile_center(1, 1),
    });
    app.update();
    assert_eq!(app.world().resource::<Inventory>().corn_seeds, 4);
    assert_eq!(
        app.world_mut().query::<&Plant>().iter(app.world()).count(),
        1
    );
}

#[test]
fn test_corn_grows_to_harvestable_over_three_watered_nights() {
    let mut app = build_test_app();
    app.insert_resource(open_field(4));
    app.add_systems(Update, plants::handle_plant_seed);
    // Overnight order: growth first, then the water reset.
    app.add_systems(
        PostUpdate,
        (plants::grow_on_day_end, soil::handle_day_end).chain(),
    );

    let target = tile_center(2, 2);
    app.world_mut().resource_mut::<SoilGrid>().till(target);
    app.world_mut()
        .send_event(PlantSeedEvent { seed: SeedKind::Corn, target });
    app.update();

    for night in 1..=3 {
        app.world_mut().resource_mut::<SoilGrid>().water(target);
        app.world_mut().send_event(DayEndEvent);
        app.update();

        let plant = app
            .world_mut()
            .query::<&Plant>()
            .single(app.world());
        assert_eq!(plant.age, night as f32);
        // Water is always gone the next morning.
        assert!(!app.world().resource::<SoilGrid>().is_watered(target));
    }

    let (plant, layer) = app
        .world_mut()
        .query::<(&Plant, &Layer)>()
        .single(app.world());
    assert!(plant.harvestable);
    assert_eq!(plant.age, SeedKind::Corn.max_age());
    assert_eq!(*layer, Layer::Main);

    // Extra watered nights cannot push the age past the clamp.
    app.world_mut().resource_mut::<SoilGrid>().water(target);
    app.world_mut().send_event(DayEndEvent);
    app.update();
    let plant = app.world_mut().query::<&Plant>().single(app.world());
    assert_eq!(plant.age, SeedKind::Corn.max_age());
}

#[test]
fn test_plant_on_dry_soil_never_ages() {
    let mut app = build_test_app();
    app.insert_resource(open_field(4));
    app.add_systems(Update, plants::handle_plant_seed);
    app.add_systems(
        PostUpdate,
        (plants::grow_on_day_end, soil::handle_day_end).chain(),
    );

    let target = tile_center(1, 2);
    app.world_mut().resource_mut::<SoilGrid>().till(target);
    app.world_mut()
        .send_event(PlantSeedEvent { seed: SeedKind::Tomato, target });
    app.update();

    for _ in 0..10 {
        app.world_mut().send_event(DayEndEvent);
        app.update();
    }

    let (plant, layer) = app
        .world_mut()
        .query::<(&Plant, &Layer)>()
        .single(app.world());
    assert_eq!(plant.age, 0.0);
    assert!(!plant.harvestable);
    assert_eq!(*layer, Layer::GroundPlant);
}

#[test]
fn test_walk_over_harvest_collects_crop_and_frees_tile() {
    let mut app = build_test_app();
    app.insert_resource(open_field(4));
    app.add_systems(Update, (plants::harvest_collision, apply_item_pickups).chain());

    let target = tile_center(2, 1);
    {
        let mut grid = app.world_mut().resource_mut::<SoilGrid>();
        grid.till(target);
        grid.plant(target);
    }

    let mut plant = Plant::new(SeedKind::Corn, (2, 1));
    plant.age = SeedKind::Corn.max_age();
    plant.harvestable = true;
    app.world_mut().spawn((
        plant,
        Sprite {
            custom_size: Some(Vec2::splat(TILE_SIZE)),
            ..default()
        },
        LogicalPosition(target),
        Layer::Main,
    ));
    app.world_mut().spawn((
        Player,
        LogicalPosition(target),
        Hitbox::new(PLAYER_HITBOX),
    ));

    let corn_before = app.world().resource::<Inventory>().corn;
    app.update();

    assert_eq!(app.world().resource::<Inventory>().corn, corn_before + 1);
    assert_eq!(
        app.world_mut().query::<&Plant>().iter(app.world()).count(),
        0
    );
    // The tile accepts a new plant again.
    assert!(app
        .world_mut()
        .resource_mut::<SoilGrid>()
        .plant(target)
        .is_some());
}

// ─────────────────────────────────────────────────────────────────────────────
// Tool actions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_switching_mid_swing_is_ignored_and_the_swing_keeps_its_tool() {
    let mut app = build_test_app();
    // Deterministic 100 ms frames.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
        100,
    )));
    app.insert_resource(open_field(3));
    app.add_systems(Update, (tools::handle_actions, soil::handle_hoe).chain());

    // Facing down by default: the tool lands one tile south, on (1, 0).
    app.world_mut().spawn((
        Player,
        LogicalPosition(tile_center(1, 1)),
        Hitbox::new(PLAYER_HITBOX),
        PlayerState::default(),
        PlayerTimers::default(),
    ));

    // Start a hoe swing.
    app.world_mut().resource_mut::<PlayerInput>().tool_use = true;
    app.update();
    app.world_mut().resource_mut::<PlayerInput>().tool_use = false;

    // Mid-swing, mash the switch and seed keys.
    {
        let mut input = app.world_mut().resource_mut::<PlayerInput>();
        input.tool_switch = true;
        input.seed_use = true;
    }
    app.update();
    app.update();
    {
        let mut input = app.world_mut().resource_mut::<PlayerInput>();
        input.tool_switch = false;
        input.seed_use = false;
    }

    // Let the swing expire.
    for _ in 0..5 {
        app.update();
    }

    // Still a hoe, and the hoe is what landed.
    assert_eq!(app.world().resource::<GearState>().tool_index, 0);
    assert!(app.world().resource::<SoilGrid>().is_tilled(1, 0));
    // The seed key never armed its timer mid-swing.
    let timers = app
        .world_mut()
        .query::<&PlayerTimers>()
        .single(app.world());
    assert!(!timers.seed_use.is_active());
    assert!(!timers.tool_use.is_active());
}

// ─────────────────────────────────────────────────────────────────────────────
// Trees
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_five_axe_hits_fell_a_tree_exactly_once() {
    let mut app = build_test_app();
    app.add_systems(Update, (trees::handle_axe_hits, apply_item_pickups).chain());

    let pos = Vec2::new(320.0, 320.0);
    app.world_mut().spawn((
        Tree::new(TreeSize::Large),
        Sprite {
            custom_size: Some(TreeSize::Large.sprite_size()),
            ..default()
        },
        LogicalPosition(pos),
        Layer::Main,
        Hitbox::new(Vec2::splat(TILE_SIZE)),
    ));

    let wood_before = app.world().resource::<Inventory>().wood;
    for _ in 0..TREE_HEALTH {
        use_tool(&mut app, ToolKind::Axe, pos);
    }

    let tree = app.world_mut().query::<&Tree>().single(app.world());
    assert!(!tree.alive);
    assert_eq!(
        app.world().resource::<Inventory>().wood,
        wood_before + 1,
        "felling pays out wood exactly once"
    );

    // Further hits on the stump pay nothing.
    for _ in 0..3 {
        use_tool(&mut app, ToolKind::Axe, pos);
    }
    assert_eq!(app.world().resource::<Inventory>().wood, wood_before + 1);
    let tree = app.world_mut().query::<&Tree>().single(app.world());
    assert_eq!(tree.health, 0);
}

#[test]
fn test_axe_misses_do_not_damage() {
    let mut app = build_test_app();
    app.add_systems(Update, trees::handle_axe_hits);

    let pos = Vec2::new(320.0, 320.0);
    app.world_mut().spawn((
        Tree::new(TreeSize::Small),
        Sprite {
            custom_size: Some(TreeSize::Small.sprite_size()),
            ..default()
        },
        LogicalPosition(pos),
        Layer::Main,
        Hitbox::new(Vec2::splat(TILE_SIZE)),
    ));

    // Several tiles away.
    use_tool(&mut app, ToolKind::Axe, pos + Vec2::splat(300.0));

    let tree = app.world_mut().query::<&Tree>().single(app.world());
    assert_eq!(tree.health, TREE_HEALTH);
}

// ─────────────────────────────────────────────────────────────────────────────
// Sleep / day-end
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Resource, Default)]
struct DayEndCounter(usize);

fn count_day_ends(mut events: EventReader<DayEndEvent>, mut counter: ResMut<DayEndCounter>) {
    counter.0 += events.read().count();
}

#[test]
fn test_sleep_fade_fires_one_day_end_and_wakes_the_player() {
    let mut app = build_test_app();
    // Deterministic 100 ms frames.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
        100,
    )));
    app.init_resource::<SleepFade>();
    app.insert_resource(SkyTint { progress: 0.7 });
    app.init_resource::<DayEndCounter>();
    app.add_systems(
        Update,
        (
            daynight::advance_sleep_transition,
            count_day_ends,
            daynight::reset_sky_on_day_end,
        )
            .chain(),
    );

    app.world_mut().resource_mut::<SleepState>().sleeping = true;

    // Fade out: 2 s to full black at 0.5/s.
    for _ in 0..25 {
        app.update();
    }
    assert_eq!(app.world().resource::<DayEndCounter>().0, 1);
    assert_eq!(app.world().resource::<SkyTint>().progress, 0.0);
    assert!(app.world().resource::<SleepState>().sleeping);

    // Fade back in: the player wakes, and no second day end fires.
    for _ in 0..25 {
        app.update();
    }
    assert!(!app.world().resource::<SleepState>().sleeping);
    assert_eq!(app.world().resource::<DayEndCounter>().0, 1);
    assert_eq!(app.world().resource::<SleepFade>().value, 0.0);
}

#[test]
fn test_overnight_growth_sees_yesterdays_water() {
    let mut app = build_test_app();
    app.insert_resource(open_field(4));
    app.add_systems(Update, plants::handle_plant_seed);
    // The production ordering: grow before the water reset.
    app.add_systems(
        PostUpdate,
        (plants::grow_on_day_end, soil::handle_day_end).chain(),
    );

    let target = tile_center(0, 0);
    {
        let mut grid = app.world_mut().resource_mut::<SoilGrid>();
        grid.till(target);
        grid.water(target);
    }
    app.world_mut()
        .send_event(PlantSeedEvent { seed: SeedKind::Corn, target });
    app.update();

    app.world_mut().send_event(DayEndEvent);
    app.update();

    // Grew from the water that was present when the day ended, even though
    // the same overnight pass removed it.
    let plant = app.world_mut().query::<&Plant>().single(app.world());
    assert_eq!(plant.age, 1.0);
    assert!(!app.world().resource::<SoilGrid>().is_watered(target));
}

// ─────────────────────────────────────────────────────────────────────────────
// Weather
// ─────────────────────────────────────────────────────────────────────────────

fn rain_particle_count(app: &mut App) -> usize {
    app.world_mut()
        .query::<&Layer>()
        .iter(app.world())
        .filter(|&&layer| matches!(layer, Layer::RainDrops | Layer::RainFloor))
        .count()
}

#[test]
fn test_no_rain_falls_while_the_shop_is_open() {
    let mut app = build_test_app();
    app.insert_resource(MapBounds { size: Vec2::new(640.0, 640.0) });
    app.add_plugins(daynight::DayNightPlugin);
    // Override whatever the plugin rolled for day one.
    app.insert_resource(RainState { raining: true });

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Shop);
    for _ in 0..4 {
        app.update();
    }
    assert_eq!(rain_particle_count(&mut app), 0);

    // Closing the shop lets the rain resume.
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    for _ in 0..4 {
        app.update();
    }
    assert!(rain_particle_count(&mut app) > 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Shop
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_shop_select_sells_and_buys() {
    let mut app = build_test_app();
    app.init_resource::<ShopMenu>();
    app.add_systems(Update, shop::select);

    // Row 0 sells wood.
    app.world_mut().resource_mut::<PlayerInput>().menu_select = true;
    app.update();
    {
        let inv = app.world().resource::<Inventory>();
        assert_eq!(inv.wood, 9);
        assert_eq!(inv.money, 204);
    }

    // Move to the corn-seed row and buy.
    app.world_mut().resource_mut::<ShopMenu>().index = SELLABLE.len();
    app.update();
    {
        let inv = app.world().resource::<Inventory>();
        assert_eq!(inv.corn_seeds, 6);
        assert_eq!(inv.money, 200);
    }

    // Releasing the key stops transacting.
    app.world_mut().resource_mut::<PlayerInput>().menu_select = false;
    app.update();
    assert_eq!(app.world().resource::<Inventory>().corn_seeds, 6);
}
