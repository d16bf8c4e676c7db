//! Farming domain — soil tilling, watering, planting, growth, harvest.
//!
//! The authoritative state is the `SoilGrid` resource; soil, water-overlay,
//! and plant entities are visuals kept in sync with it. Communicates with
//! other domains exclusively through crate::shared events/resources.

use bevy::prelude::*;

use crate::shared::*;

pub mod autotile;
pub mod grid;
pub mod plants;
pub mod render;
pub mod soil;

pub use grid::SoilGrid;

/// Visual for one tilled cell. Rebuilt in bulk whenever the grid changes;
/// `variant` is the autotile shape chosen from the neighbour pattern.
#[derive(Component, Debug, Clone)]
pub struct SoilSprite {
    pub col: i32,
    pub row: i32,
    pub variant: autotile::SoilVariant,
}

/// Water overlay on a watered cell. `variant` picks one of the overlay
/// sprites at random when the tile is first watered.
#[derive(Component, Debug, Clone)]
pub struct WaterSprite {
    pub col: i32,
    pub row: i32,
    pub variant: usize,
}

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        // The world plugin publishes the farm layout when it loads the map;
        // this plugin must be added after it.
        let layout = app
            .world()
            .get_resource::<FarmLayout>()
            .unwrap_or_else(|| panic!("FarmingPlugin requires the map to be loaded first"))
            .clone();
        app.insert_resource(SoilGrid::new(
            layout.width,
            layout.height,
            layout.farmable,
        ));

        app.add_systems(
            Update,
            (
                soil::handle_hoe,
                soil::handle_watering_can,
                plants::handle_plant_seed,
                plants::harvest_collision,
            )
                .run_if(in_state(GameState::Playing)),
        )
        // Visual sync runs after all state mutations.
        .add_systems(
            PostUpdate,
            (render::sync_soil_sprites, render::sync_water_sprites),
        );
    }
}
