//! Visual sync for soil and water-overlay sprites.
//!
//! Soil visuals are regenerated for the whole grid whenever it changes —
//! the autotile recompute is global, not local, trading efficiency for
//! obvious correctness at the grid sizes this game uses. Water overlays
//! sync incrementally so a tile keeps its randomly chosen variant while it
//! stays wet.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;
use super::{autotile, SoilGrid, SoilSprite, WaterSprite};

const SOIL_COLOR: Color = Color::srgb(0.45, 0.32, 0.2);

/// Water overlay placeholder shades; one is picked at random per tile.
pub const WATER_OVERLAY_COLORS: [Color; 3] = [
    Color::srgba(0.25, 0.4, 0.8, 0.55),
    Color::srgba(0.2, 0.45, 0.85, 0.5),
    Color::srgba(0.3, 0.5, 0.9, 0.45),
];

/// Compute the autotile variant for a tilled tile from the grid.
/// "Top" is the tile visually above (north, larger row).
pub fn variant_for(soil_grid: &SoilGrid, col: i32, row: i32) -> autotile::SoilVariant {
    autotile::select_variant(
        soil_grid.is_tilled(col, row + 1),
        soil_grid.is_tilled(col + 1, row),
        soil_grid.is_tilled(col, row - 1),
        soil_grid.is_tilled(col - 1, row),
    )
}

/// Despawn and respawn every soil sprite from the grid state.
pub fn sync_soil_sprites(
    soil_grid: Res<SoilGrid>,
    existing: Query<Entity, With<SoilSprite>>,
    mut commands: Commands,
) {
    if !soil_grid.is_changed() {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    for (col, row) in soil_grid.tilled_tiles() {
        let variant = variant_for(&soil_grid, col, row);
        let pos = tile_center(col, row);
        commands.spawn((
            Sprite {
                color: SOIL_COLOR,
                custom_size: Some(Vec2::splat(TILE_SIZE)),
                ..default()
            },
            Transform::from_translation(pos.extend(depth_z(Layer::Soil, pos.y))),
            LogicalPosition(pos),
            Layer::Soil,
            SoilSprite { col, row, variant },
        ));
    }
}

/// Spawn overlays for newly watered tiles, despawn overlays whose tile has
/// dried out (day reset).
pub fn sync_water_sprites(
    soil_grid: Res<SoilGrid>,
    existing: Query<(Entity, &WaterSprite)>,
    mut commands: Commands,
) {
    if !soil_grid.is_changed() {
        return;
    }

    let watered: std::collections::HashSet<(i32, i32)> = soil_grid.watered_tiles().collect();

    let mut covered = std::collections::HashSet::new();
    for (entity, sprite) in &existing {
        if watered.contains(&(sprite.col, sprite.row)) {
            covered.insert((sprite.col, sprite.row));
        } else {
            commands.entity(entity).despawn();
        }
    }

    let mut rng = rand::thread_rng();
    for &(col, row) in watered.difference(&covered) {
        let variant = rng.gen_range(0..WATER_OVERLAY_COLORS.len());
        let pos = tile_center(col, row);
        commands.spawn((
            Sprite {
                color: WATER_OVERLAY_COLORS[variant],
                custom_size: Some(Vec2::splat(TILE_SIZE)),
                ..default()
            },
            Transform::from_translation(pos.extend(depth_z(Layer::SoilWater, pos.y))),
            LogicalPosition(pos),
            Layer::SoilWater,
            WaterSprite { col, row, variant },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_reads_neighbours_with_edge_policy() {
        // Two tilled tiles side by side in a 2x1 farmable grid; out-of-bounds
        // neighbours read as untilled.
        let mut grid = SoilGrid::new(2, 1, [(0, 0), (1, 0)]);
        grid.till(tile_center(0, 0));
        grid.till(tile_center(1, 0));
        assert_eq!(variant_for(&grid, 0, 0), autotile::SoilVariant::L);
        assert_eq!(variant_for(&grid, 1, 0), autotile::SoilVariant::R);
    }

    #[test]
    fn test_variant_is_position_independent() {
        // The same neighbour pattern yields the same shape anywhere.
        let mut a = SoilGrid::new(5, 5, (0..5).flat_map(|r| (0..5).map(move |c| (c, r))));
        a.till(tile_center(1, 1));
        a.till(tile_center(1, 2));
        let mut b = SoilGrid::new(5, 5, (0..5).flat_map(|r| (0..5).map(move |c| (c, r))));
        b.till(tile_center(3, 2));
        b.till(tile_center(3, 3));
        assert_eq!(variant_for(&a, 1, 1), variant_for(&b, 3, 2));
        assert_eq!(variant_for(&a, 1, 2), variant_for(&b, 3, 3));
    }
}
