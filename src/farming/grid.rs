//! The soil grid — per-tile state and the operations the tools drive.
//!
//! Pure data and logic; no Bevy systems here. The grid is created once from
//! the map's farmable layer and never resized. All lookups are bound-checked:
//! an out-of-bounds tile reads as "not farmable / not tilled / not watered"
//! so neighbour queries at the map edge can never fail.

use bevy::prelude::*;

use crate::shared::{tile_at, tile_center};

/// One grid cell. The flag mutators enforce the tag hierarchy by
/// construction: `watered` and `planted` require `tilled`, `tilled`
/// requires `farmable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoilCell {
    farmable: bool,
    tilled: bool,
    watered: bool,
    planted: bool,
}

impl SoilCell {
    pub fn is_farmable(&self) -> bool {
        self.farmable
    }

    pub fn is_tilled(&self) -> bool {
        self.tilled
    }

    pub fn is_watered(&self) -> bool {
        self.watered
    }

    pub fn is_planted(&self) -> bool {
        self.planted
    }

    /// Till this cell. Returns true only on the farmable → tilled transition.
    fn till(&mut self) -> bool {
        if self.farmable && !self.tilled {
            self.tilled = true;
            return true;
        }
        false
    }

    /// Water this cell. Returns true only on the tilled → watered transition.
    fn water(&mut self) -> bool {
        if self.tilled && !self.watered {
            self.watered = true;
            return true;
        }
        false
    }

    /// Mark a plant on this cell. Returns true only if tilled and empty.
    fn plant(&mut self) -> bool {
        if self.tilled && !self.planted {
            self.planted = true;
            return true;
        }
        false
    }
}

/// Fixed-size soil grid, indexed by `(col, row)` with row 0 at the map's
/// south edge (world y grows northward).
#[derive(Resource, Debug, Clone)]
pub struct SoilGrid {
    width: usize,
    height: usize,
    cells: Vec<SoilCell>,
}

impl SoilGrid {
    /// Build a grid of `width × height` cells, marking `farmable` tiles.
    /// Farmable positions outside the grid are ignored.
    pub fn new(
        width: usize,
        height: usize,
        farmable: impl IntoIterator<Item = (i32, i32)>,
    ) -> Self {
        let mut grid = Self {
            width,
            height,
            cells: vec![SoilCell::default(); width * height],
        };
        for (col, row) in farmable {
            if let Some(index) = grid.index(col, row) {
                grid.cells[index].farmable = true;
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    pub fn cell(&self, col: i32, row: i32) -> Option<&SoilCell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    /// Out-of-bounds reads as untilled — the autotile edge policy.
    pub fn is_tilled(&self, col: i32, row: i32) -> bool {
        self.cell(col, row).is_some_and(|c| c.is_tilled())
    }

    pub fn is_watered_tile(&self, col: i32, row: i32) -> bool {
        self.cell(col, row).is_some_and(|c| c.is_watered())
    }

    /// Pure point query used by growth logic. Out-of-bounds is dry.
    pub fn is_watered(&self, point: Vec2) -> bool {
        let (col, row) = tile_at(point);
        self.is_watered_tile(col, row)
    }

    /// Till the tile under `point`. Returns its coordinate when a new tile
    /// was tilled, None when the cell was not farmable or already tilled.
    pub fn till(&mut self, point: Vec2) -> Option<(i32, i32)> {
        let (col, row) = tile_at(point);
        let index = self.index(col, row)?;
        self.cells[index].till().then_some((col, row))
    }

    /// Whether the tile under `point` is farmable (the hoe plays its sound
    /// on any farmable hit, even one that tills nothing new).
    pub fn is_farmable_at(&self, point: Vec2) -> bool {
        let (col, row) = tile_at(point);
        self.cell(col, row).is_some_and(|c| c.is_farmable())
    }

    /// Water the tilled tile under `point`. Returns its coordinate on the
    /// dry → watered transition.
    pub fn water(&mut self, point: Vec2) -> Option<(i32, i32)> {
        let (col, row) = tile_at(point);
        let index = self.index(col, row)?;
        self.cells[index].water().then_some((col, row))
    }

    /// Water every tilled, dry cell (rain). Returns the newly watered tiles.
    pub fn water_all(&mut self) -> Vec<(i32, i32)> {
        let width = self.width;
        let mut newly = Vec::new();
        for (i, cell) in self.cells.iter_mut().enumerate() {
            if cell.water() {
                newly.push(((i % width) as i32, (i / width) as i32));
            }
        }
        newly
    }

    /// Clear the watered flag everywhere. Invoked once per day reset.
    pub fn remove_water(&mut self) {
        for cell in &mut self.cells {
            cell.watered = false;
        }
    }

    /// Mark a plant on the tilled tile under `point`. Returns its coordinate
    /// when planting is allowed (tilled and not already planted).
    pub fn plant(&mut self, point: Vec2) -> Option<(i32, i32)> {
        let (col, row) = tile_at(point);
        let index = self.index(col, row)?;
        self.cells[index].plant().then_some((col, row))
    }

    /// Remove the planted mark after harvest or plant destruction.
    pub fn clear_planted(&mut self, col: i32, row: i32) {
        if let Some(index) = self.index(col, row) {
            self.cells[index].planted = false;
        }
    }

    /// All tilled tile coordinates, row-major.
    pub fn tilled_tiles(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.iter_coords().filter(|&(c, r)| self.is_tilled(c, r))
    }

    /// All watered tile coordinates, row-major.
    pub fn watered_tiles(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.iter_coords().filter(|&(c, r)| self.is_watered_tile(c, r))
    }

    fn iter_coords(&self) -> impl Iterator<Item = (i32, i32)> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |row| (0..w).map(move |col| (col, row)))
    }

    /// The tag hierarchy: watered or planted ⇒ tilled ⇒ farmable.
    /// Should hold after any operation sequence; exercised by tests.
    pub fn invariants_hold(&self) -> bool {
        self.cells.iter().all(|c| {
            (!c.watered || c.tilled) && (!c.planted || c.tilled) && (!c.tilled || c.farmable)
        })
    }
}

/// World-space center of a grid tile (re-exported convenience).
pub fn grid_tile_center(col: i32, row: i32) -> Vec2 {
    tile_center(col, row)
}
