//! Map loading.
//!
//! The farm layout ships as a RON character grid (`assets/maps/farm.ron`),
//! compiled into the binary. Row 0 of the file is the north edge; rows are
//! flipped on load so world row 0 sits at the south edge, matching the y-up
//! coordinate system everywhere else.

use std::fmt;

use bevy::prelude::*;
use serde::Deserialize;

use crate::shared::{tile_center, TILE_SIZE};

/// On-disk map shape, straight out of RON.
#[derive(Deserialize, Debug)]
pub struct MapSource {
    pub rows: Vec<String>,
}

/// What occupies a map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCell {
    Grass,
    Farmable,
    Water,
    Fence,
    HouseFloor,
    HouseWall,
    Border,
    Wildflower,
    TreeLarge,
    TreeSmall,
    PlayerStart,
    Bed,
    Trader,
}

impl MapCell {
    fn from_char(c: char) -> Option<MapCell> {
        Some(match c {
            '.' => MapCell::Grass,
            'F' => MapCell::Farmable,
            'W' => MapCell::Water,
            'f' => MapCell::Fence,
            'h' => MapCell::HouseFloor,
            'H' => MapCell::HouseWall,
            'x' => MapCell::Border,
            'd' => MapCell::Wildflower,
            'T' => MapCell::TreeLarge,
            't' => MapCell::TreeSmall,
            'P' => MapCell::PlayerStart,
            'B' => MapCell::Bed,
            'M' => MapCell::Trader,
            _ => return None,
        })
    }

    /// Static obstacles get a full-tile collision box at spawn.
    pub fn blocks_movement(self) -> bool {
        matches!(
            self,
            MapCell::Water | MapCell::Fence | MapCell::HouseWall | MapCell::Border
        )
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MapError {
    Syntax(String),
    Empty,
    RaggedRow { row: usize, expected: usize, found: usize },
    UnknownChar { row: usize, col: usize, found: char },
    PlayerStartCount(usize),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Syntax(e) => write!(f, "map file is not valid RON: {e}"),
            MapError::Empty => write!(f, "map has no rows"),
            MapError::RaggedRow { row, expected, found } => {
                write!(f, "row {row} has {found} tiles, expected {expected}")
            }
            MapError::UnknownChar { row, col, found } => {
                write!(f, "unknown map character {found:?} at row {row}, col {col}")
            }
            MapError::PlayerStartCount(n) => {
                write!(f, "map must contain exactly one player start, found {n}")
            }
        }
    }
}

impl std::error::Error for MapError {}

/// Parsed, validated map. Cells are row-major with row 0 at the south edge.
#[derive(Resource, Debug)]
pub struct FarmMap {
    width: usize,
    height: usize,
    cells: Vec<MapCell>,
    player_start: (i32, i32),
}

impl FarmMap {
    pub fn parse(text: &str) -> Result<FarmMap, MapError> {
        let source: MapSource =
            ron::from_str(text).map_err(|e| MapError::Syntax(e.to_string()))?;
        Self::build(source)
    }

    pub fn build(source: MapSource) -> Result<FarmMap, MapError> {
        if source.rows.is_empty() {
            return Err(MapError::Empty);
        }
        let height = source.rows.len();
        let width = source.rows[0].chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = vec![MapCell::Grass; width * height];
        let mut player_starts = Vec::new();

        for (file_row, line) in source.rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::RaggedRow { row: file_row, expected: width, found });
            }
            // File row 0 is the north edge; world rows count from the south.
            let row = height - 1 - file_row;
            for (col, c) in line.chars().enumerate() {
                let cell = MapCell::from_char(c).ok_or(MapError::UnknownChar {
                    row: file_row,
                    col,
                    found: c,
                })?;
                if cell == MapCell::PlayerStart {
                    player_starts.push((col as i32, row as i32));
                }
                cells[row * width + col] = cell;
            }
        }

        if player_starts.len() != 1 {
            return Err(MapError::PlayerStartCount(player_starts.len()));
        }

        Ok(FarmMap { width, height, cells, player_start: player_starts[0] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, col: i32, row: i32) -> Option<MapCell> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some(self.cells[row as usize * self.width + col as usize])
    }

    /// All tiles, as `(col, row, cell)` triples.
    pub fn tiles(&self) -> impl Iterator<Item = (i32, i32, MapCell)> + '_ {
        let width = self.width as i32;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i as i32 % width, i as i32 / width, cell))
    }

    /// Tiles the hoe can work, fed to the soil grid at startup.
    pub fn farmable_tiles(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.tiles()
            .filter(|&(_, _, cell)| cell == MapCell::Farmable)
            .map(|(col, row, _)| (col, row))
    }

    pub fn player_start_world(&self) -> Vec2 {
        tile_center(self.player_start.0, self.player_start.1)
    }

    /// World-space size of the whole map, for the ground quad.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32 * TILE_SIZE, self.height as f32 * TILE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(rows: &[&str]) -> MapSource {
        MapSource { rows: rows.iter().map(|s| s.to_string()).collect() }
    }

    #[test]
    fn test_rows_flip_to_south_origin() {
        let map = FarmMap::build(source(&[
            "tt.", // north edge
            "F.W",
            "P..", // south edge
        ]))
        .unwrap();
        assert_eq!(map.cell(0, 0), Some(MapCell::PlayerStart));
        assert_eq!(map.cell(0, 1), Some(MapCell::Farmable));
        assert_eq!(map.cell(2, 1), Some(MapCell::Water));
        assert_eq!(map.cell(0, 2), Some(MapCell::TreeSmall));
        assert_eq!(map.player_start_world(), tile_center(0, 0));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = FarmMap::build(source(&["...", ".."])).unwrap_err();
        assert_eq!(err, MapError::RaggedRow { row: 1, expected: 3, found: 2 });
    }

    #[test]
    fn test_rejects_unknown_char() {
        let err = FarmMap::build(source(&["..", ".z"])).unwrap_err();
        assert!(matches!(err, MapError::UnknownChar { found: 'z', .. }));
    }

    #[test]
    fn test_requires_exactly_one_player_start() {
        assert_eq!(
            FarmMap::build(source(&["..", ".."])).unwrap_err(),
            MapError::PlayerStartCount(0)
        );
        assert_eq!(
            FarmMap::build(source(&["P.", ".P"])).unwrap_err(),
            MapError::PlayerStartCount(2)
        );
    }

    #[test]
    fn test_blocking_cells_are_exactly_the_static_obstacles() {
        for cell in [MapCell::Water, MapCell::Fence, MapCell::HouseWall, MapCell::Border] {
            assert!(cell.blocks_movement(), "{cell:?} should block");
        }
        for cell in [
            MapCell::Grass,
            MapCell::Farmable,
            MapCell::HouseFloor,
            MapCell::Wildflower,
            MapCell::TreeLarge,
            MapCell::TreeSmall,
            MapCell::PlayerStart,
            MapCell::Bed,
            MapCell::Trader,
        ] {
            assert!(!cell.blocks_movement(), "{cell:?} should not block");
        }
    }

    #[test]
    fn test_parses_ron_wrapper() {
        let map = FarmMap::parse(r#"(rows: ["..", "P."])"#).unwrap();
        assert_eq!(map.width(), 2);
        assert_eq!(map.height(), 2);
        assert_eq!(map.cell(0, 0), Some(MapCell::PlayerStart));
    }

    #[test]
    fn test_shipped_map_is_valid() {
        let map = FarmMap::parse(include_str!("../../assets/maps/farm.ron")).unwrap();
        assert!(map.farmable_tiles().count() > 0);
    }
}
