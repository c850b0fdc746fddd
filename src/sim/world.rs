//! Tile geometry for the platformer
//!
//! Levels are authored as ASCII rows:
//! - `#` solid tile
//! - `E` enemy spawn (empty tile)
//! - `S` spike spawn (empty tile)
//! - anything else is empty

use glam::Vec2;
use thiserror::Error;

use crate::consts::TILE_SIZE;

/// Point-in-solid query shared by every tile-backed world
pub trait TileWorld {
    fn is_solid(&self, x: f32, y: f32) -> bool;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level map has no rows")]
    Empty,
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// The built-in platformer level
pub const LEVEL_MAP: [&str; 15] = [
    "###############################################################################",
    "#                                                                             #",
    "#                                                                              ",
    "#                                                                              ",
    "#                                                                             #",
    "#                                                                            ##",
    "#                     #                                                      S#",
    "#                 ##                                                        ###",
    "#           ###SSS                             E       S                S     #",
    "#          #   ###                         ###### S  #####              ##    #",
    "#                        E                ##    ####     ##                   #",
    "#      ##               ####            ###                ###              ###",
    "#    #####        ####           SS           S      E S     ##     SS        #",
    "########################   ####################################################",
    "###############################################################################",
];

/// Static platformer level
#[derive(Debug, Clone)]
pub struct Level {
    width: usize,
    height: usize,
    solid: Vec<bool>,
    enemy_spawns: Vec<Vec2>,
    spike_spawns: Vec<Vec2>,
}

impl Level {
    /// Parse an ASCII map. All rows must have the same width.
    pub fn parse(rows: &[&str]) -> Result<Self, LevelError> {
        let width = rows.first().ok_or(LevelError::Empty)?.chars().count();
        let height = rows.len();
        let mut solid = Vec::with_capacity(width * height);
        let mut enemy_spawns = Vec::new();
        let mut spike_spawns = Vec::new();

        for (ty, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow {
                    row: ty,
                    expected: width,
                    found,
                });
            }
            for (tx, ch) in row.chars().enumerate() {
                let origin = Vec2::new(tx as f32 * TILE_SIZE, ty as f32 * TILE_SIZE);
                match ch {
                    'E' => enemy_spawns.push(origin),
                    'S' => spike_spawns.push(origin),
                    _ => {}
                }
                solid.push(ch == '#');
            }
        }

        Ok(Self {
            width,
            height,
            solid,
            enemy_spawns,
            spike_spawns,
        })
    }

    /// The level shipped with the device
    pub fn builtin() -> Result<Self, LevelError> {
        Self::parse(&LEVEL_MAP)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * TILE_SIZE
    }

    pub fn enemy_spawns(&self) -> &[Vec2] {
        &self.enemy_spawns
    }

    pub fn spike_spawns(&self) -> &[Vec2] {
        &self.spike_spawns
    }

    /// Solidity of a tile by index, applying the boundary policy
    pub fn tile_solid(&self, tx: i64, ty: i64) -> bool {
        if tx < 0 || tx >= self.width as i64 {
            return true;
        }
        if ty < 0 || ty >= self.height as i64 {
            return false;
        }
        self.solid[ty as usize * self.width + tx as usize]
    }
}

impl TileWorld for Level {
    fn is_solid(&self, x: f32, y: f32) -> bool {
        let tx = (x / TILE_SIZE).floor() as i64;
        let ty = (y / TILE_SIZE).floor() as i64;
        self.tile_solid(tx, ty)
    }
}

/// Left edge of the tile containing `v`
#[inline]
pub fn tile_floor(v: f32) -> f32 {
    (v / TILE_SIZE).floor() * TILE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small() -> Level {
        Level::parse(&["#  #", "#E #", "####"]).unwrap()
    }

    #[test]
    fn test_builtin_level_parses() {
        let level = Level::builtin().unwrap();
        assert_eq!(level.width(), 79);
        assert_eq!(level.height(), 15);
        assert_eq!(level.enemy_spawns().len(), 3);
        assert_eq!(level.spike_spawns().len(), 13);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Level::parse(&["###", "##"]).unwrap_err();
        assert_eq!(
            err,
            LevelError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(Level::parse(&[]).unwrap_err(), LevelError::Empty);
    }

    #[test]
    fn test_spawns_are_not_solid() {
        let level = small();
        assert_eq!(level.enemy_spawns(), &[Vec2::new(16.0, 16.0)]);
        assert!(!level.is_solid(20.0, 20.0));
        assert!(level.is_solid(1.0, 20.0));
        assert!(level.is_solid(40.0, 40.0));
    }

    proptest! {
        #[test]
        fn horizontal_out_of_bounds_is_solid(ty in -20i64..40, tx in 4i64..200) {
            let level = small();
            prop_assert!(level.tile_solid(tx, ty));
            prop_assert!(level.tile_solid(-1 - (tx - 4), ty));
        }

        #[test]
        fn vertical_out_of_bounds_is_open(tx in 0i64..4, below in 3i64..200, above in 1i64..200) {
            let level = small();
            prop_assert!(!level.tile_solid(tx, below));
            prop_assert!(!level.tile_solid(tx, -above));
        }
    }
}
