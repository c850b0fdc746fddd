//! Destructible brick grid for the brick breaker
//!
//! Each cell holds a durability class:
//! - 0: empty
//! - 1..=6: destructible, worth `class * 10` points
//! - 7: indestructible (always reflects, never scores, never clears)
//!
//! The renderer maps classes to tiles on its own; the grid is logic only.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::world::TileWorld;
use crate::consts::{BRICK_H, BRICK_W, GRID_COLS, GRID_ROWS};

pub const EMPTY: u8 = 0;
pub const INDESTRUCTIBLE: u8 = 7;

/// Built-in levels. Rows not listed are empty.
pub const LEVELS: [&[[u8; GRID_COLS]]; 4] = [
    &[
        [0; GRID_COLS],
        [0; GRID_COLS],
        [1; GRID_COLS],
        [2; GRID_COLS],
        [3; GRID_COLS],
        [0; GRID_COLS],
    ],
    &[
        [7, 0, 0, 0, 0, 0, 0, 0, 0, 7],
        [7, 1, 1, 1, 0, 0, 1, 1, 1, 7],
        [7, 2, 2, 2, 0, 0, 2, 2, 2, 7],
        [7, 3, 3, 3, 0, 0, 3, 3, 3, 7],
        [7, 4, 4, 4, 0, 0, 4, 4, 4, 7],
        [7, 5, 5, 5, 0, 0, 5, 5, 5, 7],
    ],
    &[
        [7; GRID_COLS],
        [7, 6, 6, 6, 6, 6, 6, 6, 6, 7],
        [7, 0, 0, 0, 0, 0, 0, 0, 0, 7],
        [7, 0, 4, 4, 4, 4, 4, 4, 0, 7],
        [7, 0, 4, 4, 4, 4, 4, 4, 0, 7],
        [7, 0, 0, 0, 0, 0, 0, 0, 0, 7],
        [7, 7, 0, 0, 0, 0, 0, 0, 7, 7],
    ],
    &[
        [1, 0, 1, 0, 1, 1, 0, 1, 0, 1],
        [0, 2, 0, 2, 7, 7, 2, 0, 2, 0],
        [3, 0, 3, 0, 7, 7, 0, 3, 0, 3],
        [0, 4, 0, 4, 0, 0, 4, 0, 4, 0],
        [5, 0, 5, 0, 7, 7, 0, 5, 0, 5],
        [0, 6, 0, 6, 7, 7, 6, 0, 6, 0],
        [7, 7, 0, 0, 0, 0, 0, 0, 7, 7],
    ],
];

/// Result of one brick query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrickHit {
    pub hit: bool,
    pub score: u32,
}

impl BrickHit {
    pub fn miss() -> Self {
        Self::default()
    }
}

#[inline]
pub fn is_destructible(class: u8) -> bool {
    (1..INDESTRUCTIBLE).contains(&class)
}

/// Logical durability grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    cells: [[u8; GRID_COLS]; GRID_ROWS],
    active_bricks: u32,
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BrickGrid {
    /// Empty grid
    pub fn new() -> Self {
        Self {
            cells: [[EMPTY; GRID_COLS]; GRID_ROWS],
            active_bricks: 0,
        }
    }

    /// Build a grid from explicit rows (extra rows are ignored)
    pub fn from_rows(rows: &[[u8; GRID_COLS]]) -> Self {
        let mut grid = Self::new();
        grid.fill(rows);
        grid
    }

    pub fn level_count() -> usize {
        LEVELS.len()
    }

    /// Load a built-in level (index wraps)
    pub fn load_level(&mut self, index: usize) {
        self.fill(LEVELS[index % LEVELS.len()]);
        log::debug!(
            "Brick level {} loaded: {} destructible bricks",
            index % LEVELS.len(),
            self.active_bricks
        );
    }

    fn fill(&mut self, rows: &[[u8; GRID_COLS]]) {
        self.cells = [[EMPTY; GRID_COLS]; GRID_ROWS];
        self.active_bricks = 0;
        for (r, row) in rows.iter().take(GRID_ROWS).enumerate() {
            for (c, &class) in row.iter().enumerate() {
                let class = class.min(INDESTRUCTIBLE);
                self.cells[r][c] = class;
                if is_destructible(class) {
                    self.active_bricks += 1;
                }
            }
        }
    }

    /// Destructible bricks still standing
    pub fn active_bricks(&self) -> u32 {
        self.active_bricks
    }

    pub fn is_cleared(&self) -> bool {
        self.active_bricks == 0
    }

    /// Durability class at a cell (None outside the grid)
    pub fn cell(&self, col: usize, row: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> &[[u8; GRID_COLS]; GRID_ROWS] {
        &self.cells
    }

    /// Resolve a rectangle against the grid.
    ///
    /// Scans the overlapped cells column by column and stops at the first
    /// occupied one: only one brick is consumed per call. Cells outside the
    /// grid never collide.
    pub fn resolve_collision(&mut self, rect: &Aabb) -> BrickHit {
        let col1 = (rect.left() / BRICK_W).floor() as i64;
        let col2 = (rect.right() / BRICK_W).floor() as i64;
        let row1 = (rect.top() / BRICK_H).floor() as i64;
        let row2 = (rect.bottom() / BRICK_H).floor() as i64;

        for c in col1..=col2 {
            for r in row1..=row2 {
                if c < 0 || r < 0 || c >= GRID_COLS as i64 || r >= GRID_ROWS as i64 {
                    continue;
                }
                let (c, r) = (c as usize, r as usize);
                let class = self.cells[r][c];
                if class == EMPTY {
                    continue;
                }
                if is_destructible(class) {
                    self.cells[r][c] = EMPTY;
                    self.active_bricks = self.active_bricks.saturating_sub(1);
                    return BrickHit {
                        hit: true,
                        score: u32::from(class) * 10,
                    };
                }
                return BrickHit {
                    hit: true,
                    score: 0,
                };
            }
        }
        BrickHit::miss()
    }
}

impl TileWorld for BrickGrid {
    fn is_solid(&self, x: f32, y: f32) -> bool {
        let col = (x / BRICK_W).floor();
        let row = (y / BRICK_H).floor();
        if col < 0.0 || row < 0.0 {
            return false;
        }
        self.cell(col as usize, row as usize)
            .is_some_and(|class| class != EMPTY)
    }
}
