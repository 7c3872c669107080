// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Tile occupancy grids and box-vs-grid hit testing

use crate::collision::aabb::{Aabb, Penetration};

/// Which side of a moving box struck the world geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The box's left side hit; leftward travel is blocked.
    Left,
    /// The box's right side hit; rightward travel is blocked.
    Right,
    /// The box's top side hit; upward travel is blocked.
    Top,
    /// The box's bottom side hit; downward travel is blocked.
    Bottom,
}

/// Result of a box-vs-grid hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileHit {
    /// Horizontal component of the translation clearing the geometry.
    pub x: f64,
    /// Vertical component of the translation clearing the geometry.
    pub y: f64,
    /// The box side that struck.
    pub side: Side,
}

/// Row-major grid of tile values; any value other than the empty marker is
/// solid.
///
/// Grid cell `(col, row)` covers world rectangle
/// `[col * tile_width, (col + 1) * tile_width) x [row * tile_height,
/// (row + 1) * tile_height)` in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    tile_width: f64,
    tile_height: f64,
    width: usize,
    height: usize,
    tiles: Vec<u32>,
    empty: u32,
}

impl TileMap {
    /// Create a map from row-major tile values.
    ///
    /// `tiles` shorter than `width * height` reads as empty past its end;
    /// longer input is ignored past the grid.
    pub fn new(
        tile_width: f64,
        tile_height: f64,
        width: usize,
        height: usize,
        tiles: Vec<u32>,
        empty: u32,
    ) -> Self {
        TileMap {
            tile_width,
            tile_height,
            width,
            height,
            tiles,
            empty,
        }
    }

    /// Grid width in tiles.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in tiles.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The tile value at `(col, row)`, or the empty marker outside the grid.
    pub fn tile_at(&self, col: usize, row: usize) -> u32 {
        if col >= self.width || row >= self.height {
            return self.empty;
        }
        self.tiles
            .get(row * self.width + col)
            .copied()
            .unwrap_or(self.empty)
    }

    /// True when the tile at `(col, row)` is solid.
    pub fn occupied(&self, col: usize, row: usize) -> bool {
        self.tile_at(col, row) != self.empty
    }

    /// The world-space rectangle of cell `(col, row)`.
    fn cell_bounds(&self, col: usize, row: usize) -> Aabb {
        Aabb::new(
            col as f64 * self.tile_width,
            row as f64 * self.tile_height,
            (col + 1) as f64 * self.tile_width,
            (row + 1) as f64 * self.tile_height,
        )
    }

    /// Test a world-space box against the grid.
    ///
    /// Returns the translation that clears all overlapped solid cells along
    /// a single dominant axis, plus the box side that struck. The dominant
    /// axis is the one needing the smaller translation; ties resolve
    /// vertically, which keeps bodies resting on floors instead of sliding
    /// off seams. Boxes entirely outside the grid never hit.
    pub fn hit_test(&self, shape: &Aabb) -> Option<TileHit> {
        if self.width == 0 || self.height == 0 {
            return None;
        }

        let col_min = (shape.min_x / self.tile_width).floor().max(0.0) as usize;
        let col_max = (shape.max_x / self.tile_width).ceil().min(self.width as f64) as usize;
        let row_min = (shape.min_y / self.tile_height).floor().max(0.0) as usize;
        let row_max = (shape.max_y / self.tile_height).ceil().min(self.height as f64) as usize;

        // Largest clearing distance per direction over all struck cells, so
        // one translation clears everything at once.
        let mut push_up: f64 = 0.0;
        let mut push_down: f64 = 0.0;
        let mut push_left: f64 = 0.0;
        let mut push_right: f64 = 0.0;
        let mut hit = false;

        for row in row_min..row_max {
            for col in col_min..col_max {
                if !self.occupied(col, row) {
                    continue;
                }
                let cell = self.cell_bounds(col, row);
                if !shape.overlaps(&cell) {
                    continue;
                }
                hit = true;
                push_up = push_up.max(shape.max_y - cell.min_y);
                push_down = push_down.max(cell.max_y - shape.min_y);
                push_left = push_left.max(shape.max_x - cell.min_x);
                push_right = push_right.max(cell.max_x - shape.min_x);
            }
        }

        if !hit {
            return None;
        }

        let vertical = push_up.min(push_down);
        let horizontal = push_left.min(push_right);

        if vertical <= horizontal {
            if push_up <= push_down {
                // Pushed up: the box's bottom struck a floor.
                Some(TileHit {
                    x: 0.0,
                    y: -push_up,
                    side: Side::Bottom,
                })
            } else {
                Some(TileHit {
                    x: 0.0,
                    y: push_down,
                    side: Side::Top,
                })
            }
        } else if push_left <= push_right {
            // Pushed left: the box's right side struck a wall.
            Some(TileHit {
                x: -push_left,
                y: 0.0,
                side: Side::Right,
            })
        } else {
            Some(TileHit {
                x: push_right,
                y: 0.0,
                side: Side::Left,
            })
        }
    }
}
