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
//! Axis-aligned bounding boxes and penetration vectors

/// Axis-aligned box in screen coordinates (y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    /// Left edge.
    pub min_x: f64,
    /// Top edge.
    pub min_y: f64,
    /// Right edge.
    pub max_x: f64,
    /// Bottom edge.
    pub max_y: f64,
}

impl Aabb {
    /// Create a box from its edges.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Aabb {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// This box translated by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Aabb {
        Aabb {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    /// Box width.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Box height.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Strict overlap test: boxes sharing only an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// True when the point lies inside or on the boundary.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Minimal translation that separates two overlapping shapes.
///
/// Applying `(x, y)` to the first shape moves it just clear of the second.
/// Exactly one axis is non-zero for box-vs-box results; SAT results may lie
/// along any edge normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Horizontal component of the separating translation.
    pub x: f64,
    /// Vertical component of the separating translation.
    pub y: f64,
}

impl Penetration {
    /// Euclidean length of the separating translation.
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Minimal translation separating box `a` from box `b`, or `None` when the
/// boxes do not strictly overlap.
///
/// The translation is along a single axis, the one with the smaller
/// clearing distance; ties prefer x.
pub fn aabb_penetration(a: &Aabb, b: &Aabb) -> Option<Penetration> {
    if !a.overlaps(b) {
        return None;
    }
    let push_left = a.max_x - b.min_x; // move a in -x
    let push_right = b.max_x - a.min_x; // move a in +x
    let push_up = a.max_y - b.min_y; // move a in -y
    let push_down = b.max_y - a.min_y; // move a in +y

    let min_x_push = push_left.min(push_right);
    let min_y_push = push_up.min(push_down);

    if min_x_push <= min_y_push {
        if push_left <= push_right {
            Some(Penetration {
                x: -push_left,
                y: 0.0,
            })
        } else {
            Some(Penetration {
                x: push_right,
                y: 0.0,
            })
        }
    } else if push_up <= push_down {
        Some(Penetration { x: 0.0, y: -push_up })
    } else {
        Some(Penetration {
            x: 0.0,
            y: push_down,
        })
    }
}
