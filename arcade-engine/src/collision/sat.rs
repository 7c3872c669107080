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
//! Separating-axis test for convex polygons
//!
//! Polygons are flat `[x0, y0, x1, y1, ...]` vertex lists in world space,
//! wound consistently. The test projects both polygons onto every edge
//! normal; one axis with no overlap proves separation, otherwise the axis
//! with the least overlap yields the minimal translation vector.

use crate::collision::aabb::Penetration;

/// Minimal translation separating polygon `a` from polygon `b`, or `None`
/// when a separating axis exists.
///
/// Touching edges (zero overlap on some axis) count as separated. Degenerate
/// input, fewer than three vertices or an odd-length list, is logged and
/// treated as no collision.
pub fn polygon_penetration(a: &[f64], b: &[f64]) -> Option<Penetration> {
    if !is_valid_polygon(a) || !is_valid_polygon(b) {
        log::warn!(
            "degenerate polygon in collision test (lens {} and {})",
            a.len(),
            b.len()
        );
        return None;
    }

    let mut best_overlap = f64::INFINITY;
    let mut best_axis = (0.0, 0.0);

    for polygon in [a, b] {
        let vertex_count = polygon.len() / 2;
        for i in 0..vertex_count {
            let j = (i + 1) % vertex_count;
            let edge_x = polygon[2 * j] - polygon[2 * i];
            let edge_y = polygon[2 * j + 1] - polygon[2 * i + 1];

            // Edge normal, normalized so overlaps compare across axes.
            let length = edge_x.hypot(edge_y);
            if length == 0.0 {
                continue;
            }
            let axis = (-edge_y / length, edge_x / length);

            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            let overlap = max_a.min(max_b) - min_a.max(min_b);
            if overlap <= 0.0 {
                return None;
            }
            if overlap < best_overlap {
                best_overlap = overlap;
                best_axis = axis;
            }
        }
    }

    // Orient the axis so the translation pushes a away from b.
    let (ax, ay) = centroid(a);
    let (bx, by) = centroid(b);
    let toward_a = (ax - bx) * best_axis.0 + (ay - by) * best_axis.1;
    let sign = if toward_a < 0.0 { -1.0 } else { 1.0 };

    Some(Penetration {
        x: best_axis.0 * best_overlap * sign,
        y: best_axis.1 * best_overlap * sign,
    })
}

fn is_valid_polygon(vertices: &[f64]) -> bool {
    vertices.len() >= 6 && vertices.len() % 2 == 0
}

fn project(vertices: &[f64], axis: (f64, f64)) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for pair in vertices.chunks_exact(2) {
        let dot = pair[0] * axis.0 + pair[1] * axis.1;
        min = min.min(dot);
        max = max.max(dot);
    }
    (min, max)
}

fn centroid(vertices: &[f64]) -> (f64, f64) {
    let count = (vertices.len() / 2) as f64;
    let mut x = 0.0;
    let mut y = 0.0;
    for pair in vertices.chunks_exact(2) {
        x += pair[0];
        y += pair[1];
    }
    (x / count, y / count)
}
