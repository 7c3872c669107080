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
//! Narrow-phase collision detection
//!
//! Three detectors, all in world space with screen coordinates (y grows
//! down): box-vs-box ([`aabb_penetration`]), convex-polygon-vs-polygon via
//! the separating axis theorem ([`polygon_penetration`]), and
//! box-vs-tile-grid ([`TileMap::hit_test`]). Each reports the minimal
//! translation that separates the shapes; touching without overlap is never
//! a collision.

mod aabb;
mod sat;
mod tilemap;

pub use aabb::{aabb_penetration, Aabb, Penetration};
pub use sat::polygon_penetration;
pub use tilemap::{Side, TileHit, TileMap};
