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
//! Built-in component records
//!
//! Components are plain data records without behavior. Positions and
//! velocities are double-precision and use screen-style coordinates: x grows
//! right, y grows down, so a positive `Gravity::gy` pulls toward the floor.

use crate::collision::{Aabb, Side, TileMap};
use crate::ecs::EntityId;
use std::sync::Arc;

/// 2D position in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate (grows downward).
    pub y: f64,
}

impl Position {
    /// Create a position at the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Check that both coordinates are finite.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// 2D velocity in pixels per second, with independent per-axis magnitude
/// limits applied after every velocity change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    /// Horizontal velocity.
    pub dx: f64,
    /// Vertical velocity.
    pub dy: f64,
    /// Maximum |dx|; unlimited by default.
    pub max_dx: f64,
    /// Maximum |dy|; unlimited by default.
    pub max_dy: f64,
}

impl Velocity {
    /// Create a velocity with unlimited per-axis magnitudes.
    pub fn new(dx: f64, dy: f64) -> Self {
        Velocity {
            dx,
            dy,
            max_dx: f64::INFINITY,
            max_dy: f64::INFINITY,
        }
    }

    /// Create a velocity with per-axis magnitude limits.
    pub fn with_limits(dx: f64, dy: f64, max_dx: f64, max_dy: f64) -> Self {
        Velocity {
            dx,
            dy,
            max_dx,
            max_dy,
        }
    }

    /// Clamp each axis independently to its configured maximum magnitude.
    pub fn clamp(&mut self) {
        self.dx = self.dx.clamp(-self.max_dx, self.max_dx);
        self.dy = self.dy.clamp(-self.max_dy, self.max_dy);
    }

    /// Check that both components are finite.
    pub fn is_valid(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Velocity::new(0.0, 0.0)
    }
}

/// Rectangular position clamp.
///
/// When a frame's movement would carry an entity past an edge, the violated
/// axis keeps its previous position and has its velocity zeroed, silently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    /// Minimum allowed x.
    pub min_x: f64,
    /// Minimum allowed y.
    pub min_y: f64,
    /// Maximum allowed x.
    pub max_x: f64,
    /// Maximum allowed y.
    pub max_y: f64,
}

impl Constraint {
    /// Create a clamp rectangle.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Constraint {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

/// Per-axis contact flags marking a body resting against a surface.
///
/// `down` means the body is blocked from moving further down (resting on a
/// floor), and so on for the other directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contact {
    /// Blocked moving in -x.
    pub left: bool,
    /// Blocked moving in +x.
    pub right: bool,
    /// Blocked moving in -y.
    pub up: bool,
    /// Blocked moving in +y.
    pub down: bool,
}

impl Contact {
    /// No contact on any side.
    pub fn none() -> Self {
        Contact::default()
    }

    /// Exactly one flag set, for the box side that struck a surface.
    ///
    /// A hit on the box's bottom side blocks downward travel, and so on.
    pub fn from_side(side: Side) -> Self {
        let mut contact = Contact::none();
        match side {
            Side::Left => contact.left = true,
            Side::Right => contact.right = true,
            Side::Top => contact.up = true,
            Side::Bottom => contact.down = true,
        }
        contact
    }

    /// True when any side is in contact.
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Physics body: local-space bounds plus material properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Collision bounds in entity-local space, offset by `Position` to get
    /// the world-space box.
    pub shape: Aabb,
    /// Mass in arbitrary units; `0.0` marks an immovable body.
    pub mass: f64,
    /// Collision energy retention: 0 = inelastic, 1 = elastic.
    pub restitution: f64,
    /// Horizontal damping factor applied as `dx *= 1 - resistance_x * dt`.
    pub resistance_x: f64,
    /// Vertical damping factor.
    pub resistance_y: f64,
    /// Per-axis contact flags maintained by the movement system.
    pub touching: Contact,
}

impl Body {
    /// Threshold below which mass is treated as zero (immovable).
    pub const IMMOVABLE_THRESHOLD: f64 = 1e-10;

    /// Create a body with mass 1, no restitution, and no resistance.
    pub fn new(shape: Aabb) -> Self {
        Body {
            shape,
            mass: 1.0,
            restitution: 0.0,
            resistance_x: 0.0,
            resistance_y: 0.0,
            touching: Contact::none(),
        }
    }

    /// True for zero or near-zero mass bodies.
    pub fn is_immovable(&self) -> bool {
        self.mass < Self::IMMOVABLE_THRESHOLD
    }

    /// Inverse mass, `0.0` for immovable bodies so impulse math never
    /// divides by zero.
    pub fn inverse_mass(&self) -> f64 {
        if self.is_immovable() {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// The body's bounds in world space at the given position.
    pub fn world_shape(&self, position: &Position) -> Aabb {
        self.shape.offset(position.x, position.y)
    }
}

/// Constant acceleration, in pixels per second squared.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gravity {
    /// Horizontal acceleration.
    pub gx: f64,
    /// Vertical acceleration (positive pulls down).
    pub gy: f64,
}

impl Gravity {
    /// Create a gravity vector.
    pub fn new(gx: f64, gy: f64) -> Self {
        Gravity { gx, gy }
    }
}

/// Explicit candidate list for entity-vs-entity collision.
///
/// The movement system tests its entity against every member of the group
/// except itself, in O(members); callers are expected to keep groups small.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollisionGroup {
    /// Candidate entities to test against.
    pub members: Vec<EntityId>,
}

impl CollisionGroup {
    /// Create a group from a candidate list.
    pub fn new(members: Vec<EntityId>) -> Self {
        CollisionGroup { members }
    }
}

/// Reference to a tile occupancy grid for world-geometry collision.
///
/// The map is shared immutably; copied entities alias the same grid.
#[derive(Debug, Clone)]
pub struct TileCollider {
    /// The occupancy grid to collide against.
    pub map: Arc<TileMap>,
}

impl TileCollider {
    /// Create a collider over a shared tile map.
    pub fn new(map: Arc<TileMap>) -> Self {
        TileCollider { map }
    }
}

/// Render size in pixels, consumed by a rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a size.
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// Drawable sprite reference, consumed by a rendering collaborator.
///
/// The core never interprets the asset beyond carrying the opaque key and
/// the numeric frame index.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Opaque asset key resolved by the loader collaborator.
    pub asset: String,
    /// Current animation frame index.
    pub frame: usize,
    /// Rotation in radians.
    pub rotation: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Sprite {
    /// Create a sprite at frame 0 with identity transform.
    pub fn new(asset: impl Into<String>) -> Self {
        Sprite {
            asset: asset.into(),
            frame: 0,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

/// Human-readable entity label for non-hot-path lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    /// Create a name.
    pub fn new(value: impl Into<String>) -> Self {
        Name(value.into())
    }
}
