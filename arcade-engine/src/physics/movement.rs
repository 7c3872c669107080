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
//! Movement and collision response
//!
//! [`MovementSystem`] integrates positions from velocities and resolves
//! collisions in a single per-entity pass: gravity is applied in two half
//! kicks around the position update, then constraints, entity-vs-entity
//! impulses, and tile-grid response run in that order. All quantities are
//! per-second; the frame delta arrives in milliseconds.

use crate::collision::{aabb_penetration, Aabb, Penetration};
use crate::ecs::components::{Body, Contact, Position, Velocity};
use crate::ecs::{priorities, CapabilityMask, ComponentData, ComponentKind, EntityId, EntityStore, System};

/// Integrates movement and resolves collisions for matching entities.
///
/// The required mask is supplied by the caller from its registered
/// component factories; `Position` and `Velocity` bits are the expected
/// minimum. Gravity, constraints, bodies, collision groups, and tile
/// colliders are all optional per entity and picked up when attached.
pub struct MovementSystem {
    mask: CapabilityMask,
    bounds: Option<Aabb>,
    priority: i32,
}

impl MovementSystem {
    /// Create a movement system over entities matching `required_mask`.
    pub fn new(required_mask: CapabilityMask) -> Self {
        MovementSystem {
            mask: required_mask,
            bounds: None,
            priority: priorities::PHYSICS,
        }
    }

    /// Only simulate entities whose position lies inside `bounds`; entities
    /// outside are frozen in place until something moves them back in.
    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Override the default physics priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Resolve one entity-vs-entity overlap: translate the moving body clear
    /// and exchange an impulse along the penetration axis.
    fn resolve_pair(
        store: &mut EntityStore,
        other: EntityId,
        pos: &mut Position,
        vel: &mut Velocity,
        body: &Body,
        touching: &mut Contact,
        pen: &Penetration,
    ) {
        let (other_body, other_vel) = match (
            store
                .data(other, ComponentKind::Body)
                .and_then(ComponentData::as_body)
                .copied(),
            store
                .data(other, ComponentKind::Velocity)
                .and_then(ComponentData::as_velocity)
                .copied(),
        ) {
            (Some(body), vel) => (body, vel),
            (None, _) => return,
        };

        pos.x += pen.x;
        pos.y += pen.y;

        let inv_a = body.inverse_mass();
        // Bodies without a velocity cannot be pushed, whatever their mass.
        let inv_b = if other_vel.is_some() {
            other_body.inverse_mass()
        } else {
            0.0
        };

        let magnitude = pen.magnitude();
        if magnitude > 0.0 && inv_a + inv_b > 0.0 {
            let nx = pen.x / magnitude;
            let ny = pen.y / magnitude;
            let mut other_dx = other_vel.map_or(0.0, |v| v.dx);
            let mut other_dy = other_vel.map_or(0.0, |v| v.dy);
            let approach = (vel.dx - other_dx) * nx + (vel.dy - other_dy) * ny;

            // Only impulse bodies still moving into each other; overlap left
            // over from a previous response just gets separated.
            if approach < 0.0 {
                let restitution = (body.restitution + other_body.restitution) / 2.0;
                let impulse = -(1.0 + restitution) * approach / (inv_a + inv_b);
                vel.dx += impulse * inv_a * nx;
                vel.dy += impulse * inv_a * ny;
                vel.clamp();

                if let Some(mut other_velocity) = other_vel {
                    other_dx -= impulse * inv_b * nx;
                    other_dy -= impulse * inv_b * ny;
                    other_velocity.dx = other_dx;
                    other_velocity.dy = other_dy;
                    other_velocity.clamp();
                    if let Some(slot) = store
                        .data_mut(other, ComponentKind::Velocity)
                        .and_then(ComponentData::as_velocity_mut)
                    {
                        *slot = other_velocity;
                    }
                }
            }
        }

        // Contact flags mirror on the two bodies.
        let mut other_touching = other_body.touching;
        if pen.x < 0.0 {
            touching.right = true;
            other_touching.left = true;
        } else if pen.x > 0.0 {
            touching.left = true;
            other_touching.right = true;
        }
        if pen.y < 0.0 {
            touching.down = true;
            other_touching.up = true;
        } else if pen.y > 0.0 {
            touching.up = true;
            other_touching.down = true;
        }
        if let Some(slot) = store
            .data_mut(other, ComponentKind::Body)
            .and_then(ComponentData::as_body_mut)
        {
            slot.touching = other_touching;
        }
    }
}

impl System for MovementSystem {
    fn required_mask(&self) -> CapabilityMask {
        self.mask
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn name(&self) -> &str {
        "MovementSystem"
    }

    fn update(&mut self, store: &mut EntityStore, entity: EntityId, dt_ms: f64) {
        let dt = dt_ms / 1000.0;

        let mut pos = match store
            .data(entity, ComponentKind::Position)
            .and_then(ComponentData::as_position)
            .copied()
        {
            Some(pos) => pos,
            None => return,
        };
        let mut vel = match store
            .data(entity, ComponentKind::Velocity)
            .and_then(ComponentData::as_velocity)
            .copied()
        {
            Some(vel) => vel,
            None => return,
        };

        if let Some(bounds) = &self.bounds {
            if !bounds.contains_point(pos.x, pos.y) {
                return;
            }
        }

        if !pos.is_valid() || !vel.is_valid() {
            log::warn!("{entity} has non-finite position or velocity; skipping");
            return;
        }

        let gravity = store
            .data(entity, ComponentKind::Gravity)
            .and_then(ComponentData::as_gravity)
            .copied();
        let constraint = store
            .data(entity, ComponentKind::Constraint)
            .and_then(ComponentData::as_constraint)
            .copied();
        let mut body = store
            .data(entity, ComponentKind::Body)
            .and_then(ComponentData::as_body)
            .copied();

        // First half of the gravity kick; the second half follows the
        // position update so acceleration integrates symmetrically.
        if let Some(g) = gravity {
            vel.dx += g.gx * dt / 2.0;
            vel.dy += g.gy * dt / 2.0;
            vel.clamp();
        }

        let prev = pos;
        let touching = body.map_or(Contact::none(), |b| b.touching);

        // Travel into a touched surface is suppressed, not bounced.
        let dx = if (vel.dx > 0.0 && touching.right) || (vel.dx < 0.0 && touching.left) {
            0.0
        } else {
            vel.dx * dt
        };
        let dy = if (vel.dy > 0.0 && touching.down) || (vel.dy < 0.0 && touching.up) {
            0.0
        } else {
            vel.dy * dt
        };
        pos.x += dx;
        pos.y += dy;

        if let Some(limit) = constraint {
            if pos.x < limit.min_x || pos.x > limit.max_x {
                pos.x = prev.x;
                vel.dx = 0.0;
            }
            if pos.y < limit.min_y || pos.y > limit.max_y {
                pos.y = prev.y;
                vel.dy = 0.0;
            }
        }

        let mut collided = false;
        let mut new_touching = Contact::none();

        if let Some(ref mut body_val) = body {
            let members = store
                .data(entity, ComponentKind::CollisionGroup)
                .and_then(ComponentData::as_collision_group)
                .map(|group| group.members.clone())
                .unwrap_or_default();

            for other in members {
                if other == entity || !store.is_living(other) {
                    continue;
                }
                let other_shape = match (
                    store
                        .data(other, ComponentKind::Position)
                        .and_then(ComponentData::as_position),
                    store
                        .data(other, ComponentKind::Body)
                        .and_then(ComponentData::as_body),
                ) {
                    (Some(p), Some(b)) => b.world_shape(p),
                    _ => continue,
                };
                let shape = body_val.world_shape(&pos);
                if let Some(pen) = aabb_penetration(&shape, &other_shape) {
                    Self::resolve_pair(
                        store,
                        other,
                        &mut pos,
                        &mut vel,
                        body_val,
                        &mut new_touching,
                        &pen,
                    );
                    collided = true;
                }
            }

            let map = store
                .data(entity, ComponentKind::TileCollider)
                .and_then(ComponentData::as_tile_collider)
                .map(|collider| collider.map.clone());
            if let Some(map) = map {
                let shape = body_val.world_shape(&pos);
                if let Some(hit) = map.hit_test(&shape) {
                    pos.x += hit.x;
                    pos.y += hit.y;
                    if hit.x != 0.0 {
                        vel.dx *= -body_val.restitution;
                    }
                    if hit.y != 0.0 {
                        vel.dy *= -body_val.restitution;
                    }
                    new_touching = Contact::from_side(hit.side);
                    collided = true;
                }
            }

            body_val.touching = if collided { new_touching } else { Contact::none() };

            // Exponential per-axis damping.
            vel.dx *= 1.0 - body_val.resistance_x * dt;
            vel.dy *= 1.0 - body_val.resistance_y * dt;
        }

        if let Some(g) = gravity {
            vel.dx += g.gx * dt / 2.0;
            vel.dy += g.gy * dt / 2.0;
        }
        vel.clamp();

        if let Some(slot) = store
            .data_mut(entity, ComponentKind::Position)
            .and_then(ComponentData::as_position_mut)
        {
            *slot = pos;
        }
        if let Some(slot) = store
            .data_mut(entity, ComponentKind::Velocity)
            .and_then(ComponentData::as_velocity_mut)
        {
            *slot = vel;
        }
        if let Some(body_val) = body {
            if let Some(slot) = store
                .data_mut(entity, ComponentKind::Body)
                .and_then(ComponentData::as_body_mut)
            {
                *slot = body_val;
            }
        }
    }
}
