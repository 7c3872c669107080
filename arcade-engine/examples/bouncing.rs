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
//! Bouncing ball example
//!
//! Drops a ball with restitution onto a tile floor and prints its position
//! each simulated frame. Shows component registration, entity creation, and
//! the per-frame update loop.

use arcade_engine::collision::{Aabb, TileMap};
use arcade_engine::ecs::components::{Body, Gravity, Position, TileCollider, Velocity};
use arcade_engine::ecs::{ComponentData, ComponentKind, ComponentRegistry, EntityStore};
use arcade_engine::physics::MovementSystem;
use std::sync::Arc;

fn main() {
    println!("Arcade Engine - Bouncing Ball Example");
    println!("=====================================\n");

    let mut registry = ComponentRegistry::new();
    let positions = registry
        .register(ComponentData::Position(Position::default()))
        .expect("register positions");
    let velocities = registry
        .register(ComponentData::Velocity(Velocity::default()))
        .expect("register velocities");
    let gravities = registry
        .register(ComponentData::Gravity(Gravity::new(0.0, 600.0)))
        .expect("register gravity");
    let bodies = registry
        .register(ComponentData::Body(Body::new(Aabb::new(
            -4.0, -4.0, 4.0, 4.0,
        ))))
        .expect("register bodies");

    // A 10-wide grid of 16px tiles with a solid bottom row at y = [144, 160).
    let width = 10;
    let height = 10;
    let mut tiles = vec![0u32; width * height];
    for col in 0..width {
        tiles[(height - 1) * width + col] = 1;
    }
    let map = Arc::new(TileMap::new(16.0, 16.0, width, height, tiles, 0));
    let colliders = registry
        .register(ComponentData::TileCollider(TileCollider::new(map)))
        .expect("register tile colliders");

    let mut store = EntityStore::new();
    store.add_system(Box::new(MovementSystem::new(
        positions.mask().union(&velocities.mask()),
    )));

    let ball = store.create_entity(vec![
        positions.create_with(|d| {
            if let Some(p) = d.as_position_mut() {
                p.x = 80.0;
                p.y = 20.0;
            }
        }),
        velocities.create(),
        gravities.create(),
        bodies.create_with(|d| {
            if let Some(b) = d.as_body_mut() {
                b.restitution = 0.7;
            }
        }),
        colliders.create(),
    ]);

    println!("Dropped {ball} from y = 20 over a floor at y = 144\n");

    // Sixty 16ms frames, roughly one simulated second.
    for frame in 1..=60 {
        store.update(16.0);

        let pos = store
            .data(ball, ComponentKind::Position)
            .and_then(ComponentData::as_position)
            .expect("ball position");
        let body = store
            .data(ball, ComponentKind::Body)
            .and_then(ComponentData::as_body)
            .expect("ball body");

        if frame % 5 == 0 || body.touching.down {
            let marker = if body.touching.down { "  <- floor" } else { "" };
            println!("frame {frame:>2}: y = {:7.2}{marker}", pos.y);
        }
    }

    println!("\nExample completed successfully!");
}
