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
//! Frame-advance benchmarks

use arcade_engine::collision::{Aabb, TileMap};
use arcade_engine::ecs::components::{Body, Gravity, Position, TileCollider, Velocity};
use arcade_engine::ecs::{ComponentData, ComponentRegistry, EntityStore};
use arcade_engine::physics::MovementSystem;
use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

/// A store with `count` falling bodies over a tiled floor.
fn populated_store(count: usize) -> EntityStore {
    let mut registry = ComponentRegistry::new();
    let positions = registry
        .register(ComponentData::Position(Position::default()))
        .unwrap();
    let velocities = registry
        .register(ComponentData::Velocity(Velocity::default()))
        .unwrap();
    let gravities = registry
        .register(ComponentData::Gravity(Gravity::new(0.0, 100.0)))
        .unwrap();
    let bodies = registry
        .register(ComponentData::Body(Body::new(Aabb::new(
            -4.0, -4.0, 4.0, 4.0,
        ))))
        .unwrap();

    // 64-wide grid of 16px tiles with a solid bottom row.
    let width = 64;
    let height = 64;
    let mut tiles = vec![0u32; width * height];
    for col in 0..width {
        tiles[(height - 1) * width + col] = 1;
    }
    let map = Arc::new(TileMap::new(
        16.0,
        16.0,
        width,
        height,
        tiles,
        0,
    ));
    let colliders = registry
        .register(ComponentData::TileCollider(TileCollider::new(map)))
        .unwrap();

    let mut store = EntityStore::with_capacity(count);
    store.add_system(Box::new(MovementSystem::new(
        positions.mask().union(&velocities.mask()),
    )));

    for i in 0..count {
        let x = (i % 100) as f64 * 10.0;
        let y = (i / 100) as f64 * 10.0;
        store.create_entity(vec![
            positions.create_with(|d| {
                if let Some(p) = d.as_position_mut() {
                    p.x = x;
                    p.y = y;
                }
            }),
            velocities.create_with(|d| {
                if let Some(v) = d.as_velocity_mut() {
                    v.dx = if i % 2 == 0 { 30.0 } else { -30.0 };
                }
            }),
            gravities.create(),
            bodies.create(),
            colliders.create(),
        ]);
    }
    store
}

fn bench_frame_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_update");

    for count in [100, 1000] {
        group.bench_function(format!("{count}_entities"), |b| {
            let mut store = populated_store(count);
            b.iter(|| store.update(16.0));
        });
    }

    group.finish();
}

fn bench_entity_churn(c: &mut Criterion) {
    c.bench_function("create_remove_sweep_100", |b| {
        let mut registry = ComponentRegistry::new();
        let positions = registry
            .register(ComponentData::Position(Position::default()))
            .unwrap();
        let mut store = EntityStore::new();

        b.iter(|| {
            let ids: Vec<_> = (0..100)
                .map(|_| store.create_entity(vec![positions.create()]))
                .collect();
            for id in ids {
                store.remove_entity(id);
            }
            store.update(16.0);
        });
    });
}

criterion_group!(benches, bench_frame_update, bench_entity_churn);
criterion_main!(benches);
