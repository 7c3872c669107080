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
//! Integration tests for entity lifecycle and System membership

use arcade_engine::ecs::components::{Name, Position, Velocity};
use arcade_engine::ecs::{
    CapabilityMask, ComponentData, ComponentKind, ComponentRegistry, EntityId, EntityStore, System,
};
use arcade_engine::error::EngineError;
use std::sync::{Arc, Mutex};

struct Tracked {
    label: &'static str,
    mask: CapabilityMask,
    priority: i32,
    log: Arc<Mutex<Vec<String>>>,
}

impl System for Tracked {
    fn required_mask(&self) -> CapabilityMask {
        self.mask
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn name(&self) -> &str {
        self.label
    }

    fn on_start(&mut self, _store: &mut EntityStore, _dt_ms: f64) {
        self.log.lock().unwrap().push(format!("{}:start", self.label));
    }

    fn update(&mut self, _store: &mut EntityStore, entity: EntityId, _dt_ms: f64) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:update:{}", self.label, entity));
    }

    fn on_end(&mut self, _store: &mut EntityStore, _dt_ms: f64) {
        self.log.lock().unwrap().push(format!("{}:end", self.label));
    }
}

#[test]
fn membership_follows_component_changes() {
    let mut registry = ComponentRegistry::new();
    let positions = registry
        .register(ComponentData::Position(Position::default()))
        .unwrap();
    let velocities = registry
        .register(ComponentData::Velocity(Velocity::default()))
        .unwrap();

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut store = EntityStore::new();
    store.add_system(Box::new(Tracked {
        label: "movers",
        mask: positions.mask().union(&velocities.mask()),
        priority: 100,
        log: log.clone(),
    }));

    // Position only: not a member.
    let entity = store.create_entity(vec![positions.create()]);
    assert_eq!(store.system_members("movers").unwrap().len(), 0);

    // Gains velocity: joins.
    store.add_component(entity, velocities.create());
    assert_eq!(store.system_members("movers").unwrap(), &[entity]);

    // Loses velocity: drops out.
    store.remove_component(entity, ComponentKind::Velocity);
    assert_eq!(store.system_members("movers").unwrap().len(), 0);

    // Mask tracks the same changes.
    let mask = store.mask_of(entity).unwrap();
    assert!(mask.has_bit(positions.bit()));
    assert!(!mask.has_bit(velocities.bit()));
}

#[test]
fn systems_run_in_priority_order() {
    let mut registry = ComponentRegistry::new();
    let positions = registry
        .register(ComponentData::Position(Position::default()))
        .unwrap();

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut store = EntityStore::new();

    // Installed out of priority order on purpose.
    store.add_system(Box::new(Tracked {
        label: "render",
        mask: positions.mask(),
        priority: 1000,
        log: log.clone(),
    }));
    store.add_system(Box::new(Tracked {
        label: "input",
        mask: positions.mask(),
        priority: 0,
        log: log.clone(),
    }));
    store.add_system(Box::new(Tracked {
        label: "physics",
        mask: positions.mask(),
        priority: 100,
        log: log.clone(),
    }));

    let entity = store.create_entity(vec![positions.create()]);
    store.update(16.0);

    let entries = log.lock().unwrap().clone();
    assert_eq!(
        entries,
        vec![
            "input:start".to_string(),
            "physics:start".to_string(),
            "render:start".to_string(),
            format!("input:update:{entity}"),
            format!("physics:update:{entity}"),
            format!("render:update:{entity}"),
            "input:end".to_string(),
            "physics:end".to_string(),
            "render:end".to_string(),
        ]
    );
}

#[test]
fn removal_defers_to_end_of_frame() {
    let mut registry = ComponentRegistry::new();
    let positions = registry
        .register(ComponentData::Position(Position::default()))
        .unwrap();

    let mut store = EntityStore::new();
    let first = store.create_entity(vec![positions.create()]);
    let second = store.create_entity(vec![positions.create()]);
    assert_ne!(first, second);

    store.remove_entity(first);
    assert!(!store.is_living(first));
    assert!(store.is_living(second));

    // The dying id must not be handed out before the sweep.
    let third = store.create_entity(vec![]);
    assert_ne!(third, first);

    store.update(16.0);

    // After the sweep the id is recycled, lowest first.
    let recycled = store.create_entity(vec![]);
    assert_eq!(recycled, first);
}

#[test]
fn removed_entity_skips_remaining_updates() {
    struct Reaper {
        mask: CapabilityMask,
        victim: EntityId,
    }

    impl System for Reaper {
        fn required_mask(&self) -> CapabilityMask {
            self.mask
        }

        fn priority(&self) -> i32 {
            0
        }

        fn name(&self) -> &str {
            "reaper"
        }

        fn on_start(&mut self, store: &mut EntityStore, _dt_ms: f64) {
            store.remove_entity(self.victim);
        }
    }

    let mut registry = ComponentRegistry::new();
    let positions = registry
        .register(ComponentData::Position(Position::default()))
        .unwrap();

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut store = EntityStore::new();
    let victim = store.create_entity(vec![positions.create()]);
    let survivor = store.create_entity(vec![positions.create()]);

    store.add_system(Box::new(Reaper {
        mask: CapabilityMask::new(),
        victim,
    }));
    store.add_system(Box::new(Tracked {
        label: "observer",
        mask: positions.mask(),
        priority: 100,
        log: log.clone(),
    }));

    store.update(16.0);

    let entries = log.lock().unwrap().clone();
    assert!(entries.contains(&format!("observer:update:{survivor}")));
    assert!(!entries.contains(&format!("observer:update:{victim}")));
}

#[test]
fn mid_frame_system_add_is_deferred() {
    struct Spawner {
        log: Arc<Mutex<Vec<String>>>,
        spawned: bool,
    }

    impl System for Spawner {
        fn required_mask(&self) -> CapabilityMask {
            CapabilityMask::new()
        }

        fn name(&self) -> &str {
            "spawner"
        }

        fn on_start(&mut self, store: &mut EntityStore, _dt_ms: f64) {
            if !self.spawned {
                self.spawned = true;
                store.add_system(Box::new(Tracked {
                    label: "late",
                    mask: CapabilityMask::new(),
                    priority: 0,
                    log: self.log.clone(),
                }));
            }
        }
    }

    let log = Arc::new(Mutex::new(Vec::new()));
    let mut store = EntityStore::new();
    store.add_system(Box::new(Spawner {
        log: log.clone(),
        spawned: false,
    }));

    store.update(16.0);
    // The late system must not have run in the frame that added it.
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(store.system_count(), 2);

    store.update(16.0);
    assert!(log.lock().unwrap().contains(&"late:start".to_string()));
}

#[test]
fn copy_entity_and_name_lookup() {
    let mut registry = ComponentRegistry::new();
    let positions = registry
        .register(ComponentData::Position(Position::new(4.0, 2.0)))
        .unwrap();
    let names = registry
        .register(ComponentData::Name(Name::new("template")))
        .unwrap();

    let mut store = EntityStore::new();
    let template = store.create_entity(vec![positions.create(), names.create()]);
    let copy = store.copy_entity(template).unwrap();

    assert_ne!(copy, template);
    assert_eq!(store.mask_of(copy), store.mask_of(template));
    // Lowest id wins the name lookup when names collide.
    assert_eq!(store.get_entity_by_name("template"), Some(template));

    let pos = store
        .data(copy, ComponentKind::Position)
        .and_then(ComponentData::as_position)
        .unwrap();
    assert_eq!((pos.x, pos.y), (4.0, 2.0));
}

#[test]
fn registry_bit_budget_is_enforced() {
    let mut registry = ComponentRegistry::with_bit_budget(2);
    registry
        .register(ComponentData::Position(Position::default()))
        .unwrap();
    registry
        .register(ComponentData::Velocity(Velocity::default()))
        .unwrap();

    let err = registry
        .register(ComponentData::Name(Name::new("over")))
        .unwrap_err();
    assert_eq!(err, EngineError::TooManyComponentTypes { budget: 2 });
}
