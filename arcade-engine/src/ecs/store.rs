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
//! The entity store: slots, components, Systems, and the frame loop
//!
//! The store owns every entity slot, the component arena, and the installed
//! Systems. It maintains two invariants at all times:
//!
//! * an entity's capability mask equals the union of its attached
//!   components' bits, and
//! * an entity is a member of exactly those Systems whose required mask its
//!   own mask satisfies.
//!
//! Entity removal is deferred: a removed entity stops matching Systems at
//! once but keeps its slot and components until the end-of-frame sweep, so
//! ids never change meaning mid-frame.

use crate::ecs::component::{Component, ComponentArena, ComponentData, ComponentKind};
use crate::ecs::entity::LifeState;
use crate::ecs::mask::CapabilityMask;
use crate::ecs::system::{System, SystemSlot};
use crate::ecs::EntityId;

/// Slot count allocated the first time the store needs capacity.
const INITIAL_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
struct EntitySlot {
    state: LifeState,
    mask: CapabilityMask,
}

impl Default for EntitySlot {
    fn default() -> Self {
        EntitySlot {
            state: LifeState::Dead,
            mask: CapabilityMask::new(),
        }
    }
}

/// Owner of all entities, components, and Systems.
///
/// # Examples
///
/// ```
/// use arcade_engine::ecs::{ComponentData, ComponentRegistry, EntityStore};
/// use arcade_engine::ecs::components::Position;
///
/// let mut registry = ComponentRegistry::new();
/// let positions = registry
///     .register(ComponentData::Position(Position::default()))
///     .unwrap();
///
/// let mut store = EntityStore::new();
/// let player = store.create_entity(vec![positions.create()]);
/// assert!(store.is_living(player));
///
/// store.update(16.0);
/// ```
pub struct EntityStore {
    slots: Vec<EntitySlot>,
    free: Vec<usize>,
    dying: Vec<EntityId>,
    components: ComponentArena,
    systems: Vec<SystemSlot>,
    pending_systems: Vec<Box<dyn System>>,
    in_frame: bool,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        EntityStore {
            slots: Vec::new(),
            free: Vec::new(),
            dying: Vec::new(),
            components: ComponentArena::new(),
            systems: Vec::new(),
            pending_systems: Vec::new(),
            in_frame: false,
        }
    }

    /// Create a store with slots for `capacity` entities pre-allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut store = EntityStore::new();
        store.slots.resize_with(capacity, EntitySlot::default);
        store.components.grow(capacity);
        for index in (0..capacity).rev() {
            store.free.push(index);
        }
        store
    }

    fn allocate_id(&mut self) -> EntityId {
        if let Some(index) = self.free.pop() {
            return EntityId::new(index);
        }
        let old = self.slots.len();
        let capacity = if old == 0 { INITIAL_CAPACITY } else { old * 2 };
        self.slots.resize_with(capacity, EntitySlot::default);
        self.components.grow(capacity);
        for index in ((old + 1)..capacity).rev() {
            self.free.push(index);
        }
        EntityId::new(old)
    }

    /// Create an entity carrying the given components.
    ///
    /// The returned id is stable until the entity is removed and swept.
    pub fn create_entity(&mut self, components: Vec<Component>) -> EntityId {
        let entity = self.allocate_id();
        self.slots[entity.index()].state = LifeState::Living;
        for component in components {
            self.components.insert(entity, component);
        }
        self.refresh_mask(entity);
        self.refresh_membership(entity);
        entity
    }

    /// Create an entity with the same components as `source`.
    ///
    /// Returns `None` when `source` is not living. Shared-handle components
    /// (tile colliders) alias the same underlying data.
    pub fn copy_entity(&mut self, source: EntityId) -> Option<EntityId> {
        if !self.is_living(source) {
            return None;
        }
        let cloned: Vec<Component> = self.components.attached(source).cloned().collect();
        Some(self.create_entity(cloned))
    }

    /// Request removal of an entity.
    ///
    /// The entity leaves every System immediately but keeps its id, slot,
    /// and components until the end-of-frame sweep. Removing a non-living
    /// entity is a logged no-op.
    pub fn remove_entity(&mut self, entity: EntityId) {
        if !self.is_living(entity) {
            log::warn!("remove_entity on non-living {entity}");
            return;
        }
        self.slots[entity.index()].state = LifeState::Dying;
        for slot in &mut self.systems {
            slot.remove_entity(entity);
        }
        self.dying.push(entity);
    }

    /// Attach a component, replacing any existing instance of the same kind.
    ///
    /// Returns the replaced instance, if any. Attaching to a non-living
    /// entity is a logged no-op.
    pub fn add_component(&mut self, entity: EntityId, component: Component) -> Option<Component> {
        if !self.is_living(entity) {
            log::warn!("add_component on non-living {entity}");
            return None;
        }
        let replaced = self.components.insert(entity, component);
        self.refresh_mask(entity);
        self.refresh_membership(entity);
        replaced
    }

    /// Detach and return the instance of `kind`, if attached.
    ///
    /// Detaching may drop the entity out of Systems whose mask it no longer
    /// satisfies.
    pub fn remove_component(&mut self, entity: EntityId, kind: ComponentKind) -> Option<Component> {
        if !self.is_living(entity) {
            return None;
        }
        let removed = self.components.remove(entity, kind)?;
        self.refresh_mask(entity);
        self.refresh_membership(entity);
        Some(removed)
    }

    fn refresh_mask(&mut self, entity: EntityId) {
        let mut mask = CapabilityMask::new();
        for component in self.components.attached(entity) {
            mask.set_bit_unchecked(component.bit());
        }
        self.slots[entity.index()].mask = mask;
    }

    fn refresh_membership(&mut self, entity: EntityId) {
        let mask = self.slots[entity.index()].mask;
        for slot in &mut self.systems {
            slot.add_entity_if_match(entity, &mask);
            slot.remove_entity_if_not_match(entity, &mask);
        }
    }

    /// Borrow the component of `kind` attached to a living entity.
    pub fn component(&self, entity: EntityId, kind: ComponentKind) -> Option<&Component> {
        if !self.is_living(entity) {
            return None;
        }
        self.components.get(entity, kind)
    }

    /// Mutably borrow the component of `kind` attached to a living entity.
    ///
    /// Payload mutation never changes the entity's mask, so membership does
    /// not need refreshing here.
    pub fn component_mut(&mut self, entity: EntityId, kind: ComponentKind) -> Option<&mut Component> {
        if !self.is_living(entity) {
            return None;
        }
        self.components.get_mut(entity, kind)
    }

    /// Borrow the payload of `kind` attached to a living entity.
    pub fn data(&self, entity: EntityId, kind: ComponentKind) -> Option<&ComponentData> {
        self.component(entity, kind).map(Component::data)
    }

    /// Mutably borrow the payload of `kind` attached to a living entity.
    pub fn data_mut(&mut self, entity: EntityId, kind: ComponentKind) -> Option<&mut ComponentData> {
        self.component_mut(entity, kind).map(Component::data_mut)
    }

    /// True when `entity` exists and has not been removed.
    pub fn is_living(&self, entity: EntityId) -> bool {
        self.slots
            .get(entity.index())
            .map_or(false, |slot| slot.state == LifeState::Living)
    }

    /// The capability mask of a living entity.
    pub fn mask_of(&self, entity: EntityId) -> Option<CapabilityMask> {
        if !self.is_living(entity) {
            return None;
        }
        Some(self.slots[entity.index()].mask)
    }

    /// Look up a living entity by its raw id value.
    pub fn get_entity_by_id(&self, raw: usize) -> Option<EntityId> {
        let entity = EntityId::new(raw);
        if self.is_living(entity) {
            Some(entity)
        } else {
            None
        }
    }

    /// Look up a living entity by its `Name` component.
    ///
    /// Linear scan; intended for scene setup and debugging, not per-frame
    /// hot paths. Returns the lowest-id match when names collide.
    pub fn get_entity_by_name(&self, name: &str) -> Option<EntityId> {
        self.living_entities().find(|&entity| {
            self.components
                .get(entity, ComponentKind::Name)
                .and_then(|c| c.data().as_name())
                .map_or(false, |n| n.0 == name)
        })
    }

    /// Iterate over all living entity ids in slot order.
    pub fn living_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.state == LifeState::Living)
            .map(|(index, _)| EntityId::new(index))
    }

    /// Number of living entities.
    pub fn entity_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.state == LifeState::Living)
            .count()
    }

    /// Install a System.
    ///
    /// The System's `init` hook runs first, then its member list is seeded
    /// from the living entities. Systems added from inside a frame are
    /// deferred and installed after that frame's sweep.
    pub fn add_system(&mut self, system: Box<dyn System>) {
        if self.in_frame {
            self.pending_systems.push(system);
            return;
        }
        self.install_system(system);
    }

    fn install_system(&mut self, system: Box<dyn System>) {
        let mut slot = SystemSlot::new(system);
        if let Some(mut boxed) = slot.system.take() {
            boxed.init(self);
            slot.system = Some(boxed);
        }
        for index in 0..self.slots.len() {
            if self.slots[index].state == LifeState::Living {
                let mask = self.slots[index].mask;
                slot.add_entity_if_match(EntityId::new(index), &mask);
            }
        }
        // Stable order: equal priorities keep installation order.
        let position = self
            .systems
            .partition_point(|existing| existing.priority <= slot.priority);
        self.systems.insert(position, slot);
    }

    /// Number of installed Systems, not counting deferred ones.
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// The current member list of the System with the given diagnostic name.
    pub fn system_members(&self, name: &str) -> Option<&[EntityId]> {
        self.systems
            .iter()
            .find(|slot| {
                slot.system
                    .as_ref()
                    .map_or(false, |system| system.name() == name)
            })
            .map(|slot| slot.entities.as_slice())
    }

    /// Advance the simulation by `dt_ms` milliseconds.
    ///
    /// Runs three phases over the Systems in priority order: every
    /// `on_start`, then `update` once per member entity, then every
    /// `on_end`. Entities removed during the frame are swept afterwards and
    /// their ids returned to the free list; Systems added during the frame
    /// are installed after the sweep.
    pub fn update(&mut self, dt_ms: f64) {
        self.in_frame = true;
        let count = self.systems.len();

        for index in 0..count {
            if let Some(mut system) = self.systems[index].system.take() {
                system.on_start(self, dt_ms);
                self.systems[index].system = Some(system);
            }
        }

        for index in 0..count {
            if let Some(mut system) = self.systems[index].system.take() {
                // Snapshot so membership changes mid-frame cannot skew the
                // iteration; dropouts are re-checked before each call.
                let members = self.systems[index].entities.clone();
                for entity in members {
                    if self.is_living(entity) && self.systems[index].contains(entity) {
                        system.update(self, entity, dt_ms);
                    }
                }
                self.systems[index].system = Some(system);
            }
        }

        for index in 0..count {
            if let Some(mut system) = self.systems[index].system.take() {
                system.on_end(self, dt_ms);
                self.systems[index].system = Some(system);
            }
        }

        self.sweep();
        self.in_frame = false;

        let pending = std::mem::take(&mut self.pending_systems);
        for system in pending {
            self.install_system(system);
        }
    }

    fn sweep(&mut self) {
        let dying = std::mem::take(&mut self.dying);
        for entity in dying {
            log::debug!("sweeping {entity}");
            self.components.clear_entity(entity);
            let slot = &mut self.slots[entity.index()];
            slot.mask.clear();
            slot.state = LifeState::Dead;
            self.free.push(entity.index());
        }
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}
