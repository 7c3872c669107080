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
//! Component model and typed arena storage
//!
//! Components are tagged fixed-shape records: [`ComponentKind`] enumerates
//! the shapes, [`ComponentData`] carries one payload per kind, and
//! [`Component`] stamps a payload with the mask bit and type id its factory
//! was registered with. Storage is a typed arena with one table per kind,
//! indexed by entity id, so an entity holds at most one instance of a kind.

use crate::ecs::components::{
    Body, CollisionGroup, Constraint, Gravity, Name, Position, Size, Sprite, TileCollider,
    Velocity,
};
use crate::ecs::EntityId;

/// The fixed set of component shapes known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// World position.
    Position,
    /// Velocity with per-axis limits.
    Velocity,
    /// Rectangular position clamp.
    Constraint,
    /// Physics body (bounds, mass, restitution, resistance, contacts).
    Body,
    /// Constant acceleration.
    Gravity,
    /// Candidate list for entity-vs-entity collision.
    CollisionGroup,
    /// Tile-grid collision reference.
    TileCollider,
    /// Render size.
    Size,
    /// Drawable sprite reference.
    Sprite,
    /// Human-readable label.
    Name,
}

impl ComponentKind {
    /// Number of component kinds; bounds the arena's table count.
    pub const COUNT: usize = 10;

    /// All kinds, in table order.
    pub const ALL: [ComponentKind; Self::COUNT] = [
        ComponentKind::Position,
        ComponentKind::Velocity,
        ComponentKind::Constraint,
        ComponentKind::Body,
        ComponentKind::Gravity,
        ComponentKind::CollisionGroup,
        ComponentKind::TileCollider,
        ComponentKind::Size,
        ComponentKind::Sprite,
        ComponentKind::Name,
    ];

    fn table_index(self) -> usize {
        self as usize
    }
}

/// A component payload, one variant per [`ComponentKind`].
#[derive(Debug, Clone)]
pub enum ComponentData {
    /// See [`Position`].
    Position(Position),
    /// See [`Velocity`].
    Velocity(Velocity),
    /// See [`Constraint`].
    Constraint(Constraint),
    /// See [`Body`].
    Body(Body),
    /// See [`Gravity`].
    Gravity(Gravity),
    /// See [`CollisionGroup`].
    CollisionGroup(CollisionGroup),
    /// See [`TileCollider`].
    TileCollider(TileCollider),
    /// See [`Size`].
    Size(Size),
    /// See [`Sprite`].
    Sprite(Sprite),
    /// See [`Name`].
    Name(Name),
}

impl ComponentData {
    /// The kind tag of this payload.
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentData::Position(_) => ComponentKind::Position,
            ComponentData::Velocity(_) => ComponentKind::Velocity,
            ComponentData::Constraint(_) => ComponentKind::Constraint,
            ComponentData::Body(_) => ComponentKind::Body,
            ComponentData::Gravity(_) => ComponentKind::Gravity,
            ComponentData::CollisionGroup(_) => ComponentKind::CollisionGroup,
            ComponentData::TileCollider(_) => ComponentKind::TileCollider,
            ComponentData::Size(_) => ComponentKind::Size,
            ComponentData::Sprite(_) => ComponentKind::Sprite,
            ComponentData::Name(_) => ComponentKind::Name,
        }
    }
}

macro_rules! data_accessors {
    ($(($variant:ident, $ty:ty, $as_ref:ident, $as_mut:ident)),* $(,)?) => {
        impl ComponentData {
            $(
                /// Borrow the payload when this record is the matching variant.
                pub fn $as_ref(&self) -> Option<&$ty> {
                    match self {
                        ComponentData::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                /// Mutably borrow the payload when this record is the matching variant.
                pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        ComponentData::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            )*
        }
    };
}

data_accessors!(
    (Position, Position, as_position, as_position_mut),
    (Velocity, Velocity, as_velocity, as_velocity_mut),
    (Constraint, Constraint, as_constraint, as_constraint_mut),
    (Body, Body, as_body, as_body_mut),
    (Gravity, Gravity, as_gravity, as_gravity_mut),
    (CollisionGroup, CollisionGroup, as_collision_group, as_collision_group_mut),
    (TileCollider, TileCollider, as_tile_collider, as_tile_collider_mut),
    (Size, Size, as_size, as_size_mut),
    (Sprite, Sprite, as_sprite, as_sprite_mut),
    (Name, Name, as_name, as_name_mut),
);

/// A component instance: a payload stamped with its factory's mask bit and
/// type id.
///
/// Identity for System matching purposes is the bit, not the instance, so
/// the entity store recomputes masks from attached instances rather than
/// toggling bits incrementally.
#[derive(Debug, Clone)]
pub struct Component {
    bit: usize,
    type_id: u32,
    data: ComponentData,
}

impl Component {
    pub(crate) fn from_parts(bit: usize, type_id: u32, data: ComponentData) -> Self {
        Component { bit, type_id, data }
    }

    /// The mask bit assigned to this component's type.
    pub fn bit(&self) -> usize {
        self.bit
    }

    /// The registry-assigned type id.
    pub fn type_id(&self) -> u32 {
        self.type_id
    }

    /// The kind tag of the payload.
    pub fn kind(&self) -> ComponentKind {
        self.data.kind()
    }

    /// Borrow the payload.
    pub fn data(&self) -> &ComponentData {
        &self.data
    }

    /// Mutably borrow the payload.
    pub fn data_mut(&mut self) -> &mut ComponentData {
        &mut self.data
    }
}

/// Typed arena: one table per component kind, indexed by entity id.
///
/// Tables grow with the store's entity capacity; growth never fails and
/// lookups outside the grown range simply report absence.
#[derive(Debug)]
pub struct ComponentArena {
    tables: Vec<Vec<Option<Component>>>,
}

impl Default for ComponentArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentArena {
    /// Create an empty arena with one table per kind.
    pub fn new() -> Self {
        ComponentArena {
            tables: vec![Vec::new(); ComponentKind::COUNT],
        }
    }

    /// Ensure every table can index entities up to `capacity`.
    pub fn grow(&mut self, capacity: usize) {
        for table in &mut self.tables {
            if table.len() < capacity {
                table.resize_with(capacity, || None);
            }
        }
    }

    /// Attach a component, replacing any existing instance of the same kind.
    pub fn insert(&mut self, entity: EntityId, component: Component) -> Option<Component> {
        let table = &mut self.tables[component.kind().table_index()];
        if entity.index() >= table.len() {
            table.resize_with(entity.index() + 1, || None);
        }
        table[entity.index()].replace(component)
    }

    /// Detach and return the instance of `kind`, if attached.
    pub fn remove(&mut self, entity: EntityId, kind: ComponentKind) -> Option<Component> {
        self.tables[kind.table_index()]
            .get_mut(entity.index())
            .and_then(|slot| slot.take())
    }

    /// Borrow the instance of `kind`, if attached.
    pub fn get(&self, entity: EntityId, kind: ComponentKind) -> Option<&Component> {
        self.tables[kind.table_index()]
            .get(entity.index())
            .and_then(|slot| slot.as_ref())
    }

    /// Mutably borrow the instance of `kind`, if attached.
    pub fn get_mut(&mut self, entity: EntityId, kind: ComponentKind) -> Option<&mut Component> {
        self.tables[kind.table_index()]
            .get_mut(entity.index())
            .and_then(|slot| slot.as_mut())
    }

    /// True when an instance of `kind` is attached.
    pub fn contains(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.get(entity, kind).is_some()
    }

    /// Iterate over every component attached to `entity`.
    pub fn attached(&self, entity: EntityId) -> impl Iterator<Item = &Component> + '_ {
        self.tables
            .iter()
            .filter_map(move |table| table.get(entity.index()).and_then(|slot| slot.as_ref()))
    }

    /// Detach every component of `entity`.
    pub fn clear_entity(&mut self, entity: EntityId) {
        for table in &mut self.tables {
            if let Some(slot) = table.get_mut(entity.index()) {
                *slot = None;
            }
        }
    }
}
