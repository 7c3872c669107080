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
//! Component type registration
//!
//! The registry assigns each component kind a stable mask bit and a unique
//! type id, and hands back a [`ComponentFactory`] that stamps instances with
//! both. Registration is the only point where the bit budget is enforced;
//! creating instances from an issued factory never fails.

use crate::ecs::component::{Component, ComponentData, ComponentKind};
use crate::ecs::mask::{CapabilityMask, MAX_COMPONENT_TYPES};
use crate::error::EngineError;

/// Assigns mask bits and type ids to component kinds.
///
/// Bits are handed out in registration order. Re-registering a kind reuses
/// its existing bit (so masks built from earlier factories stay valid) but
/// replaces the defaults and burns a fresh type id.
///
/// # Examples
///
/// ```
/// use arcade_engine::ecs::{ComponentData, ComponentRegistry};
/// use arcade_engine::ecs::components::Position;
///
/// let mut registry = ComponentRegistry::new();
/// let positions = registry
///     .register(ComponentData::Position(Position::default()))
///     .unwrap();
/// let component = positions.create();
/// assert_eq!(component.bit(), 0);
/// ```
#[derive(Debug)]
pub struct ComponentRegistry {
    bit_budget: usize,
    next_bit: usize,
    next_type_id: u32,
    assigned: [Option<usize>; ComponentKind::COUNT],
}

impl ComponentRegistry {
    /// Create a registry with the full mask width as its bit budget.
    pub fn new() -> Self {
        Self::with_bit_budget(MAX_COMPONENT_TYPES)
    }

    /// Create a registry with a smaller bit budget.
    ///
    /// Budgets larger than the mask width are clamped to it.
    pub fn with_bit_budget(budget: usize) -> Self {
        ComponentRegistry {
            bit_budget: budget.min(MAX_COMPONENT_TYPES),
            next_bit: 0,
            next_type_id: 0,
            assigned: [None; ComponentKind::COUNT],
        }
    }

    /// Register a component kind with the given defaults.
    ///
    /// Fails with [`EngineError::TooManyComponentTypes`] when the kind is new
    /// and the bit budget is exhausted. Re-registration always succeeds and
    /// reuses the kind's existing bit.
    pub fn register(&mut self, defaults: ComponentData) -> Result<ComponentFactory, EngineError> {
        let kind = defaults.kind();
        let bit = match self.assigned[kind as usize] {
            Some(bit) => bit,
            None => {
                if self.next_bit >= self.bit_budget {
                    return Err(EngineError::TooManyComponentTypes {
                        budget: self.bit_budget,
                    });
                }
                let bit = self.next_bit;
                self.next_bit += 1;
                self.assigned[kind as usize] = Some(bit);
                bit
            }
        };
        let type_id = self.next_type_id;
        self.next_type_id += 1;
        Ok(ComponentFactory {
            kind,
            bit,
            type_id,
            defaults,
        })
    }

    /// The mask bit assigned to `kind`, if registered.
    pub fn bit_of(&self, kind: ComponentKind) -> Option<usize> {
        self.assigned[kind as usize]
    }

    /// Number of distinct kinds registered so far.
    pub fn registered_count(&self) -> usize {
        self.next_bit
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Stamps out component instances for one registered kind.
#[derive(Debug, Clone)]
pub struct ComponentFactory {
    kind: ComponentKind,
    bit: usize,
    type_id: u32,
    defaults: ComponentData,
}

impl ComponentFactory {
    /// Create an instance carrying a clone of the registered defaults.
    pub fn create(&self) -> Component {
        Component::from_parts(self.bit, self.type_id, self.defaults.clone())
    }

    /// Create an instance, letting `override_fn` mutate a copy of the
    /// defaults first.
    ///
    /// If the override swaps the payload for a different kind, the change is
    /// discarded and the instance falls back to the registered defaults.
    pub fn create_with<F>(&self, override_fn: F) -> Component
    where
        F: FnOnce(&mut ComponentData),
    {
        let mut data = self.defaults.clone();
        override_fn(&mut data);
        if data.kind() != self.kind {
            log::warn!(
                "component override changed kind {:?} to {:?}; using defaults",
                self.kind,
                data.kind()
            );
            data = self.defaults.clone();
        }
        Component::from_parts(self.bit, self.type_id, data)
    }

    /// The kind this factory produces.
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// The mask bit stamped onto produced instances.
    pub fn bit(&self) -> usize {
        self.bit
    }

    /// The type id stamped onto produced instances.
    pub fn type_id(&self) -> u32 {
        self.type_id
    }

    /// A single-bit mask for this factory's kind, for building System
    /// requirement masks.
    pub fn mask(&self) -> CapabilityMask {
        let mut mask = CapabilityMask::new();
        // Bit was validated against the budget at registration.
        mask.set_bit_unchecked(self.bit);
        mask
    }
}
