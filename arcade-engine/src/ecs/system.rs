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
//! The System trait and per-System membership bookkeeping
//!
//! A System declares a required capability mask; the store keeps its member
//! list in sync as entities gain and lose components. Systems run in
//! ascending priority order, ties broken by installation order.

use crate::ecs::mask::CapabilityMask;
use crate::ecs::store::EntityStore;
use crate::ecs::EntityId;

/// Well-known priority bands for scheduling Systems.
///
/// Lower priorities run earlier in the frame. These are conventions, not
/// enforced ranges; any `i32` is a valid priority.
pub mod priorities {
    /// Input sampling, before any simulation.
    pub const INPUT: i32 = 0;
    /// Game behavior and AI.
    pub const BEHAVIOR: i32 = 50;
    /// Physics and movement; the default priority.
    pub const PHYSICS: i32 = 100;
    /// Rendering preparation, after all simulation.
    pub const RENDER: i32 = 1000;
}

/// A unit of per-frame behavior over entities matching a capability mask.
///
/// The store calls the lifecycle hooks in a fixed order each frame: every
/// System's [`on_start`](System::on_start), then [`update`](System::update)
/// once per member entity, then every System's [`on_end`](System::on_end).
/// All hooks receive the store mutably, so a System may create and remove
/// entities mid-frame; removals take effect at the end-of-frame sweep.
pub trait System: Send + Sync {
    /// The component bits an entity must carry to be a member.
    fn required_mask(&self) -> CapabilityMask;

    /// Scheduling priority; lower runs earlier. Defaults to
    /// [`priorities::PHYSICS`].
    fn priority(&self) -> i32 {
        priorities::PHYSICS
    }

    /// Diagnostic name, defaulting to the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called once when the System is installed, before membership seeding.
    fn init(&mut self, _store: &mut EntityStore) {}

    /// Called once per frame before any per-entity work.
    fn on_start(&mut self, _store: &mut EntityStore, _dt_ms: f64) {}

    /// Called once per member entity per frame.
    fn update(&mut self, _store: &mut EntityStore, _entity: EntityId, _dt_ms: f64) {}

    /// Called once per frame after all per-entity work.
    fn on_end(&mut self, _store: &mut EntityStore, _dt_ms: f64) {}
}

/// Store-side record for one installed System: its mask, member list, and
/// the boxed System itself.
///
/// The box sits in an `Option` so the store can take it out while running
/// hooks that need the store mutably, then put it back.
pub(crate) struct SystemSlot {
    pub(crate) priority: i32,
    pub(crate) mask: CapabilityMask,
    pub(crate) entities: Vec<EntityId>,
    pub(crate) system: Option<Box<dyn System>>,
}

impl SystemSlot {
    pub(crate) fn new(system: Box<dyn System>) -> Self {
        SystemSlot {
            priority: system.priority(),
            mask: system.required_mask(),
            entities: Vec::new(),
            system: Some(system),
        }
    }

    /// Add `entity` when its mask satisfies this System and it is not
    /// already a member. Membership order is insertion order.
    pub(crate) fn add_entity_if_match(&mut self, entity: EntityId, mask: &CapabilityMask) {
        if mask.match_all(&self.mask) && !self.contains(entity) {
            self.entities.push(entity);
        }
    }

    /// Drop `entity` when its mask no longer satisfies this System.
    pub(crate) fn remove_entity_if_not_match(&mut self, entity: EntityId, mask: &CapabilityMask) {
        if !mask.match_all(&self.mask) {
            self.remove_entity(entity);
        }
    }

    /// Drop `entity` from the member list, if present.
    pub(crate) fn remove_entity(&mut self, entity: EntityId) {
        if let Some(pos) = self.entities.iter().position(|&e| e == entity) {
            self.entities.remove(pos);
        }
    }

    pub(crate) fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains(&entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopSystem {
        mask: CapabilityMask,
    }

    impl System for NoopSystem {
        fn required_mask(&self) -> CapabilityMask {
            self.mask
        }
    }

    #[test]
    fn test_default_priority_and_name() {
        let system = NoopSystem {
            mask: CapabilityMask::new(),
        };
        assert_eq!(system.priority(), priorities::PHYSICS);
        assert!(system.name().contains("NoopSystem"));
    }

    #[test]
    fn test_slot_membership_dedup() {
        let required = CapabilityMask::with_bit(0).unwrap();
        let mut slot = SystemSlot::new(Box::new(NoopSystem { mask: required }));

        let mut mask = CapabilityMask::with_bit(0).unwrap();
        mask.set_bit(1).unwrap();

        let entity = EntityId::new(0);
        slot.add_entity_if_match(entity, &mask);
        slot.add_entity_if_match(entity, &mask);
        assert_eq!(slot.entities.len(), 1);

        // Mask loses the required bit: entity drops out.
        let reduced = CapabilityMask::with_bit(1).unwrap();
        slot.remove_entity_if_not_match(entity, &reduced);
        assert!(!slot.contains(entity));
    }

    #[test]
    fn test_slot_keeps_matching_entity() {
        let required = CapabilityMask::with_bit(2).unwrap();
        let mut slot = SystemSlot::new(Box::new(NoopSystem { mask: required }));

        let mask = CapabilityMask::with_bit(2).unwrap();
        let entity = EntityId::new(5);
        slot.add_entity_if_match(entity, &mask);
        slot.remove_entity_if_not_match(entity, &mask);
        assert!(slot.contains(entity));
    }
}
