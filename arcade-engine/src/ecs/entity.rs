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
//! Entity identifiers and lifecycle state
//!
//! Entities are stable integer ids handed out by the entity store. An id is
//! unique among currently-living entities and stays unusable while the entity
//! is dying; it becomes reusable only after the end-of-frame sweep.

use std::fmt;

/// Stable identifier for an entity.
///
/// Ids index directly into the store's slot and component tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

impl EntityId {
    /// Create an id from a raw slot index.
    pub(crate) fn new(index: usize) -> Self {
        EntityId(index)
    }

    /// The raw slot index of this id.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Lifecycle state of an entity slot.
///
/// Removal is deferred one frame: `remove_entity` moves a slot to `Dying`,
/// and the end-of-frame sweep moves it to `Dead`, returning the id to the
/// free list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LifeState {
    /// Slot is unused; its id sits on the free list.
    Dead,
    /// Entity exists and participates in Systems.
    Living,
    /// Removal requested this frame; reclaimed at the sweep.
    Dying,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_display() {
        let id = EntityId::new(42);
        assert_eq!(id.to_string(), "Entity(42)");
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn test_entity_id_equality() {
        assert_eq!(EntityId::new(1), EntityId::new(1));
        assert_ne!(EntityId::new(1), EntityId::new(2));
    }
}
