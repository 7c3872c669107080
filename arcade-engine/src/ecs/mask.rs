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
//! Capability masks for component matching
//!
//! A capability mask is a fixed-width bit vector recording which component
//! types an entity carries, or which types a System requires. The superset
//! test ([`CapabilityMask::match_all`]) is the sole primitive used to decide
//! System membership.

use crate::error::EngineError;
use std::fmt;

/// Maximum number of distinct component types a mask can describe.
pub const MAX_COMPONENT_TYPES: usize = 64;

/// Fixed-width bit vector identifying a set of component types.
///
/// The invariant maintained by the entity store is that an entity's mask
/// always equals the bitwise union of the bits of its attached components;
/// a System's mask equals the union of its required component bits.
///
/// # Examples
///
/// ```
/// use arcade_engine::ecs::CapabilityMask;
///
/// let mut entity = CapabilityMask::new();
/// entity.set_bit(0).unwrap();
/// entity.set_bit(3).unwrap();
///
/// let mut required = CapabilityMask::new();
/// required.set_bit(3).unwrap();
///
/// assert!(entity.match_all(&required));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CapabilityMask {
    bits: u64,
}

impl CapabilityMask {
    /// Create an empty mask.
    pub fn new() -> Self {
        CapabilityMask { bits: 0 }
    }

    /// Create a mask with a single bit set.
    pub fn with_bit(bit: usize) -> Result<Self, EngineError> {
        let mut mask = CapabilityMask::new();
        mask.set_bit(bit)?;
        Ok(mask)
    }

    /// Set bit `bit`, idempotently.
    ///
    /// Fails with [`EngineError::CapacityExceeded`] when `bit` lies beyond
    /// the fixed mask width. This is the only failure mode a mask has.
    pub fn set_bit(&mut self, bit: usize) -> Result<(), EngineError> {
        if bit >= MAX_COMPONENT_TYPES {
            return Err(EngineError::CapacityExceeded {
                bit,
                capacity: MAX_COMPONENT_TYPES,
            });
        }
        self.bits |= 1 << bit;
        Ok(())
    }

    /// Set a bit that was already validated at registration time.
    ///
    /// Callers must guarantee `bit < MAX_COMPONENT_TYPES`.
    pub(crate) fn set_bit_unchecked(&mut self, bit: usize) {
        debug_assert!(bit < MAX_COMPONENT_TYPES);
        self.bits |= 1 << bit;
    }

    /// Check whether bit `bit` is set.
    pub fn has_bit(&self, bit: usize) -> bool {
        bit < MAX_COMPONENT_TYPES && self.bits & (1 << bit) != 0
    }

    /// Union another mask into this one.
    pub fn set_bits(&mut self, other: &CapabilityMask) {
        self.bits |= other.bits;
    }

    /// Return the union of this mask and another.
    pub fn union(mut self, other: &CapabilityMask) -> CapabilityMask {
        self.set_bits(other);
        self
    }

    /// True iff this mask is a superset of `required`.
    ///
    /// This is the sole test for "entity satisfies System requirement."
    pub fn match_all(&self, required: &CapabilityMask) -> bool {
        self.bits & required.bits == required.bits
    }

    /// True iff the two masks share any set bit.
    pub fn match_any(&self, other: &CapabilityMask) -> bool {
        self.bits & other.bits != 0
    }

    /// Zero all bits.
    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// True when no bit is set.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// A value equal between two masks iff they are bit-for-bit identical.
    ///
    /// Intended for fast comparison, not ordering.
    pub fn key(&self) -> u64 {
        self.bits
    }
}

impl fmt::Display for CapabilityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({:#018x})", self.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_bit_is_idempotent() {
        let mut mask = CapabilityMask::new();
        mask.set_bit(5).unwrap();
        let key = mask.key();
        mask.set_bit(5).unwrap();
        assert_eq!(mask.key(), key);
    }

    #[test]
    fn test_set_bit_out_of_range() {
        let mut mask = CapabilityMask::new();
        let result = mask.set_bit(MAX_COMPONENT_TYPES);
        assert_eq!(
            result,
            Err(EngineError::CapacityExceeded {
                bit: MAX_COMPONENT_TYPES,
                capacity: MAX_COMPONENT_TYPES,
            })
        );
        // The failed call must not have touched the mask.
        assert!(mask.is_empty());
    }

    #[test]
    fn test_match_all_superset() {
        let mut entity = CapabilityMask::new();
        entity.set_bit(0).unwrap();
        entity.set_bit(1).unwrap();
        entity.set_bit(2).unwrap();

        let mut required = CapabilityMask::new();
        required.set_bit(0).unwrap();
        required.set_bit(2).unwrap();

        assert!(entity.match_all(&required));
        assert!(!required.match_all(&entity));
        // Every mask is a superset of the empty mask.
        assert!(entity.match_all(&CapabilityMask::new()));
    }

    #[test]
    fn test_match_any() {
        let a = CapabilityMask::with_bit(1).unwrap();
        let b = CapabilityMask::with_bit(2).unwrap();
        let ab = a.union(&b);

        assert!(!a.match_any(&b));
        assert!(ab.match_any(&a));
        assert!(ab.match_any(&b));
        assert!(!a.match_any(&CapabilityMask::new()));
    }

    #[test]
    fn test_set_bits_union() {
        let mut mask = CapabilityMask::with_bit(0).unwrap();
        let other = CapabilityMask::with_bit(63).unwrap();
        mask.set_bits(&other);
        assert!(mask.has_bit(0));
        assert!(mask.has_bit(63));
    }

    #[test]
    fn test_clear() {
        let mut mask = CapabilityMask::with_bit(7).unwrap();
        assert!(!mask.is_empty());
        mask.clear();
        assert!(mask.is_empty());
        assert_eq!(mask.key(), 0);
    }

    #[test]
    fn test_key_equality() {
        let mut a = CapabilityMask::new();
        a.set_bit(3).unwrap();
        a.set_bit(9).unwrap();

        let mut b = CapabilityMask::new();
        b.set_bit(9).unwrap();
        b.set_bit(3).unwrap();

        assert_eq!(a.key(), b.key());

        b.set_bit(10).unwrap();
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_has_bit_out_of_range_is_false() {
        let mask = CapabilityMask::with_bit(0).unwrap();
        assert!(!mask.has_bit(MAX_COMPONENT_TYPES + 1));
    }
}
