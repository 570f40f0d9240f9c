//! Capability masks and the system filter.
//!
//! The world assigns each component kind a bit in a fixed-width mask
//! the first time that kind is attached anywhere. Every entity carries
//! a [`KindSet`] of the kinds it currently holds, so a system's
//! capability filter reduces to a bitmask-subset test instead of
//! per-entity map probing.

use std::collections::HashMap;

use crate::component::{Component, KindId};

/// Maximum number of distinct component kinds a world can hold.
///
/// One bit per kind in the capability mask.
pub const MAX_KINDS: usize = 128;

/// A fixed-width set of component kinds, one bit per kind.
///
/// Bit positions are assigned by the world's [`KindTable`]; a `KindSet`
/// is only meaningful relative to the table that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KindSet(u128);

impl KindSet {
    /// The empty set.
    pub const EMPTY: KindSet = KindSet(0);

    /// Insert the kind at the given bit position.
    pub fn insert(&mut self, bit: u8) {
        self.0 |= 1 << bit;
    }

    /// Returns `true` if the kind at the given bit position is present.
    #[must_use]
    pub fn contains(self, bit: u8) -> bool {
        self.0 & (1 << bit) != 0
    }

    /// Returns `true` if every kind in `other` is also in `self`.
    ///
    /// The empty set is a subset of everything, so an empty `other` is
    /// vacuously satisfied.
    #[must_use]
    pub fn contains_all(self, other: KindSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no kinds are present.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of kinds in the set.
    #[must_use]
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }
}

/// Assigns each [`KindId`] a stable bit position on first use.
///
/// Bits are never reassigned, so any mask built from this table stays
/// valid for the lifetime of the world.
#[derive(Debug, Default)]
pub struct KindTable {
    bits: HashMap<KindId, u8>,
}

impl KindTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bit position for a kind, assigning the next free bit
    /// if the kind has not been seen before.
    ///
    /// Returns `None` when all [`MAX_KINDS`] bits are taken; the caller
    /// turns that into a proper error.
    pub fn intern(&mut self, kind: KindId) -> Option<u8> {
        if let Some(&bit) = self.bits.get(&kind) {
            return Some(bit);
        }
        if self.bits.len() >= MAX_KINDS {
            return None;
        }
        let bit = self.bits.len() as u8;
        self.bits.insert(kind, bit);
        Some(bit)
    }

    /// Returns the bit position for a kind that has already been
    /// interned, or `None` if no component of this kind has ever been
    /// attached.
    #[must_use]
    pub fn bit(&self, kind: KindId) -> Option<u8> {
        self.bits.get(&kind).copied()
    }

    /// Number of kinds interned so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` if no kinds have been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Resolve a filter against this table.
    ///
    /// Returns the required-kind mask, or `None` if any required kind
    /// has never been attached anywhere — in that case no entity can
    /// satisfy the filter.
    #[must_use]
    pub fn resolve(&self, filter: &Filter) -> Option<KindSet> {
        let mut mask = KindSet::EMPTY;
        for &kind in filter.kinds() {
            mask.insert(self.bit(kind)?);
        }
        Some(mask)
    }
}

/// A capability filter: the set of kinds an entity must hold for a
/// system's pass to include it.
///
/// Built at system construction time with the required component types;
/// resolved to a bitmask fresh each tick, so components attached or
/// entities created between ticks change which systems match.
///
/// # Examples
///
/// ```rust
/// use ecs_core::{Component, Filter};
///
/// struct Position;
/// impl Component for Position {
///     fn type_name() -> &'static str { "Position" }
/// }
/// struct Velocity;
/// impl Component for Velocity {
///     fn type_name() -> &'static str { "Velocity" }
/// }
///
/// let filter = Filter::new().require::<Position>().require::<Velocity>();
/// assert_eq!(filter.kinds().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Filter {
    required: Vec<KindId>,
}

impl Filter {
    /// Create an empty filter. An empty filter matches every entity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the component kind `T`.
    #[must_use]
    pub fn require<T: Component>(mut self) -> Self {
        self.required.push(T::kind());
        self
    }

    /// Require a kind by its raw [`KindId`].
    #[must_use]
    pub fn require_kind(mut self, kind: KindId) -> Self {
        self.required.push(kind);
        self
    }

    /// The required kinds, in the order they were added.
    #[must_use]
    pub fn kinds(&self) -> &[KindId] {
        &self.required
    }

    /// Returns `true` if the filter has no requirements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_set_subset() {
        let mut caps = KindSet::EMPTY;
        caps.insert(0);
        caps.insert(3);

        let mut wanted = KindSet::EMPTY;
        wanted.insert(3);

        assert!(caps.contains_all(wanted));
        assert!(caps.contains_all(KindSet::EMPTY));

        wanted.insert(5);
        assert!(!caps.contains_all(wanted));
    }

    #[test]
    fn test_kind_set_empty_is_vacuously_satisfied() {
        assert!(KindSet::EMPTY.contains_all(KindSet::EMPTY));
    }

    #[test]
    fn test_table_interns_stable_bits() {
        let mut table = KindTable::new();
        let a = KindId::from_name("A");
        let b = KindId::from_name("B");

        let bit_a = table.intern(a).unwrap();
        let bit_b = table.intern(b).unwrap();
        assert_ne!(bit_a, bit_b);

        // Re-interning returns the same bit.
        assert_eq!(table.intern(a), Some(bit_a));
        assert_eq!(table.bit(b), Some(bit_b));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_table_full() {
        let mut table = KindTable::new();
        for i in 0..MAX_KINDS {
            assert!(table.intern(KindId(i as u64)).is_some());
        }
        assert!(table.intern(KindId(u64::MAX)).is_none());
        // Existing kinds still resolve.
        assert!(table.intern(KindId(0)).is_some());
    }

    #[test]
    fn test_resolve_unknown_kind_yields_none() {
        let table = KindTable::new();
        let filter = Filter::new().require_kind(KindId::from_name("Position"));
        assert!(table.resolve(&filter).is_none());
    }

    #[test]
    fn test_resolve_empty_filter_is_empty_mask() {
        let table = KindTable::new();
        let mask = table.resolve(&Filter::new()).unwrap();
        assert!(mask.is_empty());
    }
}
