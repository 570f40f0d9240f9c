//! Core [`Component`] trait and the [`KindId`] type tag.
//!
//! Every piece of data attached to an entity must implement
//! [`Component`]. The trait requires `Send + Sync + 'static` so the
//! world as a whole stays `Send` and can be owned by any host thread.
//!
//! ## Type Identity
//!
//! [`KindId`] is derived from the component's **string name** using the
//! FNV-1a 64-bit hash algorithm. The ID is deterministic across builds,
//! which keeps kind tags stable in logs and snapshots.

use serde::{Deserialize, Serialize};

/// A unique identifier for a component kind, derived from its string
/// name using the FNV-1a 64-bit hash algorithm.
///
/// Any implementation that applies FNV-1a to the same UTF-8 name bytes
/// will produce the same `KindId`, so the tag does not depend on type
/// layout or compilation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct KindId(pub u64);

impl KindId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`KindId`] from a component's string name using the
    /// FNV-1a 64-bit hash algorithm.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`KindId`] for a Rust component type `T`.
    ///
    /// This calls `T::type_name()` and hashes it with FNV-1a, producing
    /// the same result as [`KindId::from_name`] with the same string.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self::from_name(T::type_name())
    }
}

/// The core component trait.
///
/// Components are plain data records: they carry no behaviour and no
/// reference to their owning entity. An entity holds at most one
/// component instance per kind; attaching a second instance of the same
/// kind silently replaces the first.
///
/// # Examples
///
/// ```rust
/// use ecs_core::Component;
///
/// #[derive(Debug, Clone)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: Send + Sync + 'static {
    /// A human-readable name for this component kind.
    fn type_name() -> &'static str;

    /// Returns the [`KindId`] for this component kind.
    ///
    /// The default implementation hashes [`Component::type_name()`]
    /// with FNV-1a 64-bit.
    fn kind() -> KindId {
        KindId::from_name(Self::type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Health {
        current: f32,
        max: f32,
    }

    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[test]
    fn test_kind_id_is_stable() {
        let id1 = Health::kind();
        let id2 = Health::kind();
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_kind_id_matches_from_name() {
        // The trait method and the standalone function must produce the same ID.
        let from_trait = Health::kind();
        let from_name = KindId::from_name("Health");
        assert_eq!(from_trait, from_name);
    }

    #[test]
    fn test_kind_id_differs_between_types() {
        struct Velocity {
            #[allow(dead_code)]
            x: f32,
        }
        impl Component for Velocity {
            fn type_name() -> &'static str {
                "Velocity"
            }
        }

        assert_ne!(Health::kind(), Velocity::kind());
    }

    #[test]
    fn test_fnv1a_known_vector() {
        // FNV-1a 64-bit of the empty string is the offset basis itself.
        assert_eq!(KindId::from_name(""), KindId(0xcbf2_9ce4_8422_2325));
    }
}
