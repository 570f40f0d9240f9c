//! The [`System`] trait — the per-tick processing contract.

use crate::entity::Entity;
use crate::kind::Filter;
use crate::world::World;

/// A named processing unit executed once per tick.
///
/// Systems are stateless across entities within a tick but may hold
/// their own configuration (arena bounds, damage values); entity state
/// lives in the world, never in the system. A system declares an optional
/// capability [`Filter`]; the scheduler evaluates it fresh each tick
/// against the current live list and hands the matching subset to
/// [`System::process`]. A system without a filter receives every live
/// entity.
///
/// `process` receives entity handles, not positions: any removal a
/// system requests must go through [`World::despawn`] by identity,
/// since indices into the filtered snapshot do not correspond to the
/// world's live list.
///
/// # Examples
///
/// ```rust
/// use ecs_core::{Component, Entity, Filter, System, World};
///
/// struct Lifetime { remaining: f64 }
/// impl Component for Lifetime {
///     fn type_name() -> &'static str { "Lifetime" }
/// }
///
/// struct LifetimeSystem;
///
/// impl System for LifetimeSystem {
///     fn name(&self) -> &'static str {
///         "lifetime"
///     }
///
///     fn filter(&self) -> Option<Filter> {
///         Some(Filter::new().require::<Lifetime>())
///     }
///
///     fn process(&mut self, entities: &[Entity], world: &mut World, dt: f64) {
///         for &entity in entities {
///             if let Some(lifetime) = world.get_mut::<Lifetime>(entity) {
///                 lifetime.remaining -= dt;
///             }
///         }
///     }
/// }
/// ```
pub trait System: Send {
    /// A human-readable name, used for registration and tick logging.
    fn name(&self) -> &'static str;

    /// The capability filter for this system's pass, or `None` to
    /// receive the entire live list unfiltered.
    fn filter(&self) -> Option<Filter> {
        None
    }

    /// Run one pass over `entities` — the fresh snapshot of live
    /// entities satisfying this system's filter, in creation order.
    ///
    /// The pass may mutate components of any reachable entity (its own
    /// subset or the full list via [`World::entities`]) and may remove
    /// entities through [`World::despawn`]. Removals take effect at the
    /// world immediately but never mutate `entities` itself, so the
    /// in-progress pass stays stable.
    fn process(&mut self, entities: &[Entity], world: &mut World, dt: f64);
}
