//! Entity and component storage.
//!
//! The [`World`] owns the ordered live-entity list and one sparse
//! column per component kind. Entities are created through the world
//! and removed through the world; handed-out [`Entity`] values are
//! non-owning handles that fail lookups once the entity is gone.

use std::any::Any;
use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::builder::EntityBuilder;
use crate::component::{Component, KindId};
use crate::entity::{Entity, EntityAllocator};
use crate::kind::{Filter, KindSet, KindTable, MAX_KINDS};

/// Errors from entity and component operations.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The entity is not in the live list (never existed or was removed).
    #[error("entity {0} not found")]
    EntityNotFound(Entity),
    /// The world has seen more distinct component kinds than the
    /// capability mask can hold.
    #[error("component kind table full: at most {MAX_KINDS} distinct kinds per world")]
    KindTableFull,
}

/// Type-erased storage for one component kind.
///
/// Each concrete column is a sparse `HashMap<Entity, T>`; the trait
/// exists so the world can hold all columns in one map and clear an
/// entity's cell without knowing the component type.
trait Column: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Drop the cell for `entity`, if present.
    fn clear(&mut self, entity: Entity);
}

struct TypedColumn<T: Component> {
    cells: HashMap<Entity, T>,
}

impl<T: Component> TypedColumn<T> {
    fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }
}

impl<T: Component> Column for TypedColumn<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clear(&mut self, entity: Entity) {
        self.cells.remove(&entity);
    }
}

/// Per-entity bookkeeping: display name and capability mask.
#[derive(Debug, Default)]
struct EntityMeta {
    name: Option<String>,
    caps: KindSet,
}

/// The registry's entity store.
///
/// Owns entity allocation, the ordered live list (creation order, which
/// is observable: it drives snapshot order and therefore deterministic
/// processing and labeling order), per-kind component columns, and the
/// kind table backing capability masks.
#[derive(Default)]
pub struct World {
    /// Entity ID allocator.
    allocator: EntityAllocator,
    /// Live entities in creation order.
    order: Vec<Entity>,
    /// Name and capability mask per live entity.
    meta: HashMap<Entity, EntityMeta>,
    /// Sparse component columns, one per kind.
    columns: HashMap<KindId, Box<dyn Column>>,
    /// Kind-to-bit assignments for capability masks.
    kinds: KindTable,
}

impl World {
    /// Create a new empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Entity lifecycle --

    /// Create a new unnamed entity and return a builder for attaching
    /// components.
    ///
    /// The entity is live as soon as this returns, even if no
    /// components are ever attached — an empty entity is legal.
    pub fn spawn(&mut self) -> EntityBuilder<'_> {
        EntityBuilder::new(self, None)
    }

    /// Create a new entity with a display name.
    ///
    /// Names are purely informational and need not be unique.
    pub fn spawn_named(&mut self, name: impl Into<String>) -> EntityBuilder<'_> {
        EntityBuilder::new(self, Some(name.into()))
    }

    pub(crate) fn create(&mut self, name: Option<String>) -> Entity {
        let entity = self.allocator.allocate();
        self.order.push(entity);
        self.meta.insert(entity, EntityMeta { name, caps: KindSet::EMPTY });
        debug!(%entity, "entity created");
        entity
    }

    /// Remove an entity from the live list, dropping all its components.
    ///
    /// The live list is scanned linearly and the first matching entity
    /// is removed; the relative order of the remainder is preserved.
    /// Removing an entity that is not live is a non-fatal condition: it
    /// is logged and the call returns `false` without effect, so two
    /// systems racing to remove the same entity in one tick are safe.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        let Some(pos) = self.order.iter().position(|&e| e == entity) else {
            warn!(%entity, "remove requested for entity not in the live list");
            return false;
        };
        self.order.remove(pos);
        self.meta.remove(&entity);
        for column in self.columns.values_mut() {
            column.clear(entity);
        }
        debug!(%entity, "entity removed");
        true
    }

    /// Returns `true` if the entity is live.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.meta.contains_key(&entity)
    }

    /// The entity's display name, if it was given one.
    #[must_use]
    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.meta.get(&entity)?.name.as_deref()
    }

    /// Live entities in creation order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.order
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no entities are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // -- Component operations --

    /// Attach a component to an entity, replacing any prior component
    /// of the same kind. Latest attach wins; replacement is silent.
    ///
    /// # Errors
    ///
    /// [`WorldError::EntityNotFound`] if the entity is not live;
    /// [`WorldError::KindTableFull`] if this is the 129th distinct kind
    /// the world has seen.
    pub fn attach<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), WorldError> {
        let meta = self
            .meta
            .get_mut(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        let bit = self
            .kinds
            .intern(T::kind())
            .ok_or(WorldError::KindTableFull)?;
        meta.caps.insert(bit);

        let column = self
            .columns
            .entry(T::kind())
            .or_insert_with(|| Box::new(TypedColumn::<T>::new()));
        let column = column
            .as_any_mut()
            .downcast_mut::<TypedColumn<T>>()
            .expect("kind id collision between component types");
        column.cells.insert(entity, component);
        Ok(())
    }

    /// Get a component from an entity.
    ///
    /// Returns `None` if the entity does not hold the kind or is not
    /// live. Callers that must distinguish the two check
    /// [`World::contains`] or [`World::has`] first; dereferencing an
    /// absent component is a caller error, not a runtime fault.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.column::<T>()?.cells.get(&entity)
    }

    /// Get a component from an entity mutably.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.column_mut::<T>()?.cells.get_mut(&entity)
    }

    /// Returns `true` if the entity is live and holds kind `T`.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        let Some(bit) = self.kinds.bit(T::kind()) else {
            return false;
        };
        self.meta
            .get(&entity)
            .is_some_and(|meta| meta.caps.contains(bit))
    }

    /// Returns `true` if the entity is live and holds every kind the
    /// filter requires. An empty filter is vacuously satisfied.
    #[must_use]
    pub fn satisfies(&self, entity: Entity, filter: &Filter) -> bool {
        let Some(meta) = self.meta.get(&entity) else {
            return false;
        };
        // A required kind nobody has ever attached cannot be held.
        let Some(mask) = self.kinds.resolve(filter) else {
            return false;
        };
        meta.caps.contains_all(mask)
    }

    // -- Snapshots --

    /// The entities satisfying `filter`, as a fresh owned snapshot in
    /// live-list order.
    ///
    /// The snapshot is stable for the duration of one system pass:
    /// removals during the pass mutate the live list, never the
    /// snapshot, so a pass neither skips nor double-visits entities.
    #[must_use]
    pub fn select(&self, filter: &Filter) -> Vec<Entity> {
        let Some(mask) = self.kinds.resolve(filter) else {
            return Vec::new();
        };
        self.order
            .iter()
            .copied()
            .filter(|entity| {
                self.meta
                    .get(entity)
                    .is_some_and(|meta| meta.caps.contains_all(mask))
            })
            .collect()
    }

    /// All live entities as a fresh owned snapshot in live-list order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Entity> {
        self.order.clone()
    }

    fn column<T: Component>(&self) -> Option<&TypedColumn<T>> {
        self.columns
            .get(&T::kind())?
            .as_any()
            .downcast_ref::<TypedColumn<T>>()
    }

    fn column_mut<T: Component>(&mut self) -> Option<&mut TypedColumn<T>> {
        self.columns
            .get_mut(&T::kind())?
            .as_any_mut()
            .downcast_mut::<TypedColumn<T>>()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.order.len())
            .field("kinds", &self.kinds.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }
    impl Component for Position {
        fn type_name() -> &'static str {
            "Position"
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Velocity {
        x: f32,
        y: f32,
    }
    impl Component for Velocity {
        fn type_name() -> &'static str {
            "Velocity"
        }
    }

    struct Marker;
    impl Component for Marker {
        fn type_name() -> &'static str {
            "Marker"
        }
    }

    #[test]
    fn test_ids_are_sequential_from_zero() {
        let mut world = World::new();
        for expected in 0..5u64 {
            let e = world.spawn().entity();
            assert_eq!(e.id(), expected);
        }
    }

    #[test]
    fn test_ids_never_reused_after_removal() {
        let mut world = World::new();
        let a = world.spawn().entity();
        let b = world.spawn().entity();
        assert!(world.despawn(a));
        assert!(world.despawn(b));
        let c = world.spawn().entity();
        assert_eq!(c.id(), 2);
    }

    #[test]
    fn test_despawn_preserves_order_of_remainder() {
        let mut world = World::new();
        let a = world.spawn().entity();
        let b = world.spawn().entity();
        let c = world.spawn().entity();
        let d = world.spawn().entity();

        assert!(world.despawn(b));
        assert_eq!(world.entities(), &[a, c, d]);
    }

    #[test]
    fn test_despawn_absent_is_logged_noop() {
        let mut world = World::new();
        let a = world.spawn().entity();
        let b = world.spawn().entity();
        assert!(world.despawn(a));

        let before = world.entities().to_vec();
        // Second removal of the same entity must not change anything.
        assert!(!world.despawn(a));
        assert_eq!(world.entities(), &before[..]);
        assert!(world.contains(b));
    }

    #[test]
    fn test_empty_entity_is_legal() {
        let mut world = World::new();
        let e = world.spawn_named("zone").entity();
        assert!(world.contains(e));
        assert_eq!(world.name(e), Some("zone"));
        assert!(!world.has::<Position>(e));
    }

    #[test]
    fn test_attach_and_get() {
        let mut world = World::new();
        let e = world.spawn().entity();
        world.attach(e, Position { x: 1.0, y: 2.0 }).unwrap();

        let pos = world.get::<Position>(e).unwrap();
        assert_eq!(*pos, Position { x: 1.0, y: 2.0 });
        assert!(world.get::<Velocity>(e).is_none());
    }

    #[test]
    fn test_attach_twice_overwrites() {
        let mut world = World::new();
        let e = world.spawn().entity();
        world.attach(e, Position { x: 1.0, y: 1.0 }).unwrap();
        world.attach(e, Position { x: 9.0, y: 9.0 }).unwrap();

        // Latest attach wins, exactly one instance of the kind remains.
        assert_eq!(*world.get::<Position>(e).unwrap(), Position { x: 9.0, y: 9.0 });
    }

    #[test]
    fn test_attach_to_removed_entity_errors() {
        let mut world = World::new();
        let e = world.spawn().entity();
        assert!(world.despawn(e));
        let err = world.attach(e, Marker).unwrap_err();
        assert!(matches!(err, WorldError::EntityNotFound(_)));
    }

    #[test]
    fn test_get_mut_mutates_in_place() {
        let mut world = World::new();
        let e = world.spawn().entity();
        world.attach(e, Position { x: 0.0, y: 0.0 }).unwrap();

        world.get_mut::<Position>(e).unwrap().x = 5.0;
        assert_eq!(world.get::<Position>(e).unwrap().x, 5.0);
    }

    #[test]
    fn test_has_and_satisfies() {
        let mut world = World::new();
        let e = world.spawn().entity();
        world.attach(e, Position { x: 0.0, y: 0.0 }).unwrap();
        world.attach(e, Velocity { x: 0.0, y: 0.0 }).unwrap();

        assert!(world.has::<Position>(e));
        assert!(!world.has::<Marker>(e));

        let both = Filter::new().require::<Position>().require::<Velocity>();
        assert!(world.satisfies(e, &both));

        let with_marker = Filter::new().require::<Position>().require::<Marker>();
        assert!(!world.satisfies(e, &with_marker));

        // Empty kind list is vacuously true.
        assert!(world.satisfies(e, &Filter::new()));
    }

    #[test]
    fn test_satisfies_false_for_removed_entity() {
        let mut world = World::new();
        let e = world.spawn().entity();
        world.attach(e, Marker).unwrap();
        assert!(world.despawn(e));
        assert!(!world.satisfies(e, &Filter::new().require::<Marker>()));
        assert!(!world.satisfies(e, &Filter::new()));
    }

    #[test]
    fn test_select_matches_exactly() {
        let mut world = World::new();
        let a = world.spawn().entity();
        world.attach(a, Position { x: 0.0, y: 0.0 }).unwrap();
        world.attach(a, Velocity { x: 1.0, y: 0.0 }).unwrap();

        let b = world.spawn().entity();
        world.attach(b, Position { x: 0.0, y: 0.0 }).unwrap();

        let filter = Filter::new().require::<Position>().require::<Velocity>();
        assert_eq!(world.select(&filter), vec![a]);

        let position_only = Filter::new().require::<Position>();
        assert_eq!(world.select(&position_only), vec![a, b]);
    }

    #[test]
    fn test_select_unknown_kind_matches_nothing() {
        let mut world = World::new();
        let _ = world.spawn().entity();
        let filter = Filter::new().require::<Marker>();
        assert!(world.select(&filter).is_empty());
    }

    #[test]
    fn test_select_preserves_creation_order() {
        let mut world = World::new();
        let mut expected = Vec::new();
        for _ in 0..4 {
            let e = world.spawn().entity();
            world.attach(e, Marker).unwrap();
            expected.push(e);
        }
        assert_eq!(world.select(&Filter::new().require::<Marker>()), expected);
    }

    #[test]
    fn test_component_dropped_with_entity() {
        let mut world = World::new();
        let e = world.spawn().entity();
        world.attach(e, Position { x: 1.0, y: 1.0 }).unwrap();
        assert!(world.despawn(e));
        assert!(world.get::<Position>(e).is_none());
    }

    #[test]
    fn test_builder_chains_components() {
        let mut world = World::new();
        let e = world
            .spawn_named("player")
            .with(Position { x: 1.0, y: 2.0 })
            .unwrap()
            .with(Velocity { x: 0.0, y: 0.0 })
            .unwrap()
            .entity();

        assert!(world.has::<Position>(e));
        assert!(world.has::<Velocity>(e));
        assert_eq!(world.name(e), Some("player"));
    }
}
