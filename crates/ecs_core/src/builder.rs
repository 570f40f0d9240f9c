//! Fluent entity construction.

use crate::component::Component;
use crate::entity::Entity;
use crate::world::{World, WorldError};

/// Builder returned by [`World::spawn`] for chained component
/// attachment.
///
/// The entity is live from the moment the builder is created; dropping
/// the builder without attaching anything leaves a valid empty entity
/// (e.g. a free-standing marker or zone). The builder only borrows the
/// world — the world keeps exclusive ownership of the entity and its
/// components.
///
/// # Examples
///
/// ```rust
/// use ecs_core::{Component, World};
///
/// #[derive(Debug)]
/// struct Position { x: f32, y: f32 }
/// impl Component for Position {
///     fn type_name() -> &'static str { "Position" }
/// }
///
/// let mut world = World::new();
/// let player = world
///     .spawn_named("player")
///     .with(Position { x: 100.0, y: 100.0 })?
///     .entity();
/// assert!(world.has::<Position>(player));
/// # Ok::<(), ecs_core::WorldError>(())
/// ```
pub struct EntityBuilder<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl<'w> EntityBuilder<'w> {
    pub(crate) fn new(world: &'w mut World, name: Option<String>) -> Self {
        let entity = world.create(name);
        Self { world, entity }
    }

    /// Attach a component, replacing any prior component of the same
    /// kind, and return the builder for further chaining.
    ///
    /// # Errors
    ///
    /// Propagates [`WorldError::KindTableFull`] from the attach.
    pub fn with<T: Component>(self, component: T) -> Result<Self, WorldError> {
        self.world.attach(self.entity, component)?;
        Ok(self)
    }

    /// Finish building and return the entity handle.
    #[must_use]
    pub fn entity(self) -> Entity {
        self.entity
    }
}
