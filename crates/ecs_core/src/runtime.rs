//! The [`Runtime`] — the registry facade owning world and schedule.
//!
//! An explicitly constructed, passed-around value: created at startup,
//! handed by reference into the code that drives it, torn down at
//! shutdown. There is no global or ambient registry state.

use crate::schedule::Schedule;
use crate::system::System;
use crate::world::World;

/// Owns the ordered collection of live entities (via [`World`]) and the
/// ordered collection of systems (via [`Schedule`]), and exposes the
/// single per-tick entry point, [`Runtime::update`].
///
/// The external pacing driver computes `delta` (elapsed seconds since
/// the previous tick) and calls `update(delta)` once per frame; the
/// runtime itself has no awareness of wall-clock time.
#[derive(Debug, Default)]
pub struct Runtime {
    world: World,
    schedule: Schedule,
}

impl Runtime {
    /// Create an empty runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns a mutable reference to the world, for entity creation,
    /// component attachment, and removal.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Append a system to the execution order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.schedule.add_system(system);
    }

    /// Run one full synchronous tick across all systems in
    /// registration order, passing the same `dt` to every system.
    pub fn update(&mut self, dt: f64) {
        self.schedule.run(&mut self.world, dt);
    }

    /// Ticks executed so far.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.schedule.tick_id()
    }
}
