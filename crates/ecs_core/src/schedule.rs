//! System registration and tick execution.
//!
//! The [`Schedule`] holds the ordered system list. Registration order
//! is execution order, every tick, with no priorities and no
//! de-duplication. A tick is fully synchronous: each system's pass runs
//! to completion before the next begins, on one thread.

use tracing::{debug, info, trace};

use crate::kind::Filter;
use crate::system::System;
use crate::world::World;

struct SystemSlot {
    name: &'static str,
    filter: Option<Filter>,
    system: Box<dyn System>,
}

/// The ordered collection of registered systems.
#[derive(Default)]
pub struct Schedule {
    systems: Vec<SystemSlot>,
    tick_id: u64,
}

impl Schedule {
    /// Create an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a system to the execution order.
    ///
    /// The system's name and filter are captured once at registration;
    /// the filter is re-evaluated against the live list every tick, so
    /// components attached between ticks change which entities match.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        let name = system.name();
        let filter = system.filter();
        info!(
            system = name,
            order = self.systems.len(),
            filtered = filter.is_some(),
            "system registered"
        );
        self.systems.push(SystemSlot {
            name,
            filter,
            system: Box::new(system),
        });
    }

    /// Number of registered systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if no systems are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Ticks executed so far.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Run one tick: every system, in registration order, with the same
    /// `dt` (elapsed seconds since the previous tick).
    ///
    /// Each system's pass starts from a fresh snapshot of the current
    /// live list, so an entity removed by an earlier system in the tick
    /// is not handed to any later system, while the removing system's
    /// own in-progress pass stays stable.
    pub fn run(&mut self, world: &mut World, dt: f64) {
        self.tick_id += 1;
        debug!(
            tick_id = self.tick_id,
            dt,
            systems = self.systems.len(),
            entities = world.len(),
            "tick start"
        );

        for slot in &mut self.systems {
            let pass = match &slot.filter {
                Some(filter) => world.select(filter),
                None => world.snapshot(),
            };
            trace!(
                tick_id = self.tick_id,
                system = slot.name,
                matched = pass.len(),
                "system pass"
            );
            slot.system.process(&pass, world, dt);
        }
    }
}

impl std::fmt::Debug for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schedule")
            .field("systems", &self.systems.len())
            .field("tick_id", &self.tick_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::entity::Entity;

    use super::*;

    /// Records the order and dt of its invocations into a shared log.
    struct Probe {
        name: &'static str,
        log: std::sync::Arc<std::sync::Mutex<Vec<(&'static str, f64, usize)>>>,
    }

    impl System for Probe {
        fn name(&self) -> &'static str {
            self.name
        }

        fn process(&mut self, entities: &[Entity], _world: &mut World, dt: f64) {
            self.log
                .lock()
                .unwrap()
                .push((self.name, dt, entities.len()));
        }
    }

    #[test]
    fn test_systems_run_in_registration_order_with_same_dt() {
        let log = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut world = World::new();
        let mut schedule = Schedule::new();
        for name in ["s1", "s2", "s3"] {
            schedule.add_system(Probe {
                name,
                log: log.clone(),
            });
        }
        let _ = world.spawn().entity();
        let _ = world.spawn().entity();

        schedule.run(&mut world, 0.25);

        let entries = log.lock().unwrap().clone();
        assert_eq!(
            entries,
            vec![("s1", 0.25, 2), ("s2", 0.25, 2), ("s3", 0.25, 2)]
        );
        assert_eq!(schedule.tick_id(), 1);
    }

    #[test]
    fn test_tick_counter_advances_per_update() {
        let mut world = World::new();
        let mut schedule = Schedule::new();
        assert_eq!(schedule.tick_id(), 0);
        schedule.run(&mut world, 1.0 / 60.0);
        schedule.run(&mut world, 1.0 / 60.0);
        assert_eq!(schedule.tick_id(), 2);
    }

    #[test]
    fn test_unfiltered_system_sees_all_entities() {
        let log = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut world = World::new();
        let mut schedule = Schedule::new();
        schedule.add_system(Probe {
            name: "all",
            log: log.clone(),
        });

        for _ in 0..5 {
            let _ = world.spawn().entity();
        }
        schedule.run(&mut world, 0.1);

        assert_eq!(log.lock().unwrap()[0].2, 5);
    }
}
