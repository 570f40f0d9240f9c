//! Demo systems: movement integration, edge bouncing, lifetime decay,
//! pairwise collision damage, and culling of expired or dead entities.
//!
//! Each system is configuration-plus-logic only; all entity state lives
//! in the world. The cull system is the interesting one for the
//! scheduling contract: it removes entities by identity mid-tick, and
//! later systems in the same tick already see the shrunk live list.

use ecs_core::{Entity, Filter, System, World};
use tracing::{debug, info};

use components::{
    Bouncing, Collidable, Enemy, Health, Lifetime, PlayerControlled, Position, Velocity,
};

/// Integrates velocity into position, clamping to the arena unless the
/// entity is a free-flying particle (has `Lifetime`).
pub struct Movement {
    width: f32,
    height: f32,
}

impl Movement {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl System for Movement {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn filter(&self) -> Option<Filter> {
        Some(Filter::new().require::<Position>().require::<Velocity>())
    }

    fn process(&mut self, entities: &[Entity], world: &mut World, dt: f64) {
        for &entity in entities {
            let vel = *world.get::<Velocity>(entity).unwrap();
            let clamp = !world.has::<Lifetime>(entity);
            let pos = world.get_mut::<Position>(entity).unwrap();
            pos.0 += vel.0 * dt as f32;
            if clamp {
                pos.0.x = pos.0.x.clamp(0.0, self.width);
                pos.0.y = pos.0.y.clamp(0.0, self.height);
            }
        }
    }
}

/// Reverses velocity components at the arena edges.
pub struct Bounce {
    width: f32,
    height: f32,
}

impl Bounce {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl System for Bounce {
    fn name(&self) -> &'static str {
        "bounce"
    }

    fn filter(&self) -> Option<Filter> {
        Some(
            Filter::new()
                .require::<Position>()
                .require::<Velocity>()
                .require::<Bouncing>(),
        )
    }

    fn process(&mut self, entities: &[Entity], world: &mut World, _dt: f64) {
        for &entity in entities {
            let pos = *world.get::<Position>(entity).unwrap();
            let vel = world.get_mut::<Velocity>(entity).unwrap();
            if pos.0.x <= 0.0 || pos.0.x >= self.width {
                vel.0.x = -vel.0.x;
            }
            if pos.0.y <= 0.0 || pos.0.y >= self.height {
                vel.0.y = -vel.0.y;
            }
        }
    }
}

/// Counts down `Lifetime` components. Expired entities are left in
/// place for the cull pass at the end of the tick.
pub struct LifetimeDecay;

impl System for LifetimeDecay {
    fn name(&self) -> &'static str {
        "lifetime"
    }

    fn filter(&self) -> Option<Filter> {
        Some(Filter::new().require::<Lifetime>())
    }

    fn process(&mut self, entities: &[Entity], world: &mut World, dt: f64) {
        for &entity in entities {
            if let Some(lifetime) = world.get_mut::<Lifetime>(entity) {
                lifetime.remaining -= dt;
            }
        }
    }
}

/// Applies contact damage between opposing collidables: an enemy
/// touching the player hurts the player, the player touching an enemy
/// hurts the enemy.
pub struct Collision {
    damage: f32,
}

impl Collision {
    pub fn new(damage: f32) -> Self {
        Self { damage }
    }

    fn opposed(world: &World, a: Entity, b: Entity) -> bool {
        (world.has::<Enemy>(a) && world.has::<PlayerControlled>(b))
            || (world.has::<PlayerControlled>(a) && world.has::<Enemy>(b))
    }
}

impl System for Collision {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn filter(&self) -> Option<Filter> {
        Some(Filter::new().require::<Position>().require::<Collidable>())
    }

    fn process(&mut self, entities: &[Entity], world: &mut World, _dt: f64) {
        for &a in entities {
            let pos_a = world.get::<Position>(a).unwrap().0;
            let reach = world.get::<Collidable>(a).unwrap().radius_squared;
            for &b in entities {
                if a == b || !Self::opposed(world, a, b) {
                    continue;
                }
                let pos_b = world.get::<Position>(b).unwrap().0;
                if pos_a.distance_squared(pos_b) < reach {
                    if let Some(health) = world.get_mut::<Health>(b) {
                        health.damage(self.damage);
                        debug!(entity = %b, hp = health.current, "contact damage");
                    }
                }
            }
        }
    }
}

/// Removes expired particles and dead entities.
///
/// Runs unfiltered: it guards with capability checks per entity, and
/// removes by identity so the removal lands on the right entity in the
/// world's live list regardless of snapshot position.
pub struct Cull;

impl System for Cull {
    fn name(&self) -> &'static str {
        "cull"
    }

    fn process(&mut self, entities: &[Entity], world: &mut World, _dt: f64) {
        for &entity in entities {
            if world.has::<Lifetime>(entity) {
                if world.get::<Lifetime>(entity).unwrap().expired() {
                    world.despawn(entity);
                }
                continue;
            }
            if world.has::<Health>(entity) && !world.get::<Health>(entity).unwrap().is_alive() {
                if world.has::<PlayerControlled>(entity) {
                    info!("player died");
                }
                world.despawn(entity);
            }
        }
    }
}
