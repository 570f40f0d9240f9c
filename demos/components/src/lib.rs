//! Example component definitions for the ECS runtime.
//!
//! These demonstrate how to define components that satisfy the
//! [`Component`] trait: plain data records, no behaviour beyond small
//! helpers, no reference to the owning entity. Marker components
//! ([`Bouncing`], [`PlayerControlled`], [`Enemy`]) carry no fields at
//! all and exist only to steer capability filters.

use ecs_core::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D world position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position(pub Vec2);

impl Position {
    /// Create a new position.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

/// A 2D velocity in world units per second.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Velocity(pub Vec2);

impl Velocity {
    /// Zero velocity.
    pub const ZERO: Self = Self(Vec2::ZERO);

    /// Create a new velocity.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

/// Marker: the entity reverses direction at arena edges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bouncing;

impl Component for Bouncing {
    fn type_name() -> &'static str {
        "Bouncing"
    }
}

/// A countdown to removal, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Lifetime {
    /// Seconds until the entity expires.
    pub remaining: f64,
}

impl Lifetime {
    /// Create a lifetime with the given duration.
    #[must_use]
    pub fn new(seconds: f64) -> Self {
        Self { remaining: seconds }
    }

    /// Returns `true` once the countdown has run out.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

impl Component for Lifetime {
    fn type_name() -> &'static str {
        "Lifetime"
    }
}

/// Hit points with current and maximum values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Health {
    /// Current hit points.
    pub current: f32,
    /// Maximum hit points.
    pub max: f32,
}

impl Health {
    /// Create a new health component at full HP.
    #[must_use]
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Returns `true` if the entity is alive (HP > 0).
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Apply damage, clamping to zero.
    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    /// Heal, clamping to max.
    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }
}

impl Component for Health {
    fn type_name() -> &'static str {
        "Health"
    }
}

/// Collision participation with a precomputed squared radius.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Collidable {
    /// Squared collision radius, so overlap tests avoid a sqrt.
    pub radius_squared: f32,
}

impl Collidable {
    /// Create a collidable with the given radius.
    #[must_use]
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius_squared: radius * radius,
        }
    }
}

impl Component for Collidable {
    fn type_name() -> &'static str {
        "Collidable"
    }
}

/// Marker: the entity is driven by player input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerControlled;

impl Component for PlayerControlled {
    fn type_name() -> &'static str {
        "PlayerControlled"
    }
}

/// Marker: a hostile entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

impl Component for Enemy {
    fn type_name() -> &'static str {
        "Enemy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage_and_heal() {
        let mut h = Health::full(100.0);
        assert!(h.is_alive());
        h.damage(60.0);
        assert_eq!(h.current, 40.0);
        h.heal(30.0);
        assert_eq!(h.current, 70.0);
        h.damage(200.0);
        assert_eq!(h.current, 0.0);
        assert!(!h.is_alive());
    }

    #[test]
    fn test_lifetime_expiry() {
        let mut lt = Lifetime::new(0.5);
        assert!(!lt.expired());
        lt.remaining -= 0.6;
        assert!(lt.expired());
    }

    #[test]
    fn test_collidable_precomputes_squared_radius() {
        let c = Collidable::with_radius(15.0);
        assert_eq!(c.radius_squared, 225.0);
    }

    #[test]
    fn test_kind_ids_are_distinct() {
        use ecs_core::KindId;
        let kinds = [
            KindId::of::<Position>(),
            KindId::of::<Velocity>(),
            KindId::of::<Bouncing>(),
            KindId::of::<Lifetime>(),
            KindId::of::<Health>(),
            KindId::of::<Collidable>(),
            KindId::of::<PlayerControlled>(),
            KindId::of::<Enemy>(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
