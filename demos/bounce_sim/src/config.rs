//! Simulation configuration.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Configuration for the demo simulation.
///
/// Loadable from a JSON file; every field has a default so a partial
/// file (or none at all) works.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Arena width in world units.
    pub arena_width: f32,
    /// Arena height in world units.
    pub arena_height: f32,
    /// Number of enemies to spawn.
    pub enemies: usize,
    /// Number of short-lived particles to spawn.
    pub particles: usize,
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Number of ticks to run before exiting (0 = run until the arena
    /// is empty).
    pub max_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,
            enemies: 5,
            particles: 10,
            tick_rate: 60.0,
            max_ticks: 600,
        }
    }
}

impl SimConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.enemies, 5);
        assert_eq!(config.tick_rate, 60.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{"enemies": 2}"#).unwrap();
        assert_eq!(config.enemies, 2);
        assert_eq!(config.particles, 10);
    }
}
