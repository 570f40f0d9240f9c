//! # bounce_sim — headless arena demo
//!
//! Drives the ECS runtime with the classic demo population: one player,
//! a ring of bouncing enemies, and a burst of short-lived particles.
//! There is no rendering or input here; the point is to exercise the
//! registry contract end to end — creation order, capability-filtered
//! passes, same-tick removal visibility — under a fixed-timestep pacing
//! loop.

mod config;
mod systems;

use std::f32::consts::TAU;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use ecs_core::Runtime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use components::{
    Bouncing, Collidable, Enemy, Health, Lifetime, PlayerControlled, Position, Velocity,
};
use config::SimConfig;
use systems::{Bounce, Collision, Cull, LifetimeDecay, Movement};

/// Spawn the demo population: player, enemies, particles.
fn populate(runtime: &mut Runtime, config: &SimConfig) -> Result<()> {
    let world = runtime.world_mut();

    world
        .spawn_named("player")
        .with(Position::new(100.0, 100.0))?
        .with(Velocity::new(60.0, 45.0))?
        .with(Health::full(100.0))?
        .with(Collidable::with_radius(15.0))?
        .with(PlayerControlled)?;

    // Enemies fan out in evenly spaced directions so runs are
    // deterministic and comparable.
    for i in 0..config.enemies {
        let angle = TAU * i as f32 / config.enemies.max(1) as f32;
        world
            .spawn_named(format!("enemy-{i}"))
            .with(Position::new(
                config.arena_width * 0.5,
                config.arena_height * 0.5,
            ))?
            .with(Velocity::new(100.0 * angle.cos(), 100.0 * angle.sin()))?
            .with(Bouncing)?
            .with(Enemy)?
            .with(Health::full(20.0))?
            .with(Collidable::with_radius(15.0))?;
    }

    for i in 0..config.particles {
        let angle = TAU * i as f32 / config.particles.max(1) as f32;
        world
            .spawn()
            .with(Position::new(300.0, 200.0))?
            .with(Velocity::new(200.0 * angle.cos(), 200.0 * angle.sin()))?
            .with(Lifetime::new(3.0))?;
    }

    info!(entities = world.len(), "arena populated");
    Ok(())
}

/// Fixed-timestep pacing loop: invoke one tick per budget interval,
/// sleeping off the remainder, until `max_ticks` or an empty arena.
fn run(runtime: &mut Runtime, config: &SimConfig) {
    let tick_duration = Duration::from_secs_f64(1.0 / config.tick_rate);
    let dt = tick_duration.as_secs_f64();

    info!(
        tick_rate = config.tick_rate,
        max_ticks = config.max_ticks,
        "starting tick loop"
    );

    loop {
        let start = Instant::now();

        runtime.update(dt);

        if runtime.world().is_empty() {
            info!(ticks = runtime.tick_id(), "arena empty");
            break;
        }
        if config.max_ticks > 0 && runtime.tick_id() >= config.max_ticks {
            info!(
                ticks = runtime.tick_id(),
                entities = runtime.world().len(),
                "tick loop complete"
            );
            break;
        }

        let elapsed = start.elapsed();
        if elapsed < tick_duration {
            std::thread::sleep(tick_duration - elapsed);
        } else {
            warn!(
                tick_id = runtime.tick_id(),
                elapsed_ms = elapsed.as_millis() as u64,
                budget_ms = tick_duration.as_millis() as u64,
                "tick exceeded time budget"
            );
        }
    }
}

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bounce_sim=info".parse()?))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(&PathBuf::from(path))?,
        None => SimConfig::default(),
    };
    info!(?config, "bounce_sim starting");

    let mut runtime = Runtime::new();

    runtime.add_system(Movement::new(config.arena_width, config.arena_height));
    runtime.add_system(Bounce::new(config.arena_width, config.arena_height));
    runtime.add_system(LifetimeDecay);
    runtime.add_system(Collision::new(10.0));
    runtime.add_system(Cull);

    populate(&mut runtime, &config)?;
    run(&mut runtime, &config);

    // Final census, in creation order.
    for &entity in runtime.world().entities() {
        let name = runtime.world().name(entity).unwrap_or("<unnamed>");
        info!(%entity, name, "survivor");
    }

    info!("bounce_sim shut down");
    Ok(())
}
