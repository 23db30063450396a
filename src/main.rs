//! Verlet Bowl headless driver
//!
//! Stands in for an interactive front end: spawns bodies the way clicks
//! would, drives the world at a fixed physics cadence from a simulated
//! frame clock, tilts gravity now and then, and finally prints the body
//! snapshots as JSON.
//!
//! Usage: `verlet-bowl [config.json]`. Log level comes from `RUST_LOG`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use verlet_bowl::consts::*;
use verlet_bowl::{FixedStepper, PhysicsWorld, Result, WorldConfig};

/// Simulated display refresh
const FRAME_DT: f32 = 1.0 / 60.0;
/// Length of the simulated session
const SESSION_FRAMES: u32 = 60 * 20;
/// A click lands every this many frames
const SPAWN_EVERY: u32 = 4;
/// Bodies spawned before the spawner stops
const SPAWN_LIMIT: usize = 600;
/// Frame at which a burst is fired
const BURST_FRAME: u32 = 60 * 5;
/// Frames between gravity changes
const GRAVITY_PERIOD: u32 = 60 * 4;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => WorldConfig::load(path)?,
        None => WorldConfig::default(),
    };

    let mut world = PhysicsWorld::new(config)?;
    let mut stepper = FixedStepper::default();
    let mut rng = Pcg32::seed_from_u64(0x5eed);
    log::info!("Verlet Bowl starting...");

    for frame in 0..SESSION_FRAMES {
        if frame % SPAWN_EVERY == 0 && world.body_count() < SPAWN_LIMIT {
            // Click somewhere in the container's bounding square
            let boundary = *world.boundary();
            let click = boundary.min_corner()
                + Vec2::new(
                    rng.random_range(0.0..boundary.extent()),
                    rng.random_range(0.0..boundary.extent()),
                );
            if world.spawn(click)?.is_none() {
                log::trace!("Click at {} missed the container", click);
            }
        }

        if frame == BURST_FRAME {
            let center = world.boundary().center;
            world.spawn_burst(center - Vec2::new(100.0, 150.0))?;
        }

        if frame > 0 && frame % GRAVITY_PERIOD == 0 {
            match (frame / GRAVITY_PERIOD) % 4 {
                1 => world.nudge_gravity(Vec2::new(-GRAVITY_NUDGE * 5.0, 0.0)),
                2 => world.nudge_gravity(Vec2::new(GRAVITY_NUDGE * 10.0, 0.0)),
                3 => world.set_gravity(Vec2::new(0.0, -DEFAULT_GRAVITY.y)),
                _ => world.reset_gravity(),
            }
            log::info!("Gravity now {}", world.gravity());
        }

        stepper.advance(&mut world, FRAME_DT);

        if frame % 60 == 0 {
            let stats = world.stats();
            log::info!(
                "t={:>2}s bodies={} grav=({}, {}) steps={}",
                frame / 60,
                stats.body_count,
                stats.gravity.x,
                stats.gravity.y,
                stats.steps
            );
        }
    }

    let snapshots = world.body_snapshots();
    println!("{}", serde_json::to_string(&snapshots)?);
    log::info!("Done: {} bodies after {} steps", snapshots.len(), world.stats().steps);
    Ok(())
}
