//! Three-phase tick scheduler, removal policy, and frame recorder
//!
//! Drives simulated time through three strictly ordered regimes:
//!
//! - `Drift`:    positions wander by a bounded uniform offset, no dynamics
//! - `Converge`: positions ease toward their image targets, column by column
//! - `Physics`:  full integration; particles that fall past the visible
//!               height are removed, and an emptied world ends the run early
//!
//! Every tick captures a frame *before* applying that tick's update, so
//! frame `i` is the state at the start of tick `i`. No phase is skipped and
//! no transition runs backward.

use log::{debug, info, warn};

use crate::configuration::config::SimConfig;
use crate::error::SimError;
use crate::sampling::sampler::{pixelate, sample_grid};
use crate::simulation::params::Parameters;
use crate::simulation::scenario::{uniform_symmetric, Scenario};
use crate::simulation::states::{Frame, NVec2, Recording, World};
use crate::simulation::stepper::{EulerStepper, WorldStep};

/// The three motion regimes, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Drift,
    Converge,
    Physics,
}

/// Per-phase tick counts.
///
/// The first two phases integer-divide their cumulative end time by `dt`;
/// the physics count is whatever remains of the total, so the three always
/// partition `floor(total / dt)` exactly regardless of rounding.
pub fn phase_ticks(p: &Parameters) -> (usize, usize, usize) {
    let drift = (p.t1 / p.dt) as usize;
    let converge = ((p.t1 + p.t2) / p.dt) as usize - drift;
    let physics = ((p.t1 + p.t2 + p.t3) / p.dt) as usize - drift - converge;
    (drift, converge, physics)
}

/// Single entry point: validate, sample the image, build the world, run.
pub fn simulate(cfg: &SimConfig, img: &image::DynamicImage) -> Result<Recording, SimError> {
    cfg.validate()?;
    let grid = pixelate(img, cfg.image.target_width);
    let samples = sample_grid(&grid, cfg.image.stride, cfg.world.width, cfg.world.height);
    let mut scenario = Scenario::build(cfg, samples);
    Ok(run(&mut scenario, &EulerStepper))
}

/// Execute all three phases and return the recording.
pub fn run(scenario: &mut Scenario, stepper: &dyn WorldStep) -> Recording {
    let params = scenario.parameters.clone();
    let (drift_ticks, converge_ticks, physics_ticks) = phase_ticks(&params);

    let world = &mut scenario.world;
    let mut rec = Recording {
        frames: Vec::with_capacity(drift_ticks + converge_ticks + physics_ticks),
        times: Vec::new(),
        colors: world.particles.iter().map(|p| p.color).collect(),
        radii: world.particles.iter().map(|p| p.radius).collect(),
    };

    info!(
        "run: {} particles, ticks {}/{}/{} (drift/converge/physics)",
        world.particles.len(),
        drift_ticks,
        converge_ticks,
        physics_ticks
    );

    // Phase 1: free drift, no dynamics
    debug!("phase {:?}", Phase::Drift);
    for _ in 0..drift_ticks {
        capture(&mut rec, world, params.dt);
        for p in world.particles.iter_mut().filter(|p| p.alive) {
            let offset = NVec2::new(
                uniform_symmetric(&mut scenario.rng, params.jitter),
                uniform_symmetric(&mut scenario.rng, params.jitter),
            );
            p.x += offset;
        }
        stepper.step_zero(world);
    }

    // Phase 2: ease toward image targets, sweeping column groups from the
    // highest target x down. Exponential approach: each tick closes a fixed
    // fraction of the remaining distance, never snapping to the target.
    debug!("phase {:?}", Phase::Converge);
    for _ in 0..converge_ticks {
        capture(&mut rec, world, params.dt);
        for column in &scenario.columns {
            for &i in column {
                let p = &mut world.particles[i];
                if !p.alive {
                    continue;
                }
                let remaining = p.target - p.x;
                p.x += remaining * params.approach;
            }
        }
        stepper.step_zero(world);
    }

    // Phase 3: full physics. Removal runs after each step and only here;
    // a removal that empties the active set truncates the remaining ticks.
    debug!("phase {:?}", Phase::Physics);
    for _ in 0..physics_ticks {
        capture(&mut rec, world, params.dt);
        stepper.step_with_time(world, params.dt);

        let mut removed = 0usize;
        for (i, p) in world.particles.iter_mut().enumerate() {
            if !p.alive {
                continue;
            }
            if !p.x.x.is_finite() || !p.x.y.is_finite() {
                warn!("particle {i} position is non-finite at t={}", world.t);
            }
            if p.x.y > world.height + p.radius {
                p.alive = false;
                removed += 1;
            }
        }

        if removed > 0 && world.alive_count() == 0 {
            info!("world emptied at t={}, ending run early", world.t);
            break;
        }
    }

    rec
}

/// Append one frame: every active particle's position, keyed by slot index,
/// captured before the tick's update is applied.
fn capture(rec: &mut Recording, world: &World, dt: f64) {
    let positions = world
        .particles
        .iter()
        .enumerate()
        .filter(|(_, p)| p.alive)
        .map(|(i, p)| (i, p.x))
        .collect();
    rec.times.push(rec.frames.len() as f64 * dt);
    rec.frames.push(Frame { positions });
}
