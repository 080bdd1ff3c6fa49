//! Build a fully-initialized simulation scenario
//!
//! Takes a `SimConfig` (YAML-facing) plus the sampled pixel set and produces
//! the runtime bundle consumed by the scheduler:
//! - numerical parameters (`Parameters`)
//! - the bounded world with one particle slot per sampled pixel
//! - precomputed converge column groups
//! - the seeded RNG that owns all randomness for the run

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

use crate::configuration::config::SimConfig;
use crate::sampling::sampler::PixelSample;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, Particle, World};

/// Runtime bundle for one run: exclusively owned and mutated by the
/// scheduler for the duration of the run.
pub struct Scenario {
    pub parameters: Parameters,
    pub world: World,
    pub columns: Vec<Vec<usize>>, // slot indices grouped by target x, descending
    pub rng: StdRng,
}

impl Scenario {
    pub fn build(cfg: &SimConfig, samples: Vec<PixelSample>) -> Self {
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            t1: p_cfg.t1,
            t2: p_cfg.t2,
            t3: p_cfg.t3,
            dt: p_cfg.dt,
            seed: p_cfg.seed,
            jitter: p_cfg.jitter,
            approach: p_cfg.approach,
            scatter: p_cfg.scatter,
            speed: p_cfg.speed,
            radius: p_cfg.radius,
        };

        let w_cfg = &cfg.world;
        let mut world = World::bounded(w_cfg.width, w_cfg.height, w_cfg.gap, w_cfg.elasticity);
        world.gravity = NVec2::new(w_cfg.gravity[0], w_cfg.gravity[1]);
        world.damping = w_cfg.damping;

        // All randomness for the run flows from this one seeded generator
        let mut rng = StdRng::seed_from_u64(parameters.seed);

        // One particle per sampled pixel: spawned near its target with a
        // small random velocity, sharing the boundary elasticity implicitly
        // through the collision response.
        world.particles = samples
            .iter()
            .map(|s| {
                let start = s.target
                    + NVec2::new(
                        uniform_symmetric(&mut rng, parameters.scatter),
                        uniform_symmetric(&mut rng, parameters.scatter),
                    );
                let v = NVec2::new(
                    uniform_symmetric(&mut rng, parameters.speed),
                    uniform_symmetric(&mut rng, parameters.speed),
                );
                Particle {
                    x: start,
                    v,
                    radius: parameters.radius,
                    color: s.color,
                    target: s.target,
                    alive: true,
                }
            })
            .collect();

        let columns = column_groups(&world.particles);

        Self {
            parameters,
            world,
            columns,
            rng,
        }
    }
}

/// Draw from `[-half, half)`, degenerating to zero when the range is empty.
pub(crate) fn uniform_symmetric(rng: &mut StdRng, half: f64) -> f64 {
    if half > 0.0 {
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}

/// Group particle slots by their exact target x coordinate, ordered by
/// descending x. The converge phase sweeps these groups right-to-left;
/// within one tick the grouping has no numeric effect on independent
/// per-particle moves, but the sweep order is part of the update contract.
fn column_groups(particles: &[Particle]) -> Vec<Vec<usize>> {
    // Targets in one column share bit-identical x values since they come
    // from the same column-index computation.
    let mut by_x: HashMap<u64, Vec<usize>> = HashMap::new();
    for (i, p) in particles.iter().enumerate() {
        by_x.entry(p.target.x.to_bits()).or_default().push(i);
    }

    let mut keyed: Vec<(f64, Vec<usize>)> = by_x
        .into_iter()
        .map(|(bits, idx)| (f64::from_bits(bits), idx))
        .collect();
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));

    keyed.into_iter().map(|(_, idx)| idx).collect()
}
