use std::time::Instant;

use crate::configuration::config::{ImageConfig, ParametersConfig, SimConfig, WorldConfig};
use crate::sampling::sampler::PixelSample;
use crate::simulation::scenario::Scenario;
use crate::simulation::scheduler::run;
use crate::simulation::states::{NVec2, Particle, World};
use crate::simulation::stepper::{EulerStepper, WorldStep};

/// Time raw physics steps across particle counts.
pub fn bench_step() {
    // Different swarm sizes to test
    let ns = [200, 800, 3200, 12800];
    let steps = 300;
    let dt = 1.0 / 30.0;

    for n in ns {
        let mut world = World::bounded(9.0, 16.0, 0.1, 0.9);

        // deterministic positions, no rand needed
        world.particles = (0..n)
            .map(|i| {
                let i_f = i as f64;
                Particle {
                    x: NVec2::new(
                        4.5 + (i_f * 0.37).sin() * 4.0,
                        8.0 + (i_f * 0.13).cos() * 7.0,
                    ),
                    v: NVec2::new((i_f * 0.07).sin() * 0.1, (i_f * 0.11).cos() * 0.1),
                    radius: 0.1,
                    color: [1.0, 1.0, 1.0],
                    target: NVec2::new(4.5, 8.0),
                    alive: true,
                }
            })
            .collect();

        let stepper = EulerStepper;
        let start = Instant::now();
        for _ in 0..steps {
            stepper.step_with_time(&mut world, dt);
        }
        let elapsed = start.elapsed();

        println!(
            "bench_step: n={:>6}  {} steps in {:?}  ({:.2} us/step)",
            n,
            steps,
            elapsed,
            elapsed.as_secs_f64() * 1e6 / steps as f64
        );
    }
}

/// Time a complete three-phase run on a synthetic grid of samples.
pub fn bench_full_run() {
    let cfg = SimConfig {
        world: WorldConfig {
            width: 9.0,
            height: 16.0,
            elasticity: 0.9,
            gap: 0.1,
            gravity: [0.0, -9.82],
            damping: 0.997,
        },
        parameters: ParametersConfig {
            t1: 4.5,
            t2: 4.5,
            t3: 9.0,
            dt: 1.0 / 30.0,
            seed: 42,
            jitter: 0.01,
            approach: 0.05,
            scatter: 1.0,
            speed: 0.1,
            radius: 0.1,
        },
        // placeholder, the samples below bypass image decoding
        image: ImageConfig {
            path: String::new(),
            target_width: 450,
            stride: 8,
        },
        output: None,
    };

    // Synthetic 56x50 block of targets, roughly a full portrait's density
    let mut samples = Vec::new();
    for yi in 0..50 {
        for xi in 0..56 {
            samples.push(PixelSample {
                target: NVec2::new(xi as f64 / 56.0 * 9.0, 3.5 + yi as f64 / 50.0 * 9.0),
                color: [0.5, 0.5, 0.5],
            });
        }
    }

    let n = samples.len();
    let mut scenario = Scenario::build(&cfg, samples);

    let start = Instant::now();
    let rec = run(&mut scenario, &EulerStepper);
    let elapsed = start.elapsed();

    println!(
        "bench_full_run: n={}  {} frames in {:?}  ({:.2} ticks/ms)",
        n,
        rec.frames.len(),
        elapsed,
        rec.frames.len() as f64 / elapsed.as_secs_f64() / 1e3
    );
}
