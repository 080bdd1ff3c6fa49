use pixelfall::configuration::config::{
    ImageConfig, ParametersConfig, SimConfig, WorldConfig,
};
use pixelfall::sampling::sampler::{pixelate, sample_grid, PixelSample};
use pixelfall::simulation::scenario::Scenario;
use pixelfall::simulation::scheduler::{phase_ticks, run};
use pixelfall::simulation::states::NVec2;
use pixelfall::simulation::stepper::EulerStepper;
use pixelfall::SimError;

use image::{DynamicImage, Rgba, RgbaImage};

/// Build a config with exact-binary tick math: dt = 1/32, phases 1s/1s/2s,
/// so drift/converge/physics tick counts are exactly 32/32/64.
pub fn base_config() -> SimConfig {
    SimConfig {
        world: WorldConfig {
            width: 9.0,
            height: 16.0,
            elasticity: 0.9,
            gap: 0.1,
            gravity: [0.0, -9.82],
            damping: 0.997,
        },
        parameters: ParametersConfig {
            t1: 1.0,
            t2: 1.0,
            t3: 2.0,
            dt: 1.0 / 32.0,
            seed: 7,
            jitter: 0.01,
            approach: 0.05,
            scatter: 0.5,
            speed: 0.1,
            radius: 0.1,
        },
        image: ImageConfig {
            path: "unused.png".to_string(),
            target_width: 450,
            stride: 8,
        },
        output: None,
    }
}

pub fn sample_at(x: f64, y: f64) -> PixelSample {
    PixelSample {
        target: NVec2::new(x, y),
        color: [0.2, 0.4, 0.6],
    }
}

/// Run a scenario built from `cfg` and `samples`, returning the recording
/// and the per-phase tick counts that applied.
fn run_with(cfg: &SimConfig, samples: Vec<PixelSample>) -> (pixelfall::Recording, (usize, usize, usize)) {
    let mut scenario = Scenario::build(cfg, samples);
    let ticks = phase_ticks(&scenario.parameters);
    let rec = run(&mut scenario, &EulerStepper);
    (rec, ticks)
}

// ==================================================================================
// Phase scheduler tests
// ==================================================================================

#[test]
fn drift_displacement_bounded() {
    let cfg = base_config();
    let (rec, (f, _, _)) = run_with(&cfg, vec![sample_at(4.5, 8.0)]);

    // Every drift tick perturbs each axis by at most the jitter bound
    for i in 0..f {
        let a = rec.frames[i].positions[0].1;
        let b = rec.frames[i + 1].positions[0].1;
        let d = b - a;
        assert!(
            d.x.abs() <= cfg.parameters.jitter + 1e-12,
            "tick {i}: x displacement {} exceeds jitter bound",
            d.x.abs()
        );
        assert!(
            d.y.abs() <= cfg.parameters.jitter + 1e-12,
            "tick {i}: y displacement {} exceeds jitter bound",
            d.y.abs()
        );
    }
}

#[test]
fn converge_distance_monotone() {
    let mut cfg = base_config();
    cfg.parameters.jitter = 0.0; // hold still during drift
    cfg.parameters.speed = 0.0;
    let target = NVec2::new(4.5, 8.0);
    let (rec, (f, c, _)) = run_with(&cfg, vec![sample_at(target.x, target.y)]);

    let dist = |i: usize| (rec.frames[i].positions[0].1 - target).norm();

    for i in f..f + c {
        assert!(
            dist(i + 1) <= dist(i) + 1e-12,
            "tick {i}: distance to target grew from {} to {}",
            dist(i),
            dist(i + 1)
        );
    }
    assert!(
        dist(f + c) < dist(f),
        "converge phase did not reduce distance at all"
    );
}

#[test]
fn physics_count_nonincreasing() {
    let mut cfg = base_config();
    cfg.parameters.scatter = 0.0;
    cfg.parameters.jitter = 0.0;
    cfg.parameters.speed = 0.0;
    // Two particles parked past the removal bound, three safely inside
    let samples = vec![
        sample_at(2.0, 18.0),
        sample_at(7.0, 18.0),
        sample_at(3.0, 8.0),
        sample_at(4.5, 8.0),
        sample_at(6.0, 8.0),
    ];
    let (rec, (f, c, _)) = run_with(&cfg, samples);

    for i in f + c..rec.frames.len() - 1 {
        assert!(
            rec.frames[i + 1].positions.len() <= rec.frames[i].positions.len(),
            "active count grew between physics ticks {i} and {}",
            i + 1
        );
    }
    // The two out-of-bounds particles are gone after the first physics step
    assert_eq!(rec.frames[f + c].positions.len(), 5);
    assert_eq!(rec.frames[f + c + 1].positions.len(), 3);
}

#[test]
fn tick_partition_exact() {
    let cfg = base_config();
    let (rec, (f, c, p)) = run_with(&cfg, vec![sample_at(4.5, 8.0)]);

    let total_time = cfg.parameters.t1 + cfg.parameters.t2 + cfg.parameters.t3;
    let total = (total_time / cfg.parameters.dt) as usize;

    assert_eq!(f + c + p, total, "phase ticks do not partition the total");
    assert_eq!(rec.frames.len(), total, "run did not execute every tick");
    assert_eq!(rec.times.len(), rec.frames.len());
    assert!((rec.times[1] - cfg.parameters.dt).abs() < 1e-15);
}

#[test]
fn no_removal_outside_physics_then_immediate_removal() {
    let mut cfg = base_config();
    cfg.parameters.scatter = 0.0;
    cfg.parameters.jitter = 0.0;
    cfg.parameters.speed = 0.0;
    // Parked past height + radius from the very start
    let (rec, (f, c, _)) = run_with(&cfg, vec![sample_at(4.5, 18.0)]);

    // Never removed while drifting or converging...
    for i in 0..f + c {
        assert_eq!(
            rec.frames[i].positions.len(),
            1,
            "particle removed during non-physics tick {i}"
        );
    }
    // ...captured once more at the start of the first physics tick, then
    // removed by that tick's sweep, emptying the world and ending the run
    assert_eq!(rec.frames.len(), f + c + 1);
    assert_eq!(rec.frames[f + c].positions.len(), 1);
}

#[test]
fn removal_bound_is_strict() {
    let mut cfg = base_config();
    cfg.parameters.scatter = 0.0;
    cfg.parameters.jitter = 0.0;
    cfg.parameters.speed = 0.0;
    // Exactly at height + radius: not beyond it, so never removed
    let bound = cfg.world.height + cfg.parameters.radius;
    let (rec, (f, c, p)) = run_with(&cfg, vec![sample_at(4.5, bound)]);

    assert_eq!(rec.frames.len(), f + c + p, "run ended early");
    for (i, frame) in rec.frames.iter().enumerate() {
        assert_eq!(frame.positions.len(), 1, "particle missing in frame {i}");
    }
}

#[test]
fn empty_image_runs_full_length() {
    let cfg = base_config();
    let (rec, (f, c, p)) = run_with(&cfg, Vec::new());

    assert_eq!(rec.frames.len(), f + c + p);
    assert!(rec.frames.iter().all(|fr| fr.positions.is_empty()));
    assert!(rec.colors.is_empty());
    assert!(rec.radii.is_empty());
}

#[test]
fn render_attributes_fixed_for_whole_run() {
    let cfg = base_config();
    let samples = vec![sample_at(3.0, 8.0), sample_at(4.5, 9.0), sample_at(6.0, 7.0)];
    let expected: Vec<[f32; 3]> = samples.iter().map(|s| s.color).collect();

    let mut scenario = Scenario::build(&cfg, samples);
    let rec = run(&mut scenario, &EulerStepper);

    assert_eq!(rec.colors, expected);
    assert!(rec.radii.iter().all(|&r| r == cfg.parameters.radius));

    // Slot attributes referenced by every frame stay the creation-time ones
    for frame in &rec.frames {
        for &(slot, _) in &frame.positions {
            assert_eq!(rec.colors[slot], expected[slot]);
            assert!(rec.radii[slot] > 0.0);
        }
    }
    for (p, color) in scenario.world.particles.iter().zip(&expected) {
        assert_eq!(p.color, *color, "particle color drifted during the run");
        assert_eq!(p.radius, cfg.parameters.radius);
    }
}

#[test]
fn end_to_end_portrait_run() {
    // Portrait-format timing: 9x16 world, 30 ticks/s, 4.5s + 4.5s + 9s
    let mut cfg = base_config();
    cfg.parameters.t1 = 4.5;
    cfg.parameters.t2 = 4.5;
    cfg.parameters.t3 = 9.0;
    cfg.parameters.dt = 1.0 / 30.0;

    let target = NVec2::new(4.5, 8.0);
    let (rec, (f, c, p)) = run_with(&cfg, vec![sample_at(target.x, target.y)]);

    assert_eq!(rec.frames.len(), f + c + p, "nothing should be removed");

    // After drifting and converging the particle has closed to under 1% of
    // its distance at converge start
    let d_start = (rec.frames[f].positions[0].1 - target).norm();
    let d_end = (rec.frames[f + c].positions[0].1 - target).norm();
    assert!(d_start > 0.0, "spawn scatter left the particle on its target");
    assert!(
        d_end < 0.01 * d_start,
        "converge left {d_end} of {d_start} remaining"
    );

    // All four boundaries intact: the particle stays inside the arena for
    // every captured frame of the physics phase
    for (i, frame) in rec.frames.iter().enumerate().skip(f + c) {
        let pos = frame.positions[0].1;
        assert!(
            pos.x >= 0.0 && pos.x <= cfg.world.width && pos.y >= 0.0 && pos.y <= cfg.world.height,
            "frame {i}: particle escaped the arena at {pos:?}"
        );
    }
}

// ==================================================================================
// World builder tests
// ==================================================================================

#[test]
fn builder_spawns_near_targets() {
    let cfg = base_config();
    let samples = vec![sample_at(2.0, 6.0), sample_at(7.0, 10.0)];
    let scenario = Scenario::build(&cfg, samples);

    assert_eq!(scenario.world.particles.len(), 2);
    assert_eq!(scenario.world.segments.len(), 4);
    for p in &scenario.world.particles {
        assert!((p.x - p.target).abs().max() <= cfg.parameters.scatter);
        assert!(p.v.abs().max() <= cfg.parameters.speed);
        assert!(p.alive);
    }
}

#[test]
fn builder_is_deterministic_per_seed() {
    let cfg = base_config();
    let a = Scenario::build(&cfg, vec![sample_at(4.5, 8.0)]);
    let b = Scenario::build(&cfg, vec![sample_at(4.5, 8.0)]);
    assert_eq!(a.world.particles[0].x, b.world.particles[0].x);
    assert_eq!(a.world.particles[0].v, b.world.particles[0].v);

    let mut cfg2 = base_config();
    cfg2.parameters.seed = 8;
    let c = Scenario::build(&cfg2, vec![sample_at(4.5, 8.0)]);
    assert_ne!(a.world.particles[0].x, c.world.particles[0].x);
}

#[test]
fn converge_columns_sorted_descending() {
    let cfg = base_config();
    let samples = vec![
        sample_at(1.0, 8.0),
        sample_at(3.0, 8.0),
        sample_at(2.0, 8.0),
        sample_at(3.0, 9.0),
    ];
    let scenario = Scenario::build(&cfg, samples);

    assert_eq!(scenario.columns.len(), 3);
    let column_x: Vec<f64> = scenario
        .columns
        .iter()
        .map(|col| scenario.world.particles[col[0]].target.x)
        .collect();
    assert_eq!(column_x, vec![3.0, 2.0, 1.0]);
    assert_eq!(scenario.columns[0].len(), 2, "shared column not grouped");
}

// ==================================================================================
// Image sampler tests
// ==================================================================================

#[test]
fn sampler_skips_transparent_cells() {
    let mut grid = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
    grid.put_pixel(1, 2, Rgba([255, 0, 0, 255]));
    grid.put_pixel(3, 0, Rgba([0, 128, 0, 10]));

    let samples = sample_grid(&grid, 1, 8.0, 8.0);
    assert_eq!(samples.len(), 2, "only non-transparent cells sample");
    assert_eq!(samples[0].color, [0.0, 128.0 / 255.0, 0.0]);
    assert_eq!(samples[1].color, [1.0, 0.0, 0.0]);
}

#[test]
fn sampler_position_mapping() {
    // Square grid in a square world: block fills the height, no offset
    let mut grid = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
    grid.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
    grid.put_pixel(2, 1, Rgba([255, 255, 255, 255]));

    let samples = sample_grid(&grid, 1, 8.0, 8.0);
    assert_eq!(samples.len(), 2);
    // Top-left cell maps to x = 0 at the top of the block
    assert_eq!(samples[0].target, NVec2::new(0.0, 8.0));
    // Column 2 of 4 maps to mid-width, row 1 of 4 one step down
    assert_eq!(samples[1].target, NVec2::new(4.0, 6.0));
}

#[test]
fn sampler_vertical_centering() {
    // 4x2 grid (aspect 0.5) in a 8x8 world: block height 4, centered
    let grid = RgbaImage::from_pixel(4, 2, Rgba([255, 255, 255, 255]));
    let samples = sample_grid(&grid, 1, 8.0, 8.0);

    let ys: Vec<f64> = samples.iter().map(|s| s.target.y).collect();
    let top = ys.iter().cloned().fold(f64::MIN, f64::max);
    let bottom = ys.iter().cloned().fold(f64::MAX, f64::min);
    assert_eq!(top, 6.0, "block top should sit at offset + block height");
    assert_eq!(bottom, 4.0);
}

#[test]
fn sampler_stride_subsamples() {
    let grid = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]));
    assert_eq!(sample_grid(&grid, 1, 8.0, 8.0).len(), 64);
    assert_eq!(sample_grid(&grid, 2, 8.0, 8.0).len(), 16);
    assert_eq!(sample_grid(&grid, 3, 8.0, 8.0).len(), 9);
}

#[test]
fn pixelate_preserves_aspect() {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 50, Rgba([9, 9, 9, 255])));
    let grid = pixelate(&img, 40);
    assert_eq!((grid.width(), grid.height()), (40, 20));
}

// ==================================================================================
// Configuration and error tests
// ==================================================================================

#[test]
fn config_rejects_bad_values() {
    let ok = base_config();
    assert!(ok.validate().is_ok());

    let mut bad = base_config();
    bad.parameters.dt = 0.0;
    assert!(matches!(
        bad.validate(),
        Err(SimError::InvalidConfiguration(_))
    ));

    let mut bad = base_config();
    bad.parameters.t2 = -1.0;
    assert!(matches!(
        bad.validate(),
        Err(SimError::InvalidConfiguration(_))
    ));

    let mut bad = base_config();
    bad.world.width = 0.0;
    assert!(matches!(
        bad.validate(),
        Err(SimError::InvalidConfiguration(_))
    ));

    let mut bad = base_config();
    bad.image.stride = 0;
    assert!(matches!(
        bad.validate(),
        Err(SimError::InvalidConfiguration(_))
    ));

    let mut bad = base_config();
    bad.parameters.radius = 0.0;
    assert!(matches!(
        bad.validate(),
        Err(SimError::InvalidConfiguration(_))
    ));
}

#[test]
fn unreadable_image_is_a_decode_error() {
    let err = pixelfall::load_image("definitely/not/a/real/image.png").unwrap_err();
    assert!(matches!(err, SimError::Decode(_)));
}
