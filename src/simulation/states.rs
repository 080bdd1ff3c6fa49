//! Core state types for the particle simulation.
//!
//! Defines the world and its contents:
//! - `Particle` — one simulated circle with its fixed render attributes
//! - `Segment` — a static boundary edge of the arena
//! - `World`   — the bounded arena plus the particle slot arena
//! - `Frame` / `Recording` — the captured output of a run
//!
//! Particle slots are stable for the life of a run: removal flips the
//! `alive` flag instead of shrinking the collection, so slot indices stay
//! valid as frame keys and removal never invalidates an in-progress sweep.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: NVec2, // position
    pub v: NVec2, // velocity (unused while drifting/converging)
    pub radius: f64, // fixed at creation, > 0
    pub color: [f32; 3], // fixed RGB in [0, 1]
    pub target: NVec2, // image-derived destination, fixed at creation
    pub alive: bool, // tombstone flag; false once removed
}

/// Static boundary edge from `a` to `b` with a fixed inward unit normal.
/// Storing the normal (rather than deriving it from the contact point) keeps
/// the push-out direction correct even when a fast particle ends a step on
/// the far side of the edge.
#[derive(Debug, Clone)]
pub struct Segment {
    pub a: NVec2, // first endpoint
    pub b: NVec2, // second endpoint
    pub normal: NVec2, // unit normal pointing into the arena
    pub elasticity: f64, // restitution of the normal velocity component
    pub friction: f64, // tangential damping on contact (zero here)
}

impl Segment {
    pub fn new(a: NVec2, b: NVec2, normal: NVec2, elasticity: f64) -> Self {
        Self {
            a,
            b,
            normal,
            elasticity,
            friction: 0.0,
        }
    }
}

/// The bounded arena. Geometry and the dynamics constants are immutable for
/// the life of a run; only particle state and the clock `t` change.
#[derive(Debug, Clone)]
pub struct World {
    pub width: f64, // arena extent in x: [0, width]
    pub height: f64, // arena extent in y: [0, height]
    pub gravity: NVec2, // constant acceleration
    pub damping: f64, // fraction of velocity retained per physics step
    pub segments: Vec<Segment>, // static boundary edges
    pub particles: Vec<Particle>, // slot arena, tombstoned on removal
    pub t: f64, // simulated time, advances only under physics
}

impl World {
    /// Build an empty arena closed by four boundary segments inset by `gap`
    /// from the true edges, each with shared `elasticity` and zero friction.
    pub fn bounded(width: f64, height: f64, gap: f64, elasticity: f64) -> Self {
        let (x0, x1) = (gap, width - gap);
        let (y0, y1) = (gap, height - gap);
        let segments = vec![
            // floor, inward normal up
            Segment::new(NVec2::new(x0, y0), NVec2::new(x1, y0), NVec2::new(0.0, 1.0), elasticity),
            // right wall, inward normal -x
            Segment::new(NVec2::new(x1, y0), NVec2::new(x1, y1), NVec2::new(-1.0, 0.0), elasticity),
            // left wall, inward normal +x
            Segment::new(NVec2::new(x0, y0), NVec2::new(x0, y1), NVec2::new(1.0, 0.0), elasticity),
            // ceiling, inward normal down
            Segment::new(NVec2::new(x0, y1), NVec2::new(x1, y1), NVec2::new(0.0, -1.0), elasticity),
        ];
        Self {
            width,
            height,
            gravity: NVec2::new(0.0, -9.82),
            damping: 0.997,
            segments,
            particles: Vec::new(),
            t: 0.0,
        }
    }

    /// Number of particles still in the active set.
    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.alive).count()
    }
}

/// Snapshot of every active particle's position at one tick boundary,
/// keyed by slot index. Immutable once recorded.
#[derive(Debug, Clone)]
pub struct Frame {
    pub positions: Vec<(usize, NVec2)>, // (slot index, position)
}

/// Ordered output of a full run: one frame per executed tick plus the fixed
/// per-slot render attributes a downstream consumer needs.
#[derive(Debug, Clone)]
pub struct Recording {
    pub frames: Vec<Frame>, // strict time order, capture-then-update
    pub times: Vec<f64>, // nominal tick start times, times[i] = i * dt
    pub colors: Vec<[f32; 3]>, // parallel to slot indices
    pub radii: Vec<f64>, // parallel to slot indices
}
