//! Configuration types for loading simulation runs from YAML.
//!
//! A run consists of:
//!
//! - [`WorldConfig`]      – arena geometry and dynamics constants
//! - [`ParametersConfig`] – phase durations, time step, seed, motion bounds
//! - [`ImageConfig`]      – source image and sampling density
//! - [`OutputConfig`]     – optional PNG frame output
//! - [`SimConfig`]        – top-level wrapper used to load a run from YAML
//!
//! # YAML format
//! An example run YAML matching these types:
//!
//! ```yaml
//! world:
//!   width: 9.0            # arena extent in x
//!   height: 16.0          # arena extent in y
//!   elasticity: 0.9       # boundary restitution
//!
//! parameters:
//!   t1: 4.5               # drift phase duration
//!   t2: 4.5               # converge phase duration
//!   t3: 9.0               # physics phase duration
//!   dt: 0.0333333333      # time step (30 ticks per second)
//!   seed: 42              # deterministic seed
//!
//! image:
//!   path: "Example_Image.png"
//!   target_width: 450     # resize width in pixels
//!   stride: 8             # keep every 8th cell on both axes
//!
//! output:
//!   dir: "frames"
//!   scale: 60             # pixels per world unit
//!   every: 2              # write every 2nd frame
//! ```
//!
//! Fields with physically sensible defaults (gap, gravity, damping, jitter,
//! approach, scatter, speed, radius) may be omitted from the YAML.

use serde::Deserialize;

use crate::error::SimError;

/// Arena geometry and dynamics constants.
#[derive(Deserialize, Debug, Clone)]
pub struct WorldConfig {
    pub width: f64,  // arena extent in x: [0, width]
    pub height: f64, // arena extent in y: [0, height]
    pub elasticity: f64, // boundary restitution, shared by all four edges
    #[serde(default = "default_gap")]
    pub gap: f64, // boundary inset from the true edges
    #[serde(default = "default_gravity")]
    pub gravity: [f64; 2], // constant acceleration
    #[serde(default = "default_damping")]
    pub damping: f64, // velocity retained per physics step
}

/// Phase timing, seed, and per-phase motion bounds.
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t1: f64, // drift phase duration
    pub t2: f64, // converge phase duration
    pub t3: f64, // physics phase duration
    pub dt: f64, // fixed time step
    pub seed: u64, // deterministic seed to make runs reproducible
    #[serde(default = "default_jitter")]
    pub jitter: f64, // drift offset bound per axis per tick
    #[serde(default = "default_approach")]
    pub approach: f64, // fraction of remaining target distance per tick
    #[serde(default = "default_scatter")]
    pub scatter: f64, // spawn offset bound per axis around the target
    #[serde(default = "default_speed")]
    pub speed: f64, // initial velocity bound per axis
    #[serde(default = "default_radius")]
    pub radius: f64, // shared particle radius
}

/// Source image and sampling density.
#[derive(Deserialize, Debug, Clone)]
pub struct ImageConfig {
    pub path: String, // image file to decode
    pub target_width: u32, // resize width in pixels
    pub stride: u32, // keep every Nth grid cell on both axes
}

/// Optional PNG frame output.
#[derive(Deserialize, Debug, Clone)]
pub struct OutputConfig {
    pub dir: String, // directory for the numbered PNG sequence
    #[serde(default = "default_scale")]
    pub scale: u32, // pixels per world unit
    #[serde(default = "default_every")]
    pub every: usize, // write every Nth frame
}

/// Top-level run configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub parameters: ParametersConfig,
    pub image: ImageConfig,
    pub output: Option<OutputConfig>,
}

impl SimConfig {
    /// Reject configurations that make the run meaningless. Runs before any
    /// simulation state is built; a failure here produces no output at all.
    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |msg: &str| Err(SimError::InvalidConfiguration(msg.to_string()));

        if !(self.parameters.dt > 0.0) || !self.parameters.dt.is_finite() {
            return invalid("dt must be positive and finite");
        }
        for (name, d) in [
            ("t1", self.parameters.t1),
            ("t2", self.parameters.t2),
            ("t3", self.parameters.t3),
        ] {
            if d < 0.0 || !d.is_finite() {
                return Err(SimError::InvalidConfiguration(format!(
                    "duration {name} must be non-negative and finite"
                )));
            }
        }
        if !(self.world.width > 0.0) || !(self.world.height > 0.0) {
            return invalid("world dimensions must be positive");
        }
        if !(self.parameters.radius > 0.0) {
            return invalid("particle radius must be positive");
        }
        if self.image.stride == 0 {
            return invalid("stride must be at least 1");
        }
        if self.image.target_width == 0 {
            return invalid("target_width must be at least 1");
        }
        if self.parameters.jitter < 0.0 || self.parameters.scatter < 0.0 || self.parameters.speed < 0.0 {
            return invalid("motion bounds must be non-negative");
        }
        Ok(())
    }
}

fn default_gap() -> f64 {
    0.1
}

fn default_gravity() -> [f64; 2] {
    [0.0, -9.82]
}

fn default_damping() -> f64 {
    0.997
}

fn default_jitter() -> f64 {
    0.01
}

fn default_approach() -> f64 {
    0.05
}

fn default_scatter() -> f64 {
    1.0
}

fn default_speed() -> f64 {
    0.1
}

fn default_radius() -> f64 {
    0.1
}

fn default_scale() -> u32 {
    60
}

fn default_every() -> usize {
    1
}
