//! Numerical parameters for a simulation run
//!
//! `Parameters` holds the runtime settings:
//! - phase durations and the fixed time step,
//! - the deterministic RNG seed,
//! - motion constants for each phase (jitter, approach factor),
//! - spawn ranges and the shared particle radius

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t1: f64, // drift phase duration
    pub t2: f64, // converge phase duration
    pub t3: f64, // physics phase duration (may end early)
    pub dt: f64, // fixed time step
    pub seed: u64, // deterministic seed, makes runs reproducible
    pub jitter: f64, // per-axis drift offset bound per tick
    pub approach: f64, // fraction of the remaining target vector per tick
    pub scatter: f64, // per-axis spawn offset bound around the target
    pub speed: f64, // per-axis initial velocity bound
    pub radius: f64, // shared particle radius
}
