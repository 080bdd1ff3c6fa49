//! World-stepping primitive behind a trait
//!
//! The scheduler never integrates motion itself; it drives a [`WorldStep`]
//! with exactly two operations: a zero-time step (drift/converge phases, no
//! dynamics) and a full step (gravity + damping + boundary collision).
//! `EulerStepper` is the provided implementation: semi-implicit Euler with
//! circle-vs-static-segment reflection, which is all this world needs.

use super::states::{NVec2, Particle, Segment, World};

/// Capability trait for advancing the world.
/// `step_zero` is a legal no-op-dynamics call; `step_with_time` integrates
/// motion and resolves boundary collisions for elapsed time `dt`.
pub trait WorldStep {
    fn step_zero(&self, world: &mut World);
    fn step_with_time(&self, world: &mut World, dt: f64);
}

/// Semi-implicit Euler integrator with elastic circle-vs-segment response.
pub struct EulerStepper;

impl WorldStep for EulerStepper {
    fn step_zero(&self, _world: &mut World) {
        // No dynamics, no time: boundary and gravity semantics are inert.
        // Exists so the phases that only reposition particles still issue a
        // world step, mirroring the engine contract.
    }

    fn step_with_time(&self, world: &mut World, dt: f64) {
        // Split &mut World into disjoint &mut fields in one destructuring step
        let World {
            gravity,
            damping,
            segments,
            particles,
            t,
            ..
        } = world;

        for p in particles.iter_mut().filter(|p| p.alive) {
            let x_old = p.x;

            // Kick: v_n+1 = (v_n + g dt) * damping
            p.v += *gravity * dt;
            p.v *= *damping;

            // Drift with the updated velocity: x_n+1 = x_n + dt v_n+1
            p.x += p.v * dt;

            // Resolve against every boundary edge at the new position
            for seg in segments.iter() {
                collide_circle_segment(p, x_old, seg);
            }
        }

        // Advance the clock by one full step
        *t += dt;
    }
}

/// Resolve one circle against one static segment.
///
/// Signed distance along the segment's inward normal decides contact: a
/// center that ends the step closer than `radius` to the edge line is pushed
/// back to exactly `radius` inside, and the inbound normal velocity
/// component is reflected scaled by the segment's elasticity. The tangential
/// component is untouched since boundary friction is zero.
///
/// The pre-step position gates the contact: a particle that was inside (or
/// touching) and crossed the line within one step is still caught, while a
/// particle that already sat well beyond the edge belongs to the removal
/// policy and is left alone.
fn collide_circle_segment(p: &mut Particle, x_old: NVec2, seg: &Segment) {
    let ab = seg.b - seg.a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return;
    }

    // Reject contacts beyond the segment's extent
    let t = (p.x - seg.a).dot(&ab) / len2;
    if !(0.0..=1.0).contains(&t) {
        return;
    }

    // Signed distances of the center from the edge line, positive inside
    let s_new = (p.x - seg.a).dot(&seg.normal);
    let s_old = (x_old - seg.a).dot(&seg.normal);
    if s_new >= p.radius || s_old < -p.radius {
        return;
    }

    // Push the center back to the contact distance
    p.x += (p.radius - s_new) * seg.normal;

    // Reflect only if still moving into the edge
    let vn = p.v.dot(&seg.normal);
    if vn < 0.0 {
        p.v -= (1.0 + seg.elasticity) * vn * seg.normal;
    }
}
