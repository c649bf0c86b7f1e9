//! Toy motion stepping: integration, damping, wall bounce, removal
//!
//! Single-step semi-implicit Euler with exponential damping, so decay stays
//! frame-rate independent. Wall response is a deliberate simplification, not
//! a full rigid-body solve: the violating axis is clamped and reflected with
//! restitution, and the perpendicular axis loses a slice of velocity to wall
//! friction on every bounce.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::launch::ToyMotion;
use crate::catalog::PhysicsProfile;
use crate::consts::OUT_OF_BOUNDS_MARGIN;

/// A live toy in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toy {
    pub id: u32,
    /// Id of the toy kind this instance was thrown as
    pub kind: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub diameter: f32,
}

impl Toy {
    /// Instantiate a toy from a computed launch
    pub fn from_motion(id: u32, kind: &str, motion: ToyMotion) -> Self {
        Self {
            id,
            kind: kind.to_string(),
            pos: motion.pos,
            vel: motion.vel,
            radius: motion.radius,
            diameter: motion.diameter,
        }
    }
}

/// Result of stepping one toy for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub next: Toy,
    /// The toy has come to rest or escaped the yard and should be dropped
    pub remove: bool,
}

/// Advance one toy by `dt` seconds.
///
/// Never fails; inputs are assumed well-formed. Positions stay inside
/// `[radius, world_size - radius]` on both axes after the wall pass. The
/// out-of-bounds margin tolerates bad input data for a frame before the toy
/// is dropped rather than clamped from infinity.
pub fn step_toy(toy: &Toy, dt: f32, world_size: f32, physics: &PhysicsProfile) -> StepOutcome {
    let mut next = toy.clone();

    next.pos += next.vel * dt;

    // Frame-rate independent decay
    let damp = (-physics.damping * dt).exp();
    next.vel *= damp;

    let min = next.radius;
    let max = world_size - next.radius;

    if next.pos.x < min {
        next.pos.x = min;
        next.vel.x = next.vel.x.abs() * physics.restitution;
        next.vel.y *= physics.wall_friction;
    } else if next.pos.x > max {
        next.pos.x = max;
        next.vel.x = -next.vel.x.abs() * physics.restitution;
        next.vel.y *= physics.wall_friction;
    }

    if next.pos.y < min {
        next.pos.y = min;
        next.vel.y = next.vel.y.abs() * physics.restitution;
        next.vel.x *= physics.wall_friction;
    } else if next.pos.y > max {
        next.pos.y = max;
        next.vel.y = -next.vel.y.abs() * physics.restitution;
        next.vel.x *= physics.wall_friction;
    }

    let speed = next.vel.length();
    let out_of_bounds = next.pos.x < -OUT_OF_BOUNDS_MARGIN
        || next.pos.x > world_size + OUT_OF_BOUNDS_MARGIN
        || next.pos.y < -OUT_OF_BOUNDS_MARGIN
        || next.pos.y > world_size + OUT_OF_BOUNDS_MARGIN;

    StepOutcome {
        next,
        remove: out_of_bounds || speed < physics.speed_threshold,
    }
}
