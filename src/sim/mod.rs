//! Deterministic simulation module
//!
//! All play-yard behavior lives here. The module stays pure and
//! frame-rate independent:
//! - Per-frame delta capped and fed through explicitly
//! - Seeded RNG only, injected at the wander-target seam
//! - Fixed update order: toys first, then the dog
//! - No rendering or platform dependencies

pub mod dog;
pub mod launch;
pub mod tick;
pub mod toy;

pub use dog::{DogState, SpriteFrame, StepContext, Target, pick_edge_target, select_sprite_frame, step_dog};
pub use launch::{ToyMotion, compute_launch, toy_diameter_px};
pub use tick::Playground;
pub use toy::{StepOutcome, Toy, step_toy};
