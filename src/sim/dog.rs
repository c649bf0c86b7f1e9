//! Dog steering: chase/wander targeting, motion, sprite orientation
//!
//! The policy is recomputed from scratch every tick rather than patched
//! incrementally; that keeps the agent frame-rate independent and lets it
//! self-heal from whatever state it is handed. The newest thrown toy always
//! wins as the chase target. With no toys in flight the dog wanders toward
//! random points just past the edges of the visible world rectangle.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::toy::Toy;
use crate::catalog::DogKind;
use crate::view::{ViewRect, ViewportTransform, WorldBounds, visible_world_bounds};
use crate::{angle_distance_deg, normalize_angle_deg};

/// Corner inset when picking a point along a visible edge
const EDGE_INSET: f32 = 40.0;
/// How far outside the visible edge a wander target sits
const EDGE_OFFSET: f32 = 28.0;

/// Current steering target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub has_target: bool,
}

/// Mutable per-session dog agent state, in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DogState {
    pub pos: Vec2,
    /// Index into the kind's directional frame table
    pub frame_index: usize,
    /// Mirror the frame horizontally
    pub flip: bool,
    /// Last motion heading, degrees in [0, 360)
    pub angle: f32,
    pub target: Target,
    pub visible: bool,
}

impl DogState {
    /// Initial state: yard center, no target
    pub fn at_world_center(world_size: f32) -> Self {
        let center = Vec2::splat(world_size / 2.0);
        Self {
            pos: center,
            frame_index: 0,
            flip: false,
            angle: 0.0,
            target: Target {
                pos: center,
                has_target: false,
            },
            visible: true,
        }
    }
}

/// Frame choice for a heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteFrame {
    pub frame_index: usize,
    pub flip: bool,
}

/// Pick the sprite frame closest to a heading (degrees in [0, 360)).
///
/// Headings in the [225°, 315°] cone face away from the camera and always use
/// the kind's dedicated upward frame, unmirrored. Otherwise every frame is
/// tried at its native angle and at its 180°-mirrored angle; the smallest
/// angular distance wins, first minimum in index order on ties.
pub fn select_sprite_frame(heading: f32, kind: &DogKind) -> SpriteFrame {
    if (225.0..=315.0).contains(&heading) {
        return SpriteFrame {
            frame_index: kind.upward_frame_index,
            flip: false,
        };
    }

    let mut frame_index = 0;
    let mut flip = false;
    let mut min_delta = f32::INFINITY;

    for i in 0..kind.frames.len() {
        let frame_angle = kind.frame_angle(i);
        let direct = angle_distance_deg(frame_angle, heading);
        let mirrored = angle_distance_deg(normalize_angle_deg(frame_angle + 180.0), heading);

        if direct < min_delta {
            min_delta = direct;
            frame_index = i;
            flip = false;
        }
        if mirrored < min_delta {
            min_delta = mirrored;
            frame_index = i;
            flip = true;
        }
    }

    SpriteFrame { frame_index, flip }
}

fn pick_along<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min).max(1.0)
}

/// Pick a wander target along a random edge of the visible world rectangle,
/// slightly outside the viewport and inset from the corners. The RNG is
/// injected so tests can fix the sequence.
pub fn pick_edge_target<R: Rng + ?Sized>(bounds: &WorldBounds, rng: &mut R) -> Vec2 {
    match rng.random_range(0..4) {
        0 => Vec2::new(
            pick_along(rng, bounds.left + EDGE_INSET, bounds.right - EDGE_INSET),
            bounds.top - EDGE_OFFSET,
        ),
        1 => Vec2::new(
            bounds.right + EDGE_OFFSET,
            pick_along(rng, bounds.top + EDGE_INSET, bounds.bottom - EDGE_INSET),
        ),
        2 => Vec2::new(
            pick_along(rng, bounds.left + EDGE_INSET, bounds.right - EDGE_INSET),
            bounds.bottom + EDGE_OFFSET,
        ),
        _ => Vec2::new(
            bounds.left - EDGE_OFFSET,
            pick_along(rng, bounds.top + EDGE_INSET, bounds.bottom - EDGE_INSET),
        ),
    }
}

/// Per-tick inputs to the steering engine
#[derive(Debug)]
pub struct StepContext<'a> {
    /// `None` when the catalog has no dogs; the step becomes a no-op
    pub kind: Option<&'a DogKind>,
    /// Live toys, oldest first
    pub toys: &'a [Toy],
    pub dt_ms: f32,
    pub transform: &'a ViewportTransform,
    pub viewport: &'a ViewRect,
    pub world_size: f32,
    /// Rendered sprite height in world pixels
    pub sprite_height: f32,
}

/// Advance the dog agent one tick.
///
/// Chase speed derives from the chased toy's own velocity magnitude converted
/// through the current zoom, clamped into the kind's chase range; wander speed
/// is the kind's base speed. The new position is clamped into the safe inset
/// region so the sprite's visual bounds stay in-world.
pub fn step_dog<R: Rng + ?Sized>(previous: &DogState, ctx: &StepContext, rng: &mut R) -> DogState {
    let Some(kind) = ctx.kind else {
        return previous.clone();
    };
    let movement = &kind.movement;

    let safe_min = ctx.sprite_height * movement.target_inset_ratio;
    let safe_max = ctx.world_size - safe_min;

    let latest_toy = ctx.toys.last();

    let mut target = previous.target;
    if let Some(toy) = latest_toy {
        // A throw always overrides whatever the dog was doing
        target = Target {
            pos: toy.pos.clamp(Vec2::splat(safe_min), Vec2::splat(safe_max)),
            has_target: true,
        };
    } else if !target.has_target {
        let bounds = visible_world_bounds(ctx.viewport, ctx.transform);
        target = Target {
            pos: pick_edge_target(&bounds, rng),
            has_target: true,
        };
    }

    let to_target = target.pos - previous.pos;
    let distance = to_target.length();

    let speed = match latest_toy {
        Some(toy) => {
            // Toy velocity is screen-rate px/s; convert to world px/ms
            let px_per_ms = toy.vel.length() / ctx.transform.zoom.max(1e-4) / 1000.0;
            px_per_ms.clamp(movement.min_chase_speed, movement.max_chase_speed)
        }
        None => movement.base_speed,
    };

    let step = distance.min(speed * ctx.dt_ms);
    let next_pos = if distance > 1.0 {
        previous.pos + to_target / distance * step
    } else {
        previous.pos
    };

    let heading = normalize_angle_deg(to_target.y.atan2(to_target.x).to_degrees());
    let frame = select_sprite_frame(heading, kind);

    let clamped = next_pos.clamp(Vec2::splat(safe_min), Vec2::splat(safe_max));

    let mut next_target = target;
    if let Some(toy) = latest_toy {
        if toy.pos.distance(clamped) < ctx.sprite_height * movement.catch_distance_ratio {
            next_target.has_target = false;
        }
    } else if clamped.x <= safe_min + 1.0
        || clamped.x >= safe_max - 1.0
        || clamped.y <= safe_min + 1.0
        || clamped.y >= safe_max - 1.0
    {
        // Wander leg complete once the safe-region boundary is touched
        next_target.has_target = false;
    }

    DogState {
        pos: clamped,
        frame_index: frame.frame_index,
        flip: frame.flip,
        angle: heading,
        target: next_target,
        visible: true,
    }
}
