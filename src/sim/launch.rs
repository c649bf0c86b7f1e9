//! Drag-to-throw launch kinematics
//!
//! A throw is a slingshot: drag away from where you want the toy to go and
//! release. The launch calculator turns the raw screen-space gesture into a
//! world-space motion state, scaling throw strength by how much of the
//! viewport diagonal the drag covered.

use glam::Vec2;

use crate::catalog::ToyKind;
use crate::consts::{BASE_TOY_INCHES, BASE_TOY_SCALE, GRID_SIZE, INCHES_PER_GRID};
use crate::view::{ViewRect, ViewportTransform, to_world};

/// Initial motion state for a newly thrown toy, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToyMotion {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub diameter: f32,
}

/// Physical toy diameter in world pixels for a kind
pub fn toy_diameter_px(kind: &ToyKind) -> f32 {
    let diameter_scale = BASE_TOY_SCALE * kind.diameter_multiplier;
    let diameter_inches = BASE_TOY_INCHES * diameter_scale;
    diameter_inches / INCHES_PER_GRID * GRID_SIZE
}

/// Convert a drag gesture into a launch.
///
/// Returns `None` for drags shorter than the kind's `min_drag_px` and for
/// gestures that collapse to a point in world space; both are treated as
/// "no throw", never as an error. The same screen-space drag yields a slower
/// world-space velocity when zoomed in.
pub fn compute_launch(
    start_client: Vec2,
    end_client: Vec2,
    viewport: &ViewRect,
    transform: &ViewportTransform,
    kind: &ToyKind,
) -> Option<ToyMotion> {
    let drag_screen = start_client - end_client;
    let dist_screen = drag_screen.length();
    if dist_screen < kind.launch.min_drag_px {
        return None;
    }

    let start_world = to_world(start_client, viewport, transform);
    let end_world = to_world(end_client, viewport, transform);
    let drag_world = start_world - end_world;
    let dist_world = drag_world.length();
    if dist_world < 1e-4 {
        return None;
    }

    // Throw direction opposes the drag
    let direction = drag_world / dist_world;

    let diagonal = viewport.diagonal().max(1.0);
    let speed_scale = (dist_screen / diagonal).clamp(0.0, 1.0);
    let screen_speed = kind.launch.min_screen_speed
        + (kind.launch.max_screen_speed - kind.launch.min_screen_speed) * speed_scale;
    let world_speed = screen_speed / transform.zoom.max(1e-4);

    let diameter = toy_diameter_px(kind).round();

    Some(ToyMotion {
        pos: end_world,
        vel: direction * world_speed,
        radius: diameter / 2.0,
        diameter,
    })
}
