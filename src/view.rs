//! Screen/world coordinate transforms and viewport clamping
//!
//! World space is the fixed-size yard. Screen space is whatever pixel
//! coordinates the host's input layer reports. `pan` is the screen-space
//! offset of the world origin and `zoom` scales world pixels to screen
//! pixels. Everything here is pure: the simulation loop owns the actual
//! transform state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// Viewport rectangle in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Viewport origin in client coordinates
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Screen-space diagonal, used to scale throw strength
    #[inline]
    pub fn diagonal(&self) -> f32 {
        Vec2::new(self.width, self.height).length()
    }
}

/// Pan/zoom state mapping world space onto the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    /// Screen-space offset of the world origin
    pub pan: Vec2,
    /// World-to-screen scale factor, kept in [`MIN_ZOOM`, `MAX_ZOOM`]
    pub zoom: f32,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

/// Axis-aligned world-space rectangle currently visible through the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Clamp a zoom factor into the supported range
#[inline]
pub fn clamp_zoom(zoom: f32) -> f32 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Map a client-space point into world space
pub fn to_world(client: Vec2, viewport: &ViewRect, transform: &ViewportTransform) -> Vec2 {
    (client - viewport.origin() - transform.pan) / transform.zoom
}

/// Inverse-map the viewport corners into world space
pub fn visible_world_bounds(viewport: &ViewRect, transform: &ViewportTransform) -> WorldBounds {
    WorldBounds {
        left: -transform.pan.x / transform.zoom,
        top: -transform.pan.y / transform.zoom,
        right: (viewport.width - transform.pan.x) / transform.zoom,
        bottom: (viewport.height - transform.pan.y) / transform.zoom,
    }
}

/// Pan that centers the scaled world inside the viewport
pub fn centered_pan(viewport: &ViewRect, zoom: f32, world_size: f32) -> Vec2 {
    let scaled = world_size * zoom;
    Vec2::new(
        (viewport.width - scaled) / 2.0,
        (viewport.height - scaled) / 2.0,
    )
}

/// Clamp pan so the world cannot be dragged out of view.
///
/// A world smaller than the viewport on an axis is centered on that axis; a
/// larger one is kept flush with the viewport edges.
pub fn clamp_pan(pan: Vec2, zoom: f32, viewport: &ViewRect, world_size: f32) -> Vec2 {
    let scaled = world_size * zoom;

    let x = if scaled <= viewport.width {
        (viewport.width - scaled) / 2.0
    } else {
        pan.x.clamp(viewport.width - scaled, 0.0)
    };

    let y = if scaled <= viewport.height {
        (viewport.height - scaled) / 2.0
    } else {
        pan.y.clamp(viewport.height - scaled, 0.0)
    };

    Vec2::new(x, y)
}

/// Re-zoom while keeping the center of the currently visible world region
/// fixed on screen, then re-clamp the pan for the new scale.
pub fn zoom_around_visible_center(
    transform: &ViewportTransform,
    next_zoom: f32,
    viewport: &ViewRect,
    world_size: f32,
) -> ViewportTransform {
    let bounds = visible_world_bounds(viewport, transform);

    let visible_left = bounds.left.max(0.0);
    let visible_top = bounds.top.max(0.0);
    let visible_right = bounds.right.min(world_size);
    let visible_bottom = bounds.bottom.min(world_size);

    let world_center = Vec2::new(
        (visible_left + visible_right) / 2.0,
        (visible_top + visible_bottom) / 2.0,
    );
    let screen_center = world_center * transform.zoom + transform.pan;

    ViewportTransform {
        pan: clamp_pan(
            screen_center - world_center * next_zoom,
            next_zoom,
            viewport,
            world_size,
        ),
        zoom: next_zoom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ViewRect {
        ViewRect::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn test_to_world_inverts_pan_and_zoom() {
        let transform = ViewportTransform {
            pan: Vec2::new(100.0, 50.0),
            zoom: 2.0,
        };
        let world = to_world(Vec2::new(300.0, 250.0), &viewport(), &transform);
        assert!((world.x - 100.0).abs() < 1e-4);
        assert!((world.y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_to_world_respects_viewport_origin() {
        let transform = ViewportTransform::default();
        let rect = ViewRect::new(20.0, 10.0, 800.0, 600.0);
        let world = to_world(Vec2::new(20.0, 10.0), &rect, &transform);
        assert_eq!(world, Vec2::ZERO);
    }

    #[test]
    fn test_visible_world_bounds_is_pure() {
        let transform = ViewportTransform {
            pan: Vec2::new(-40.0, 16.0),
            zoom: 0.5,
        };
        let a = visible_world_bounds(&viewport(), &transform);
        let b = visible_world_bounds(&viewport(), &transform);
        assert_eq!(a, b);
        assert!((a.left - 80.0).abs() < 1e-4);
        assert!((a.top + 32.0).abs() < 1e-4);
        assert!((a.right - (800.0 + 40.0) / 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_clamp_pan_centers_small_world() {
        // 400px world in an 800x600 viewport: centered on both axes
        let pan = clamp_pan(Vec2::new(-500.0, 900.0), 1.0, &viewport(), 400.0);
        assert_eq!(pan, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_clamp_pan_limits_large_world() {
        // 4800px world: pan must stay within [viewport - scaled, 0]
        let pan = clamp_pan(Vec2::new(100.0, -9999.0), 1.0, &viewport(), 4800.0);
        assert_eq!(pan.x, 0.0);
        assert_eq!(pan.y, 600.0 - 4800.0);
    }

    #[test]
    fn test_clamp_zoom_range() {
        assert_eq!(clamp_zoom(0.01), 0.1);
        assert_eq!(clamp_zoom(50.0), 5.0);
        assert_eq!(clamp_zoom(1.3), 1.3);
    }

    #[test]
    fn test_zoom_around_visible_center_keeps_center() {
        let world_size = 4800.0;
        let transform = ViewportTransform {
            pan: Vec2::new(-1000.0, -1000.0),
            zoom: 1.0,
        };
        let rect = viewport();

        let before = visible_world_bounds(&rect, &transform);
        let center_before = Vec2::new(
            (before.left.max(0.0) + before.right.min(world_size)) / 2.0,
            (before.top.max(0.0) + before.bottom.min(world_size)) / 2.0,
        );

        let next = zoom_around_visible_center(&transform, 2.0, &rect, world_size);
        assert_eq!(next.zoom, 2.0);

        let after = visible_world_bounds(&rect, &next);
        let center_after = Vec2::new(
            (after.left + after.right) / 2.0,
            (after.top + after.bottom) / 2.0,
        );
        assert!((center_before.x - center_after.x).abs() < 1.0);
        assert!((center_before.y - center_after.y).abs() < 1.0);
    }
}
