//! Fetchyard - an interactive play-yard simulation
//!
//! Core modules:
//! - `sim`: deterministic simulation (toy physics, dog steering, frame loop)
//! - `view`: screen/world coordinate transforms and pan/zoom clamping
//! - `catalog`: dog and toy kind records supplied by the host
//! - `background`: backdrop records and the stale-result request guard
//!
//! The crate owns no rendering or input devices. The host pushes gestures and
//! pan/zoom deltas in, calls [`sim::Playground::frame`] once per display
//! frame, and reads the resulting dog/toy snapshot back out.

pub mod background;
pub mod catalog;
pub mod sim;
pub mod view;

pub use catalog::{Catalog, CatalogError, DogKind, Lookup, ToyKind};
pub use sim::{DogState, Playground, StepOutcome, Toy};
pub use view::{ViewRect, ViewportTransform};

/// World and sprite dimension constants
pub mod consts {
    /// Screen pixels per grid cell at zoom 1
    pub const GRID_SIZE: f32 = 24.0;
    /// Real-world inches represented by one grid cell
    pub const INCHES_PER_GRID: f32 = 6.0;
    /// Side length of the yard in feet
    pub const GRID_FEET: f32 = 100.0;
    /// Side length of the yard in grid cells
    pub const GRID_UNITS: f32 = GRID_FEET * 12.0 / INCHES_PER_GRID;
    /// Side length of the yard in world pixels
    pub const WORLD_SIZE_PX: f32 = GRID_UNITS * GRID_SIZE;

    /// Baseline toy diameter in inches before per-kind scaling
    pub const BASE_TOY_INCHES: f32 = 6.0;
    /// Styling multiplier applied to every toy's physical diameter
    pub const BASE_TOY_SCALE: f32 = 2.125;
    /// Rendered dog sprite height in world pixels (a 25-inch dog, styled 2.2x)
    pub const DOG_SPRITE_TARGET_HEIGHT: f32 = 25.0 / INCHES_PER_GRID * GRID_SIZE * 2.2;

    /// Zoom clamp range
    pub const MIN_ZOOM: f32 = 0.1;
    pub const MAX_ZOOM: f32 = 5.0;

    /// Worst-case frame delta in milliseconds. Caps the step after tab
    /// suspension or a long pause so one frame can't destabilize the physics.
    pub const MAX_FRAME_DT_MS: f64 = 48.0;

    /// Toys may stray this far outside the yard before being dropped
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 200.0;
}

/// Minimum angular difference between two headings in degrees, in [0, 180]
#[inline]
pub fn angle_distance_deg(a: f32, b: f32) -> f32 {
    let delta = (a - b).abs() % 360.0;
    delta.min(360.0 - delta)
}

/// Normalize a heading in degrees to [0, 360)
#[inline]
pub fn normalize_angle_deg(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_distance_wraps() {
        assert!((angle_distance_deg(350.0, 10.0) - 20.0).abs() < 1e-6);
        assert!((angle_distance_deg(10.0, 350.0) - 20.0).abs() < 1e-6);
        assert!((angle_distance_deg(90.0, 270.0) - 180.0).abs() < 1e-6);
        assert_eq!(angle_distance_deg(45.0, 45.0), 0.0);
    }

    #[test]
    fn test_normalize_angle_deg() {
        assert!((normalize_angle_deg(-90.0) - 270.0).abs() < 1e-6);
        assert!((normalize_angle_deg(450.0) - 90.0).abs() < 1e-6);
        assert_eq!(normalize_angle_deg(0.0), 0.0);
    }
}
