//! Top-level simulation state and frame loop
//!
//! [`Playground`] owns everything mutable: the live toys, the dog, the
//! pan/zoom transform and the seeded RNG. The host drives it by forwarding
//! input events and calling [`Playground::frame`] with a monotonic clock.
//! Rendering reads the state through the accessors; nothing here draws.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::dog::{DogState, StepContext, step_dog};
use super::launch::compute_launch;
use super::toy::{Toy, step_toy};
use crate::catalog::Catalog;
use crate::consts::{MAX_FRAME_DT_MS, WORLD_SIZE_PX};
use crate::view::{
    ViewRect, ViewportTransform, centered_pan, clamp_pan, clamp_zoom, zoom_around_visible_center,
};

/// The whole play-yard simulation
#[derive(Debug, Clone)]
pub struct Playground {
    catalog: Catalog,
    viewport: ViewRect,
    transform: ViewportTransform,
    toys: Vec<Toy>,
    dog: DogState,
    selected_dog: String,
    selected_toy: String,
    throw_mode: bool,
    rng: Pcg32,
    last_frame_ms: f64,
    next_toy_id: u32,
}

impl Playground {
    /// Build a session over an injected catalog.
    ///
    /// The initially selected kinds are the first dog and toy in name-sorted
    /// order. The view starts at zoom 1 with the world centered (or flush,
    /// when it overflows the viewport) and the dog at the world center.
    pub fn new(catalog: Catalog, viewport: ViewRect, seed: u64, now_ms: f64) -> Self {
        let selected_dog = catalog
            .dog_options()
            .first()
            .map(|d| d.id.clone())
            .unwrap_or_default();
        let selected_toy = catalog
            .toy_options()
            .first()
            .map(|t| t.id.clone())
            .unwrap_or_default();

        let zoom = 1.0;
        let transform = ViewportTransform {
            pan: clamp_pan(
                centered_pan(&viewport, zoom, WORLD_SIZE_PX),
                zoom,
                &viewport,
                WORLD_SIZE_PX,
            ),
            zoom,
        };

        Self {
            catalog,
            viewport,
            transform,
            toys: Vec::new(),
            dog: DogState::at_world_center(WORLD_SIZE_PX),
            selected_dog,
            selected_toy,
            throw_mode: false,
            rng: Pcg32::seed_from_u64(seed),
            last_frame_ms: now_ms,
            next_toy_id: 1,
        }
    }

    /// Advance the simulation to `now_ms`.
    ///
    /// The frame delta is capped so a stalled tab cannot tunnel toys through
    /// walls; a backwards clock reads as a zero-length frame. Toys step
    /// before the dog so the chase targets the current frame's positions.
    pub fn frame(&mut self, now_ms: f64) {
        let dt_ms = (now_ms - self.last_frame_ms).clamp(0.0, MAX_FRAME_DT_MS) as f32;
        self.last_frame_ms = now_ms;

        self.step_toys(dt_ms / 1000.0);
        self.step_dog(dt_ms);
    }

    fn step_toys(&mut self, dt: f32) {
        let mut i = self.toys.len();
        while i > 0 {
            i -= 1;
            // Physics comes from the kind the toy was thrown as
            let physics = match self.catalog.toy(&self.toys[i].kind) {
                Some(lookup) => lookup.get().physics,
                None => continue,
            };
            let outcome = step_toy(&self.toys[i], dt, WORLD_SIZE_PX, &physics);
            if outcome.remove {
                self.toys.remove(i);
            } else {
                self.toys[i] = outcome.next;
            }
        }
    }

    fn step_dog(&mut self, dt_ms: f32) {
        let kind = self.catalog.dog(&self.selected_dog).map(|l| l.get());
        let sprite_height = kind.map(|k| k.sprite_height()).unwrap_or(0.0);

        let ctx = StepContext {
            kind,
            toys: &self.toys,
            dt_ms,
            transform: &self.transform,
            viewport: &self.viewport,
            world_size: WORLD_SIZE_PX,
            sprite_height,
        };
        self.dog = step_dog(&self.dog, &ctx, &mut self.rng);
    }

    /// Throw the selected toy kind via a drag gesture in client coordinates.
    ///
    /// Returns whether a toy was actually launched. No-ops when throw mode is
    /// off, when no toy kinds are registered, or when the drag is too short
    /// to count as a throw.
    pub fn throw(&mut self, start_client: Vec2, end_client: Vec2) -> bool {
        if !self.throw_mode {
            return false;
        }
        let Some(lookup) = self.catalog.toy(&self.selected_toy) else {
            return false;
        };
        let kind = lookup.get();

        let Some(motion) = compute_launch(
            start_client,
            end_client,
            &self.viewport,
            &self.transform,
            kind,
        ) else {
            return false;
        };

        let id = self.next_toy_id;
        self.next_toy_id += 1;
        log::debug!(
            "throw {}: kind={} speed={:.1}",
            id,
            kind.id,
            motion.vel.length()
        );
        self.toys.push(Toy::from_motion(id, &kind.id, motion));
        true
    }

    /// Pan by a screen-space delta, clamped so the world stays in view
    pub fn pan_by(&mut self, delta: Vec2) {
        self.transform.pan = clamp_pan(
            self.transform.pan + delta,
            self.transform.zoom,
            &self.viewport,
            WORLD_SIZE_PX,
        );
    }

    /// Multiply the zoom, keeping the visible world center fixed
    pub fn zoom_by_factor(&mut self, factor: f32) {
        let next = clamp_zoom(self.transform.zoom * factor);
        self.transform =
            zoom_around_visible_center(&self.transform, next, &self.viewport, WORLD_SIZE_PX);
    }

    /// Set an absolute zoom level, keeping the visible world center fixed
    pub fn set_zoom(&mut self, zoom: f32) {
        let next = clamp_zoom(zoom);
        self.transform =
            zoom_around_visible_center(&self.transform, next, &self.viewport, WORLD_SIZE_PX);
    }

    /// Center the world in the viewport at the current zoom
    pub fn center_view(&mut self) {
        self.transform.pan = clamp_pan(
            centered_pan(&self.viewport, self.transform.zoom, WORLD_SIZE_PX),
            self.transform.zoom,
            &self.viewport,
            WORLD_SIZE_PX,
        );
    }

    /// Back to zoom 1 with the world centered
    pub fn reset_view(&mut self) {
        self.transform.zoom = 1.0;
        self.center_view();
    }

    /// Adopt a new viewport rectangle (host resize) and re-clamp the pan
    pub fn set_viewport(&mut self, viewport: ViewRect) {
        self.viewport = viewport;
        self.transform.pan = clamp_pan(
            self.transform.pan,
            self.transform.zoom,
            &self.viewport,
            WORLD_SIZE_PX,
        );
    }

    /// Select the active dog kind. Unknown ids fall back to the first kind in
    /// name-sorted order; the selection still records the resolved id.
    pub fn select_dog(&mut self, id: &str) {
        let Some(lookup) = self.catalog.dog(id) else {
            return;
        };
        if lookup.is_fallback() {
            log::warn!("unknown dog kind `{id}`, using `{}`", lookup.get().id);
        }
        self.selected_dog = lookup.get().id.clone();
    }

    /// Select the toy kind used for the next throw
    pub fn select_toy(&mut self, id: &str) {
        let Some(lookup) = self.catalog.toy(id) else {
            return;
        };
        if lookup.is_fallback() {
            log::warn!("unknown toy kind `{id}`, using `{}`", lookup.get().id);
        }
        self.selected_toy = lookup.get().id.clone();
    }

    /// Toggle between pan-drag and throw-drag interpretation of gestures
    pub fn set_throw_mode(&mut self, enabled: bool) {
        self.throw_mode = enabled;
    }

    pub fn throw_mode(&self) -> bool {
        self.throw_mode
    }

    pub fn toys(&self) -> &[Toy] {
        &self.toys
    }

    pub fn dog(&self) -> &DogState {
        &self.dog
    }

    pub fn view(&self) -> &ViewportTransform {
        &self.transform
    }

    pub fn viewport(&self) -> &ViewRect {
        &self.viewport
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected_dog(&self) -> &str {
        &self.selected_dog
    }

    pub fn selected_toy(&self) -> &str {
        &self.selected_toy
    }
}
