//! Dog and toy kind records
//!
//! The host registers kind definitions up front; the engine reads them and
//! never mutates them. Registration fails fast on malformed records. Lookups
//! by unknown id resolve to the first entry in name-sorted order and report
//! that they did, so the simulation keeps running with a sensible kind while
//! the host can still surface the mismatch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DOG_SPRITE_TARGET_HEIGHT;

/// Steering parameters for one dog kind.
///
/// Speeds are world pixels per millisecond; ratios are fractions of the
/// rendered sprite height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementProfile {
    /// Wander speed
    pub base_speed: f32,
    pub min_chase_speed: f32,
    pub max_chase_speed: f32,
    /// Safe-region inset from every world edge
    pub target_inset_ratio: f32,
    /// Radius around a chased toy that counts as caught
    pub catch_distance_ratio: f32,
}

impl Default for MovementProfile {
    fn default() -> Self {
        Self {
            base_speed: 0.08,
            min_chase_speed: 0.02,
            max_chase_speed: 0.6,
            target_inset_ratio: 0.6,
            catch_distance_ratio: 0.55,
        }
    }
}

/// Rigid-body-ish parameters for one toy kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsProfile {
    /// Exponential velocity decay rate, 1/s
    pub damping: f32,
    /// Velocity retained along the bounced axis
    pub restitution: f32,
    /// Velocity retained on the perpendicular axis per bounce
    pub wall_friction: f32,
    /// Below this speed the toy is removed
    pub speed_threshold: f32,
}

impl Default for PhysicsProfile {
    fn default() -> Self {
        Self {
            damping: 0.8,
            restitution: 0.72,
            wall_friction: 0.96,
            speed_threshold: 6.0,
        }
    }
}

/// Drag-to-throw parameters for one toy kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchProfile {
    /// Screen-space drags shorter than this never fire a throw
    pub min_drag_px: f32,
    /// Screen speed for the weakest accepted drag
    pub min_screen_speed: f32,
    /// Screen speed for a drag spanning the viewport diagonal
    pub max_screen_speed: f32,
}

impl Default for LaunchProfile {
    fn default() -> Self {
        Self {
            min_drag_px: 8.0,
            min_screen_speed: 200.0,
            max_screen_speed: 1500.0,
        }
    }
}

fn default_scale() -> f32 {
    1.0
}

/// A dog kind definition as supplied by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DogKind {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Host-resolved image references, one per directional frame
    pub frames: Vec<String>,
    /// Heading each frame natively faces, in degrees, parallel to `frames`.
    /// Missing entries read as 0.
    #[serde(default)]
    pub frame_angles: Vec<f32>,
    /// Frame forced while the dog moves away from the camera
    #[serde(default)]
    pub upward_frame_index: usize,
    #[serde(default = "default_scale")]
    pub visual_scale: f32,
    #[serde(default)]
    pub movement: MovementProfile,
}

impl DogKind {
    /// Native heading of a frame; absent table entries read as 0 degrees
    pub fn frame_angle(&self, index: usize) -> f32 {
        self.frame_angles.get(index).copied().unwrap_or(0.0)
    }

    /// Rendered sprite height in world pixels
    pub fn sprite_height(&self) -> f32 {
        DOG_SPRITE_TARGET_HEIGHT * self.visual_scale
    }
}

/// A toy kind definition as supplied by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToyKind {
    pub id: String,
    pub name: String,
    /// Host-resolved image reference
    pub image: String,
    #[serde(default = "default_scale")]
    pub diameter_multiplier: f32,
    #[serde(default)]
    pub launch: LaunchProfile,
    #[serde(default)]
    pub physics: PhysicsProfile,
}

/// Registration failures. These are the only errors the engine raises; every
/// runtime condition (unknown id, empty catalog) resolves via fallback.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{kind} definition requires a non-empty id")]
    MissingId { kind: &'static str },
    #[error("{kind} definition `{id}` requires a non-empty name")]
    MissingName { kind: &'static str, id: String },
    #[error("dog definition `{id}` requires at least one frame image")]
    NoFrames { id: String },
    #[error("toy definition `{id}` requires an image reference")]
    MissingImage { id: String },
    #[error("invalid {kind} definition list: {source}")]
    Parse {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of an id lookup. `Fallback` means the requested id was unknown and
/// the first entry in name-sorted order was substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Fallback(T),
}

impl<T> Lookup<T> {
    /// The resolved kind, regardless of how it was found
    pub fn get(self) -> T {
        match self {
            Lookup::Found(value) | Lookup::Fallback(value) => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Lookup::Fallback(_))
    }
}

/// In-memory store of dog and toy kinds, injected into the engine at
/// construction time
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    dogs: Vec<DogKind>,
    toys: Vec<ToyKind>,
}

impl Catalog {
    /// An empty catalog. The dog engine no-ops and throws are rejected until
    /// kinds are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in kinds the original play-yard ships with
    pub fn with_defaults() -> Self {
        Self {
            dogs: default_dogs(),
            toys: default_toys(),
        }
    }

    /// Register or replace a dog kind. Re-registering an id overwrites the
    /// previous record.
    pub fn register_dog(&mut self, dog: DogKind) -> Result<(), CatalogError> {
        if dog.id.trim().is_empty() {
            return Err(CatalogError::MissingId { kind: "dog" });
        }
        if dog.name.trim().is_empty() {
            return Err(CatalogError::MissingName {
                kind: "dog",
                id: dog.id,
            });
        }
        if dog.frames.is_empty() {
            return Err(CatalogError::NoFrames { id: dog.id });
        }

        match self.dogs.iter_mut().find(|d| d.id == dog.id) {
            Some(slot) => *slot = dog,
            None => self.dogs.push(dog),
        }
        Ok(())
    }

    /// Register or replace a toy kind
    pub fn register_toy(&mut self, toy: ToyKind) -> Result<(), CatalogError> {
        if toy.id.trim().is_empty() {
            return Err(CatalogError::MissingId { kind: "toy" });
        }
        if toy.name.trim().is_empty() {
            return Err(CatalogError::MissingName {
                kind: "toy",
                id: toy.id,
            });
        }
        if toy.image.trim().is_empty() {
            return Err(CatalogError::MissingImage { id: toy.id });
        }

        match self.toys.iter_mut().find(|t| t.id == toy.id) {
            Some(slot) => *slot = toy,
            None => self.toys.push(toy),
        }
        Ok(())
    }

    /// Register a JSON array of dog definitions. Stops at the first invalid
    /// record; earlier records stay registered.
    pub fn register_dogs_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        let defs: Vec<DogKind> =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                kind: "dog",
                source,
            })?;
        let count = defs.len();
        for def in defs {
            self.register_dog(def)?;
        }
        Ok(count)
    }

    /// Register a JSON array of toy definitions
    pub fn register_toys_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        let defs: Vec<ToyKind> =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                kind: "toy",
                source,
            })?;
        let count = defs.len();
        for def in defs {
            self.register_toy(def)?;
        }
        Ok(count)
    }

    /// All dog kinds, name-sorted for stable option lists
    pub fn dog_options(&self) -> Vec<&DogKind> {
        let mut options: Vec<&DogKind> = self.dogs.iter().collect();
        options.sort_by(|a, b| a.name.cmp(&b.name));
        options
    }

    /// All toy kinds, name-sorted
    pub fn toy_options(&self) -> Vec<&ToyKind> {
        let mut options: Vec<&ToyKind> = self.toys.iter().collect();
        options.sort_by(|a, b| a.name.cmp(&b.name));
        options
    }

    /// Look up a dog kind by id; `None` only when no dogs are registered
    pub fn dog(&self, id: &str) -> Option<Lookup<&DogKind>> {
        if let Some(kind) = self.dogs.iter().find(|d| d.id == id) {
            return Some(Lookup::Found(kind));
        }
        self.dogs
            .iter()
            .min_by(|a, b| a.name.cmp(&b.name))
            .map(Lookup::Fallback)
    }

    /// Look up a toy kind by id; `None` only when no toys are registered
    pub fn toy(&self, id: &str) -> Option<Lookup<&ToyKind>> {
        if let Some(kind) = self.toys.iter().find(|t| t.id == id) {
            return Some(Lookup::Found(kind));
        }
        self.toys
            .iter()
            .min_by(|a, b| a.name.cmp(&b.name))
            .map(Lookup::Fallback)
    }
}

fn shared_dog_frames() -> Vec<String> {
    vec![
        "dogs/dog-01.png".into(),
        "dogs/dog-02.png".into(),
        "dogs/dog-03.png".into(),
        "dogs/dog-04.png".into(),
    ]
}

fn default_dogs() -> Vec<DogKind> {
    vec![
        DogKind {
            id: "farm-collie".into(),
            name: "Farm Collie".into(),
            description: "Balanced wander/chase behavior.".into(),
            frames: shared_dog_frames(),
            frame_angles: vec![60.0, 90.0, 0.0, 270.0],
            upward_frame_index: 3,
            visual_scale: 1.0,
            movement: MovementProfile {
                base_speed: 0.08,
                min_chase_speed: 0.02,
                max_chase_speed: 0.6,
                target_inset_ratio: 0.6,
                catch_distance_ratio: 0.55,
            },
        },
        DogKind {
            id: "quick-collie".into(),
            name: "Quick Collie".into(),
            description: "Moves faster when chasing throws.".into(),
            frames: shared_dog_frames(),
            frame_angles: vec![60.0, 90.0, 0.0, 270.0],
            upward_frame_index: 3,
            visual_scale: 1.0,
            movement: MovementProfile {
                base_speed: 0.1,
                min_chase_speed: 0.03,
                max_chase_speed: 0.75,
                target_inset_ratio: 0.6,
                catch_distance_ratio: 0.5,
            },
        },
        DogKind {
            id: "steady-shepherd".into(),
            name: "Steady Shepherd".into(),
            description: "Calmer wander profile.".into(),
            frames: shared_dog_frames(),
            frame_angles: vec![60.0, 90.0, 0.0, 270.0],
            upward_frame_index: 3,
            visual_scale: 1.0,
            movement: MovementProfile {
                base_speed: 0.07,
                min_chase_speed: 0.02,
                max_chase_speed: 0.45,
                target_inset_ratio: 0.6,
                catch_distance_ratio: 0.6,
            },
        },
    ]
}

fn default_toys() -> Vec<ToyKind> {
    vec![
        ToyKind {
            id: "ball".into(),
            name: "Ball".into(),
            image: "toys/ball.png".into(),
            diameter_multiplier: 1.0,
            launch: LaunchProfile {
                min_drag_px: 8.0,
                min_screen_speed: 200.0,
                max_screen_speed: 1500.0,
            },
            physics: PhysicsProfile {
                damping: 0.8,
                restitution: 0.72,
                wall_friction: 0.96,
                speed_threshold: 6.0,
            },
        },
        ToyKind {
            id: "frisbee".into(),
            name: "Frisbee".into(),
            image: "toys/frisbee.png".into(),
            diameter_multiplier: 2.0,
            launch: LaunchProfile {
                min_drag_px: 8.0,
                min_screen_speed: 260.0,
                max_screen_speed: 1800.0,
            },
            physics: PhysicsProfile {
                damping: 0.65,
                restitution: 0.62,
                wall_friction: 0.94,
                speed_threshold: 8.0,
            },
        },
        ToyKind {
            id: "bone".into(),
            name: "Bone".into(),
            image: "toys/bone.png".into(),
            diameter_multiplier: 1.0,
            launch: LaunchProfile {
                min_drag_px: 8.0,
                min_screen_speed: 180.0,
                max_screen_speed: 1200.0,
            },
            physics: PhysicsProfile {
                damping: 0.95,
                restitution: 0.5,
                wall_friction: 0.92,
                speed_threshold: 5.0,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_dog(id: &str, name: &str) -> DogKind {
        DogKind {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            frames: vec!["dogs/dog-01.png".into()],
            frame_angles: Vec::new(),
            upward_frame_index: 0,
            visual_scale: 1.0,
            movement: MovementProfile::default(),
        }
    }

    #[test]
    fn test_register_dog_rejects_missing_fields() {
        let mut catalog = Catalog::new();

        let mut no_id = minimal_dog("", "Dog");
        no_id.id = String::new();
        assert!(matches!(
            catalog.register_dog(no_id),
            Err(CatalogError::MissingId { kind: "dog" })
        ));

        let mut no_frames = minimal_dog("pointer", "Pointer");
        no_frames.frames.clear();
        assert!(matches!(
            catalog.register_dog(no_frames),
            Err(CatalogError::NoFrames { .. })
        ));
    }

    #[test]
    fn test_register_toy_requires_image() {
        let mut catalog = Catalog::new();
        let toy = ToyKind {
            id: "rope".into(),
            name: "Rope".into(),
            image: String::new(),
            diameter_multiplier: 1.0,
            launch: LaunchProfile::default(),
            physics: PhysicsProfile::default(),
        };
        assert!(matches!(
            catalog.register_toy(toy),
            Err(CatalogError::MissingImage { .. })
        ));
    }

    #[test]
    fn test_reregistering_same_id_replaces() {
        let mut catalog = Catalog::new();
        catalog
            .register_dog(minimal_dog("collie", "Collie"))
            .expect("valid dog");
        let mut updated = minimal_dog("collie", "Collie Mk2");
        updated.movement.base_speed = 0.2;
        catalog.register_dog(updated).expect("valid dog");

        assert_eq!(catalog.dog_options().len(), 1);
        let found = catalog.dog("collie").expect("registered").get();
        assert_eq!(found.name, "Collie Mk2");
        assert_eq!(found.movement.base_speed, 0.2);
    }

    #[test]
    fn test_unknown_id_falls_back_to_first_by_name() {
        let mut catalog = Catalog::new();
        catalog
            .register_dog(minimal_dog("zeta", "Zeta"))
            .expect("valid dog");
        catalog
            .register_dog(minimal_dog("alpha", "Alpha"))
            .expect("valid dog");

        let lookup = catalog.dog("missing").expect("non-empty catalog");
        assert!(lookup.is_fallback());
        assert_eq!(lookup.get().id, "alpha");

        let direct = catalog.dog("zeta").expect("non-empty catalog");
        assert!(!direct.is_fallback());
    }

    #[test]
    fn test_empty_catalog_lookup_is_none() {
        let catalog = Catalog::new();
        assert!(catalog.dog("anything").is_none());
        assert!(catalog.toy("anything").is_none());
    }

    #[test]
    fn test_defaults_cover_both_catalogs() {
        let catalog = Catalog::with_defaults();
        assert_eq!(catalog.dog_options().len(), 3);
        assert_eq!(catalog.toy_options().len(), 3);
        // Name-sorted: Ball, Bone, Frisbee
        let names: Vec<&str> = catalog
            .toy_options()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ball", "Bone", "Frisbee"]);
    }

    #[test]
    fn test_json_registration_applies_profile_defaults() {
        let mut catalog = Catalog::new();
        let count = catalog
            .register_toys_json(
                r#"[{"id":"rope","name":"Rope","image":"toys/rope.png","launch":{"max_screen_speed":900.0}}]"#,
            )
            .expect("valid toy list");
        assert_eq!(count, 1);

        let rope = catalog.toy("rope").expect("registered").get();
        assert_eq!(rope.launch.max_screen_speed, 900.0);
        // Unspecified fields take the shared defaults
        assert_eq!(rope.launch.min_drag_px, 8.0);
        assert_eq!(rope.physics.damping, 0.8);
        assert_eq!(rope.diameter_multiplier, 1.0);
    }

    #[test]
    fn test_json_registration_rejects_malformed() {
        let mut catalog = Catalog::new();
        assert!(matches!(
            catalog.register_dogs_json("not json"),
            Err(CatalogError::Parse { kind: "dog", .. })
        ));
        assert!(matches!(
            catalog.register_dogs_json(r#"[{"id":"x","name":"X","frames":[]}]"#),
            Err(CatalogError::NoFrames { .. })
        ));
    }
}
