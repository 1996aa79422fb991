//! Live Scene
//!
//! The editor core never owns geometry directly. It talks to the scene
//! through the `Scene` trait:
//! - spawn/despawn live vehicle objects from catalog templates
//! - read and write their transforms
//! - toggle the selection highlight
//! - ray cast against colliders (vehicles and the ground)
//!
//! `SceneWorld` is the in-process implementation used by the editor shell
//! and by tests.

mod entity;
mod transform;
mod world;

pub use entity::Entity;
pub use transform::Transform;
pub use world::{SceneObject, SceneWorld};

use crate::catalog::VehicleType;
use crate::math::{Camera, Ray, Vec3};

/// Result of a scene ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space hit point
    pub point: Vec3,
    /// Distance along the ray
    pub distance: f32,
    /// Object owning the collider, None for static geometry (ground)
    pub entity: Option<Entity>,
}

/// Scene operations the editor core depends on
pub trait Scene {
    /// Instantiate a template at a transform
    fn spawn(&mut self, template: &VehicleType, transform: Transform) -> Entity;

    /// Destroy a live object. Returns false if it was already gone.
    fn despawn(&mut self, entity: Entity) -> bool;

    fn is_alive(&self, entity: Entity) -> bool;

    fn transform(&self, entity: Entity) -> Option<Transform>;

    /// Returns false if the entity is dead
    fn set_transform(&mut self, entity: Entity, transform: Transform) -> bool;

    fn set_highlight(&mut self, entity: Entity, highlighted: bool);

    /// Nearest collider hit along the ray, skipping `ignore`
    fn raycast(&self, ray: &Ray, ignore: Option<Entity>) -> Option<RayHit>;

    fn camera(&self) -> &Camera;

    fn camera_mut(&mut self) -> &mut Camera;
}
