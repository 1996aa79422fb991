//! Scene World
//!
//! Owns the live vehicle objects, the editor camera and a flat ground plane.
//! Objects live in a slot vector indexed by `Entity::index`; the allocator
//! decides which handles are still valid.

use super::entity::{Entity, EntityAllocator};
use super::transform::Transform;
use super::{RayHit, Scene};
use crate::catalog::VehicleType;
use crate::math::{ray_box, ray_plane_intersection, Camera, Ray, Vec3};

/// A live object in the scene
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Catalog type this object was spawned from
    pub type_name: String,
    pub transform: Transform,
    /// Box collider half size
    pub half_extents: Vec3,
    pub color: [u8; 3],
    /// Selection/preview tint
    pub highlighted: bool,
}

/// In-process scene used by the editor shell
pub struct SceneWorld {
    entities: EntityAllocator,
    objects: Vec<Option<SceneObject>>,
    camera: Camera,
    /// Height of the ground collider
    ground_height: f32,
}

impl SceneWorld {
    pub fn new(ground_height: f32) -> Self {
        Self {
            entities: EntityAllocator::new(),
            objects: Vec::new(),
            camera: Camera::editor_default(),
            ground_height,
        }
    }

    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }

    pub fn object(&self, entity: Entity) -> Option<&SceneObject> {
        if !self.entities.is_alive(entity) {
            return None;
        }
        self.objects.get(entity.index() as usize)?.as_ref()
    }

    fn object_mut(&mut self, entity: Entity) -> Option<&mut SceneObject> {
        if !self.entities.is_alive(entity) {
            return None;
        }
        self.objects.get_mut(entity.index() as usize)?.as_mut()
    }

    /// Number of live objects
    pub fn object_count(&self) -> usize {
        self.entities.alive_count()
    }

    /// Iterate live objects (for rendering)
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter_map(|o| o.as_ref())
    }
}

impl Scene for SceneWorld {
    fn spawn(&mut self, template: &VehicleType, transform: Transform) -> Entity {
        let entity = self.entities.allocate();
        let idx = entity.index() as usize;
        if idx >= self.objects.len() {
            self.objects.resize(idx + 1, None);
        }
        self.objects[idx] = Some(SceneObject {
            type_name: template.name.clone(),
            transform,
            half_extents: template.half_extents,
            color: template.color,
            highlighted: false,
        });
        log::debug!("Spawned {} as {}", template.name, entity);
        entity
    }

    fn despawn(&mut self, entity: Entity) -> bool {
        if !self.entities.free(entity) {
            return false;
        }
        if let Some(slot) = self.objects.get_mut(entity.index() as usize) {
            *slot = None;
        }
        log::debug!("Despawned {}", entity);
        true
    }

    fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    fn transform(&self, entity: Entity) -> Option<Transform> {
        self.object(entity).map(|o| o.transform)
    }

    fn set_transform(&mut self, entity: Entity, transform: Transform) -> bool {
        match self.object_mut(entity) {
            Some(obj) => {
                obj.transform = transform;
                true
            }
            None => false,
        }
    }

    fn set_highlight(&mut self, entity: Entity, highlighted: bool) {
        if let Some(obj) = self.object_mut(entity) {
            obj.highlighted = highlighted;
        }
    }

    fn raycast(&self, ray: &Ray, ignore: Option<Entity>) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;

        if let Some(t) = ray_plane_intersection(ray, Vec3::new(0.0, self.ground_height, 0.0), Vec3::UP) {
            best = Some(RayHit { point: ray.at(t), distance: t, entity: None });
        }

        for (idx, slot) in self.objects.iter().enumerate() {
            let Some(obj) = slot else { continue };
            // Occupied slots always hold the slot's current generation
            let entity = Entity::new(idx as u32, self.entities.generation_of(idx as u32));
            if Some(entity) == ignore {
                continue;
            }
            let Some(t) = ray_box(ray, obj.transform.position, obj.transform.rotation, obj.half_extents) else {
                continue;
            };
            if best.map_or(true, |b| t < b.distance) {
                best = Some(RayHit { point: ray.at(t), distance: t, entity: Some(entity) });
            }
        }

        best
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}
