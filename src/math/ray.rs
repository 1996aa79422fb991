//! Ray casting utilities for picking and drag operations
//!
//! Converts pointer coordinates into world-space rays through the editor
//! camera and intersects them with the ground plane and vehicle boxes.

use super::camera::Camera;
use super::quat::Quat;
use super::vec::{Vec2, Vec3};

/// A 3D ray with origin and direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,  // Normalized
}

impl Ray {
    /// Create a new ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize()
        }
    }

    /// Get point at distance t along ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Generate a ray from screen coordinates through the camera.
///
/// Screen origin is the top-left corner of the viewport with y growing
/// downwards, matching how pointer positions are reported.
pub fn screen_to_ray(pointer: Vec2, camera: &Camera) -> Ray {
    let width = camera.viewport.x.max(1.0);
    let height = camera.viewport.y.max(1.0);

    let ndc_x = pointer.x / width * 2.0 - 1.0;
    let ndc_y = 1.0 - pointer.y / height * 2.0;

    let tan_half = (camera.fov_y * 0.5).tan();
    let dir = camera.basis_z
        + camera.basis_x * (ndc_x * tan_half * camera.aspect())
        + camera.basis_y * (ndc_y * tan_half);

    Ray::new(camera.position, dir)
}

/// Project a world-space point to screen coordinates (inverse of `screen_to_ray`).
///
/// Returns None for points behind or too close to the camera.
pub fn world_to_screen(point: Vec3, camera: &Camera) -> Option<Vec2> {
    let rel = point - camera.position;
    let cam_z = rel.dot(camera.basis_z);

    // Behind camera
    if cam_z <= 0.1 {
        return None;
    }

    let tan_half = (camera.fov_y * 0.5).tan();
    let ndc_x = rel.dot(camera.basis_x) / (cam_z * tan_half * camera.aspect());
    let ndc_y = rel.dot(camera.basis_y) / (cam_z * tan_half);

    Some(Vec2::new(
        (ndc_x + 1.0) * 0.5 * camera.viewport.x,
        (1.0 - ndc_y) * 0.5 * camera.viewport.y,
    ))
}

/// Find the intersection of a ray with a plane.
///
/// Returns the distance along the ray to the intersection point,
/// or None if the ray is parallel to the plane or intersection is behind ray origin.
pub fn ray_plane_intersection(
    ray: &Ray,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<f32> {
    let denom = ray.direction.dot(plane_normal);
    if denom.abs() < 0.0001 {
        return None;  // Ray parallel to plane
    }

    let t = (plane_point - ray.origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;  // Intersection behind ray origin
    }

    Some(t)
}

/// Slab test against an axis-aligned box centred at the origin.
///
/// Returns the entry distance (0 when the origin is inside the box).
pub fn ray_aabb(origin: Vec3, dir: Vec3, half_extents: Vec3) -> Option<f32> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for (o, d, h) in [
        (origin.x, dir.x, half_extents.x),
        (origin.y, dir.y, half_extents.y),
        (origin.z, dir.z, half_extents.z),
    ] {
        if d.abs() < 1e-9 {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t1 = (-h - o) * inv;
        let mut t2 = (h - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_enter = t_enter.max(t1);
        t_exit = t_exit.min(t2);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;  // Box entirely behind the ray
    }
    Some(t_enter.max(0.0))
}

/// Intersect a ray with an oriented box (centre, rotation, half extents).
pub fn ray_box(ray: &Ray, center: Vec3, rotation: Quat, half_extents: Vec3) -> Option<f32> {
    let inv = rotation.conjugate();
    let local_origin = inv.rotate(ray.origin - center);
    let local_dir = inv.rotate(ray.direction);
    ray_aabb(local_origin, local_dir, half_extents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        let p = ray.at(5.0);
        assert!((p.x - 5.0).abs() < 0.001);
        assert!((p.y - 0.0).abs() < 0.001);
        assert!((p.z - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_plane_intersection() {
        // Ray pointing straight down at the ground from y=10
        let ray = Ray::new(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        );
        let t = ray_plane_intersection(&ray, Vec3::ZERO, Vec3::UP);
        assert!(t.is_some());
        assert!((t.unwrap() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_plane_parallel() {
        let ray = Ray::new(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        assert!(ray_plane_intersection(&ray, Vec3::ZERO, Vec3::UP).is_none());
    }

    #[test]
    fn test_ray_aabb_hit_and_miss() {
        let half = Vec3::new(1.0, 1.0, 1.0);
        let t = ray_aabb(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0), half);
        assert!((t.unwrap() - 4.0).abs() < 0.001);

        assert!(ray_aabb(Vec3::new(3.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0), half).is_none());
        // Pointing away
        assert!(ray_aabb(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0), half).is_none());
    }

    #[test]
    fn test_ray_box_respects_rotation() {
        // Long along Z; rotated a quarter turn it becomes long along X
        let half = Vec3::new(0.5, 0.5, 3.0);
        let ray = Ray::new(Vec3::new(2.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(ray_box(&ray, Vec3::ZERO, Quat::IDENTITY, half).is_none());
        let t = ray_box(&ray, Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2), half);
        assert!((t.unwrap() - 9.5).abs() < 0.001);
    }

    #[test]
    fn test_screen_to_ray_center() {
        // A ray from screen center should go straight along the view direction
        let mut camera = Camera::editor_default();
        camera.set_viewport(320.0, 240.0);

        let ray = screen_to_ray(Vec2::new(160.0, 120.0), &camera);
        let dot = ray.direction.dot(camera.basis_z);
        assert!(dot > 0.999, "Center ray should be aligned with camera forward, got dot={}", dot);
    }

    #[test]
    fn test_world_to_screen_inverts_ray() {
        let mut camera = Camera::editor_default();
        camera.set_viewport(800.0, 600.0);

        let pointer = Vec2::new(620.0, 145.0);
        let point = screen_to_ray(pointer, &camera).at(25.0);
        let back = world_to_screen(point, &camera).unwrap();
        assert!((back - pointer).len() < 0.01, "{:?}", back);

        // Behind the camera
        assert!(world_to_screen(camera.position - camera.basis_z, &camera).is_none());
    }

    #[test]
    fn test_screen_to_ray_edges() {
        let mut camera = Camera::new();
        camera.set_viewport(200.0, 200.0);

        // Top edge of the screen is tilted up by half the vertical FOV
        let ray = screen_to_ray(Vec2::new(100.0, 0.0), &camera);
        let angle = ray.direction.y.atan2(ray.direction.z);
        assert!((angle - camera.fov_y * 0.5).abs() < 0.001);

        // Right side of the screen points along the camera's right axis
        let ray = screen_to_ray(Vec2::new(200.0, 100.0), &camera);
        assert!(ray.direction.dot(camera.basis_x) > 0.0);
    }
}
