//! Editor camera
//!
//! Perspective camera with yaw/pitch orientation. Positive pitch looks down.

use super::vec::{Vec2, Vec3};

/// Camera state used for picking and rendering
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub rotation_x: f32, // Pitch
    pub rotation_y: f32, // Yaw
    /// Vertical field of view (radians)
    pub fov_y: f32,
    /// Viewport size in screen units
    pub viewport: Vec2,

    // Computed basis vectors
    pub basis_x: Vec3,
    pub basis_y: Vec3,
    pub basis_z: Vec3,
}

impl Camera {
    pub fn new() -> Self {
        let mut cam = Self {
            position: Vec3::ZERO,
            rotation_x: 0.0,
            rotation_y: 0.0,
            fov_y: 45f32.to_radians(),
            viewport: Vec2::new(1280.0, 720.0),
            basis_x: Vec3::new(-1.0, 0.0, 0.0),
            basis_y: Vec3::new(0.0, 1.0, 0.0),
            basis_z: Vec3::new(0.0, 0.0, 1.0),
        };
        cam.update_basis();
        cam
    }

    /// Camera hovering behind and above the origin, looking down +Z
    pub fn editor_default() -> Self {
        let mut cam = Self::new();
        cam.position = Vec3::new(0.0, 20.0, -30.0);
        cam.rotation_x = (20.0f32).atan2(30.0);
        cam.update_basis();
        cam
    }

    pub fn update_basis(&mut self) {
        // Forward vector based on rotation
        self.basis_z = Vec3 {
            x: self.rotation_x.cos() * self.rotation_y.sin(),
            y: -self.rotation_x.sin(),
            z: self.rotation_x.cos() * self.rotation_y.cos(),
        };

        // Right vector (right-handed, +Y up)
        self.basis_x = self.basis_z.cross(Vec3::UP).normalize();

        // Up vector
        self.basis_y = self.basis_x.cross(self.basis_z);
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// Move on the ground plane, keeping height
    pub fn translate(&mut self, offset: Vec3) {
        self.position += Vec3::new(offset.x, 0.0, offset.z);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_orthonormal() {
        let cam = Camera::editor_default();
        assert!(cam.basis_x.dot(cam.basis_z).abs() < 0.0001);
        assert!(cam.basis_y.dot(cam.basis_z).abs() < 0.0001);
        assert!((cam.basis_x.len() - 1.0).abs() < 0.0001);
        // Looking down means forward has negative Y and up has positive Y
        assert!(cam.basis_z.y < 0.0);
        assert!(cam.basis_y.y > 0.0);
    }

    #[test]
    fn test_translate_keeps_height() {
        let mut cam = Camera::editor_default();
        cam.translate(Vec3::new(3.0, 50.0, -2.0));
        assert!(cam.position.approx_eq(Vec3::new(3.0, 20.0, -32.0), 0.0001));
    }
}
