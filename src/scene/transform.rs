//! Object transforms
//!
//! Vehicles only carry a world position and an orientation. There is no
//! hierarchy and no scale.

use crate::math::{Quat, Vec3};

/// World-space transform of a live object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Rotate around the local vertical axis by `degrees`
    pub fn rotate_yaw(&mut self, degrees: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_y(degrees.to_radians())).normalize();
    }

    /// Move to the X/Z of `point`, keeping the current height
    pub fn slide_to(&mut self, point: Vec3) {
        self.position.x = point.x;
        self.position.z = point.z;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_keeps_height() {
        let mut t = Transform::from_position(Vec3::new(1.0, 2.5, 3.0));
        t.slide_to(Vec3::new(-4.0, 0.0, 9.0));
        assert_eq!(t.position, Vec3::new(-4.0, 2.5, 9.0));
    }

    #[test]
    fn test_rotate_yaw_keeps_position() {
        let mut t = Transform::from_position(Vec3::new(1.0, 0.0, 1.0));
        t.rotate_yaw(90.0);
        assert_eq!(t.position, Vec3::new(1.0, 0.0, 1.0));
        assert!((t.rotation.yaw() - 90f32.to_radians()).abs() < 0.0001);
    }
}
