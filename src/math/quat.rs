//! Quaternion rotations
//!
//! Stored as `{x, y, z, w}` so the save file layout matches the usual
//! engine convention. Only yaw rotations are produced by the editor, but
//! arbitrary orientations loaded from disk are kept intact.

use std::ops::Mul;
use serde::{Serialize, Deserialize};
use super::vec::Vec3;

/// Unit quaternion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Quat = Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation around the vertical (Y) axis, angle in radians
    pub fn from_rotation_y(angle: f32) -> Self {
        let half = angle * 0.5;
        Self {
            x: 0.0,
            y: half.sin(),
            z: 0.0,
            w: half.cos(),
        }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Re-normalize; a degenerate quaternion becomes identity
    pub fn normalize(self) -> Quat {
        let l = self.length();
        if l < 1e-6 {
            return Quat::IDENTITY;
        }
        Quat::new(self.x / l, self.y / l, self.z / l, self.w / l)
    }

    pub fn conjugate(self) -> Quat {
        Quat::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotate a vector by this quaternion
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Heading around Y in radians
    pub fn yaw(self) -> f32 {
        let forward = self.rotate(Vec3::new(0.0, 0.0, 1.0));
        forward.x.atan2(forward.z)
    }

    /// Same orientation test (q and -q describe the same rotation)
    #[cfg(test)]
    pub fn approx_eq(self, other: Quat, eps: f32) -> bool {
        let dot = self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w;
        (dot.abs() - 1.0).abs() < eps
    }
}

impl Default for Quat {
    fn default() -> Self {
        Quat::IDENTITY
    }
}

impl Mul for Quat {
    type Output = Quat;
    fn mul(self, rhs: Quat) -> Quat {
        Quat {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_quarter_turn() {
        let q = Quat::from_rotation_y(FRAC_PI_2);
        let v = q.rotate(Vec3::new(0.0, 0.0, 1.0));
        assert!(v.approx_eq(Vec3::new(1.0, 0.0, 0.0), 0.0001), "got {:?}", v);
    }

    #[test]
    fn test_yaw_accumulates() {
        let step = Quat::from_rotation_y(10f32.to_radians());
        let mut q = Quat::IDENTITY;
        for _ in 0..9 {
            q = (q * step).normalize();
        }
        assert!((q.yaw() - FRAC_PI_2).abs() < 0.001);
        assert!(q.approx_eq(Quat::from_rotation_y(FRAC_PI_2), 0.0001));
    }

    #[test]
    fn test_conjugate_inverts() {
        let q = Quat::from_rotation_y(0.7);
        let v = Vec3::new(3.0, -1.0, 2.0);
        let back = q.conjugate().rotate(q.rotate(v));
        assert!(back.approx_eq(v, 0.0001));
    }
}
