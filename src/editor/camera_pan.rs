//! Swipe camera panning (CameraMovement mode)

use crate::input::InputSnapshot;
use crate::math::{Camera, Vec2, Vec3};

/// Drags the camera across the ground plane while the pointer is held
#[derive(Debug, Clone)]
pub struct CameraPan {
    /// Pointer position last frame, None when not swiping
    anchor: Option<Vec2>,
    sensitivity: f32,
}

impl CameraPan {
    pub fn new(sensitivity: f32) -> Self {
        Self { anchor: None, sensitivity }
    }

    pub fn update(&mut self, input: &InputSnapshot, dt: f32, camera: &mut Camera) {
        if !input.pointer_held {
            self.anchor = None;
            return;
        }
        let Some(anchor) = self.anchor.filter(|_| !input.pointer_pressed) else {
            self.anchor = Some(input.pointer_position);
            return;
        };

        // The scene follows the finger: camera moves against the swipe
        let swipe = input.pointer_position - anchor;
        let right = Vec3::new(camera.basis_x.x, 0.0, camera.basis_x.z).normalize();
        let forward = Vec3::new(camera.basis_z.x, 0.0, camera.basis_z.z).normalize();
        let offset = (right * -swipe.x + forward * swipe.y) * (self.sensitivity * dt);
        camera.translate(offset);

        self.anchor = Some(input.pointer_position);
    }
}
