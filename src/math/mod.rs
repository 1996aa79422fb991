//! Math for the editor scene
//!
//! Vectors, quaternions, the editor camera and ray casting for picking.

mod vec;
mod quat;
mod camera;
mod ray;

pub use vec::*;
pub use quat::*;
pub use camera::*;
pub use ray::*;
