//! Input handling
//!
//! Pointer input is sampled once per frame into an `InputSnapshot`.
//! Touch input arrives through macroquad's mouse emulation.

mod state;

pub use state::*;
