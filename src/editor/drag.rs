//! Drag gesture tracking
//!
//! A drag is armed when an object becomes active (preview spawned or placed
//! vehicle selected) and stays armed while the primary button is held. The
//! tracker only reports movement once the pointer has travelled further than
//! the threshold since the last reported position, which filters out jitter
//! from a resting finger or a slightly shaky click.

use crate::input::InputSnapshot;
use crate::math::Vec2;

/// What the drag did this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragStep {
    /// Not armed
    Idle,
    /// Button released; the drag is now disarmed
    Released,
    /// Held, but the pointer has not moved far enough yet
    BelowThreshold,
    /// Pointer moved past the threshold to this position
    Moved(Vec2),
}

#[derive(Debug, Clone)]
pub struct DragTracker {
    armed: bool,
    /// Pointer position at arm time or at the last reported move
    last_pointer: Vec2,
    /// Minimum pointer travel in screen units
    threshold: f32,
}

impl DragTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            armed: false,
            last_pointer: Vec2::ZERO,
            threshold,
        }
    }

    /// Start tracking from `anchor`
    pub fn arm(&mut self, anchor: Vec2) {
        self.armed = true;
        self.last_pointer = anchor;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn update(&mut self, input: &InputSnapshot) -> DragStep {
        if !self.armed {
            return DragStep::Idle;
        }
        if !input.pointer_held {
            self.armed = false;
            return DragStep::Released;
        }

        let delta = input.pointer_position - self.last_pointer;
        if delta.len() > self.threshold {
            self.last_pointer = input.pointer_position;
            DragStep::Moved(input.pointer_position)
        } else {
            DragStep::BelowThreshold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_armed() {
        let mut drag = DragTracker::new(5.0);
        assert_eq!(drag.update(&InputSnapshot::hold(100.0, 100.0)), DragStep::Idle);
    }

    #[test]
    fn test_threshold_filters_jitter() {
        let mut drag = DragTracker::new(5.0);
        drag.arm(Vec2::new(100.0, 100.0));

        assert_eq!(drag.update(&InputSnapshot::hold(103.0, 104.0)), DragStep::BelowThreshold);
        assert_eq!(drag.update(&InputSnapshot::hold(100.0, 95.0)), DragStep::BelowThreshold);
        assert_eq!(
            drag.update(&InputSnapshot::hold(106.0, 100.0)),
            DragStep::Moved(Vec2::new(106.0, 100.0))
        );
        // Measured from the last reported position now
        assert_eq!(drag.update(&InputSnapshot::hold(109.0, 100.0)), DragStep::BelowThreshold);
    }

    #[test]
    fn test_release_disarms() {
        let mut drag = DragTracker::new(5.0);
        drag.arm(Vec2::new(0.0, 0.0));

        assert_eq!(drag.update(&InputSnapshot::idle(50.0, 50.0)), DragStep::Released);
        assert!(!drag.is_armed());
        assert_eq!(drag.update(&InputSnapshot::hold(90.0, 90.0)), DragStep::Idle);
    }
}
