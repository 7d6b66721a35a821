use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Player position and walking speed. Orientation lives in the look control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec3,
    /// Units per second.
    pub speed: f32,
}

impl Default for PlayerState {
    /// Eye height 1.6, five units in front of the room center.
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 5.0),
            speed: 5.0,
        }
    }
}

impl PlayerState {
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self { position, speed }
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}
