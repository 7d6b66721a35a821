use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which horizontal axis a wall runs along.
///
/// A wall at x = ±10 runs along Z and is thin along X (`AlongZ`).
/// A wall at z = ±10 runs along X and is thin along Z (`AlongX`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallAxis {
    AlongZ,
    AlongX,
}

impl WallAxis {
    /// Infer the axis from a wall center: the wall sits on whichever
    /// horizontal coordinate has the larger magnitude. Ties run along X.
    pub fn infer(center: Vec3) -> Self {
        if center.x.abs() > center.z.abs() {
            Self::AlongZ
        } else {
            Self::AlongX
        }
    }
}

/// Look orientation in radians.
///
/// Yaw 0 faces -Z. Positive yaw turns left (counter-clockwise seen from above).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    pub fn is_finite(&self) -> bool {
        self.yaw.is_finite() && self.pitch.is_finite()
    }

    /// Horizontal forward vector. Pitch is ignored so walking stays on the floor plane.
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Horizontal right vector, perpendicular to `flat_forward`.
    pub fn flat_right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Full view direction including pitch.
    pub fn look_direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            -self.yaw.sin() * cos_pitch,
            sin_pitch,
            -self.yaw.cos() * cos_pitch,
        )
        .normalize()
    }
}
