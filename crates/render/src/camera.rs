use glam::{Mat4, Vec3};
use roomwalk_common::Orientation;
use roomwalk_kernel::PlayerState;

/// Projection settings for the first-person camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Camera transform for one frame, ready for a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub forward: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
}

impl CameraPose {
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

impl CameraRig {
    pub fn with_aspect(mut self, width: u32, height: u32) -> Self {
        self.aspect = width as f32 / height.max(1) as f32;
        self
    }

    pub fn pose(&self, player: &PlayerState, orientation: Orientation) -> CameraPose {
        let eye = player.position;
        let forward = orientation.look_direction();
        CameraPose {
            eye,
            forward,
            view: Mat4::look_at_rh(eye, eye + forward, Vec3::Y),
            projection: Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far),
        }
    }
}
