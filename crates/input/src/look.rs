use std::f32::consts::TAU;

use roomwalk_common::Orientation;
use serde::{Deserialize, Serialize};

/// Pitch limit in radians, just short of straight up/down.
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Mouse-look state: orientation, sensitivity and pointer-lock flag.
///
/// Owns yaw and pitch. The motion controller only reads them. Yaw is kept
/// in `[0, 2π)` and pitch in `[-89°, 89°]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookControl {
    orientation: Orientation,
    /// Radians per pixel of mouse travel.
    pub sensitivity: f32,
    locked: bool,
}

impl Default for LookControl {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            sensitivity: 0.002,
            locked: false,
        }
    }
}

impl LookControl {
    /// A non-finite `sensitivity` falls back to the default.
    pub fn new(orientation: Orientation, sensitivity: f32) -> Self {
        let sensitivity = if sensitivity.is_finite() {
            sensitivity
        } else {
            tracing::warn!("ignoring non-finite look sensitivity {sensitivity}");
            Self::default().sensitivity
        };
        Self {
            orientation: normalize(orientation),
            sensitivity,
            locked: false,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Pointer lock acquired. Returns whether the state changed.
    pub fn lock(&mut self) -> bool {
        let changed = !self.locked;
        self.locked = true;
        if changed {
            tracing::debug!("pointer locked");
        }
        changed
    }

    /// Pointer lock released. Returns whether the state changed.
    pub fn unlock(&mut self) -> bool {
        let changed = self.locked;
        self.locked = false;
        if changed {
            tracing::debug!("pointer unlocked");
        }
        changed
    }

    /// Apply a mouse delta in pixels. Ignored while unlocked; returns whether it was applied.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) -> bool {
        if !self.locked {
            return false;
        }
        if !dx.is_finite() || !dy.is_finite() {
            tracing::warn!("dropping non-finite mouse delta ({dx}, {dy})");
            return false;
        }
        let d_yaw = dx * self.sensitivity;
        let d_pitch = dy * self.sensitivity;
        if !d_yaw.is_finite() || !d_pitch.is_finite() {
            tracing::warn!(
                "dropping mouse delta ({dx}, {dy}) at sensitivity {}",
                self.sensitivity
            );
            return false;
        }
        self.orientation.yaw -= d_yaw;
        self.orientation.pitch -= d_pitch;
        self.orientation = normalize(self.orientation);
        true
    }

    /// Replace the orientation directly (spawn, teleport). Yaw is wrapped and pitch clamped.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = normalize(orientation);
    }
}

/// Wrap yaw into `[0, 2π)` and clamp pitch. Non-finite values pass through unchanged
/// in kind, so the motion controller can still reject them.
fn normalize(mut orientation: Orientation) -> Orientation {
    orientation.yaw = orientation.yaw.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if orientation.yaw >= TAU {
        orientation.yaw = 0.0;
    }
    orientation.pitch = orientation.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    orientation
}
