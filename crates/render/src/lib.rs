//! Rendering seam: turns player state into a camera pose and renders debug views.
//!
//! # Invariants
//! - Renderers never mutate the layout, player or look state.
//! - The camera eye is the player position; movement code never reads the camera.
//!
//! The real scene (meshes, textures, lighting) lives outside this workspace and
//! consumes `CameraPose` each frame. `DebugTextRenderer` stands in for it in the
//! CLI and in tests.

mod camera;
mod renderer;

pub use camera::{CameraPose, CameraRig};
pub use renderer::{DebugTextRenderer, Renderer};
