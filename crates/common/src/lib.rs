//! Shared value types used by the collision, input, kernel and render crates.

pub mod types;

pub use types::{Orientation, WallAxis};
