//! Collision Resolver: decides whether a candidate player position is blocked by a wall.
//!
//! # Invariants
//! - `is_colliding` is pure and total over finite and non-finite input alike.
//! - Walls are zero-thickness, infinite-height planes bounded only along their long axis.
//!   Vertical position never affects the result.
//! - Wall axis is fixed at construction; nothing re-derives it from float equality.

mod config;
mod layout;
mod wall;

pub use config::{LayoutError, RoomConfig, WallConfig};
pub use layout::{RoomLayout, is_colliding};
pub use wall::{CollisionMargins, Wall};
pub use roomwalk_common::WallAxis;
