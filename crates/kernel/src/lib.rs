//! Player Motion Controller: per-frame movement against the room layout, plus session replay.
//!
//! # Invariants
//! - A committed player position never collides with any wall. The resolver is the only gate.
//! - A blocked frame discards the whole displacement. There is no per-axis sliding.
//! - Movement is not gated on pointer lock; only look rotation is.
//! - Invalid numeric input is rejected before anything is mutated.

pub mod motion;
pub mod player;
pub mod session;

pub use motion::{
    FrameOutcome, MotionController, MotionError, MotionEvent, MotionState, planar_displacement,
};
pub use player::PlayerState;
pub use session::{InputFrame, RunSummary, ScriptError, Session};
