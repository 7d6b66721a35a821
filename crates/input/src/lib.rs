//! Input collaborator: movement keys, pointer lock and mouse look.
//!
//! # Invariants
//! - The kernel consumes `HeldKeys` and `LookControl`, never raw device events.
//! - Look rotation only changes while the pointer is locked. Held keys are tracked regardless.
//! - Pointer-lock acquisition itself happens outside this crate; only its state is modelled here.

pub mod action;
pub mod look;
pub mod state;

pub use action::{Action, HeldKeys, InputError, MoveKey};
pub use look::LookControl;
pub use state::InputState;
