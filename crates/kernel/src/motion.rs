use glam::Vec3;
use roomwalk_collision::RoomLayout;
use roomwalk_common::Orientation;
use roomwalk_input::{HeldKeys, LookControl};
use serde::{Deserialize, Serialize};

use crate::player::PlayerState;

/// Precondition violations rejected at the controller boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MotionError {
    #[error("frame time is not finite: {0}")]
    NonFiniteDt(f32),
    #[error("frame time is negative: {0}")]
    NegativeDt(f32),
    #[error("player position is not finite: {0:?}")]
    NonFinitePosition(Vec3),
    #[error("player speed must be finite and non-negative: {0}")]
    InvalidSpeed(f32),
    #[error("look orientation is not finite: {0:?}")]
    NonFiniteOrientation(Orientation),
    #[error("step of {length} units exceeds the {limit}-unit limit; lower dt or speed")]
    StepTooLong { length: f32, limit: f32 },
    #[error("spawn position {position:?} is inside wall {wall}")]
    SpawnInsideWall { position: Vec3, wall: usize },
}

/// What the controller did last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    /// No movement key held, pointer locked.
    #[default]
    Idle,
    /// At least one movement key held, even if the keys cancel or the move was blocked.
    Moving,
    /// No movement key held and pointer not locked, so look input is inert.
    Locked,
}

/// Result of a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FrameOutcome {
    /// No net movement direction this frame.
    Idle,
    /// The candidate was clear and was committed.
    Moved { from: Vec3, to: Vec3 },
    /// The candidate hit wall `wall`; position stayed at `at`.
    Blocked { at: Vec3, candidate: Vec3, wall: usize },
}

/// A logged non-idle outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    pub frame: u64,
    pub outcome: FrameOutcome,
}

/// Camera-relative horizontal displacement for one frame.
///
/// The direction is normalized so diagonal movement is no faster than straight movement.
/// Returns zero when opposing keys cancel or nothing is held.
pub fn planar_displacement(keys: HeldKeys, orientation: Orientation, speed: f32, dt: f32) -> Vec3 {
    let direction = orientation.flat_forward() * keys.forward_axis()
        + orientation.flat_right() * keys.strafe_axis();
    direction.normalize_or_zero() * speed * dt
}

/// Per-frame movement controller.
///
/// Holds no position of its own: the caller owns `PlayerState` and `RoomLayout`
/// and passes both in every frame.
#[derive(Debug, Clone, Default)]
pub struct MotionController {
    state: MotionState,
    frames: u64,
    event_log: Vec<MotionEvent>,
}

impl MotionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// State reported by the most recent frame.
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Number of frames stepped successfully.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn events(&self) -> &[MotionEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<MotionEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Advance one frame: build a candidate from held keys and yaw, then commit it
    /// only if the layout reports no collision.
    ///
    /// A displacement longer than the layout's `max_step` is rejected, since the
    /// end-point test could otherwise jump across a wall.
    pub fn step(
        &mut self,
        layout: &RoomLayout,
        player: &mut PlayerState,
        keys: HeldKeys,
        look: &LookControl,
        dt: f32,
    ) -> Result<FrameOutcome, MotionError> {
        validate(player, look, dt)?;
        let displacement = planar_displacement(keys, look.orientation(), player.speed, dt);
        let limit = layout.margins().max_step();
        let length = displacement.length();
        if length > limit {
            return Err(MotionError::StepTooLong { length, limit });
        }
        self.frames += 1;

        self.state = if !keys.is_empty() {
            MotionState::Moving
        } else if look.is_locked() {
            MotionState::Idle
        } else {
            MotionState::Locked
        };
        // Nothing held, or opposing keys cancel: no candidate to test.
        if keys.forward_axis() == 0.0 && keys.strafe_axis() == 0.0 {
            return Ok(FrameOutcome::Idle);
        }

        let from = player.position;
        let candidate = from + displacement;
        let outcome = match layout.first_collision(candidate) {
            Some(wall) => {
                tracing::debug!(
                    frame = self.frames,
                    wall,
                    "move blocked at ({:.3}, {:.3}, {:.3})",
                    candidate.x,
                    candidate.y,
                    candidate.z
                );
                FrameOutcome::Blocked {
                    at: from,
                    candidate,
                    wall,
                }
            }
            None => {
                player.position = candidate;
                tracing::trace!(frame = self.frames, "moved to {candidate:?}");
                FrameOutcome::Moved {
                    from,
                    to: candidate,
                }
            }
        };
        self.event_log.push(MotionEvent {
            frame: self.frames,
            outcome,
        });
        Ok(outcome)
    }
}

fn validate(player: &PlayerState, look: &LookControl, dt: f32) -> Result<(), MotionError> {
    if !dt.is_finite() {
        return Err(MotionError::NonFiniteDt(dt));
    }
    if dt < 0.0 {
        return Err(MotionError::NegativeDt(dt));
    }
    if !player.position.is_finite() {
        return Err(MotionError::NonFinitePosition(player.position));
    }
    if !player.speed.is_finite() || player.speed < 0.0 {
        return Err(MotionError::InvalidSpeed(player.speed));
    }
    if !look.orientation().is_finite() {
        return Err(MotionError::NonFiniteOrientation(look.orientation()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn keys(s: &str) -> HeldKeys {
        s.parse().unwrap()
    }

    fn locked_look() -> LookControl {
        let mut look = LookControl::default();
        look.lock();
        look
    }

    #[test]
    fn idle_frame_does_not_move() {
        let layout = RoomLayout::default_box();
        let mut player = PlayerState::default();
        let mut ctl = MotionController::new();
        let out = ctl
            .step(&layout, &mut player, HeldKeys::NONE, &locked_look(), DT)
            .unwrap();
        assert_eq!(out, FrameOutcome::Idle);
        assert_eq!(player.position, PlayerState::default().position);
        assert_eq!(ctl.state(), MotionState::Idle);
        assert!(ctl.events().is_empty());
    }

    #[test]
    fn unlocked_idle_reports_locked_state() {
        let layout = RoomLayout::default_box();
        let mut player = PlayerState::default();
        let mut ctl = MotionController::new();
        ctl.step(&layout, &mut player, HeldKeys::NONE, &LookControl::default(), DT)
            .unwrap();
        assert_eq!(ctl.state(), MotionState::Locked);
    }

    #[test]
    fn forward_moves_toward_negative_z() {
        let layout = RoomLayout::default_box();
        let mut player = PlayerState::default();
        let mut ctl = MotionController::new();
        let start = player.position;
        let out = ctl
            .step(&layout, &mut player, keys("w"), &locked_look(), 0.1)
            .unwrap();
        assert!(matches!(out, FrameOutcome::Moved { .. }));
        assert!((player.position - (start + Vec3::new(0.0, 0.0, -0.5))).length() < 1e-5);
        assert_eq!(ctl.state(), MotionState::Moving);
    }

    #[test]
    fn movement_works_without_pointer_lock() {
        let layout = RoomLayout::default_box();
        let mut player = PlayerState::default();
        let mut ctl = MotionController::new();
        ctl.step(&layout, &mut player, keys("d"), &LookControl::default(), 0.1)
            .unwrap();
        assert!((player.position.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn diagonal_is_not_faster() {
        let o = Orientation::new(0.3, 0.0);
        let straight = planar_displacement(keys("w"), o, 5.0, DT);
        let diagonal = planar_displacement(keys("wa"), o, 5.0, DT);
        assert!((straight.length() - diagonal.length()).abs() < 1e-6);
    }

    #[test]
    fn opposing_keys_are_idle() {
        let layout = RoomLayout::default_box();
        let mut player = PlayerState::default();
        let mut ctl = MotionController::new();
        let out = ctl
            .step(&layout, &mut player, keys("ws"), &locked_look(), DT)
            .unwrap();
        assert_eq!(out, FrameOutcome::Idle);
        assert_eq!(ctl.state(), MotionState::Moving);
        assert!(ctl.events().is_empty());
    }

    #[test]
    fn cancelling_keys_while_unlocked_still_moving() {
        let layout = RoomLayout::default_box();
        let mut player = PlayerState::default();
        let mut ctl = MotionController::new();
        ctl.step(&layout, &mut player, keys("ad"), &LookControl::default(), DT)
            .unwrap();
        assert_eq!(ctl.state(), MotionState::Moving);
    }

    #[test]
    fn long_step_next_to_wall_is_rejected() {
        let layout = RoomLayout::default_box();
        let start = Vec3::new(0.0, 1.6, -8.0);
        let mut player = PlayerState::at(start);
        let mut ctl = MotionController::new();
        // 2.5 units would land at z = -10.5, past the north wall's margin.
        let err = ctl
            .step(&layout, &mut player, keys("w"), &locked_look(), 0.5)
            .unwrap_err();
        assert!(matches!(err, MotionError::StepTooLong { limit, .. } if limit == 1.0));
        assert_eq!(player.position, start);
        assert_eq!(ctl.frames(), 0);
        assert!(player.position.z > -9.5);
    }

    #[test]
    fn max_length_step_cannot_skip_margin() {
        let layout = RoomLayout::default_box();
        let look = locked_look();
        let mut ctl = MotionController::new();
        // Just under one unit per frame, at the step limit.
        for offset in [0.0_f32, 0.13, 0.37, 0.5, 0.71, 0.99] {
            let mut player = PlayerState::new(Vec3::new(0.0, 1.6, -7.0 - offset), 10.0);
            for _ in 0..20 {
                ctl.step(&layout, &mut player, keys("w"), &look, 0.0999).unwrap();
                assert!(!layout.is_colliding(player.position));
                assert!(player.position.z > -10.0, "escaped at offset {offset}");
            }
        }
    }

    #[test]
    fn strafe_follows_yaw() {
        let mut look = locked_look();
        look.set_orientation(Orientation::new(std::f32::consts::FRAC_PI_2, 0.0));
        // Facing -X, strafing right heads toward -Z.
        let d = planar_displacement(keys("d"), look.orientation(), 1.0, 1.0);
        assert!((d - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn pitch_does_not_lift_player() {
        let layout = RoomLayout::default_box();
        let mut player = PlayerState::default();
        let mut look = locked_look();
        look.set_orientation(Orientation::new(0.0, 1.2));
        let mut ctl = MotionController::new();
        ctl.step(&layout, &mut player, keys("w"), &look, 0.1).unwrap();
        assert_eq!(player.position.y, 1.6);
    }

    #[test]
    fn walking_into_wall_stops_short() {
        let layout = RoomLayout::default_box();
        let mut player = PlayerState::default();
        let look = locked_look();
        let mut ctl = MotionController::new();
        let mut last = FrameOutcome::Idle;
        for _ in 0..600 {
            last = ctl.step(&layout, &mut player, keys("w"), &look, DT).unwrap();
            assert!(!layout.is_colliding(player.position));
        }
        assert!(matches!(last, FrameOutcome::Blocked { wall: 0, .. }));
        assert!(player.position.z > -9.5);
        assert!(player.position.z < -9.5 + 5.0 * DT + 1e-4);
    }

    #[test]
    fn blocked_frame_discards_whole_displacement() {
        let layout = RoomLayout::default_box();
        let start = Vec3::new(2.0, 1.6, -9.45);
        let mut player = PlayerState::at(start);
        let mut ctl = MotionController::new();
        // Forward would cross the north margin; the strafe component is dropped too.
        let out = ctl
            .step(&layout, &mut player, keys("wd"), &locked_look(), 0.1)
            .unwrap();
        match out {
            FrameOutcome::Blocked { at, candidate, wall } => {
                assert_eq!(at, start);
                assert_eq!(wall, 0);
                assert!(candidate.x > start.x);
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
        assert_eq!(player.position, start);
    }

    #[test]
    fn can_back_away_from_wall() {
        let layout = RoomLayout::default_box();
        let mut player = PlayerState::at(Vec3::new(0.0, 1.6, -9.45));
        let mut ctl = MotionController::new();
        let out = ctl
            .step(&layout, &mut player, keys("s"), &locked_look(), 0.1)
            .unwrap();
        assert!(matches!(out, FrameOutcome::Moved { .. }));
        assert!(player.position.z > -9.45);
    }

    #[test]
    fn events_are_logged_and_drained() {
        let layout = RoomLayout::default_box();
        let mut player = PlayerState::default();
        let look = locked_look();
        let mut ctl = MotionController::new();
        ctl.step(&layout, &mut player, keys("w"), &look, DT).unwrap();
        ctl.step(&layout, &mut player, HeldKeys::NONE, &look, DT).unwrap();
        ctl.step(&layout, &mut player, keys("a"), &look, DT).unwrap();
        assert_eq!(ctl.frames(), 3);
        let frames: Vec<u64> = ctl.events().iter().map(|e| e.frame).collect();
        assert_eq!(frames, vec![1, 3]);
        assert_eq!(ctl.drain_events().len(), 2);
        assert!(ctl.events().is_empty());
    }

    #[test]
    fn invalid_input_rejected_without_mutation() {
        let layout = RoomLayout::default_box();
        let look = locked_look();
        let mut ctl = MotionController::new();

        let mut player = PlayerState::default();
        assert!(matches!(
            ctl.step(&layout, &mut player, keys("w"), &look, f32::NAN),
            Err(MotionError::NonFiniteDt(_))
        ));
        assert!(matches!(
            ctl.step(&layout, &mut player, keys("w"), &look, -0.1),
            Err(MotionError::NegativeDt(_))
        ));

        let mut bad = PlayerState::at(Vec3::new(f32::INFINITY, 0.0, 0.0));
        assert!(matches!(
            ctl.step(&layout, &mut bad, keys("w"), &look, DT),
            Err(MotionError::NonFinitePosition(_))
        ));

        let mut slow = PlayerState::new(Vec3::ZERO, -1.0);
        assert!(matches!(
            ctl.step(&layout, &mut slow, keys("w"), &look, DT),
            Err(MotionError::InvalidSpeed(_))
        ));

        assert_eq!(player.position, PlayerState::default().position);
        assert_eq!(ctl.frames(), 0);
        assert!(ctl.events().is_empty());
    }
}
