use std::path::Path;

use roomwalk_collision::RoomLayout;
use roomwalk_input::{Action, HeldKeys, InputState, LookControl};
use serde::{Deserialize, Serialize};

use crate::motion::{FrameOutcome, MotionController, MotionError, MotionState};
use crate::player::PlayerState;

/// Errors from reading an input script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Input recorded for one frame: actions applied in order, then one motion step of `dt` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    pub dt: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

impl InputFrame {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// A script that presses `keys` on the first frame and holds them for `frames` frames.
    pub fn hold(keys: HeldKeys, frames: usize, dt: f32) -> Vec<Self> {
        let mut script: Vec<Self> = (0..frames).map(|_| Self::new(dt)).collect();
        if let Some(first) = script.first_mut() {
            first.actions.extend(keys.iter().map(Action::Press));
        }
        script
    }

    pub fn parse_script(source: &str) -> Result<Vec<Self>, ScriptError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Self>, ScriptError> {
        let source = std::fs::read_to_string(path)?;
        Self::parse_script(&source)
    }

    pub fn to_script_json(script: &[Self]) -> Result<String, ScriptError> {
        Ok(serde_json::to_string_pretty(script)?)
    }
}

/// Frame counts from a scripted run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub frames: u64,
    pub moved: u64,
    pub blocked: u64,
    pub idle: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: &FrameOutcome) {
        self.frames += 1;
        match outcome {
            FrameOutcome::Idle => self.idle += 1,
            FrameOutcome::Moved { .. } => self.moved += 1,
            FrameOutcome::Blocked { .. } => self.blocked += 1,
        }
    }
}

/// A walk session: the room, the player, input state and the motion controller.
///
/// Everything the frame loop touches is owned here and passed down explicitly.
/// Given the same layout, start state and script, a session always ends in the
/// same state (see [`Session::state_hash`]).
#[derive(Debug, Clone)]
pub struct Session {
    layout: RoomLayout,
    player: PlayerState,
    input: InputState,
    motion: MotionController,
}

impl Default for Session {
    /// The box room with the default spawn, which is clear of every wall.
    fn default() -> Self {
        Self {
            layout: RoomLayout::default_box(),
            player: PlayerState::default(),
            input: InputState::default(),
            motion: MotionController::new(),
        }
    }
}

impl Session {
    pub fn new(layout: RoomLayout, player: PlayerState) -> Result<Self, MotionError> {
        Self::with_look(layout, player, LookControl::default())
    }

    /// Start a session. The spawn must be finite and outside every wall margin,
    /// so the no-collision invariant holds from frame 0.
    pub fn with_look(
        layout: RoomLayout,
        player: PlayerState,
        look: LookControl,
    ) -> Result<Self, MotionError> {
        if !player.position.is_finite() {
            return Err(MotionError::NonFinitePosition(player.position));
        }
        if let Some(wall) = layout.first_collision(player.position) {
            return Err(MotionError::SpawnInsideWall {
                position: player.position,
                wall,
            });
        }
        Ok(Self {
            layout,
            player,
            input: InputState::new(look),
            motion: MotionController::new(),
        })
    }

    pub fn layout(&self) -> &RoomLayout {
        &self.layout
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn look(&self) -> &LookControl {
        &self.input.look
    }

    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut MotionController {
        &mut self.motion
    }

    pub fn motion_state(&self) -> MotionState {
        self.motion.state()
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.motion.frames()
    }

    /// Apply one frame's actions, then step motion once.
    ///
    /// Actions are applied even if the motion step then rejects the frame.
    pub fn advance(&mut self, frame: &InputFrame) -> Result<FrameOutcome, MotionError> {
        self.input.apply_all(&frame.actions);
        self.motion.step(
            &self.layout,
            &mut self.player,
            self.input.keys,
            &self.input.look,
            frame.dt,
        )
    }

    /// Advance through a whole script, stopping at the first rejected frame.
    pub fn run(&mut self, script: &[InputFrame]) -> Result<RunSummary, MotionError> {
        let _span = tracing::info_span!("session_run", frames = script.len()).entered();
        let mut summary = RunSummary::default();
        for frame in script {
            let outcome = self.advance(frame)?;
            summary.record(&outcome);
        }
        tracing::debug!(
            "run finished: {} moved, {} blocked, {} idle",
            summary.moved,
            summary.blocked,
            summary.idle
        );
        Ok(summary)
    }

    /// Deterministic FNV-1a hash of the session state, for replay comparison.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let orientation = self.input.look.orientation();
        mix(&mut h, &self.frame().to_le_bytes());
        mix(&mut h, &self.player.position.x.to_le_bytes());
        mix(&mut h, &self.player.position.y.to_le_bytes());
        mix(&mut h, &self.player.position.z.to_le_bytes());
        mix(&mut h, &self.player.speed.to_le_bytes());
        mix(&mut h, &orientation.yaw.to_le_bytes());
        mix(&mut h, &orientation.pitch.to_le_bytes());
        mix(&mut h, &[self.input.look.is_locked() as u8]);
        h
    }
}
