use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors from parsing textual key input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown movement key {0:?}")]
    UnknownKey(String),
}

/// One of the four movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveKey {
    pub const ALL: [MoveKey; 4] = [Self::Forward, Self::Backward, Self::Left, Self::Right];

    /// Map a key code to a movement key.
    ///
    /// Accepts physical codes (`KeyW`, `ArrowUp`, ...) and bare WASD letters in either case.
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Self::Forward),
            "KeyS" | "ArrowDown" => Some(Self::Backward),
            "KeyA" | "ArrowLeft" => Some(Self::Left),
            "KeyD" | "ArrowRight" => Some(Self::Right),
            _ if code.len() == 1 => match code.to_ascii_lowercase().as_str() {
                "w" => Some(Self::Forward),
                "s" => Some(Self::Backward),
                "a" => Some(Self::Left),
                "d" => Some(Self::Right),
                _ => None,
            },
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Forward => 0b0001,
            Self::Backward => 0b0010,
            Self::Left => 0b0100,
            Self::Right => 0b1000,
        }
    }

    fn letter(self) -> char {
        match self {
            Self::Forward => 'W',
            Self::Backward => 'S',
            Self::Left => 'A',
            Self::Right => 'D',
        }
    }
}

/// The set of movement keys held during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub const NONE: HeldKeys = HeldKeys(0);

    pub fn with(mut self, key: MoveKey) -> Self {
        self.press(key);
        self
    }

    pub fn press(&mut self, key: MoveKey) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: MoveKey) {
        self.0 &= !key.bit();
    }

    pub fn contains(&self, key: MoveKey) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = MoveKey> + '_ {
        MoveKey::ALL.into_iter().filter(|k| self.contains(*k))
    }

    /// Forward minus backward, in {-1, 0, 1}.
    pub fn forward_axis(&self) -> f32 {
        axis(self.contains(MoveKey::Forward), self.contains(MoveKey::Backward))
    }

    /// Right minus left, in {-1, 0, 1}.
    pub fn strafe_axis(&self) -> f32 {
        axis(self.contains(MoveKey::Right), self.contains(MoveKey::Left))
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

impl FromIterator<MoveKey> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = MoveKey>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

/// Parses a string of WASD letters, e.g. `"wd"`. `-` or an empty string means no keys.
impl FromStr for HeldKeys {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "-" {
            return Ok(Self::NONE);
        }
        s.chars()
            .map(|c| {
                MoveKey::from_key_code(c.encode_utf8(&mut [0; 4]))
                    .ok_or_else(|| InputError::UnknownKey(c.to_string()))
            })
            .collect()
    }
}

impl fmt::Display for HeldKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for key in self.iter() {
            write!(f, "{}", key.letter())?;
        }
        Ok(())
    }
}

/// A high-level input action produced by whatever device layer sits outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// A movement key went down.
    Press(MoveKey),
    /// A movement key went up.
    Release(MoveKey),
    /// Raw mouse delta in pixels.
    Look { dx: f32, dy: f32 },
    /// Pointer lock was acquired (click).
    LockPointer,
    /// Pointer lock was released (Escape).
    UnlockPointer,
    /// Unbound input.
    Noop,
}
