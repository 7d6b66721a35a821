use crate::action::{Action, HeldKeys};
use crate::look::LookControl;

/// Current input snapshot: held movement keys plus look state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub keys: HeldKeys,
    pub look: LookControl,
}

impl InputState {
    pub fn new(look: LookControl) -> Self {
        Self {
            keys: HeldKeys::NONE,
            look,
        }
    }

    /// Route one action to the key set or the look control.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Press(key) => self.keys.press(key),
            Action::Release(key) => self.keys.release(key),
            Action::Look { dx, dy } => {
                self.look.apply_mouse_delta(dx, dy);
            }
            Action::LockPointer => {
                self.look.lock();
            }
            Action::UnlockPointer => {
                self.look.unlock();
            }
            Action::Noop => {}
        }
    }

    pub fn apply_all<'a>(&mut self, actions: impl IntoIterator<Item = &'a Action>) {
        for action in actions {
            self.apply(*action);
        }
    }
}
