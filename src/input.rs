//! Logical input
//!
//! The simulation only asks "is this action held" and "was it pressed this
//! step". Mapping keys, pads or touch onto actions is the host's job.

use serde::{Deserialize, Serialize};

/// Logical actions the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Advance to the next growth state
    GrowForward,
    /// Go back to the previous growth state
    GrowBackward,
    /// Any key at all (menus, title cards)
    AnyKey,
}

/// Source of input state for one step
pub trait InputProvider {
    /// Action is currently held down
    fn is_held(&self, action: Action) -> bool;
    /// Action went down since the previous step
    fn was_pressed(&self, action: Action) -> bool;
}

/// Snapshot of input for a single step
///
/// Movement fields mirror key-down state. The grow and any-key fields are
/// edges: the host sets them on the step a key goes down and calls
/// [`InputState::clear_pressed`] after every step, otherwise holding the key
/// re-triggers the action each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Edge-triggered
    pub grow_forward: bool,
    /// Edge-triggered
    pub grow_backward: bool,
    /// Edge-triggered
    pub any_key: bool,
}

impl InputState {
    /// Nothing held, nothing pressed
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn held(actions: &[Action]) -> Self {
        let mut state = Self::default();
        for &action in actions {
            state.set(action, true);
        }
        state
    }

    pub fn set(&mut self, action: Action, on: bool) {
        match action {
            Action::MoveUp => self.up = on,
            Action::MoveDown => self.down = on,
            Action::MoveLeft => self.left = on,
            Action::MoveRight => self.right = on,
            Action::GrowForward => self.grow_forward = on,
            Action::GrowBackward => self.grow_backward = on,
            Action::AnyKey => self.any_key = on,
        }
    }

    /// Reset the edge-triggered actions once a step has consumed them
    pub fn clear_pressed(&mut self) {
        self.grow_forward = false;
        self.grow_backward = false;
        self.any_key = false;
    }

    fn get(&self, action: Action) -> bool {
        match action {
            Action::MoveUp => self.up,
            Action::MoveDown => self.down,
            Action::MoveLeft => self.left,
            Action::MoveRight => self.right,
            Action::GrowForward => self.grow_forward,
            Action::GrowBackward => self.grow_backward,
            Action::AnyKey => self.any_key,
        }
    }
}

impl InputProvider for InputState {
    fn is_held(&self, action: Action) -> bool {
        self.get(action)
    }

    fn was_pressed(&self, action: Action) -> bool {
        self.get(action)
    }
}
