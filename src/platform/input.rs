//! Input state
//!
//! Raw key handling stays with the platform; the simulation only asks whether
//! an action is held or was pressed since the previous frame.

use crate::sim::FrameInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    Confirm,
}

impl Action {
    const ALL: [Action; 4] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Fire,
        Action::Confirm,
    ];

    fn index(self) -> usize {
        match self {
            Action::MoveLeft => 0,
            Action::MoveRight => 1,
            Action::Fire => 2,
            Action::Confirm => 3,
        }
    }
}

pub trait InputProvider {
    /// Action is currently held down
    fn is_held(&self, action: Action) -> bool;
    /// Action went down since the last frame boundary
    fn was_just_pressed(&self, action: Action) -> bool;
}

impl FrameInput {
    /// Sample a provider: movement and fire are held, confirm is edge-triggered
    pub fn from_provider(input: &impl InputProvider) -> Self {
        Self {
            move_left: input.is_held(Action::MoveLeft),
            move_right: input.is_held(Action::MoveRight),
            fire: input.is_held(Action::Fire),
            confirm: input.was_just_pressed(Action::Confirm),
        }
    }
}

/// Key state fed by press/release events
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: [bool; 4],
    pressed: [bool; 4],
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        let i = action.index();
        // Auto-repeat presses do not count as new presses
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    pub fn release(&mut self, action: Action) {
        self.held[action.index()] = false;
    }

    /// Forget edge state; call once after each frame is sampled
    pub fn end_frame(&mut self) {
        self.pressed = [false; 4];
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        for action in Action::ALL {
            self.release(action);
        }
        self.end_frame();
    }
}

impl InputProvider for KeyState {
    fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    fn was_just_pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }
}
