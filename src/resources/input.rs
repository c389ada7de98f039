//! Per-frame keyboard input resource.
//!
//! Captures the subset of keyboard state the game cares about and exposes it
//! to systems via the [`InputState`] resource. The pad moves with A/D or the
//! arrow keys; the remaining keys drive the scene menus.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::events::input::InputAction;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(KeyboardKey::KEY_NULL)
    }
}

impl BoolState {
    /// Released state bound to `key`.
    pub fn bound(key: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: key,
        }
    }
}

/// Key sample for one frame: (down, pressed this frame, released this frame).
pub type KeySample = (bool, bool, bool);

/// Resource capturing the per-frame keyboard state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub maindirection_left: BoolState,
    pub maindirection_right: BoolState,
    // Arrow keys
    pub secondarydirection_left: BoolState,
    pub secondarydirection_right: BoolState,
    // Menu keys
    pub action_start: BoolState,
    pub action_confirm: BoolState,
    pub action_back: BoolState,
    pub action_pause: BoolState,
    pub action_mute: BoolState,
    pub action_skins: BoolState,
    pub action_autocycle: BoolState,
    pub action_erase: BoolState,
    // Window keys
    pub mode_debug: BoolState,
    pub fullscreen_toggle: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            maindirection_left: BoolState::bound(KeyboardKey::KEY_A),
            maindirection_right: BoolState::bound(KeyboardKey::KEY_D),
            secondarydirection_left: BoolState::bound(KeyboardKey::KEY_LEFT),
            secondarydirection_right: BoolState::bound(KeyboardKey::KEY_RIGHT),
            action_start: BoolState::bound(KeyboardKey::KEY_SPACE),
            action_confirm: BoolState::bound(KeyboardKey::KEY_ENTER),
            action_back: BoolState::bound(KeyboardKey::KEY_ESCAPE),
            action_pause: BoolState::bound(KeyboardKey::KEY_P),
            action_mute: BoolState::bound(KeyboardKey::KEY_M),
            action_skins: BoolState::bound(KeyboardKey::KEY_S),
            action_autocycle: BoolState::bound(KeyboardKey::KEY_C),
            action_erase: BoolState::bound(KeyboardKey::KEY_BACKSPACE),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11),
            fullscreen_toggle: BoolState::bound(KeyboardKey::KEY_F10),
        }
    }
}

impl InputState {
    /// Left held on either binding.
    pub fn left_held(&self) -> bool {
        self.maindirection_left.active || self.secondarydirection_left.active
    }

    /// Right held on either binding.
    pub fn right_held(&self) -> bool {
        self.maindirection_right.active || self.secondarydirection_right.active
    }

    /// Horizontal intent: -1, 0 or 1. Opposite keys cancel out.
    pub fn horizontal_axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.right_held() {
            axis += 1.0;
        }
        if self.left_held() {
            axis -= 1.0;
        }
        axis
    }

    fn bindings_mut(&mut self) -> [(&mut BoolState, InputAction); 14] {
        [
            (&mut self.maindirection_left, InputAction::Left),
            (&mut self.maindirection_right, InputAction::Right),
            (&mut self.secondarydirection_left, InputAction::Left),
            (&mut self.secondarydirection_right, InputAction::Right),
            (&mut self.action_start, InputAction::Start),
            (&mut self.action_confirm, InputAction::Confirm),
            (&mut self.action_back, InputAction::Back),
            (&mut self.action_pause, InputAction::Pause),
            (&mut self.action_mute, InputAction::Mute),
            (&mut self.action_skins, InputAction::Skins),
            (&mut self.action_autocycle, InputAction::AutoCycle),
            (&mut self.action_erase, InputAction::Erase),
            (&mut self.mode_debug, InputAction::ToggleDebug),
            (&mut self.fullscreen_toggle, InputAction::ToggleFullscreen),
        ]
    }

    /// Refresh every binding from `sample` and return the actions that were
    /// pressed (`true`) or released (`false`) this frame, in binding order.
    pub fn refresh(
        &mut self,
        mut sample: impl FnMut(KeyboardKey) -> KeySample,
    ) -> Vec<(InputAction, bool)> {
        let mut changes = Vec::new();
        for (state, action) in self.bindings_mut() {
            let (down, pressed, released) = sample(state.key_binding);
            state.active = down;
            state.just_pressed = pressed;
            state.just_released = released;
            if pressed {
                changes.push((action, true));
            }
            if released {
                changes.push((action, false));
            }
        }
        changes
    }
}
