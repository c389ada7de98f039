//! Input systems.
//!
//! - [`update_input_state`] reads hardware input from Raylib each frame and
//!   writes the results into [`crate::resources::input::InputState`].
//! - Input events are emitted for key presses/releases and typed characters.
//!   F11 and F10 toggle the debug overlay and fullscreen directly.
use bevy_ecs::prelude::*;

use crate::events::input::{InputAction, InputEvent, TextInputEvent};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::events::switchfullscreen::SwitchFullScreenEvent;
use crate::resources::input::InputState;

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let changes = input.refresh(|key| {
        (
            rl.is_key_down(key),
            rl.is_key_pressed(key),
            rl.is_key_released(key),
        )
    });
    emit_input_events(&mut commands, &changes);

    while let Some(ch) = rl.get_char_pressed() {
        if !ch.is_control() {
            commands.trigger(TextInputEvent { ch });
        }
    }
}

/// Translate binding changes into triggered events.
pub fn emit_input_events(commands: &mut Commands, changes: &[(InputAction, bool)]) {
    for &(action, pressed) in changes {
        match (action, pressed) {
            (InputAction::ToggleDebug, true) => commands.trigger(SwitchDebugEvent {}),
            (InputAction::ToggleFullscreen, true) => commands.trigger(SwitchFullScreenEvent {}),
            (InputAction::ToggleDebug | InputAction::ToggleFullscreen, false) => {}
            _ => commands.trigger(InputEvent { action, pressed }),
        }
    }
}
