//! Input action events.
//!
//! [`InputEvent`] is triggered when a bound key is pressed or released and
//! [`TextInputEvent`] carries typed characters for name entry. Scene logic
//! observes these instead of polling
//! [`InputState`](crate::resources::input::InputState).

use bevy_ecs::prelude::*;

/// Enumeration of logical input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move left / browse previous (A or Left arrow).
    Left,
    /// Move right / browse next (D or Right arrow).
    Right,
    /// Start or restart a game (Space).
    Start,
    /// Confirm (Enter).
    Confirm,
    /// Back/cancel (Escape).
    Back,
    /// Pause and resume (P).
    Pause,
    /// Toggle music mute (M).
    Mute,
    /// Open the skin selector (S).
    Skins,
    /// Toggle skin auto-cycle (C).
    AutoCycle,
    /// Delete the last typed character (Backspace).
    Erase,
    /// Debug overlay (F11).
    ToggleDebug,
    /// Fullscreen (F10).
    ToggleFullscreen,
}

/// Event emitted when an input action is pressed or released.
#[derive(Event, Debug, Clone, Copy)]
pub struct InputEvent {
    /// The input action that triggered this event.
    pub action: InputAction,
    /// Whether the action was pressed (true) or released (false).
    pub pressed: bool,
}

/// A printable character typed this frame.
#[derive(Event, Debug, Clone, Copy)]
pub struct TextInputEvent {
    pub ch: char,
}
