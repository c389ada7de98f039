//! Level transitions.
//!
//! Triggered by [`crate::systems::level::level_progress`] when the score
//! crosses into another rule of the active skin's level table.
use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChangedEvent {
    pub from: usize,
    pub to: usize,
}
