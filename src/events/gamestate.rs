//! Game state transition event and observer.
//!
//! Systems can request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers the
//! observer in this module, which applies the transition to [`GameState`]
//! and invokes the appropriate enter systems stored in
//! [`crate::resources::systemsstore::SystemsStore`].
//!
//! This decouples the intent to change state from the mechanics of running
//! setup/teardown systems and avoids borrowing conflicts.
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// Contract
/// - Reads the intention from [`NextGameState`].
/// - If pending, copies the new value into [`GameState`], resets the request
///   and runs the enter hook for the new state.
/// - If any required resource is missing, logs a diagnostic and returns.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Res<SystemsStore>,
) {
    if let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    {
        match next_game_state.get().clone() {
            Pending(new_state) => {
                let old_state = game_state.get().clone();
                info!("Transitioning from {:?} to {:?}", old_state, new_state);
                game_state.set(new_state.clone());
                next_game_state.reset();
                on_state_enter(&new_state, &old_state, &mut commands, &systems_store);
            }
            Unchanged => {
                debug!("No state change pending.");
            }
        }
    } else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
    }
}

/// Name of the registered system to run when entering `state` from `from`.
pub fn enter_hook(state: &GameStates, from: &GameStates) -> Option<&'static str> {
    match state {
        GameStates::Setup => Some("setup"),
        // resuming from pause keeps the running game
        GameStates::Playing if *from == GameStates::Paused => None,
        GameStates::Playing => Some("enter_play"),
        GameStates::Leaderboard => Some("enter_leaderboard"),
        GameStates::Quitting => Some("quit_game"),
        GameStates::None
        | GameStates::Title
        | GameStates::Paused
        | GameStates::NameEntry
        | GameStates::Skins => None,
    }
}

fn on_state_enter(
    state: &GameStates,
    from: &GameStates,
    commands: &mut Commands,
    systems_store: &SystemsStore,
) {
    let Some(hook) = enter_hook(state, from) else {
        debug!("Entered {:?} state", state);
        return;
    };
    match systems_store.get(hook) {
        Some(id) => commands.run_system(*id),
        None => error!("System '{}' not found in SystemsStore", hook),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_hook_skipped_when_resuming() {
        assert_eq!(
            enter_hook(&GameStates::Playing, &GameStates::Title),
            Some("enter_play")
        );
        assert_eq!(
            enter_hook(&GameStates::Playing, &GameStates::Leaderboard),
            Some("enter_play")
        );
        assert_eq!(enter_hook(&GameStates::Playing, &GameStates::Paused), None);
    }

    #[test]
    fn test_hooks_for_other_states() {
        assert_eq!(enter_hook(&GameStates::Setup, &GameStates::None), Some("setup"));
        assert_eq!(
            enter_hook(&GameStates::Leaderboard, &GameStates::NameEntry),
            Some("enter_leaderboard")
        );
        assert_eq!(
            enter_hook(&GameStates::Quitting, &GameStates::Leaderboard),
            Some("quit_game")
        );
        assert_eq!(enter_hook(&GameStates::Skins, &GameStates::Title), None);
    }
}
