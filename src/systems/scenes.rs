//! Per-screen key handling.
//!
//! Every screen reacts to [`InputEvent`] presses through
//! [`scene_input_observer`]; typed characters for the name prompt arrive
//! through [`text_input_observer`]. Screens change by requesting a new
//! state in [`NextGameState`], never by setting [`GameState`] directly.
//!
//! | screen      | keys                                                     |
//! |-------------|----------------------------------------------------------|
//! | Title       | Space play, S skins, M mute                              |
//! | Playing     | P pause, M mute                                          |
//! | Paused      | P resume, M mute                                         |
//! | NameEntry   | type, Backspace, Enter submit, Esc skip                  |
//! | Leaderboard | Space play, S skins, Esc quit, M mute                    |
//! | Skins       | Left/Right browse, Enter apply, C auto-cycle, Esc title  |
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{info, warn};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::events::audio::AudioCmd;
use crate::events::input::{InputAction, InputEvent, TextInputEvent};
use crate::events::skin::ApplySkinEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::highscores::HighScores;
use crate::resources::session::Session;
use crate::resources::skins::SkinManager;
use crate::systems::audio::{pause_command, volume_command};

/// Seconds since the Unix epoch, or 0 if the clock is before it.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn mutes_here(state: &GameStates) -> bool {
    matches!(
        state,
        GameStates::Title | GameStates::Playing | GameStates::Paused | GameStates::Leaderboard
    )
}

/// Where a key press on `state` leads, if anywhere.
pub fn next_screen(state: &GameStates, action: InputAction) -> Option<GameStates> {
    use GameStates as S;
    use InputAction as A;
    match (state, action) {
        (S::Title, A::Start) => Some(S::Playing),
        (S::Title, A::Skins) => Some(S::Skins),
        (S::Playing, A::Pause) => Some(S::Paused),
        (S::Paused, A::Pause) => Some(S::Playing),
        (S::NameEntry, A::Confirm | A::Back) => Some(S::Leaderboard),
        (S::Leaderboard, A::Start) => Some(S::Playing),
        (S::Leaderboard, A::Skins) => Some(S::Skins),
        (S::Leaderboard, A::Back) => Some(S::Quitting),
        (S::Skins, A::Back) => Some(S::Title),
        _ => None,
    }
}

fn save_skin_choice(skins: &SkinManager) {
    if let Err(e) = skins.save_choice() {
        warn!("Could not save skin choice: {}", e);
    }
}

pub fn scene_input_observer(
    trigger: On<InputEvent>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
    mut session: ResMut<Session>,
    mut skins: ResMut<SkinManager>,
    mut scores: ResMut<HighScores>,
    config: Res<GameConfig>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if !event.pressed {
        return;
    }
    let current = state.get();

    if event.action == InputAction::Mute && mutes_here(current) {
        let muted = session.toggle_mute();
        info!("Music {}", if muted { "muted" } else { "unmuted" });
        if let Some(cmd) = volume_command(&session, config.volume) {
            audio_cmd_writer.write(cmd);
        }
        return;
    }

    match (current, event.action) {
        (GameStates::NameEntry, InputAction::Erase) => session.pop_char(),
        (GameStates::NameEntry, InputAction::Confirm) => {
            let name = session.name_input.clone();
            if let Err(e) = scores.submit(&name, session.score, unix_now()) {
                warn!("Could not save score: {}", e);
            }
            session.name_input.clear();
        }
        (GameStates::Skins, InputAction::Left) => skins.prev(),
        (GameStates::Skins, InputAction::Right) => skins.next(),
        (GameStates::Skins, InputAction::Confirm) => {
            save_skin_choice(&skins);
            commands.trigger(ApplySkinEvent {});
        }
        (GameStates::Skins, InputAction::AutoCycle) => {
            skins.auto_cycle = !skins.auto_cycle;
            info!("Auto-cycle {}", if skins.auto_cycle { "on" } else { "off" });
            save_skin_choice(&skins);
        }
        _ => {}
    }

    if let Some(next) = next_screen(current, event.action) {
        let pause = match (current, &next) {
            (GameStates::Playing, GameStates::Paused) => Some(true),
            (GameStates::Paused, GameStates::Playing) => Some(false),
            _ => None,
        };
        if let Some(cmd) = pause.and_then(|p| pause_command(&session, p)) {
            audio_cmd_writer.write(cmd);
        }
        next_state.set(next);
    }
}

/// Feed typed characters into the player name while the prompt is open.
pub fn text_input_observer(
    trigger: On<TextInputEvent>,
    state: Res<GameState>,
    mut session: ResMut<Session>,
) {
    if *state.get() == GameStates::NameEntry {
        session.push_char(trigger.event().ch);
    }
}
