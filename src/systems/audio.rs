//! Audio system implementation backed by a dedicated thread and Raylib.
//!
//! This module hosts the background audio thread and the systems that bridge
//! it with the ECS world:
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio device,
//!   and processes [`AudioCmd`] messages, emitting [`AudioMessage`] responses.
//! - [`forward_audio_cmds`] / [`poll_audio_messages`] move messages across the
//!   channel pair each frame.
//! - [`music_commands`] turns "this skin wants that track" into the command
//!   sequence that switches tracks.
//!
//! Raylib audio calls stay on the audio thread; the game thread only talks to
//! it through lock-free channels. When audio is disabled there is no
//! [`AudioBridge`] and commands are simply dropped.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use crate::resources::session::Session;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{Music, RaylibAudio};
use rustc_hash::{FxHashMap, FxHashSet};

/// Drain any pending messages from the audio thread into the ECS
/// [`Messages<AudioMessage>`] mailbox.
pub fn poll_audio_messages(
    bridge: Option<Res<AudioBridge>>,
    mut writer: MessageWriter<AudioMessage>,
) {
    if let Some(bridge) = bridge {
        writer.write_batch(bridge.rx_msg.try_iter());
    }
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS [`AudioCmd`] messages to the audio thread.
pub fn forward_audio_cmds(bridge: Option<Res<AudioBridge>>, mut reader: MessageReader<AudioCmd>) {
    let Some(bridge) = bridge else {
        // audio disabled: consume and drop
        for _ in reader.read() {}
        return;
    };
    for cmd in reader.read() {
        // ignore send error on shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for [`AudioCmd`].
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// React to audio thread feedback. A track that failed to load is forgotten
/// so the next skin switch tries again.
pub fn on_audio_messages(
    mut reader: MessageReader<AudioMessage>,
    mut session: Option<ResMut<Session>>,
) {
    for msg in reader.read() {
        match msg {
            AudioMessage::DeviceUnavailable { error } => {
                warn!("Audio disabled: {}", error);
            }
            AudioMessage::MusicLoadFailed { id, error } => {
                warn!("Could not load music '{}': {}", id, error);
                if let Some(session) = session.as_deref_mut() {
                    if session.current_music.as_deref() == Some(id.as_str()) {
                        session.current_music = None;
                    }
                }
            }
            other => debug!("audio: {:?}", other),
        }
    }
}

/// Music volume for the mute state.
pub fn effective_volume(muted: bool, volume: f32) -> f32 {
    if muted { 0.0 } else { volume }
}

/// Volume update for the track currently playing, if any.
pub fn volume_command(session: &Session, volume: f32) -> Option<AudioCmd> {
    session
        .current_music
        .as_ref()
        .map(|id| AudioCmd::VolumeMusic {
            id: id.clone(),
            vol: effective_volume(session.muted, volume),
        })
}

/// Pause or resume the track currently playing, if any.
pub fn pause_command(session: &Session, pause: bool) -> Option<AudioCmd> {
    let id = session.current_music.clone()?;
    Some(if pause {
        AudioCmd::PauseMusic { id }
    } else {
        AudioCmd::ResumeMusic { id }
    })
}

/// Commands that move playback from `current` to `target`.
///
/// - no target: stop and unload whatever plays
/// - same track: only refresh the volume
/// - new track: stop/unload the old one, then load, loop and set volume
pub fn music_commands(
    current: Option<&str>,
    target: Option<&str>,
    muted: bool,
    volume: f32,
) -> Vec<AudioCmd> {
    let vol = effective_volume(muted, volume);
    let mut cmds = Vec::new();
    if let (Some(c), Some(t)) = (current, target) {
        if c == t {
            cmds.push(AudioCmd::VolumeMusic {
                id: t.to_string(),
                vol,
            });
            return cmds;
        }
    }
    if let Some(c) = current {
        cmds.push(AudioCmd::StopMusic { id: c.to_string() });
        cmds.push(AudioCmd::UnloadMusic { id: c.to_string() });
    }
    if let Some(t) = target {
        cmds.push(AudioCmd::LoadMusic {
            id: t.to_string(),
            path: t.to_string(),
        });
        cmds.push(AudioCmd::PlayMusic {
            id: t.to_string(),
            looped: true,
        });
        cmds.push(AudioCmd::VolumeMusic {
            id: t.to_string(),
            vol,
        });
    }
    cmds
}

/// Block until shutdown, discarding commands. Used when no device exists.
fn drain_until_shutdown(rx_cmd: &Receiver<AudioCmd>) {
    for cmd in rx_cmd.iter() {
        if cmd == AudioCmd::Shutdown {
            break;
        }
    }
}

/// Entry point of the dedicated audio thread.
///
/// Owns the Raylib audio device and every `Music` handle, reacts to
/// [`AudioCmd`]s, pumps music streams, restarts looped tracks and reports
/// back with [`AudioMessage`]s. If the device cannot be opened the thread
/// reports it once and idles until [`AudioCmd::Shutdown`].
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("[audio] failed to initialize audio device: {}", e);
            let _ = tx_evt.send(AudioMessage::DeviceUnavailable {
                error: e.to_string(),
            });
            drain_until_shutdown(&rx_cmd);
            return;
        }
    };

    info!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut musics: FxHashMap<String, Music> = FxHashMap::default();
    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut looped: FxHashSet<String> = FxHashSet::default();

    'run: loop {
        // 1) Drain commands
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
                    Ok(music) => {
                        debug!("[audio] loaded id='{}' path='{}'", id, path);
                        musics.insert(id.clone(), music);
                        let _ = tx_evt.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        warn!("[audio] load failed id='{}' path='{}' error='{}'", id, path, e);
                        let _ = tx_evt.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayMusic {
                    id,
                    looped: want_loop,
                } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("[audio] play start id='{}' looped={}", id, want_loop);
                        music.seek_stream(0.0);
                        music.play_stream();
                        playing.insert(id.clone());
                        if want_loop {
                            looped.insert(id.clone());
                        } else {
                            looped.remove(&id);
                        }
                        let _ = tx_evt.send(AudioMessage::MusicPlayStarted { id });
                    }
                }
                AudioCmd::StopMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("[audio] stop id='{}'", id);
                        music.stop_stream();
                        playing.remove(&id);
                        looped.remove(&id);
                        let _ = tx_evt.send(AudioMessage::MusicStopped { id });
                    }
                }
                AudioCmd::PauseMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        music.pause_stream();
                        playing.remove(&id);
                        let _ = tx_evt.send(AudioMessage::MusicStopped { id });
                    }
                }
                AudioCmd::ResumeMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        music.resume_stream();
                        playing.insert(id.clone());
                        let _ = tx_evt.send(AudioMessage::MusicPlayStarted { id });
                    }
                }
                AudioCmd::VolumeMusic { id, vol } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("[audio] volume id='{}' vol={}", id, vol);
                        music.set_volume(vol);
                        let _ = tx_evt.send(AudioMessage::MusicVolumeChanged { id, vol });
                    }
                }
                AudioCmd::UnloadMusic { id } => {
                    if musics.remove(&id).is_some() {
                        debug!("[audio] unload id='{}'", id);
                        playing.remove(&id);
                        looped.remove(&id);
                        let _ = tx_evt.send(AudioMessage::MusicUnloaded { id });
                    }
                }
                AudioCmd::UnloadAllMusic => {
                    musics.clear();
                    playing.clear();
                    looped.clear();
                    let _ = tx_evt.send(AudioMessage::MusicUnloadedAll);
                }
                AudioCmd::Shutdown => {
                    info!("[audio] shutdown requested");
                    musics.clear();
                    playing.clear();
                    looped.clear();
                    break 'run;
                }
            }
        }

        // 2) Pump streaming + detect ends.
        //    `update_stream()` must be called regularly while playing.
        let mut ended: Vec<String> = Vec::new();
        for id in playing.iter() {
            if let Some(music) = musics.get(id) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else if music.get_time_played() >= music.get_time_length() - 0.01 {
                    ended.push(id.clone());
                }
            }
        }
        for id in ended {
            if looped.contains(&id) {
                if let Some(music) = musics.get(&id) {
                    debug!("[audio] restarting looped id='{}'", id);
                    music.seek_stream(0.0);
                    music.play_stream();
                    let _ = tx_evt.send(AudioMessage::MusicPlayStarted { id });
                }
            } else {
                playing.remove(&id);
                let _ = tx_evt.send(AudioMessage::MusicFinished { id });
            }
        }

        std::thread::sleep(std::time::Duration::from_millis(10));
    } // 'run

    info!(
        "[audio] thread exiting (id={:?})",
        std::thread::current().id()
    );
    // musics drop before `audio`
}
