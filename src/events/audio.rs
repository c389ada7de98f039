//! Messages exchanged with the background audio thread.

use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread.
///
/// Music ids are the track paths, so switching skins can tell whether the
/// requested track is already loaded.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadMusic { id: String, path: String },
    UnloadMusic { id: String },
    UnloadAllMusic,
    PlayMusic { id: String, looped: bool },
    StopMusic { id: String },
    PauseMusic { id: String },
    ResumeMusic { id: String },
    VolumeMusic { id: String, vol: f32 },
    Shutdown,
}

/// Feedback sent *back* from the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    DeviceUnavailable { error: String },
    MusicLoaded { id: String },
    MusicUnloaded { id: String },
    MusicUnloadedAll,
    MusicLoadFailed { id: String, error: String },
    MusicPlayStarted { id: String },
    MusicStopped { id: String },
    /// A track that was not looped reached its end.
    MusicFinished { id: String },
    MusicVolumeChanged { id: String, vol: f32 },
}
