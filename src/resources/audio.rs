//! ECS resources that bridge the main thread with the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`] together with the `Messages<AudioCmd>` and
//! `Messages<AudioMessage>` queues. Call [`shutdown_audio`] during teardown
//! to stop and join the thread.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{info, warn};

/// Shared bridge between the ECS world and the audio thread.
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> ECS).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Register the audio message queues and, when `enabled`, spawn the audio
/// thread.
///
/// With audio disabled (or if the thread cannot be spawned) the queues still
/// exist so systems can write commands; they are dropped each frame.
pub fn setup_audio(world: &mut World, enabled: bool) {
    world.insert_resource(Messages::<AudioMessage>::default());
    world.insert_resource(Messages::<AudioCmd>::default());

    if !enabled {
        info!("Audio disabled by configuration");
        return;
    }

    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let spawned = std::thread::Builder::new()
        .name("audio".into())
        .spawn(move || audio_thread(rx_cmd, tx_msg));

    match spawned {
        Ok(handle) => world.insert_resource(AudioBridge {
            tx_cmd,
            rx_msg,
            handle,
        }),
        Err(e) => warn!("Could not start audio thread, running silent: {}", e),
    }
}

/// Gracefully request shutdown of the audio thread and join it.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::UnloadAllMusic);
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
