//! Game configuration change detection system.
//!
//! Monitors [`GameConfig`] for changes and applies settings to the window,
//! render target, screen size and music volume.

use crate::events::audio::AudioCmd;
use crate::events::switchfullscreen::SwitchFullScreenEvent;
use crate::resources::fullscreen::FullScreen;
use crate::resources::gameconfig::GameConfig;
use crate::resources::rendertarget::{RenderFilter, RenderTarget};
use crate::resources::screensize::ScreenSize;
use crate::resources::session::Session;
use crate::systems::audio::volume_command;
use bevy_ecs::prelude::*;
use log::{debug, error, info};
use raylib::ffi;

/// Apply [`GameConfig`] when it is added or modified.
///
/// - resizes the render target (and [`ScreenSize`]) to the render resolution
///   and applies its scaling filter
/// - toggles fullscreen when the window disagrees with the config
/// - applies vsync and the target FPS
/// - re-sends the music volume so a new `volume` is heard immediately
pub fn apply_gameconfig_changes(
    maybe_config: Option<Res<GameConfig>>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut render_target: NonSendMut<RenderTarget>,
    mut screen_size: ResMut<ScreenSize>,
    fullscreen: Option<Res<FullScreen>>,
    session: Option<Res<Session>>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
    mut commands: Commands,
) {
    let Some(config) = maybe_config else {
        return;
    };
    if !(config.is_changed() || config.is_added()) {
        return;
    }

    if render_target.game_width != config.render_width
        || render_target.game_height != config.render_height
    {
        info!(
            "Resizing render target: {}x{} -> {}x{}",
            render_target.game_width,
            render_target.game_height,
            config.render_width,
            config.render_height
        );
        match render_target.recreate(&mut rl, &th, config.render_width, config.render_height) {
            Ok(()) => {
                screen_size.w = config.render_width as i32;
                screen_size.h = config.render_height as i32;
            }
            Err(e) => error!("Failed to resize render target: {}", e),
        }
    }

    let filter = if config.smooth {
        RenderFilter::Bilinear
    } else {
        RenderFilter::Nearest
    };
    if render_target.filter != filter {
        render_target.set_filter(filter);
    }

    // Synchronize fullscreen state between config and window
    let is_fullscreen = fullscreen.is_some();
    if config.fullscreen != is_fullscreen {
        debug!(
            "Fullscreen mismatch: config={}, window={} - triggering toggle",
            config.fullscreen, is_fullscreen
        );
        commands.trigger(SwitchFullScreenEvent {});
    }

    unsafe {
        if config.vsync {
            ffi::SetWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        } else {
            ffi::ClearWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        }
    }
    rl.set_target_fps(config.target_fps);

    if let Some(session) = session {
        if let Some(cmd) = volume_command(&session, config.volume) {
            audio_cmd_writer.write(cmd);
        }
    }

    debug!("GameConfig changes applied.");
}
