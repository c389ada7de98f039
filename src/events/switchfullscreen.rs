//! F10 fullscreen toggle.
//!
//! The [`FullScreen`] marker resource records the mode the game asked for.
//! [`switch_fullscreen_observer`] flips it and resizes the window: to the
//! current monitor when entering fullscreen, back to the configured size
//! when leaving.

use crate::resources::fullscreen::FullScreen;
use crate::resources::gameconfig::GameConfig;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{info, warn};
use raylib::RaylibHandle;
use raylib::ffi;

#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchFullScreenEvent {}

/// Window size to request before toggling into `fullscreen` mode.
pub fn target_window_size(fullscreen: bool, monitor: (i32, i32), windowed: (u32, u32)) -> (i32, i32) {
    if fullscreen {
        monitor
    } else {
        (windowed.0 as i32, windowed.1 as i32)
    }
}

fn monitor_size() -> (i32, i32) {
    // SAFETY: the window exists for as long as the observer can run
    unsafe {
        let monitor = ffi::GetCurrentMonitor();
        (ffi::GetMonitorWidth(monitor), ffi::GetMonitorHeight(monitor))
    }
}

fn set_fullscreen(rl: &mut RaylibHandle, fullscreen: bool, (w, h): (i32, i32)) {
    if rl.is_window_fullscreen() == fullscreen {
        return;
    }
    rl.set_window_size(w, h);
    if fullscreen {
        #[cfg(not(target_os = "windows"))]
        rl.maximize_window();
        rl.toggle_fullscreen();
    } else {
        rl.toggle_fullscreen();
        rl.restore_window();
    }
    if rl.is_window_fullscreen() != fullscreen {
        warn!("Window did not switch fullscreen to {}", fullscreen);
    }
}

pub fn switch_fullscreen_observer(
    _trigger: On<SwitchFullScreenEvent>,
    mut rl: NonSendMut<RaylibHandle>,
    mut commands: Commands,
    fullscreen: Option<Res<FullScreen>>,
    config: Res<GameConfig>,
) {
    let enable = fullscreen.is_none();
    if enable {
        commands.insert_resource(FullScreen {});
    } else {
        commands.remove_resource::<FullScreen>();
    }
    let size = target_window_size(enable, monitor_size(), config.window_size());
    info!("Fullscreen {} at {}x{}", if enable { "on" } else { "off" }, size.0, size.1);
    set_fullscreen(&mut rl, enable, size);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_size_follows_mode() {
        assert_eq!(target_window_size(true, (1920, 1080), (1280, 960)), (1920, 1080));
        assert_eq!(target_window_size(false, (1920, 1080), (1280, 960)), (1280, 960));
    }
}
