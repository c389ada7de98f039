//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and a method to load the file. Every key is
//! optional; command line flags are applied on top in `main`.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 640
//! height = 480
//! smooth = true
//!
//! [window]
//! width = 1280
//! height = 960
//! fullscreen = false
//! vsync = true
//! target_fps = 60
//!
//! [paths]
//! skins = assets/skins
//! data = Data
//!
//! [audio]
//! enabled = true
//! volume = 0.5
//! muted = false
//!
//! [game]
//! lives = 5
//! max_scores = 10
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 640;
const DEFAULT_RENDER_HEIGHT: u32 = 480;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 960;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_SKINS_DIR: &str = "assets/skins";
const DEFAULT_DATA_DIR: &str = "Data";
const DEFAULT_AUDIO_ENABLED: bool = true;
const DEFAULT_VOLUME: f32 = 0.5;
const DEFAULT_SMOOTH: bool = true;
const DEFAULT_LIVES: u32 = 5;
const DEFAULT_MAX_SCORES: usize = 10;

const SCORES_FILE: &str = "scores.json";
const SETTINGS_FILE: &str = "settings.json";

/// Game configuration resource.
///
/// Stores render resolution, window settings, asset/data locations, audio
/// and rule options.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Internal render width in pixels.
    pub render_width: u32,
    /// Internal render height in pixels.
    pub render_height: u32,
    /// Bilinear scaling of the render target into the window.
    pub smooth: bool,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Folder holding one sub-folder per skin.
    pub skins_dir: PathBuf,
    /// Folder for `settings.json` and `scores.json`.
    pub data_dir: PathBuf,
    /// Start the audio thread at all.
    pub audio_enabled: bool,
    /// Music volume when not muted, 0.0..=1.0.
    pub volume: f32,
    /// Start with music muted.
    pub muted: bool,
    /// Lives at the start of a run.
    pub lives: u32,
    /// Rows kept in the score table.
    pub max_scores: usize,
    /// Path to the configuration file.
    pub config_path: PathBuf,
    /// Skin to select at startup instead of the saved one. Command line only.
    pub skin_override: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            smooth: DEFAULT_SMOOTH,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            skins_dir: PathBuf::from(DEFAULT_SKINS_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            audio_enabled: DEFAULT_AUDIO_ENABLED,
            volume: DEFAULT_VOLUME,
            muted: false,
            lives: DEFAULT_LIVES,
            max_scores: DEFAULT_MAX_SCORES,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            skin_override: None,
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [render] section
        if let Some(width) = config.getuint("render", "width").ok().flatten() {
            self.render_width = width as u32;
        }
        if let Some(height) = config.getuint("render", "height").ok().flatten() {
            self.render_height = height as u32;
        }
        if let Some(smooth) = config.getbool("render", "smooth").ok().flatten() {
            self.smooth = smooth;
        }

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        // [paths] section
        if let Some(skins) = config.get("paths", "skins") {
            self.skins_dir = PathBuf::from(skins);
        }
        if let Some(data) = config.get("paths", "data") {
            self.data_dir = PathBuf::from(data);
        }

        // [audio] section
        if let Some(enabled) = config.getbool("audio", "enabled").ok().flatten() {
            self.audio_enabled = enabled;
        }
        if let Some(volume) = config.getfloat("audio", "volume").ok().flatten() {
            self.volume = (volume as f32).clamp(0.0, 1.0);
        }
        if let Some(muted) = config.getbool("audio", "muted").ok().flatten() {
            self.muted = muted;
        }

        // [game] section
        if let Some(lives) = config.getuint("game", "lives").ok().flatten() {
            self.lives = (lives as u32).max(1);
        }
        if let Some(max_scores) = config.getuint("game", "max_scores").ok().flatten() {
            self.max_scores = (max_scores as usize).max(1);
        }

        info!(
            "Loaded config: {}x{} render, {}x{} window, fps={}, vsync={}, fullscreen={}, skins={:?}, data={:?}, audio={} vol={}",
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen,
            self.skins_dir,
            self.data_dir,
            self.audio_enabled,
            self.volume
        );

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn scores_path(&self) -> PathBuf {
        self.data_dir.join(SCORES_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }
}
