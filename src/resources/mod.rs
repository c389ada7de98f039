//! ECS resources made available to systems.
//!
//! Long-lived data injected into the ECS world: configuration, input,
//! timing, rendering handles, asset stores and the persisted game data.
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `debugmode` – presence toggles the debug overlay
//! - `fullscreen` – presence means the window is fullscreen
//! - `gameconfig` – `config.ini` settings with command line overrides
//! - `gamestate` – authoritative and pending high-level game state
//! - `highscores` – the persisted top score table
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `levels` – difficulty rules and per-frame unit conversion
//! - `rendertarget` – fixed-resolution framebuffer
//! - `rng` – seedable random source for frog launches and bounces
//! - `screensize` – playfield dimensions in pixels
//! - `session` – score, lives and forces of the current run
//! - `settings` – persisted skin choice and auto-cycle flag
//! - `skins` – skin discovery and selection
//! - `systemsstore` – registry of state enter systems by name
//! - `texturestore` – loaded textures keyed by string IDs
//! - `windowsize` – OS window dimensions and letterboxing
//! - `worldtime` – simulation time and delta
pub mod audio;
pub mod debugmode;
pub mod fullscreen;
pub mod gameconfig;
pub mod gamestate;
pub mod highscores;
pub mod input;
pub mod levels;
pub mod rendertarget;
pub mod rng;
pub mod screensize;
pub mod session;
pub mod settings;
pub mod skins;
pub mod systemsstore;
pub mod texturestore;
pub mod windowsize;
pub mod worldtime;
