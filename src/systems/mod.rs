//! Game systems.
//!
//! This module groups all ECS systems that advance simulation, input, and
//! rendering, plus the observers that react to gameplay events.
//!
//! Submodules overview
//! - [`audio`] – bridge with the audio thread and music switching helpers
//! - [`collision`] – frogs bouncing off the pad
//! - [`gameconfig`] – apply configuration changes to window and render target
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`level`] – level progress, rule application and frog spawning
//! - [`movement`] – pad steering and frog flight
//! - [`render`] – draw the current screen and debug overlay using Raylib
//! - [`scenes`] – per-screen key handling
//! - [`scoring`] – water check, score and lives
//! - [`skin`] – activate a skin and keep the pad geometry in sync
//! - [`time`] – update simulation time and delta

pub mod audio;
pub mod collision;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod level;
pub mod movement;
pub mod render;
pub mod scenes;
pub mod scoring;
pub mod skin;
pub mod time;
