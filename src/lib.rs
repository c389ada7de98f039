//! Frog Jump library.
//!
//! This module exposes the game's ECS components, resources, systems, and
//! events for use in integration tests and by the `frogjump` binary.

pub mod components;
pub mod events;
pub mod game;
pub mod persist;
pub mod resources;
pub mod systems;
