//! Full screen toggle resource.
//!
//! Present while the window is fullscreen. F10 or a `fullscreen` change in
//! `config.ini` flips it.
use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the window is in full screen mode.
#[derive(Resource, Clone, Copy)]
pub struct FullScreen {}
