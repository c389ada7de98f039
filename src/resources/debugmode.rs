//! Debug toggle resource.
//!
//! The mere presence of this resource enables the debug overlay (collider
//! boxes and FPS). F11 inserts or removes it.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the render system draws the debug overlay.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
