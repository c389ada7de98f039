//! Screen size resource.
//!
//! The game's internal render resolution. Gameplay clamps the pad and
//! reflects frogs against these bounds, and the render system lays out
//! every screen in these coordinates.

use bevy_ecs::prelude::Resource;

/// Playfield size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    pub w: i32,
    pub h: i32,
}

impl ScreenSize {
    pub fn width(&self) -> f32 {
        self.w as f32
    }

    pub fn height(&self) -> f32 {
        self.h as f32
    }
}
