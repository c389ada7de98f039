use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector2};

/// Shape drawn in place of a sprite whose texture is not loaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FallbackShape {
    Circle(Color),
    Ellipse(Color),
}

/// Sprite is identified by a texture key and its size on screen.
/// The texture is stretched to `width` x `height` at the entity's
/// [`MapPosition`](super::mapposition::MapPosition). If the key is missing
/// from the texture store, `fallback` is drawn instead.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
    pub fallback: FallbackShape,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>, size: Vector2, fallback: FallbackShape) -> Self {
        Self {
            tex_key: tex_key.into(),
            width: size.x,
            height: size.y,
            fallback,
        }
    }

    pub fn size(&self) -> Vector2 {
        Vector2 {
            x: self.width,
            y: self.height,
        }
    }

    pub fn set_size(&mut self, size: Vector2) {
        self.width = size.x;
        self.height = size.y;
    }
}
