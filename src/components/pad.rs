//! The lily pad the player steers.
//!
//! Size follows the pad art scaled by the current level's `pad_scale`, with
//! a floor so the pad never becomes impossible to hit. Rescaling keeps the
//! pad's bottom-centre fixed.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

use crate::components::mapposition::MapPosition;
use crate::resources::levels::per_frame;

/// Horizontal pad speed in pixels per reference frame.
pub const PAD_SPEED_PER_FRAME: f32 = 12.0;
/// Gap between the pad's bottom edge and the bottom of the screen.
pub const PAD_BOTTOM_MARGIN: f32 = 40.0;
pub const PAD_MIN_WIDTH: f32 = 20.0;
pub const PAD_MIN_HEIGHT: f32 = 8.0;

#[derive(Component, Clone, Copy, Debug)]
pub struct Pad {
    /// Horizontal speed in pixels per second while a direction is held.
    pub speed: f32,
    /// Unscaled size of the pad art.
    pub base_size: Vector2,
    /// Level-driven scale factor.
    pub scale: f32,
}

impl Pad {
    pub fn new(base_size: Vector2) -> Self {
        Self {
            speed: per_frame(PAD_SPEED_PER_FRAME),
            base_size,
            scale: 1.0,
        }
    }

    /// On-screen size: art size times scale, truncated to whole pixels and
    /// floored at `PAD_MIN_WIDTH` x `PAD_MIN_HEIGHT`.
    pub fn scaled_size(&self) -> Vector2 {
        Vector2 {
            x: (self.base_size.x * self.scale).trunc().max(PAD_MIN_WIDTH),
            y: (self.base_size.y * self.scale).trunc().max(PAD_MIN_HEIGHT),
        }
    }

    /// Starting position: bottom-centre at (w/2, h - PAD_BOTTOM_MARGIN).
    pub fn start_position(&self, screen_w: f32, screen_h: f32) -> MapPosition {
        MapPosition::from_midbottom(
            Vector2 {
                x: (screen_w * 0.5).trunc(),
                y: screen_h - PAD_BOTTOM_MARGIN,
            },
            self.scaled_size(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_size_truncates() {
        let mut pad = Pad::new(Vector2 { x: 120.0, y: 24.0 });
        pad.scale = 0.95;
        let size = pad.scaled_size();
        assert_eq!(size.x, 114.0);
        assert_eq!(size.y, 22.0);
    }

    #[test]
    fn test_scaled_size_has_floor() {
        let mut pad = Pad::new(Vector2 { x: 30.0, y: 10.0 });
        pad.scale = 0.1;
        let size = pad.scaled_size();
        assert_eq!(size.x, PAD_MIN_WIDTH);
        assert_eq!(size.y, PAD_MIN_HEIGHT);
    }

    #[test]
    fn test_start_position_is_centered_above_margin() {
        let pad = Pad::new(Vector2 { x: 120.0, y: 24.0 });
        let p = pad.start_position(640.0, 480.0);
        assert_eq!(p.pos.x, 260.0);
        assert_eq!(p.pos.y, 480.0 - PAD_BOTTOM_MARGIN - 24.0);
    }

    #[test]
    fn test_speed_is_per_second() {
        let pad = Pad::new(Vector2 { x: 1.0, y: 1.0 });
        assert_eq!(pad.speed, 720.0);
    }
}
