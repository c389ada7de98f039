//! Frog component and launch/bounce rules.
//!
//! Speeds in [`Frog::speed_range`] are whole pixels per reference frame, as
//! written in level files. The helpers here convert to pixels per second.

use bevy_ecs::prelude::Component;
use fastrand::Rng;
use raylib::prelude::Vector2;

use crate::components::mapposition::MapPosition;
use crate::resources::levels::per_frame;

/// Name of the rigid-body force driven by a level's water current.
pub const CURRENT_FORCE: &str = "current";
/// Frogs launch with their centre at least this far from either wall.
pub const FROG_SPAWN_MARGIN: i32 = 20;
/// Frogs launch with their top edge at this height.
pub const FROG_SPAWN_Y: f32 = 10.0;
/// Horizontal speed limit in pixels per reference frame.
pub const FROG_MAX_SPEED_X_PER_FRAME: f32 = 12.0;
/// Lower bound for the upward bounce off the pad, per reference frame.
pub const FROG_MIN_BOUNCE_PER_FRAME: i32 = 3;
/// Distance above the bottom edge where the water starts.
pub const WATER_MARGIN: f32 = 10.0;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frog {
    /// Inclusive (lo, hi) speed range per reference frame.
    pub speed_range: (i32, i32),
}

impl Frog {
    pub fn new(speed_range: (i32, i32)) -> Self {
        Self { speed_range }
    }

    /// Random launch: centre x in [margin, w - margin], top at
    /// `FROG_SPAWN_Y`, velocity (±[lo, hi], [lo, hi]) in pixels per second.
    pub fn launch(&self, rng: &mut Rng, screen_w: f32, size: Vector2) -> (MapPosition, Vector2) {
        let max_x = (screen_w as i32 - FROG_SPAWN_MARGIN).max(FROG_SPAWN_MARGIN);
        let center_x = rng.i32(FROG_SPAWN_MARGIN..=max_x) as f32;
        let position = MapPosition::new((center_x - size.x * 0.5).trunc(), FROG_SPAWN_Y);

        let (lo, hi) = self.speed_range;
        let sign = if rng.bool() { 1.0 } else { -1.0 };
        let vx = sign * rng.i32(lo..=hi) as f32;
        let vy = rng.i32(lo..=hi) as f32;
        (
            position,
            Vector2 {
                x: per_frame(vx),
                y: per_frame(vy),
            },
        )
    }

    /// Upward speed after landing on the pad, in pixels per second (positive).
    pub fn bounce_speed(&self, rng: &mut Rng) -> f32 {
        let (lo, hi) = self.speed_range;
        let min = lo.max(FROG_MIN_BOUNCE_PER_FRAME);
        let max = hi.saturating_add(1).max(min);
        per_frame(rng.i32(min..=max) as f32)
    }
}
