//! World-space position component.
//!
//! [`MapPosition`] stores the top-left corner of an entity's rectangle in
//! render-target pixels. Gameplay reasons in terms of rectangle edges (walls,
//! water line, pad surface), so the helpers here expose those directly.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Top-left corner of an entity in render-target pixels.
#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl Default for MapPosition {
    fn default() -> Self {
        Self {
            pos: Vector2 { x: 0.0, y: 0.0 },
        }
    }
}

impl MapPosition {
    /// Create a MapPosition from x and y.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    /// Position whose rectangle of `size` has its centre at `center`.
    pub fn from_center(center: Vector2, size: Vector2) -> Self {
        Self::new(center.x - size.x * 0.5, center.y - size.y * 0.5)
    }

    /// Position whose rectangle of `size` has its bottom-centre at `anchor`.
    pub fn from_midbottom(anchor: Vector2, size: Vector2) -> Self {
        Self::new(anchor.x - size.x * 0.5, anchor.y - size.y)
    }

    /// Centre of a rectangle of `size` placed here.
    pub fn center(&self, size: Vector2) -> Vector2 {
        Vector2 {
            x: self.pos.x + size.x * 0.5,
            y: self.pos.y + size.y * 0.5,
        }
    }

    /// Bottom-centre of a rectangle of `size` placed here.
    pub fn midbottom(&self, size: Vector2) -> Vector2 {
        Vector2 {
            x: self.pos.x + size.x * 0.5,
            y: self.pos.y + size.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_from_center_roundtrips_center() {
        let size = Vector2 { x: 40.0, y: 20.0 };
        let p = MapPosition::from_center(Vector2 { x: 100.0, y: 50.0 }, size);
        assert!(approx_eq(p.pos.x, 80.0));
        assert!(approx_eq(p.pos.y, 40.0));
        let c = p.center(size);
        assert!(approx_eq(c.x, 100.0));
        assert!(approx_eq(c.y, 50.0));
    }

    #[test]
    fn test_from_midbottom_places_rect_above_anchor() {
        let size = Vector2 { x: 120.0, y: 24.0 };
        let p = MapPosition::from_midbottom(Vector2 { x: 320.0, y: 440.0 }, size);
        assert!(approx_eq(p.pos.x, 260.0));
        assert!(approx_eq(p.pos.y, 416.0));
        let mb = p.midbottom(size);
        assert!(approx_eq(mb.x, 320.0));
        assert!(approx_eq(mb.y, 440.0));
    }
}
