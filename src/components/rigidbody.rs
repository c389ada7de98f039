//! Kinematic body component with named acceleration forces.
//!
//! The [`RigidBody`] component stores velocity and named acceleration forces
//! for an entity. Frogs carry a `"current"` force that level rules retune,
//! and a horizontal speed limit so currents cannot accelerate them forever.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

/// Kinematic body storing velocity and named acceleration forces.
///
/// # Fields
/// - `velocity` - Current velocity in pixels per second
/// - `forces` - Named accelerations in pixels per second squared
/// - `max_speed_x` - Optional clamp on the horizontal speed
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    pub velocity: Vector2,
    pub forces: FxHashMap<String, Vector2>,
    pub max_speed_x: Option<f32>,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity and no forces.
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            forces: FxHashMap::default(),
            max_speed_x: None,
        }
    }

    /// Builder: limit |velocity.x| to `limit`.
    pub fn with_max_speed_x(mut self, limit: f32) -> Self {
        self.max_speed_x = Some(limit.abs());
        self
    }

    /// Add a named force, or replace its value when it already exists.
    pub fn set_force(&mut self, name: &str, value: Vector2) {
        self.forces.insert(name.to_string(), value);
    }

    /// Sum of all forces.
    pub fn total_acceleration(&self) -> Vector2 {
        self.forces
            .values()
            .fold(Vector2 { x: 0.0, y: 0.0 }, |total, force| total + *force)
    }

    /// Advance velocity by the forces over `delta` seconds, then apply the
    /// horizontal speed limit.
    pub fn accelerate(&mut self, delta: f32) {
        let acc = self.total_acceleration();
        self.velocity.x += acc.x * delta;
        self.velocity.y += acc.y * delta;
        if let Some(limit) = self.max_speed_x {
            self.velocity.x = self.velocity.x.clamp(-limit, limit);
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
    fn test_rigidbody_new() {
        let rb = RigidBody::new();
        assert!(approx_eq(rb.velocity.x, 0.0));
        assert!(approx_eq(rb.velocity.y, 0.0));
        assert!(rb.forces.is_empty());
        assert!(rb.max_speed_x.is_none());
    }

    #[test]
    fn test_total_acceleration_sums_forces() {
        let mut rb = RigidBody::new();
        rb.set_force("current", Vector2 { x: 3.0, y: 0.0 });
        rb.set_force("gust", Vector2 { x: 1.0, y: 2.0 });
        let acc = rb.total_acceleration();
        assert!(approx_eq(acc.x, 4.0));
        assert!(approx_eq(acc.y, 2.0));
    }

    #[test]
    fn test_set_force_replaces_existing_value() {
        let mut rb = RigidBody::new();
        rb.set_force("current", Vector2 { x: 5.0, y: 0.0 });
        rb.set_force("current", Vector2 { x: -2.0, y: 0.0 });
        assert_eq!(rb.forces.len(), 1);
        assert!(approx_eq(rb.forces["current"].x, -2.0));
    }

    #[test]
    fn test_accelerate_clamps_horizontal_speed() {
        let mut rb = RigidBody::new().with_max_speed_x(10.0);
        rb.set_force("current", Vector2 { x: 100.0, y: 0.0 });
        rb.velocity = Vector2 { x: 5.0, y: 7.0 };
        rb.accelerate(1.0);
        assert!(approx_eq(rb.velocity.x, 10.0));
        assert!(approx_eq(rb.velocity.y, 7.0));
    }

    #[test]
    fn test_clamp_is_symmetric() {
        let mut rb = RigidBody::new().with_max_speed_x(-4.0);
        rb.set_force("current", Vector2 { x: -20.0, y: 0.0 });
        rb.velocity.x = -1.0;
        rb.accelerate(1.0);
        assert!(approx_eq(rb.velocity.x, -4.0));
    }
}
