//! A frog fell into the water.
//!
//! The water check in [`crate::systems::scoring`] triggers at most one
//! [`SplashEvent`] per tick no matter how many frogs went under. The
//! observer takes a life and relaunches every frog.
use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, Copy)]
pub struct SplashEvent {
    /// Frogs below the waterline on this tick.
    pub count: usize,
}
