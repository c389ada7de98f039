//! ECS components for entities.
//!
//! The playfield holds one pad and a handful of frogs. Both are drawn from a
//! [`sprite`] at a [`mapposition`], collide through a [`boxcollider`] and
//! are ordered by [`zindex`].
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned rectangle for pad, frog and wall tests
//! - [`frog`] – frog speed range and launch/bounce rules
//! - [`mapposition`] – top-left position of an entity on the playfield
//! - [`pad`] – the lily pad: speed, art size and level scale
//! - [`rigidbody`] – velocity, named acceleration forces and a speed limit
//! - [`sprite`] – texture key, size and procedural fallback shape
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod boxcollider;
pub mod frog;
pub mod mapposition;
pub mod pad;
pub mod rigidbody;
pub mod sprite;
pub mod zindex;
