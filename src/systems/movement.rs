//! Pad steering and frog flight.
//!
//! - [`pad_controller`] moves the pad from the held direction plus the
//!   level's wind drift and keeps it on screen.
//! - [`frog_movement`] applies the water current, integrates velocity and
//!   bounces frogs off the side walls and the ceiling.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::frog::Frog;
use crate::components::mapposition::MapPosition;
use crate::components::pad::Pad;
use crate::components::rigidbody::RigidBody;
use crate::resources::input::InputState;
use crate::resources::levels::per_frame;
use crate::resources::screensize::ScreenSize;
use crate::resources::session::Session;
use crate::resources::worldtime::WorldTime;

/// Move the pad horizontally. Wind pushes it even when no key is held.
pub fn pad_controller(
    mut query: Query<(&Pad, &mut MapPosition, &BoxCollider)>,
    input_state: Res<InputState>,
    session: Res<Session>,
    screen: Res<ScreenSize>,
    time: Res<WorldTime>,
) {
    let drift = per_frame(session.wind_at(time.elapsed));
    for (pad, mut position, collider) in query.iter_mut() {
        let vx = input_state.horizontal_axis() * pad.speed + drift;
        let max_x = (screen.width() - collider.size.x).max(0.0);
        position.pos.x = (position.pos.x + vx * time.delta).clamp(0.0, max_x);
    }
}

/// Reflect a frog off the side walls and the ceiling.
///
/// The sign of the velocity is forced rather than flipped, so a frog that
/// is still overlapping a wall on the next tick keeps moving away from it.
pub fn bounce_off_walls(position: &mut Vector2, velocity: &mut Vector2, size: Vector2, screen_w: f32) {
    if position.x <= 0.0 {
        position.x = 0.0;
        velocity.x = velocity.x.abs();
    } else if position.x + size.x >= screen_w {
        position.x = (screen_w - size.x).max(0.0);
        velocity.x = -velocity.x.abs();
    }
    if position.y <= 0.0 {
        position.y = 0.0;
        velocity.y = velocity.y.abs();
    }
}

pub fn frog_movement(
    mut query: Query<(&mut MapPosition, &mut RigidBody, &BoxCollider), With<Frog>>,
    screen: Res<ScreenSize>,
    time: Res<WorldTime>,
) {
    for (mut position, mut rigidbody, collider) in query.iter_mut() {
        rigidbody.accelerate(time.delta);
        let delta = rigidbody.velocity.scale_by(time.delta);
        position.pos = position.pos + delta;
        bounce_off_walls(
            &mut position.pos,
            &mut rigidbody.velocity,
            collider.size,
            screen.width(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::frog::CURRENT_FORCE;

    #[test]
    fn test_left_wall_forces_positive_vx() {
        let mut pos = Vector2 { x: -3.0, y: 100.0 };
        let mut vel = Vector2 { x: -120.0, y: 50.0 };
        bounce_off_walls(&mut pos, &mut vel, Vector2 { x: 40.0, y: 40.0 }, 640.0);
        assert_eq!(pos.x, 0.0);
        assert_eq!(vel.x, 120.0);
        assert_eq!(vel.y, 50.0);
    }

    #[test]
    fn test_right_wall_keeps_moving_away() {
        let mut pos = Vector2 { x: 605.0, y: 100.0 };
        // already heading left after an earlier bounce
        let mut vel = Vector2 { x: -60.0, y: 0.0 };
        bounce_off_walls(&mut pos, &mut vel, Vector2 { x: 40.0, y: 40.0 }, 640.0);
        assert_eq!(pos.x, 600.0);
        assert_eq!(vel.x, -60.0);
    }

    #[test]
    fn test_ceiling_sends_frog_down() {
        let mut pos = Vector2 { x: 100.0, y: -1.0 };
        let mut vel = Vector2 { x: 0.0, y: -200.0 };
        bounce_off_walls(&mut pos, &mut vel, Vector2 { x: 40.0, y: 40.0 }, 640.0);
        assert_eq!(pos.y, 0.0);
        assert_eq!(vel.y, 200.0);
    }

    fn world_with_time(delta: f32) -> World {
        let mut world = World::new();
        world.insert_resource(ScreenSize { w: 640, h: 480 });
        world.insert_resource(WorldTime {
            elapsed: 0.0,
            delta,
            ..Default::default()
        });
        world
    }

    #[test]
    fn test_frog_movement_applies_current_and_velocity() {
        let mut world = world_with_time(0.5);
        let mut body = RigidBody::new();
        body.velocity = Vector2 { x: 10.0, y: 20.0 };
        body.set_force(CURRENT_FORCE, Vector2 { x: 4.0, y: 0.0 });
        let frog = world
            .spawn((
                Frog::new((3, 6)),
                MapPosition::new(100.0, 100.0),
                body,
                BoxCollider::new(40.0, 40.0),
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(frog_movement);
        schedule.run(&mut world);

        let body = world.get::<RigidBody>(frog).unwrap();
        assert_eq!(body.velocity.x, 12.0);
        let pos = world.get::<MapPosition>(frog).unwrap();
        assert_eq!(pos.pos.x, 106.0);
        assert_eq!(pos.pos.y, 110.0);
    }

    #[test]
    fn test_pad_is_clamped_to_screen() {
        let mut world = world_with_time(1.0);
        let mut input = InputState::default();
        input.maindirection_right.active = true;
        world.insert_resource(input);
        world.insert_resource(Session::default());
        let pad = Pad::new(Vector2 { x: 120.0, y: 24.0 });
        let entity = world
            .spawn((pad, MapPosition::new(500.0, 416.0), BoxCollider::new(120.0, 24.0)))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(pad_controller);
        schedule.run(&mut world);

        assert_eq!(world.get::<MapPosition>(entity).unwrap().pos.x, 520.0);
    }

    #[test]
    fn test_wind_drifts_idle_pad() {
        let mut world = world_with_time(0.5);
        world.insert_resource(InputState::default());
        let mut session = Session::default();
        session.wind_base = 0.05;
        world.insert_resource(session);
        let entity = world
            .spawn((
                Pad::new(Vector2 { x: 120.0, y: 24.0 }),
                MapPosition::new(200.0, 416.0),
                BoxCollider::new(120.0, 24.0),
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(pad_controller);
        schedule.run(&mut world);

        // elapsed 0: no gust, 0.05 px/frame = 3 px/s for half a second
        let x = world.get::<MapPosition>(entity).unwrap().pos.x;
        assert!((x - 201.5).abs() < 1e-4, "x = {x}");
    }
}
