//! Frog versus pad collision.
//!
//! A frog that overlaps a pad while falling is sent back up with a fresh
//! random bounce speed. Frogs rising through the pad are left alone, so a
//! frog never sticks to it.
use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::frog::Frog;
use crate::components::mapposition::MapPosition;
use crate::components::pad::Pad;
use crate::components::rigidbody::RigidBody;
use crate::resources::rng::GameRng;

pub fn pad_bounce(
    pads: Query<(&MapPosition, &BoxCollider), (With<Pad>, Without<Frog>)>,
    mut frogs: Query<(&Frog, &MapPosition, &BoxCollider, &mut RigidBody), Without<Pad>>,
    mut rng: ResMut<GameRng>,
) {
    for (pad_position, pad_collider) in pads.iter() {
        for (frog, position, collider, mut rigidbody) in frogs.iter_mut() {
            if rigidbody.velocity.y > 0.0
                && collider.overlaps(position.pos, pad_collider, pad_position.pos)
            {
                rigidbody.velocity.y = -frog.bounce_speed(&mut rng.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::Vector2;

    fn setup(frog_y: f32, vy: f32) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(GameRng::with_seed(5));
        world.spawn((
            Pad::new(Vector2 { x: 120.0, y: 24.0 }),
            MapPosition::new(260.0, 416.0),
            BoxCollider::new(120.0, 24.0),
        ));
        let mut body = RigidBody::new();
        body.velocity = Vector2 { x: 30.0, y: vy };
        let frog = world
            .spawn((
                Frog::new((3, 6)),
                MapPosition::new(300.0, frog_y),
                BoxCollider::new(40.0, 40.0),
                body,
            ))
            .id();
        (world, frog)
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(pad_bounce);
        schedule.run(world);
    }

    #[test]
    fn test_falling_frog_bounces_up() {
        let (mut world, frog) = setup(390.0, 240.0);
        run(&mut world);
        let vy = world.get::<RigidBody>(frog).unwrap().velocity.y;
        assert!((-420.0..=-180.0).contains(&vy), "vy = {vy}");
    }

    #[test]
    fn test_rising_frog_passes_through() {
        let (mut world, frog) = setup(390.0, -240.0);
        run(&mut world);
        assert_eq!(world.get::<RigidBody>(frog).unwrap().velocity.y, -240.0);
    }

    #[test]
    fn test_frog_above_pad_is_untouched() {
        let (mut world, frog) = setup(100.0, 240.0);
        run(&mut world);
        assert_eq!(world.get::<RigidBody>(frog).unwrap().velocity.y, 240.0);
    }
}
