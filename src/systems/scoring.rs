//! Water check, scoring and lives.
//!
//! [`water_check`] runs after collisions. If any frog's bottom edge is past
//! the waterline it triggers a single [`SplashEvent`]; otherwise the tick
//! counts as clean play and adds score. [`splash_observer`] takes a life,
//! relaunches every frog and ends the run when no lives remain.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::boxcollider::BoxCollider;
use crate::components::frog::{Frog, WATER_MARGIN};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::events::splash::SplashEvent;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::rng::GameRng;
use crate::resources::screensize::ScreenSize;
use crate::resources::session::Session;
use crate::resources::worldtime::WorldTime;

pub fn water_check(
    frogs: Query<(&MapPosition, &BoxCollider), With<Frog>>,
    screen: Res<ScreenSize>,
    time: Res<WorldTime>,
    mut session: ResMut<Session>,
    mut commands: Commands,
) {
    let waterline = screen.height() - WATER_MARGIN;
    let count = frogs
        .iter()
        .filter(|(position, collider)| collider.bottom(position.pos) > waterline)
        .count();
    if count > 0 {
        commands.trigger(SplashEvent { count });
    } else {
        session.accrue(time.delta);
    }
}

pub fn splash_observer(
    trigger: On<SplashEvent>,
    mut session: ResMut<Session>,
    mut next_state: ResMut<NextGameState>,
    mut rng: ResMut<GameRng>,
    screen: Res<ScreenSize>,
    mut frogs: Query<(&Frog, &BoxCollider, &mut MapPosition, &mut RigidBody)>,
) {
    let game_over = session.lose_life();
    info!(
        "Splash! {} frog(s) in the water, {} lives left",
        trigger.event().count,
        session.lives
    );

    for (frog, collider, mut position, mut rigidbody) in frogs.iter_mut() {
        let (start, velocity) = frog.launch(&mut rng.0, screen.width(), collider.size);
        *position = start;
        rigidbody.velocity = velocity;
    }

    if game_over {
        info!("Game over with score {}", session.score);
        next_state.set(GameStates::NameEntry);
    }
}
