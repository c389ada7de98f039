//! Difficulty progression.
//!
//! Each playing tick [`level_progress`] looks up the level for the current
//! score in the active skin's rules. Crossing a threshold triggers a
//! [`LevelChangedEvent`]; [`level_changed_observer`] optionally rotates to
//! the next skin and then applies the new rule to the session, the pad and
//! the frogs. [`spawn_missing_frogs`] tops the frog count up to the rule.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use fastrand::Rng;
use log::{info, warn};
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::frog::{CURRENT_FORCE, FROG_MAX_SPEED_X_PER_FRAME, Frog};
use crate::components::pad::Pad;
use crate::components::rigidbody::RigidBody;
use crate::components::zindex::ZIndex;
use crate::events::level::LevelChangedEvent;
use crate::events::skin::ApplySkinEvent;
use crate::resources::levels::{LevelRule, per_frame, per_frame_sq};
use crate::resources::rng::GameRng;
use crate::resources::screensize::ScreenSize;
use crate::resources::session::Session;
use crate::resources::skins::{SkinDef, SkinManager};
use crate::resources::texturestore::TextureStore;
use crate::systems::skin::SkinLook;

pub const FROG_Z: i32 = 1;

/// Skin whose rules and art are in play. Falls back to the selection when
/// the recorded index is stale.
pub fn active_skin<'a>(skins: &'a SkinManager, session: &Session) -> &'a SkinDef {
    skins
        .get(session.active_skin)
        .unwrap_or_else(|| skins.current())
}

fn current_force(session: &Session) -> Vector2 {
    Vector2 {
        x: per_frame_sq(session.current_force_x),
        y: 0.0,
    }
}

/// Store `rule` in the session and push it to the pad and live frogs.
pub fn apply_level_rule(
    session: &mut Session,
    rule: &LevelRule,
    pads: &mut Query<&mut Pad>,
    frogs: &mut Query<(&mut Frog, &mut RigidBody)>,
) {
    session.apply_rule(rule);
    for mut pad in pads.iter_mut() {
        pad.scale = session.pad_scale;
    }
    let force = current_force(session);
    for (mut frog, mut body) in frogs.iter_mut() {
        frog.speed_range = session.speed_range;
        body.set_force(CURRENT_FORCE, force);
    }
}

/// Spawn one frog with the session's speed range and current, launched
/// from the top of the screen.
pub fn spawn_frog(
    commands: &mut Commands,
    rng: &mut Rng,
    look: &SkinLook,
    session: &Session,
    screen: &ScreenSize,
) -> Entity {
    let frog = Frog::new(session.speed_range);
    let (position, velocity) = frog.launch(rng, screen.width(), look.frog_size);
    let mut body = RigidBody::new().with_max_speed_x(per_frame(FROG_MAX_SPEED_X_PER_FRAME));
    body.velocity = velocity;
    body.set_force(CURRENT_FORCE, current_force(session));
    commands
        .spawn((
            frog,
            position,
            body,
            BoxCollider::new(look.frog_size.x, look.frog_size.y),
            look.frog_sprite(),
            ZIndex(FROG_Z),
        ))
        .id()
}

/// Trigger a [`LevelChangedEvent`] when the score maps to another level.
pub fn level_progress(skins: Res<SkinManager>, session: Res<Session>, mut commands: Commands) {
    let (to, _) = active_skin(&skins, &session)
        .levels
        .level_for_score(session.score);
    if to != session.level_idx {
        commands.trigger(LevelChangedEvent {
            from: session.level_idx,
            to,
        });
    }
}

/// Apply a level change.
///
/// With auto-cycle on, the next skin is selected, saved and applied first,
/// and the level is looked up again in that skin's rules.
pub fn level_changed_observer(
    trigger: On<LevelChangedEvent>,
    mut skins: ResMut<SkinManager>,
    mut session: ResMut<Session>,
    mut pads: Query<&mut Pad>,
    mut frogs: Query<(&mut Frog, &mut RigidBody)>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let mut skin_index = session.active_skin;

    if skins.auto_cycle {
        skins.next();
        if let Err(e) = skins.save_choice() {
            warn!("Could not save skin choice: {}", e);
        }
        skin_index = skins.index();
        commands.trigger(ApplySkinEvent {});
    }

    let skin = skins.get(skin_index).unwrap_or_else(|| skins.current());
    let (level_idx, rule) = skin.levels.level_for_score(session.score);
    let rule = rule.clone();
    info!(
        "Level {} -> {} at score {} (skin '{}')",
        event.from, level_idx, session.score, skin.name
    );

    session.level_idx = level_idx;
    apply_level_rule(&mut session, &rule, &mut pads, &mut frogs);
}

/// Add frogs until the session's target count is reached. Frogs are never
/// removed here.
pub fn spawn_missing_frogs(
    mut commands: Commands,
    frogs: Query<(), With<Frog>>,
    session: Res<Session>,
    skins: Res<SkinManager>,
    textures: Res<TextureStore>,
    screen: Res<ScreenSize>,
    mut rng: ResMut<GameRng>,
) {
    let count = frogs.iter().count();
    if count >= session.target_frogs {
        return;
    }
    let look = SkinLook::of(active_skin(&skins, &session), &textures);
    for _ in count..session.target_frogs {
        spawn_frog(&mut commands, &mut rng.0, &look, &session, &screen);
    }
}
