//! State enter hooks.
//!
//! These one-shot systems are registered in the
//! [`SystemsStore`](crate::resources::systemsstore::SystemsStore) and run by
//! the game state observer when a state is entered:
//!
//! - `setup`: discover skins, load their textures, restore saved choices and
//!   scores, spawn the pad, then go to the title screen
//! - `enter_play`: start a fresh run
//! - `enter_leaderboard`: reload the score table from disk
//! - `quit_game`: persist settings before the main loop exits

use bevy_ecs::prelude::*;
use log::{info, warn};
use raylib::prelude::*;
use std::path::Path;

use crate::components::boxcollider::BoxCollider;
use crate::components::frog::Frog;
use crate::components::pad::Pad;
use crate::components::rigidbody::RigidBody;
use crate::components::zindex::ZIndex;
use crate::events::skin::ApplySkinEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::highscores::HighScores;
use crate::resources::rng::GameRng;
use crate::resources::screensize::ScreenSize;
use crate::resources::session::Session;
use crate::resources::skins::{
    SkinDef, SkinManager, SkinPart, global_life_icon, global_life_key, global_music,
};
use crate::resources::texturestore::TextureStore;
use crate::systems::level::{apply_level_rule, spawn_frog};
use crate::systems::skin::SkinLook;

pub const PAD_Z: i32 = 2;

/// Load a skin's art into `textures`. A skin without art (the procedural
/// fallback) always succeeds. On failure every texture of the skin is
/// dropped again.
fn load_skin_textures(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    textures: &mut TextureStore,
    skin: &SkinDef,
) -> bool {
    let Some(art) = &skin.art else {
        return true;
    };
    let parts = [
        (SkinPart::Frog, &art.frog),
        (SkinPart::Pad, &art.pad),
        (SkinPart::Background, &art.background),
    ];
    let mut loaded = true;
    for (part, path) in parts {
        if !textures.load(rl, th, skin.texture_key(part), path) {
            loaded = false;
            break;
        }
    }
    if !loaded {
        warn!("Skipping skin '{}': its art did not load", skin.name);
        textures.remove_prefix(&format!("{}/", skin.name));
        return false;
    }
    if let Some(icon) = &skin.life_icon {
        textures.load(rl, th, skin.texture_key(SkinPart::Life), icon);
    }
    true
}

pub fn setup(
    mut commands: Commands,
    mut next_state: ResMut<NextGameState>,
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    config: Res<GameConfig>,
    screen: Res<ScreenSize>,
) {
    let mut skins = SkinManager::discover(&config.skins_dir, config.settings_path());
    let mut textures = TextureStore::new();

    let mut usable: Vec<String> = Vec::new();
    for skin in skins.skins() {
        if load_skin_textures(&mut rl, &th, &mut textures, skin) {
            usable.push(skin.name.clone());
        }
    }
    skins.retain(|s| usable.contains(&s.name));

    let base = Path::new(".");
    skins.global_music = global_music(base);
    skins.global_life_icon = global_life_icon(base)
        .filter(|icon| textures.load(&mut rl, &th, global_life_key(), icon));

    if let Some(name) = &config.skin_override {
        if !skins.select_by_name(name) {
            warn!("Skin '{}' not found, keeping '{}'", name, skins.current().name);
        }
    }
    info!(
        "{} skin(s) ready, starting with '{}' (auto-cycle {})",
        skins.len(),
        skins.current().name,
        if skins.auto_cycle { "on" } else { "off" }
    );

    let mut session = Session::default();
    session.reset(config.lives);
    session.muted = config.muted;
    session.active_skin = skins.index();

    let scores = HighScores::load(config.scores_path(), config.max_scores);
    info!("Best score so far: {}", scores.best());

    let look = SkinLook::of(skins.current(), &textures);
    let pad = Pad::new(look.pad_size);
    let size = pad.scaled_size();
    commands.spawn((
        pad,
        pad.start_position(screen.width(), screen.height()),
        BoxCollider::new(size.x, size.y),
        look.pad_sprite(size),
        ZIndex(PAD_Z),
    ));

    commands.insert_resource(skins);
    commands.insert_resource(textures);
    commands.insert_resource(session);
    commands.insert_resource(scores);
    commands.insert_resource(GameRng::default());
    commands.trigger(ApplySkinEvent {});

    next_state.set(GameStates::Title);
}

/// Start a fresh run with the selected skin at level 0. The pad stays
/// where the last run left it.
pub fn enter_play(
    mut commands: Commands,
    config: Res<GameConfig>,
    screen: Res<ScreenSize>,
    skins: Res<SkinManager>,
    textures: Res<TextureStore>,
    mut session: ResMut<Session>,
    mut rng: ResMut<GameRng>,
    old_frogs: Query<Entity, With<Frog>>,
    mut pads: Query<&mut Pad>,
    mut frogs: Query<(&mut Frog, &mut RigidBody)>,
) {
    for entity in old_frogs.iter() {
        commands.entity(entity).despawn();
    }

    session.reset(config.lives);
    let skin = skins.current();
    let (level_idx, rule) = skin.levels.level_for_score(session.score);
    session.level_idx = level_idx;
    apply_level_rule(&mut session, rule, &mut pads, &mut frogs);

    let look = SkinLook::of(skin, &textures);
    for _ in 0..session.target_frogs {
        spawn_frog(&mut commands, &mut rng.0, &look, &session, &screen);
    }
    commands.trigger(ApplySkinEvent {});

    info!(
        "New run: {} lives, {} frog(s), skin '{}'",
        session.lives, session.target_frogs, skin.name
    );
}

pub fn enter_leaderboard(mut scores: ResMut<HighScores>) {
    scores.reload();
}

pub fn quit_game(skins: Option<Res<SkinManager>>) {
    if let Some(skins) = skins {
        if let Err(e) = skins.save_choice() {
            warn!("Could not save skin choice: {}", e);
        }
    }
    info!("Goodbye!");
}
