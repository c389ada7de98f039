//! Gameplay tick integration tests: splashes, scoring, level changes, the
//! score table and per-screen key handling, run through the real systems and
//! observers.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;
use std::path::Path;
use tempfile::TempDir;

use frogjump::components::boxcollider::BoxCollider;
use frogjump::components::frog::Frog;
use frogjump::components::mapposition::MapPosition;
use frogjump::components::pad::Pad;
use frogjump::components::rigidbody::RigidBody;
use frogjump::components::sprite::{FallbackShape, Sprite};
use frogjump::events::audio::AudioCmd;
use frogjump::events::input::{InputAction, InputEvent, TextInputEvent};
use frogjump::resources::gameconfig::GameConfig;
use frogjump::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use frogjump::resources::highscores::HighScores;
use frogjump::resources::levels::LevelRules;
use frogjump::resources::rng::GameRng;
use frogjump::resources::screensize::ScreenSize;
use frogjump::resources::session::Session;
use frogjump::resources::settings::Settings;
use frogjump::resources::skins::{SkinDef, SkinManager};
use frogjump::resources::texturestore::TextureStore;
use frogjump::resources::worldtime::WorldTime;
use frogjump::systems::level::{level_changed_observer, level_progress, spawn_missing_frogs};
use frogjump::systems::scenes::{scene_input_observer, text_input_observer};
use frogjump::systems::scoring::{splash_observer, water_check};
use frogjump::systems::skin::{FALLBACK_PAD_SIZE, PAD_GREEN, apply_skin_observer};

fn skin(name: &str) -> SkinDef {
    SkinDef {
        name: name.to_string(),
        ..SkinDef::fallback()
    }
}

fn make_world(dir: &Path, skins: Vec<SkinDef>, lives: u32) -> World {
    let mut world = World::new();
    world.insert_resource(ScreenSize { w: 640, h: 480 });
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta: 0.5,
        time_scale: 1.0,
        frame: 0,
    });
    world.insert_resource(GameConfig::new());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(GameRng::with_seed(7));
    world.insert_resource(TextureStore::new());
    world.insert_resource(SkinManager::from_skins(skins, dir.join("settings.json")));
    world.insert_resource(HighScores::load(dir.join("scores.json"), 10));
    world.init_resource::<Messages<AudioCmd>>();

    let mut session = Session::default();
    session.reset(lives);
    world.insert_resource(session);

    world.spawn(Observer::new(splash_observer));
    world.spawn(Observer::new(level_changed_observer));
    world.spawn(Observer::new(apply_skin_observer));
    world.flush();
    world
}

fn spawn_pad(world: &mut World) -> Entity {
    let pad = Pad::new(FALLBACK_PAD_SIZE);
    let size = pad.scaled_size();
    world
        .spawn((
            pad,
            pad.start_position(640.0, 480.0),
            BoxCollider::new(size.x, size.y),
            Sprite::new("pad", size, FallbackShape::Ellipse(PAD_GREEN)),
        ))
        .id()
}

fn tick_playing(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((water_check, level_progress, spawn_missing_frogs).chain());
    schedule.run(world);
}

fn frogs(world: &mut World) -> Vec<Entity> {
    let mut query = world.query_filtered::<Entity, With<Frog>>();
    query.iter(world).collect()
}

fn drop_in_water(world: &mut World, frog: Entity) {
    world.get_mut::<MapPosition>(frog).unwrap().pos = Vector2 { x: 300.0, y: 460.0 };
}

#[test]
fn first_tick_spawns_one_frog_and_scores() {
    let dir = TempDir::new().unwrap();
    let mut world = make_world(dir.path(), vec![skin("spring")], 3);
    spawn_pad(&mut world);

    tick_playing(&mut world);
    assert_eq!(frogs(&mut world).len(), 1);
    // half a second of clean play
    assert_eq!(world.resource::<Session>().score, 30);
}

#[test]
fn splash_costs_one_life_and_relaunches_every_frog() {
    let dir = TempDir::new().unwrap();
    let mut world = make_world(dir.path(), vec![skin("spring")], 3);
    world.resource_mut::<Session>().target_frogs = 2;
    tick_playing(&mut world);
    let all = frogs(&mut world);
    assert_eq!(all.len(), 2);

    drop_in_water(&mut world, all[0]);
    drop_in_water(&mut world, all[1]);
    let score_before = world.resource::<Session>().score;
    tick_playing(&mut world);

    let session = world.resource::<Session>();
    assert_eq!(session.lives, 2, "two frogs in one tick cost a single life");
    assert_eq!(session.score, score_before, "no score on a splash tick");
    for frog in all {
        let pos = world.get::<MapPosition>(frog).unwrap();
        assert!(pos.pos.y < 100.0, "frog relaunched from the top, y = {}", pos.pos.y);
        let body = world.get::<RigidBody>(frog).unwrap();
        assert!(body.velocity.y > 0.0);
    }
    assert_eq!(*world.resource::<NextGameState>().get(), NextGameStates::Unchanged);
}

#[test]
fn last_life_goes_to_name_entry() {
    let dir = TempDir::new().unwrap();
    let mut world = make_world(dir.path(), vec![skin("spring")], 1);
    tick_playing(&mut world);
    let frog = frogs(&mut world)[0];

    drop_in_water(&mut world, frog);
    tick_playing(&mut world);

    assert_eq!(world.resource::<Session>().lives, 0);
    assert_eq!(
        *world.resource::<NextGameState>().get(),
        NextGameStates::Pending(GameStates::NameEntry)
    );
}

#[test]
fn score_never_decreases_over_ticks() {
    let dir = TempDir::new().unwrap();
    let mut world = make_world(dir.path(), vec![skin("spring")], 5);
    let mut last = 0;
    for i in 0..20 {
        if i % 4 == 3 {
            let frog = frogs(&mut world)[0];
            drop_in_water(&mut world, frog);
        }
        tick_playing(&mut world);
        let score = world.resource::<Session>().score;
        assert!(score >= last);
        last = score;
    }
    assert!(last > 0);
}

#[test]
fn crossing_a_threshold_adds_frogs_and_shrinks_pad() {
    let dir = TempDir::new().unwrap();
    let mut world = make_world(dir.path(), vec![skin("spring")], 3);
    let pad = spawn_pad(&mut world);
    tick_playing(&mut world);
    assert_eq!(frogs(&mut world).len(), 1);

    world.resource_mut::<Session>().score = 1500;
    tick_playing(&mut world);
    tick_playing(&mut world);

    let session = world.resource::<Session>();
    assert_eq!(session.level_idx, 1);
    assert_eq!(session.target_frogs, 2);
    assert_eq!(world.get::<Pad>(pad).unwrap().scale, 0.95);
    assert_eq!(frogs(&mut world).len(), 2);
    for frog in frogs(&mut world) {
        assert_eq!(world.get::<Frog>(frog).unwrap().speed_range, (3, 7));
    }
}

#[test]
fn auto_cycle_moves_to_next_skin_and_uses_its_rules() {
    let dir = TempDir::new().unwrap();
    let mut summer = skin("summer");
    summer.levels = LevelRules::from_json(&serde_json::json!([
        {"score": 0, "frogs": 1},
        {"score": 1000, "frogs": 3, "speed": [4, 9], "pad_scale": 0.8}
    ]));
    let mut world = make_world(dir.path(), vec![skin("spring"), summer], 3);
    world.resource_mut::<SkinManager>().auto_cycle = true;
    let pad = spawn_pad(&mut world);
    tick_playing(&mut world);

    world.resource_mut::<Session>().score = 1500;
    tick_playing(&mut world);

    let skins = world.resource::<SkinManager>();
    assert_eq!(skins.current().name, "summer");
    let session = world.resource::<Session>();
    assert_eq!(session.active_skin, 1);
    assert_eq!(session.level_idx, 1);
    assert_eq!(session.target_frogs, 3);
    assert_eq!(world.get::<Pad>(pad).unwrap().scale, 0.8);

    let saved = Settings::load(&dir.path().join("settings.json"));
    assert_eq!(saved.skin_name.as_deref(), Some("summer"));
    assert!(saved.auto_cycle);
}

#[test]
fn score_table_keeps_only_the_best_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.json");
    let mut scores = HighScores::load(&path, 3);
    for (i, score) in [120, 900, 45, 300, 650].into_iter().enumerate() {
        scores.submit(&format!("p{i}"), score, 1_700_000_000 + i as i64).unwrap();
    }
    let kept: Vec<u64> = scores.entries().iter().map(|e| e.score).collect();
    assert_eq!(kept, vec![900, 650, 300]);

    let reloaded = HighScores::load(&path, 3);
    assert_eq!(reloaded.entries().len(), 3);
    assert_eq!(reloaded.best(), 900);
}

fn make_scene_world(dir: &Path, skins: Vec<SkinDef>, state: GameStates) -> World {
    let mut world = make_world(dir, skins, 3);
    world.resource_mut::<GameState>().set(state);
    world.spawn(Observer::new(scene_input_observer));
    world.spawn(Observer::new(text_input_observer));
    world.flush();
    world
}

fn press(world: &mut World, action: InputAction) {
    world.trigger(InputEvent {
        action,
        pressed: true,
    });
    world.flush();
}

fn type_text(world: &mut World, text: &str) {
    for ch in text.chars() {
        world.trigger(TextInputEvent { ch });
    }
    world.flush();
}

fn sent_audio(world: &mut World) -> Vec<AudioCmd> {
    world.resource_mut::<Messages<AudioCmd>>().drain().collect()
}

fn pending(world: &World) -> NextGameStates {
    world.resource::<NextGameState>().get().clone()
}

#[test]
fn enter_on_name_entry_saves_the_score() {
    let dir = TempDir::new().unwrap();
    let mut world = make_scene_world(dir.path(), vec![skin("spring")], GameStates::NameEntry);
    world.resource_mut::<Session>().score = 420;

    type_text(&mut world, "Ann");
    press(&mut world, InputAction::Erase);
    type_text(&mut world, "a");
    assert_eq!(world.resource::<Session>().name_input, "Ana");

    press(&mut world, InputAction::Confirm);

    assert!(world.resource::<Session>().name_input.is_empty());
    let entries = world.resource::<HighScores>().entries().to_vec();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Ana");
    assert_eq!(entries[0].score, 420);
    assert_eq!(
        HighScores::load(dir.path().join("scores.json"), 10).best(),
        420
    );
    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::Leaderboard));
}

#[test]
fn escape_on_name_entry_skips_saving() {
    let dir = TempDir::new().unwrap();
    let mut world = make_scene_world(dir.path(), vec![skin("spring")], GameStates::NameEntry);
    world.resource_mut::<Session>().score = 99;
    type_text(&mut world, "Bo");

    press(&mut world, InputAction::Back);

    assert!(!dir.path().join("scores.json").exists());
    assert!(world.resource::<HighScores>().entries().is_empty());
    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::Leaderboard));
}

#[test]
fn typing_outside_name_entry_is_ignored() {
    let dir = TempDir::new().unwrap();
    let mut world = make_scene_world(dir.path(), vec![skin("spring")], GameStates::Playing);
    type_text(&mut world, "xyz");
    assert!(world.resource::<Session>().name_input.is_empty());
}

#[test]
fn mute_silences_the_current_track() {
    let dir = TempDir::new().unwrap();
    let mut world = make_scene_world(dir.path(), vec![skin("spring")], GameStates::Title);
    world.resource_mut::<Session>().current_music = Some("music.mp3".into());
    sent_audio(&mut world);

    press(&mut world, InputAction::Mute);

    assert!(world.resource::<Session>().muted);
    assert_eq!(
        sent_audio(&mut world),
        vec![AudioCmd::VolumeMusic {
            id: "music.mp3".into(),
            vol: 0.0
        }]
    );
    assert_eq!(pending(&world), NextGameStates::Unchanged);
}

#[test]
fn pause_and_resume_drive_the_music() {
    let dir = TempDir::new().unwrap();
    let mut world = make_scene_world(dir.path(), vec![skin("spring")], GameStates::Playing);
    world.resource_mut::<Session>().current_music = Some("music.mp3".into());
    sent_audio(&mut world);

    press(&mut world, InputAction::Pause);
    assert_eq!(
        sent_audio(&mut world),
        vec![AudioCmd::PauseMusic {
            id: "music.mp3".into()
        }]
    );
    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::Paused));

    world.resource_mut::<GameState>().set(GameStates::Paused);
    press(&mut world, InputAction::Pause);
    assert_eq!(
        sent_audio(&mut world),
        vec![AudioCmd::ResumeMusic {
            id: "music.mp3".into()
        }]
    );
    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::Playing));
}

#[test]
fn confirming_a_skin_saves_and_applies_it() {
    let dir = TempDir::new().unwrap();
    let mut world = make_scene_world(
        dir.path(),
        vec![skin("spring"), skin("summer")],
        GameStates::Skins,
    );

    press(&mut world, InputAction::Right);
    // browsing alone does not apply
    assert_eq!(world.resource::<Session>().active_skin, 0);

    press(&mut world, InputAction::Confirm);
    assert_eq!(world.resource::<Session>().active_skin, 1);
    let saved = Settings::load(&dir.path().join("settings.json"));
    assert_eq!(saved.skin_name.as_deref(), Some("summer"));

    press(&mut world, InputAction::AutoCycle);
    let saved = Settings::load(&dir.path().join("settings.json"));
    assert!(!saved.auto_cycle);
    assert_eq!(pending(&world), NextGameStates::Unchanged);
}

#[test]
fn released_keys_do_nothing() {
    let dir = TempDir::new().unwrap();
    let mut world = make_scene_world(dir.path(), vec![skin("spring")], GameStates::Title);
    world.trigger(InputEvent {
        action: InputAction::Start,
        pressed: false,
    });
    world.flush();
    assert_eq!(pending(&world), NextGameStates::Unchanged);
}
