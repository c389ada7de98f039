//! Frog Jump main entry point.
//!
//! A casual arcade game written in Rust using:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for entity-component-system architecture
//!
//! Keep the frogs out of the water by steering the lily pad under them.
//! Skins (seasonal themes) are read from `assets/skins/<name>/`.
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and apply command line overrides
//! 2. Initialize the raylib window, render target, ECS world and audio thread
//! 3. Register observers and the state enter systems, then enter `Setup`
//! 4. Run the main game loop until the window closes or the game quits:
//!    - Update time and input, apply pending state changes
//!    - In `Playing`: move pad and frogs, bounce, check water, progress levels
//!    - Render the current screen
//! 5. Join the audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --skins assets/skins
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use frogjump::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use frogjump::events::switchdebug::switch_debug_observer;
use frogjump::events::switchfullscreen::switch_fullscreen_observer;
use frogjump::game;
use frogjump::resources::audio::{setup_audio, shutdown_audio};
use frogjump::resources::gameconfig::GameConfig;
use frogjump::resources::gamestate::{GameState, GameStates, NextGameState};
use frogjump::resources::input::InputState;
use frogjump::resources::rendertarget::RenderTarget;
use frogjump::resources::screensize::ScreenSize;
use frogjump::resources::systemsstore::SystemsStore;
use frogjump::resources::windowsize::WindowSize;
use frogjump::resources::worldtime::WorldTime;
use frogjump::systems::audio::{
    forward_audio_cmds, on_audio_messages, poll_audio_messages, update_bevy_audio_cmds,
    update_bevy_audio_messages,
};
use frogjump::systems::collision::pad_bounce;
use frogjump::systems::gameconfig::apply_gameconfig_changes;
use frogjump::systems::gamestate::{check_pending_state, state_is_playing};
use frogjump::systems::input::update_input_state;
use frogjump::systems::level::{level_changed_observer, level_progress, spawn_missing_frogs};
use frogjump::systems::movement::{frog_movement, pad_controller};
use frogjump::systems::render::render_system;
use frogjump::systems::scenes::{scene_input_observer, text_input_observer};
use frogjump::systems::scoring::{splash_observer, water_check};
use frogjump::systems::skin::{apply_skin_observer, sync_pad_geometry};
use frogjump::systems::time::update_world_time;
use log::{error, info, warn};
use std::path::PathBuf;

/// Frog Jump: keep the frogs out of the water.
#[derive(Parser)]
#[command(version, about = "Frog Jump: keep the frogs out of the water.")]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Folder with one sub-folder per skin.
    #[arg(long, value_name = "DIR")]
    skins: Option<PathBuf>,

    /// Folder for settings.json and scores.json.
    #[arg(long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Start with this skin instead of the saved one.
    #[arg(long, value_name = "NAME")]
    skin: Option<String>,

    /// Start with music muted.
    #[arg(long)]
    mute: bool,

    /// Do not open the audio device at all.
    #[arg(long)]
    no_audio: bool,
}

impl Cli {
    fn into_config(self) -> GameConfig {
        let mut config = GameConfig::with_path(self.config);
        if let Err(e) = config.load_from_file() {
            warn!("{}; using defaults", e);
        }
        if let Some(skins) = self.skins {
            config.skins_dir = skins;
        }
        if let Some(data) = self.data {
            config.data_dir = data;
        }
        if self.skin.is_some() {
            config.skin_override = self.skin;
        }
        config.muted |= self.mute;
        config.audio_enabled &= !self.no_audio;
        config
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config();
    info!("Frog Jump starting");

    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Frog Jump")
        .build();
    rl.set_target_fps(config.target_fps);
    // Esc belongs to the game screens
    rl.set_exit_key(None);

    // --------------- Render target for fixed-resolution rendering ---------------
    let render_target =
        match RenderTarget::new(&mut rl, &thread, config.render_width, config.render_height) {
            Ok(target) => target,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(ScreenSize {
        w: config.render_width as i32,
        h: config.render_height as i32,
    });
    world.insert_resource(WindowSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(InputState::default());
    world.insert_non_send_resource(render_target);

    // audio must be ready before setup sends the first music commands
    setup_audio(&mut world, config.audio_enabled);
    world.insert_resource(config);

    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
    world.spawn(Observer::new(observe_gamestate_change_event));

    // Game state systems store
    let mut systems_store = SystemsStore::new();
    systems_store.register(&mut world, "setup", game::setup);
    systems_store.register(&mut world, "enter_play", game::enter_play);
    systems_store.register(&mut world, "enter_leaderboard", game::enter_leaderboard);
    systems_store.register(&mut world, "quit_game", game::quit_game);
    world.insert_resource(systems_store);

    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(switch_fullscreen_observer));
    world.spawn(Observer::new(scene_input_observer));
    world.spawn(Observer::new(text_input_observer));
    world.spawn(Observer::new(apply_skin_observer));
    world.spawn(Observer::new(splash_observer));
    world.spawn(Observer::new(level_changed_observer));
    // Ensure the observers are registered before anything triggers events.
    world.flush();

    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {}); // enter Setup immediately

    let mut update = Schedule::default();
    update.add_systems(apply_gameconfig_changes); // applies config before anything draws
    update.add_systems(update_input_state.after(apply_gameconfig_changes));
    update.add_systems(check_pending_state.after(update_input_state));
    update.add_systems(
        // audio systems must be together
        (
            // First, advance AudioCmd messages and forward them to the audio thread
            update_bevy_audio_cmds,
            forward_audio_cmds,
            // Then, pull audio thread messages and advance them
            poll_audio_messages,
            update_bevy_audio_messages,
            on_audio_messages,
        )
            .chain()
            .after(check_pending_state),
    );
    update.add_systems(
        (
            pad_controller,
            frog_movement,
            pad_bounce,
            water_check,
            level_progress,
            spawn_missing_frogs,
        )
            .chain()
            .run_if(state_is_playing)
            .after(check_pending_state),
    );
    update.add_systems(sync_pad_geometry.after(spawn_missing_frogs));
    update.add_systems(render_system.after(sync_pad_geometry));

    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {}", e);
        std::process::exit(1);
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && *world.resource::<GameState>().get() != GameStates::Quitting
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame

        // Update window size each frame (may change due to resize)
        let (new_w, new_h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        {
            let mut window_size = world.resource_mut::<WindowSize>();
            window_size.w = new_w;
            window_size.h = new_h;
        }
    }
    shutdown_audio(&mut world);
}
