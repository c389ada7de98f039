//! Drawing.
//!
//! [`render_system`] is an exclusive system: it takes the Raylib handle and
//! the [`RenderTarget`] out of the world, draws the current screen into the
//! target at the playfield resolution, then scales the target into the
//! window with letterboxing. Sprites whose texture is missing are drawn as
//! their [`FallbackShape`].

use bevy_ecs::prelude::*;
use raylib::ffi;
use raylib::prelude::*;
use std::ffi::CString;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::{FallbackShape, Sprite};
use crate::components::zindex::ZIndex;
use crate::resources::debugmode::DebugMode;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::highscores::{HighScores, ScoreEntry};
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;
use crate::resources::session::Session;
use crate::resources::skins::{SkinDef, SkinManager, SkinPart, global_life_key};
use crate::resources::texturestore::TextureStore;
use crate::resources::windowsize::WindowSize;
use crate::systems::level::active_skin;
use crate::systems::skin::{FALLBACK_LIFE_SIZE, FROG_GREEN, LIFE_GREEN, PAD_GREEN, SKY_BLUE};

const INK: Color = Color::new(30, 30, 30, 255);
const PAUSE_INK: Color = Color::new(235, 235, 235, 255);
const PAUSE_SHADE: Color = Color::new(0, 0, 0, 120);
const LEADERBOARD_ROWS: usize = 10;

const GAME_TITLE: &str = "Frog Jump";
const TITLE_KEYS: &str = "SPACE: Start   S: Skins   P: Pause   M: Mute";
const PAUSED: &str = "Paused";
const RESUME_HINT: &str = "Press P to resume";
const GAME_OVER: &str = "Game Over!";
const TOP_SCORES: &str = "Top Scores";
const LEADERBOARD_KEYS: &str = "SPACE: Play again  S: Skins  Esc: Quit";
const SKIN_SELECTOR: &str = "Skin Selector";
const SKINS_BACK: &str = "Esc to return";

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

fn best(score: u64) -> String {
    format!("Best: {}", score)
}

fn hud_best(score: u64) -> String {
    format!("Best:  {}", score)
}

fn score(score: u64) -> String {
    format!("Score: {}", score)
}

fn skin_name(name: &str) -> String {
    format!("Skin: {}", name)
}

fn auto_cycle(on: bool) -> String {
    format!("Auto-cycle skin on level-up: {}", on_off(on))
}

fn skins_hint(auto_cycle: bool) -> String {
    format!(
        "Left/Right browse, Enter select, C toggle auto-cycle ({})",
        on_off(auto_cycle)
    )
}

fn music_label(has_music: bool) -> &'static str {
    if has_music {
        "Music: has music"
    } else {
        "Music: uses global music"
    }
}

/// The typed name, or an underscore while it is empty.
fn name_field(name: &str) -> &str {
    if name.is_empty() { "_" } else { name }
}

/// `" 1. name          1234"`: rank right-aligned to 2, name padded to 12.
fn leaderboard_row(rank: usize, entry: &ScoreEntry) -> String {
    format!("{:>2}. {:<12}  {}", rank, entry.name, entry.score)
}

/// One sprite ready to draw, copied out of the world.
struct SpriteDraw {
    tex_key: String,
    rect: Rectangle,
    fallback: FallbackShape,
    z: ZIndex,
}

fn collect_sprites(world: &mut World) -> Vec<SpriteDraw> {
    let mut query = world.query::<(&Sprite, &MapPosition, &ZIndex)>();
    let mut to_draw: Vec<SpriteDraw> = query
        .iter(world)
        .map(|(sprite, position, z)| SpriteDraw {
            tex_key: sprite.tex_key.clone(),
            rect: Rectangle::new(position.pos.x, position.pos.y, sprite.width, sprite.height),
            fallback: sprite.fallback,
            z: *z,
        })
        .collect();
    to_draw.sort_by_key(|s| s.z);
    to_draw
}

fn collect_colliders(world: &mut World) -> Vec<Rectangle> {
    let mut query = world.query::<(&BoxCollider, &MapPosition)>();
    query
        .iter(world)
        .map(|(collider, position)| {
            let (x, y, w, h) = collider.get_aabb(position.pos);
            Rectangle::new(x, y, w, h)
        })
        .collect()
}

pub fn render_system(world: &mut World) {
    let sprites = collect_sprites(world);
    let colliders = if world.contains_resource::<DebugMode>() {
        Some(collect_colliders(world))
    } else {
        None
    };

    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(mut target) = world.remove_non_send_resource::<RenderTarget>() else {
        world.insert_non_send_resource(rl);
        return;
    };

    draw_frame(world, &mut rl, &mut target, &sprites, colliders.as_deref());

    world.insert_non_send_resource(target);
    world.insert_non_send_resource(rl);
}

fn draw_frame(
    world: &World,
    rl: &mut RaylibHandle,
    target: &mut RenderTarget,
    sprites: &[SpriteDraw],
    colliders: Option<&[Rectangle]>,
) {
    let Some(th) = world.get_non_send_resource::<RaylibThread>() else {
        return;
    };
    let window = world.get_resource::<WindowSize>().copied().unwrap_or(WindowSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    let dest = window.calculate_letterbox(target.game_width, target.game_height);
    let fps = rl.get_fps();

    let mut d = rl.begin_drawing(th);
    d.clear_background(Color::BLACK);
    {
        let mut t = d.begin_texture_mode(th, &mut target.texture);
        t.clear_background(SKY_BLUE);
        if let Some(view) = View::from_world(world) {
            view.draw(&mut t, sprites);
            if let Some(boxes) = colliders {
                draw_debug_overlay(&mut t, &view, boxes, fps);
            }
        }
    }
    d.draw_texture_pro(
        &target.texture,
        target.source_rect(),
        dest,
        Vector2::zero(),
        0.0,
        Color::WHITE,
    );
}

/// Everything a screen needs, borrowed from the world. Absent until setup
/// has inserted the game resources.
struct View<'a> {
    state: &'a GameStates,
    screen: ScreenSize,
    textures: &'a TextureStore,
    skins: &'a SkinManager,
    session: &'a Session,
    scores: &'a HighScores,
}

impl<'a> View<'a> {
    fn from_world(world: &'a World) -> Option<Self> {
        Some(Self {
            state: world.get_resource::<GameState>()?.get(),
            screen: *world.get_resource::<ScreenSize>()?,
            textures: world.get_resource::<TextureStore>()?,
            skins: world.get_resource::<SkinManager>()?,
            session: world.get_resource::<Session>()?,
            scores: world.get_resource::<HighScores>()?,
        })
    }

    fn width(&self) -> f32 {
        self.screen.width()
    }

    fn height(&self) -> f32 {
        self.screen.height()
    }

    fn center_x(&self) -> i32 {
        self.screen.w / 2
    }

    fn draw(&self, d: &mut impl RaylibDraw, sprites: &[SpriteDraw]) {
        match self.state {
            GameStates::Title => self.draw_title(d),
            GameStates::Playing => self.draw_playfield(d, sprites),
            GameStates::Paused => {
                self.draw_playfield(d, sprites);
                self.draw_pause_overlay(d);
            }
            GameStates::NameEntry => self.draw_name_entry(d),
            GameStates::Leaderboard => self.draw_leaderboard(d),
            GameStates::Skins => self.draw_skin_selector(d),
            GameStates::None | GameStates::Setup | GameStates::Quitting => {}
        }
    }

    fn draw_background(&self, d: &mut impl RaylibDraw, skin: &SkinDef) {
        let key = skin.texture_key(SkinPart::Background);
        if let Some(tex) = self.textures.get(&key) {
            let src = Rectangle::new(0.0, 0.0, tex.width as f32, tex.height as f32);
            let dest = Rectangle::new(0.0, 0.0, self.width(), self.height());
            d.draw_texture_pro(tex, src, dest, Vector2::zero(), 0.0, Color::WHITE);
        }
    }

    fn draw_title(&self, d: &mut impl RaylibDraw) {
        let skin = self.skins.current();
        let cx = self.center_x();
        self.draw_background(d, skin);
        draw_text_centered(d, GAME_TITLE, cx, 120, 52, INK);
        draw_text_centered(d, TITLE_KEYS, cx, 200, 20, INK);
        draw_text_centered(d, &best(self.scores.best()), cx, 240, 22, INK);
        draw_text_centered(d, &auto_cycle(self.skins.auto_cycle), cx, 275, 18, INK);
        let preview = Rectangle::new((cx - 32) as f32, 310.0, 64.0, 64.0);
        draw_art(
            d,
            self.textures,
            &skin.texture_key(SkinPart::Frog),
            preview,
            FallbackShape::Circle(FROG_GREEN),
        );
        draw_text_centered(d, &skin_name(&skin.name), cx, 390, 18, INK);
    }

    fn draw_playfield(&self, d: &mut impl RaylibDraw, sprites: &[SpriteDraw]) {
        self.draw_background(d, active_skin(self.skins, self.session));
        for sprite in sprites {
            draw_art(d, self.textures, &sprite.tex_key, sprite.rect, sprite.fallback);
        }
        self.draw_hud(d);
    }

    fn life_icon_key(&self) -> Option<String> {
        let key = self.skins.life_key_for(self.session.active_skin)?;
        if self.textures.contains(&key) {
            Some(key)
        } else {
            Some(global_life_key()).filter(|k| self.textures.contains(k))
        }
    }

    fn draw_hud(&self, d: &mut impl RaylibDraw) {
        d.draw_text(&score(self.session.score), 10, 10, 20, INK);
        d.draw_text(
            &hud_best(self.scores.best()),
            self.screen.w - 180,
            10,
            20,
            INK,
        );

        let key = self.life_icon_key();
        let size = key
            .as_deref()
            .and_then(|k| self.textures.get(k))
            .map(|tex| Vector2::new(tex.width as f32, tex.height as f32))
            .unwrap_or(FALLBACK_LIFE_SIZE);
        let key = key.unwrap_or_default();
        for i in 0..self.session.lives {
            let x = 180.0 + i as f32 * (size.x + 8.0);
            let rect = Rectangle::new(x, 6.0, size.x, size.y);
            draw_art(d, self.textures, &key, rect, FallbackShape::Circle(LIFE_GREEN));
        }
    }

    fn draw_pause_overlay(&self, d: &mut impl RaylibDraw) {
        let cx = self.center_x();
        let cy = self.screen.h / 2;
        d.draw_rectangle(0, 0, self.screen.w, self.screen.h, PAUSE_SHADE);
        draw_text_centered(d, PAUSED, cx, cy - 20, 48, PAUSE_INK);
        draw_text_centered(d, RESUME_HINT, cx, cy + 30, 20, PAUSE_INK);
    }

    fn draw_name_entry(&self, d: &mut impl RaylibDraw) {
        let cx = self.center_x();
        self.draw_background(d, active_skin(self.skins, self.session));
        draw_text_centered(d, GAME_OVER, cx, 120, 48, INK);
        draw_text_centered(d, &score(self.session.score), cx, 180, 26, INK);
        d.draw_rectangle_lines_ex(Rectangle::new(140.0, 280.0, 360.0, 40.0), 2.0, INK);
        d.draw_text(name_field(&self.session.name_input), 150, 290, 24, INK);
    }

    fn draw_leaderboard(&self, d: &mut impl RaylibDraw) {
        let cx = self.center_x();
        self.draw_background(d, active_skin(self.skins, self.session));
        draw_text_centered(d, TOP_SCORES, cx, 90, 40, INK);
        let mut y = 150;
        for (i, entry) in self.scores.entries().iter().take(LEADERBOARD_ROWS).enumerate() {
            draw_text_centered(d, &leaderboard_row(i + 1, entry), cx, y, 22, INK);
            y += 34;
        }
        draw_text_centered(d, LEADERBOARD_KEYS, cx, self.screen.h - 60, 18, INK);
    }

    fn draw_skin_selector(&self, d: &mut impl RaylibDraw) {
        let cx = self.center_x();
        let skin = self.skins.current();
        self.draw_background(d, skin);
        draw_text_centered(d, SKIN_SELECTOR, cx, 90, 44, INK);
        draw_text_centered(d, &skin_name(&skin.name), cx, 150, 26, INK);
        draw_art(
            d,
            self.textures,
            &skin.texture_key(SkinPart::Frog),
            Rectangle::new((cx - 45) as f32, 190.0, 90.0, 90.0),
            FallbackShape::Circle(FROG_GREEN),
        );
        draw_art(
            d,
            self.textures,
            &skin.texture_key(SkinPart::Pad),
            Rectangle::new((cx - 100) as f32, 290.0, 200.0, 40.0),
            FallbackShape::Ellipse(PAD_GREEN),
        );
        let has_music = skin.music.is_some();
        draw_text_centered(d, &skins_hint(self.skins.auto_cycle), cx, 360, 16, INK);
        draw_text_centered(d, music_label(has_music), cx, 388, 16, INK);
        draw_text_centered(d, SKINS_BACK, cx, 414, 16, INK);
    }
}

fn draw_debug_overlay(d: &mut impl RaylibDraw, view: &View, colliders: &[Rectangle], fps: u32) {
    for rect in colliders {
        d.draw_rectangle_lines_ex(*rect, 1.0, Color::RED);
    }
    let line = format!("FPS: {}  state: {:?}", fps, view.state);
    d.draw_text(&line, 10, view.screen.h - 20, 10, Color::RED);
}

/// Draw the texture under `key` stretched into `rect`, or `fallback` if it
/// is not loaded.
fn draw_art(
    d: &mut impl RaylibDraw,
    textures: &TextureStore,
    key: &str,
    rect: Rectangle,
    fallback: FallbackShape,
) {
    if let Some(tex) = textures.get(key) {
        let src = Rectangle::new(0.0, 0.0, tex.width as f32, tex.height as f32);
        d.draw_texture_pro(tex, src, rect, Vector2::zero(), 0.0, Color::WHITE);
        return;
    }
    let cx = (rect.x + rect.width * 0.5) as i32;
    let cy = (rect.y + rect.height * 0.5) as i32;
    match fallback {
        FallbackShape::Circle(color) => {
            let radius = rect.width.min(rect.height) * 0.45;
            d.draw_circle(cx, cy, radius, color);
        }
        FallbackShape::Ellipse(color) => {
            d.draw_ellipse(cx, cy, rect.width * 0.5, rect.height * 0.5, color);
        }
    }
}

fn text_width(text: &str, size: i32) -> i32 {
    let Ok(c_text) = CString::new(text) else {
        return 0;
    };
    unsafe { ffi::MeasureText(c_text.as_ptr(), size) }
}

/// Draw `text` with its centre at (`cx`, `cy`).
fn draw_text_centered(d: &mut impl RaylibDraw, text: &str, cx: i32, cy: i32, size: i32, color: Color) {
    let w = text_width(text, size);
    d.draw_text(text, cx - w / 2, cy - size / 2, size, color);
}
