//! Per-run game session: score, lives, level and the world forces of the
//! active level rule.

use bevy_ecs::prelude::Resource;

use crate::resources::highscores::MAX_NAME_CHARS;
use crate::resources::levels::{LevelRule, RULE_FPS};

pub const DEFAULT_LIVES: u32 = 5;
/// Points gained per second of uninterrupted play.
pub const SCORE_PER_SECOND: f32 = RULE_FPS;
const WIND_GUST_RATIO: f32 = 0.5;
const WIND_GUST_FREQUENCY: f32 = 1.2;

#[derive(Resource, Debug, Clone)]
pub struct Session {
    pub score: u64,
    pub lives: u32,
    pub level_idx: usize,
    pub name_input: String,
    pub muted: bool,
    /// Index of the skin whose art is currently applied.
    pub active_skin: usize,
    /// Horizontal water current on frogs, per frame².
    pub current_force_x: f32,
    pub wind_base: f32,
    pub wind_amp: f32,
    pub pad_scale: f32,
    pub speed_range: (i32, i32),
    pub target_frogs: usize,
    /// Track path the audio thread is currently looping.
    pub current_music: Option<String>,
    score_carry: f32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            score: 0,
            lives: DEFAULT_LIVES,
            level_idx: 0,
            name_input: String::new(),
            muted: false,
            active_skin: 0,
            current_force_x: 0.0,
            wind_base: 0.0,
            wind_amp: 0.0,
            pad_scale: 1.0,
            speed_range: (3, 6),
            target_frogs: 1,
            current_music: None,
            score_carry: 0.0,
        }
    }
}

impl Session {
    /// Start a fresh run. Mute state, skin and music are kept.
    pub fn reset(&mut self, lives: u32) {
        self.score = 0;
        self.score_carry = 0.0;
        self.lives = lives;
        self.level_idx = 0;
        self.name_input.clear();
    }

    /// Add score for `delta` seconds of clean play. Fractions carry over to
    /// the next tick so the rate is independent of frame time.
    pub fn accrue(&mut self, delta: f32) {
        if delta <= 0.0 {
            return;
        }
        self.score_carry += delta * SCORE_PER_SECOND;
        let whole = self.score_carry.floor();
        self.score_carry -= whole;
        self.score = self.score.saturating_add(whole as u64);
    }

    /// Take one life. Returns true when no lives remain.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Append a typed character to the player name. Control characters and
    /// input past the length limit are ignored.
    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.name_input.chars().count() >= MAX_NAME_CHARS {
            return false;
        }
        self.name_input.push(ch);
        true
    }

    pub fn pop_char(&mut self) {
        self.name_input.pop();
    }

    /// Wind drift on the pad at time `t` seconds, per frame.
    pub fn wind_at(&self, t: f32) -> f32 {
        self.wind_base + self.wind_amp * (t * WIND_GUST_FREQUENCY).sin()
    }

    pub fn apply_rule(&mut self, rule: &LevelRule) {
        self.current_force_x = rule.currents;
        self.wind_base = rule.wind;
        self.wind_amp = rule.wind * WIND_GUST_RATIO;
        self.pad_scale = rule.pad_scale;
        self.speed_range = rule.speed;
        self.target_frogs = rule.frogs.max(1);
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }
}
