//! Level rules: how difficulty ramps up with score.
//!
//! Each skin may ship a `levels.json` describing its own ramp; otherwise the
//! built-in table from [`LevelRules::default_table`] is used. Parsing is
//! deliberately forgiving: several container shapes and key synonyms are
//! accepted, numbers may be given as strings, and bad values fall back to
//! per-field defaults instead of rejecting the file.
//!
//! Rule values are expressed per reference frame (60 fps). Use [`per_frame`]
//! and [`per_frame_sq`] to convert to per-second units.
//!
//! ```json
//! { "levels": [
//!     { "score": 0,    "frogs": 1, "speed": [3, 6], "currents": 0.0, "wind": 0.0, "pad_scale": 1.0 },
//!     { "threshold": "1500", "num_frogs": 2, "speed_range": 7, "current": 0.05 }
//! ] }
//! ```

use std::path::Path;

use log::warn;
use serde_json::{Map, Value};

/// Frame rate the rule units are expressed in.
pub const RULE_FPS: f32 = 60.0;

/// Convert a per-frame speed to pixels per second.
pub fn per_frame(v: f32) -> f32 {
    v * RULE_FPS
}

/// Convert a per-frame² acceleration to pixels per second².
pub fn per_frame_sq(a: f32) -> f32 {
    a * RULE_FPS * RULE_FPS
}

const DEFAULT_FROGS: usize = 1;
const DEFAULT_SPEED: (i32, i32) = (3, 6);
const DEFAULT_PAD_SCALE: f32 = 1.0;
const CONTAINER_KEYS: [&str; 3] = ["levels", "rules", "stages"];

/// One difficulty step, active once the score reaches `score`.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRule {
    pub score: i64,
    pub frogs: usize,
    /// Inclusive frog speed range, per reference frame. Always `1 <= lo < hi`.
    pub speed: (i32, i32),
    /// Horizontal water current pushing frogs, per frame².
    pub currents: f32,
    /// Steady wind pushing the pad, per frame.
    pub wind: f32,
    pub pad_scale: f32,
}

impl LevelRule {
    fn new(score: i64, frogs: usize, speed: (i32, i32), currents: f32, wind: f32, pad_scale: f32) -> Self {
        Self {
            score,
            frogs,
            speed,
            currents,
            wind,
            pad_scale,
        }
    }

    /// Build a rule from a loosely-typed JSON object.
    fn from_object(obj: &Map<String, Value>) -> Self {
        let score = lookup(obj, &["score", "threshold"])
            .and_then(as_f64)
            .map(|s| s.trunc() as i64)
            .unwrap_or(0);
        let frogs = lookup(obj, &["frogs", "num_frogs"])
            .and_then(as_int)
            .map(|f| f.max(1) as usize)
            .unwrap_or(DEFAULT_FROGS);
        let speed = normalize_speed(lookup(obj, &["speed", "speed_range"]));
        let currents = lookup(obj, &["currents", "current"])
            .and_then(as_f64)
            .unwrap_or(0.0) as f32;
        let wind = lookup(obj, &["wind", "wind_gust"])
            .and_then(as_f64)
            .unwrap_or(0.0) as f32;
        let pad_scale = lookup(obj, &["pad_scale", "pad_size", "pad_factor"])
            .and_then(as_f64)
            .map(|s| s as f32)
            .unwrap_or(DEFAULT_PAD_SCALE);

        Self::new(score, frogs, speed, currents, wind, pad_scale)
    }
}

/// Ordered, never-empty list of level rules.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRules {
    rules: Vec<LevelRule>,
}

impl Default for LevelRules {
    fn default() -> Self {
        Self::default_table()
    }
}

impl LevelRules {
    /// Built-in five-level ramp.
    pub fn default_table() -> Self {
        Self {
            rules: vec![
                LevelRule::new(0, 1, (3, 6), 0.0, 0.0, 1.00),
                LevelRule::new(1500, 2, (3, 7), 0.05, 0.00, 0.95),
                LevelRule::new(3000, 3, (4, 8), 0.08, 0.03, 0.92),
                LevelRule::new(5000, 4, (5, 9), 0.12, 0.04, 0.88),
                LevelRule::new(7500, 5, (6, 10), 0.15, 0.05, 0.84),
            ],
        }
    }

    /// Parse rules from any accepted JSON shape, falling back to the default
    /// table when nothing usable is found.
    pub fn from_json(value: &Value) -> Self {
        let entries: &[Value] = match value {
            Value::Array(items) => items,
            Value::Object(obj) => CONTAINER_KEYS
                .iter()
                .filter_map(|key| obj.get(*key))
                .filter_map(Value::as_array)
                .find(|items| !items.is_empty())
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            _ => &[],
        };

        let mut rules: Vec<LevelRule> = entries
            .iter()
            .filter_map(Value::as_object)
            .map(LevelRule::from_object)
            .collect();

        if rules.is_empty() {
            return Self::default_table();
        }
        rules.sort_by_key(|r| r.score);
        Self { rules }
    }

    /// Read a `levels.json` file. A missing or unparsable file yields the
    /// default table.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default_table();
        }
        match crate::persist::read_json::<Value>(path) {
            Ok(value) => Self::from_json(&value),
            Err(e) => {
                warn!("Ignoring level file {}: {}", path.display(), e);
                Self::default_table()
            }
        }
    }

    /// Index and rule active at `score`.
    ///
    /// Walks the sorted rules and keeps the last one whose threshold is
    /// reached, stopping at the first threshold above the score. When no
    /// threshold is reached the first rule still applies.
    pub fn level_for_score(&self, score: u64) -> (usize, &LevelRule) {
        let score = i64::try_from(score).unwrap_or(i64::MAX);
        let mut found = (0, &self.rules[0]);
        for (i, rule) in self.rules.iter().enumerate() {
            if score >= rule.score {
                found = (i, rule);
            } else {
                break;
            }
        }
        found
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelRule> {
        self.rules.get(index)
    }
}

fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k))
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Integer conversion: floats truncate, strings must be whole numbers.
fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// `[lo, hi]` or a single number `n` (meaning `[n, n + 3]`), then
/// `lo = max(1, lo)` and `hi = max(lo + 1, hi)`.
fn normalize_speed(value: Option<&Value>) -> (i32, i32) {
    let (lo, hi) = match value {
        Some(Value::Array(items)) if items.len() >= 2 => (
            as_f64(&items[0]).map(|v| v.trunc() as i32).unwrap_or(DEFAULT_SPEED.0),
            as_f64(&items[1]).map(|v| v.trunc() as i32).unwrap_or(DEFAULT_SPEED.1),
        ),
        Some(Value::Array(_)) | None => DEFAULT_SPEED,
        Some(other) => {
            let lo = as_int(other).map(|v| v as i32).unwrap_or(DEFAULT_SPEED.0);
            (lo, lo.saturating_add(3))
        }
    };
    let lo = lo.clamp(1, i32::MAX - 1);
    let hi = hi.max(lo + 1);
    (lo, hi)
}
