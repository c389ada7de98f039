//! Skin (visual theme) discovery and selection.
//!
//! A skin is a directory under the skins root holding at least a frog, a pad
//! and a background image. File names are matched loosely by keywords so
//! artists can drop in `Lily Pad.png` or `frog_bigeye.bmp` without renaming.
//! Optional extras are a life icon, a music track and a `levels.json`.
//!
//! Discovery only touches the filesystem; textures are loaded by the game
//! setup, which then [`SkinManager::retain`]s the skins that loaded.

use bevy_ecs::prelude::Resource;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::persist::StorageResult;
use crate::resources::levels::LevelRules;
use crate::resources::settings::Settings;

pub const IMAGE_EXTS: &[&str] = &["png", "bmp", "jpg", "jpeg"];
pub const AUDIO_EXTS: &[&str] = &["mp3", "ogg", "wav", "flac", "m4a"];

/// Keyword sets in priority order. Every keyword of a set must occur in the
/// file stem for the set to match.
pub const FROG_KEYWORDS: &[&[&str]] = &[
    &["frog_bigeye"],
    &["frog", "bigeye"],
    &["frog"],
    &["ball"],
    &["character"],
    &["player"],
];
pub const PAD_KEYWORDS: &[&[&str]] = &[&["lily", "pad"], &["lilypad"], &["pad"], &["platform"]];
pub const BACKGROUND_KEYWORDS: &[&[&str]] = &[&["bg"], &["background"]];
pub const LIFE_KEYWORDS: &[&[&str]] = &[&["frog", "wave"], &["life"], &["heart"]];
pub const MUSIC_KEYWORDS: &[&[&str]] = &[&["music"], &["bgm"], &["background", "music"]];

pub const LEVELS_FILE: &str = "levels.json";
pub const FALLBACK_SKIN: &str = "fallback";
pub const GLOBAL_MUSIC_FILE: &str = "music.mp3";
pub const GLOBAL_LIFE_FILES: &[&str] = &["frog_wave.bmp", "life.bmp"];

/// Sorted regular-file names in `folder`. Unreadable folders are empty.
fn list_files(folder: &Path) -> Vec<PathBuf> {
    let Ok(read_dir) = fs::read_dir(folder) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files
}

fn squash(s: &str) -> String {
    s.chars().filter(|c| *c != ' ' && *c != '_').collect()
}

/// First file (in sorted order) whose extension is in `exts` and whose stem
/// contains every keyword, case-insensitively.
pub fn find_file_by_keywords(folder: &Path, keywords: &[&str], exts: &[&str]) -> Option<PathBuf> {
    list_files(folder).into_iter().find(|path| {
        let ext_ok = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| exts.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);
        if !ext_ok {
            return false;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            return false;
        };
        let stem = stem.to_lowercase();
        let stem_squashed = squash(&stem);
        keywords.iter().all(|k| {
            let k = k.to_lowercase();
            stem.contains(&k) || stem_squashed.contains(&squash(&k))
        })
    })
}

/// Try each keyword set in order and return the first match.
pub fn find_any(folder: &Path, candidates: &[&[&str]], exts: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .find_map(|keywords| find_file_by_keywords(folder, keywords, exts))
}

/// Fallback music in `base` (usually the working directory).
pub fn global_music(base: &Path) -> Option<PathBuf> {
    let path = base.join(GLOBAL_MUSIC_FILE);
    path.is_file().then_some(path)
}

/// Fallback life icon in `base`.
pub fn global_life_icon(base: &Path) -> Option<PathBuf> {
    GLOBAL_LIFE_FILES
        .iter()
        .map(|name| base.join(name))
        .find(|path| path.is_file())
}

/// Textured parts of a skin, used to build texture store keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinPart {
    Frog,
    Pad,
    Background,
    Life,
}

impl SkinPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinPart::Frog => "frog",
            SkinPart::Pad => "pad",
            SkinPart::Background => "bg",
            SkinPart::Life => "life",
        }
    }
}

/// Image files of a skin. Absent for the procedural fallback skin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinArt {
    pub frog: PathBuf,
    pub pad: PathBuf,
    pub background: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SkinDef {
    pub name: String,
    pub art: Option<SkinArt>,
    pub life_icon: Option<PathBuf>,
    pub music: Option<PathBuf>,
    pub levels: LevelRules,
}

impl SkinDef {
    /// Inspect a skin directory. Returns `None` when a required image is
    /// missing.
    pub fn discover(dir: &Path) -> Option<Self> {
        let name = dir.file_name()?.to_str()?.to_string();
        let frog = find_any(dir, FROG_KEYWORDS, IMAGE_EXTS);
        let pad = find_any(dir, PAD_KEYWORDS, IMAGE_EXTS);
        let background = find_any(dir, BACKGROUND_KEYWORDS, IMAGE_EXTS);

        let (Some(frog), Some(pad), Some(background)) = (frog, pad, background) else {
            warn!("Skipping skin '{}': frog, pad or background image missing", name);
            return None;
        };

        let skin = Self {
            art: Some(SkinArt {
                frog,
                pad,
                background,
            }),
            life_icon: find_any(dir, LIFE_KEYWORDS, IMAGE_EXTS),
            music: find_any(dir, MUSIC_KEYWORDS, AUDIO_EXTS),
            levels: LevelRules::load(&dir.join(LEVELS_FILE)),
            name,
        };
        debug!("Discovered skin {:?}", skin);
        Some(skin)
    }

    /// Procedural skin drawn with plain shapes.
    pub fn fallback() -> Self {
        Self {
            name: FALLBACK_SKIN.to_string(),
            art: None,
            life_icon: None,
            music: None,
            levels: LevelRules::default_table(),
        }
    }

    pub fn texture_key(&self, part: SkinPart) -> String {
        format!("{}/{}", self.name, part.as_str())
    }
}

/// All usable skins plus the browse cursor and the auto-cycle preference.
///
/// Invariant: `skins` is never empty; the fallback skin is added whenever no
/// real skin is left.
#[derive(Resource, Debug, Clone)]
pub struct SkinManager {
    skins: Vec<SkinDef>,
    index: usize,
    pub auto_cycle: bool,
    settings_path: PathBuf,
    pub global_music: Option<PathBuf>,
    pub global_life_icon: Option<PathBuf>,
}

impl SkinManager {
    /// Scan `root` for skin directories and restore the saved choice from
    /// `settings_path`.
    pub fn discover(root: &Path, settings_path: impl Into<PathBuf>) -> Self {
        let mut dirs: Vec<PathBuf> = match fs::read_dir(root) {
            Ok(read_dir) => read_dir
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_dir())
                .collect(),
            Err(e) => {
                warn!("Cannot read skins folder {}: {}", root.display(), e);
                Vec::new()
            }
        };
        dirs.sort();

        let skins: Vec<SkinDef> = dirs.iter().filter_map(|d| SkinDef::discover(d)).collect();
        info!("Found {} skin(s) in {}", skins.len(), root.display());
        Self::from_skins(skins, settings_path)
    }

    pub fn from_skins(skins: Vec<SkinDef>, settings_path: impl Into<PathBuf>) -> Self {
        let settings_path = settings_path.into();
        let settings = Settings::load(&settings_path);
        let mut manager = Self {
            skins,
            index: 0,
            auto_cycle: settings.auto_cycle,
            settings_path,
            global_music: None,
            global_life_icon: None,
        };
        manager.ensure_fallback();
        if let Some(name) = settings.skin_name {
            manager.select_by_name(&name);
        }
        manager
    }

    /// Keep only skins matching `keep`, preserving the current selection by
    /// name when possible.
    pub fn retain(&mut self, mut keep: impl FnMut(&SkinDef) -> bool) {
        let selected = self.current().name.clone();
        self.skins.retain(|s| keep(s));
        self.ensure_fallback();
        self.index = 0;
        self.select_by_name(&selected);
    }

    /// Add the procedural skin when no other skin is available.
    pub fn ensure_fallback(&mut self) {
        if self.skins.is_empty() {
            info!("No usable skins, using the built-in fallback");
            self.skins.push(SkinDef::fallback());
            self.index = 0;
        }
    }

    pub fn skins(&self) -> &[SkinDef] {
        &self.skins
    }

    pub fn len(&self) -> usize {
        self.skins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skins.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, index: usize) -> Option<&SkinDef> {
        self.skins.get(index)
    }

    pub fn current(&self) -> &SkinDef {
        &self.skins[self.index]
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.skins.len();
    }

    pub fn prev(&mut self) {
        self.index = (self.index + self.skins.len() - 1) % self.skins.len();
    }

    pub fn select_by_name(&mut self, name: &str) -> bool {
        match self.skins.iter().position(|s| s.name == name) {
            Some(i) => {
                self.index = i;
                true
            }
            None => false,
        }
    }

    /// Music for the skin at `index`: its own track or the global fallback.
    pub fn music_for(&self, index: usize) -> Option<&Path> {
        self.skins
            .get(index)
            .and_then(|s| s.music.as_deref())
            .or(self.global_music.as_deref())
    }

    /// Life icon texture key for the skin at `index`, if any icon exists.
    pub fn life_key_for(&self, index: usize) -> Option<String> {
        let skin = self.skins.get(index)?;
        if skin.life_icon.is_some() {
            Some(skin.texture_key(SkinPart::Life))
        } else if self.global_life_icon.is_some() {
            Some(global_life_key())
        } else {
            None
        }
    }

    /// Persist the current skin name and the auto-cycle flag.
    pub fn save_choice(&self) -> StorageResult<()> {
        let settings = Settings {
            skin_name: Some(self.current().name.clone()),
            auto_cycle: self.auto_cycle,
        };
        settings.save(&self.settings_path)
    }
}

/// Texture key of the global life icon.
///
/// Skin keys are `<dir name>/<part>`. A leading slash would need an empty
/// directory name, so this key never collides with a skin's.
pub fn global_life_key() -> String {
    format!("/global/{}", SkinPart::Life.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    fn make_skin(root: &Path, name: &str, files: &[&str]) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for f in files {
            touch(&dir, f);
        }
        dir
    }

    #[test]
    fn test_keywords_are_case_insensitive_and_ignore_spaces() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Lily Pad.BMP");
        let found = find_any(dir.path(), PAD_KEYWORDS, IMAGE_EXTS).unwrap();
        assert_eq!(found.file_name().unwrap(), "Lily Pad.BMP");

        let found = find_file_by_keywords(dir.path(), &["lilypad"], IMAGE_EXTS).unwrap();
        assert_eq!(found.file_name().unwrap(), "Lily Pad.BMP");
    }

    #[test]
    fn test_extension_filter() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "frog.txt");
        assert!(find_any(dir.path(), FROG_KEYWORDS, IMAGE_EXTS).is_none());
        touch(dir.path(), "music.ogg");
        assert!(find_any(dir.path(), MUSIC_KEYWORDS, AUDIO_EXTS).is_some());
        assert!(find_any(dir.path(), MUSIC_KEYWORDS, IMAGE_EXTS).is_none());
    }

    #[test]
    fn test_higher_priority_keyword_set_wins() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a_ball.png");
        touch(dir.path(), "b_frog.png");
        touch(dir.path(), "z_frog_bigeye.png");
        let found = find_any(dir.path(), FROG_KEYWORDS, IMAGE_EXTS).unwrap();
        assert_eq!(found.file_name().unwrap(), "z_frog_bigeye.png");
    }

    #[test]
    fn test_sorted_order_within_a_keyword_set() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "pad2.png");
        touch(dir.path(), "pad1.png");
        let found = find_any(dir.path(), PAD_KEYWORDS, IMAGE_EXTS).unwrap();
        assert_eq!(found.file_name().unwrap(), "pad1.png");
    }

    #[test]
    fn test_skin_requires_all_images() {
        let root = tempfile::tempdir().unwrap();
        let full = make_skin(root.path(), "spring", &["frog.png", "pad.png", "bg.png", "bgm.mp3"]);
        let partial = make_skin(root.path(), "broken", &["frog.png", "bg.png"]);

        let skin = SkinDef::discover(&full).unwrap();
        assert_eq!(skin.name, "spring");
        assert!(skin.music.is_some());
        assert!(skin.life_icon.is_none());
        assert!(SkinDef::discover(&partial).is_none());
    }

    #[test]
    fn test_skin_reads_levels_file() {
        let root = tempfile::tempdir().unwrap();
        let dir = make_skin(root.path(), "night", &["frog.png", "pad.png", "background.jpg"]);
        fs::write(dir.join(LEVELS_FILE), r#"[{"score": 0, "frogs": 4}]"#).unwrap();
        let skin = SkinDef::discover(&dir).unwrap();
        assert_eq!(skin.levels.len(), 1);
        assert_eq!(skin.levels.get(0).unwrap().frogs, 4);
    }

    #[test]
    fn test_discover_sorted_and_falls_back() {
        let root = tempfile::tempdir().unwrap();
        let settings = root.path().join("settings.json");
        let empty = SkinManager::discover(&root.path().join("nope"), &settings);
        assert_eq!(empty.len(), 1);
        assert_eq!(empty.current().name, FALLBACK_SKIN);

        make_skin(root.path(), "winter", &["frog.png", "pad.png", "bg.png"]);
        make_skin(root.path(), "autumn", &["ball.png", "platform.png", "bg.png"]);
        let manager = SkinManager::discover(root.path(), &settings);
        let names: Vec<&str> = manager.skins().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["autumn", "winter"]);
    }

    #[test]
    fn test_next_prev_wrap() {
        let skins = vec![SkinDef::fallback(), SkinDef::fallback(), SkinDef::fallback()];
        let dir = tempfile::tempdir().unwrap();
        let mut manager = SkinManager::from_skins(skins, dir.path().join("s.json"));
        manager.prev();
        assert_eq!(manager.index(), 2);
        manager.next();
        assert_eq!(manager.index(), 0);
    }

    #[test]
    fn test_saved_choice_is_restored() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("Data").join("settings.json");
        let mut a = SkinDef::fallback();
        a.name = "a".into();
        let mut b = SkinDef::fallback();
        b.name = "b".into();

        let mut manager = SkinManager::from_skins(vec![a.clone(), b.clone()], &settings);
        manager.next();
        manager.auto_cycle = false;
        manager.save_choice().unwrap();

        let restored = SkinManager::from_skins(vec![a, b], &settings);
        assert_eq!(restored.current().name, "b");
        assert!(!restored.auto_cycle);
    }

    #[test]
    fn test_retain_keeps_selection_and_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let names = ["a", "b", "c"];
        let skins = names
            .iter()
            .map(|n| {
                let mut s = SkinDef::fallback();
                s.name = n.to_string();
                s
            })
            .collect();
        let mut manager = SkinManager::from_skins(skins, dir.path().join("s.json"));
        manager.select_by_name("c");
        manager.retain(|s| s.name != "a");
        assert_eq!(manager.current().name, "c");
        assert_eq!(manager.index(), 1);

        manager.retain(|_| false);
        assert_eq!(manager.current().name, FALLBACK_SKIN);
    }

    #[test]
    fn test_music_and_life_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let mut with_music = SkinDef::fallback();
        with_music.name = "m".into();
        with_music.music = Some(PathBuf::from("m/music.ogg"));
        let mut manager =
            SkinManager::from_skins(vec![with_music, SkinDef::fallback()], dir.path().join("s.json"));

        assert_eq!(manager.music_for(0), Some(Path::new("m/music.ogg")));
        assert_eq!(manager.music_for(1), None);
        manager.global_music = Some(PathBuf::from("music.mp3"));
        assert_eq!(manager.music_for(1), Some(Path::new("music.mp3")));

        assert_eq!(manager.life_key_for(1), None);
        manager.global_life_icon = Some(PathBuf::from("life.bmp"));
        assert_eq!(manager.life_key_for(1), Some(global_life_key()));
    }

    #[test]
    fn test_skin_named_global_keeps_its_own_life_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut global = SkinDef::fallback();
        global.name = "global".into();
        global.life_icon = Some(PathBuf::from("global/life.png"));
        let mut manager = SkinManager::from_skins(vec![global], dir.path().join("s.json"));
        manager.global_life_icon = Some(PathBuf::from("life.bmp"));

        let own = manager.life_key_for(0).unwrap();
        assert_eq!(own, "global/life");
        assert_ne!(own, global_life_key());
    }

    #[test]
    fn test_global_files_lookup() {
        let dir = tempfile::tempdir().unwrap();
        assert!(global_music(dir.path()).is_none());
        assert!(global_life_icon(dir.path()).is_none());
        touch(dir.path(), "life.bmp");
        touch(dir.path(), GLOBAL_MUSIC_FILE);
        assert!(global_music(dir.path()).is_some());
        assert_eq!(
            global_life_icon(dir.path()).unwrap().file_name().unwrap(),
            "life.bmp"
        );
        touch(dir.path(), "frog_wave.bmp");
        assert_eq!(
            global_life_icon(dir.path()).unwrap().file_name().unwrap(),
            "frog_wave.bmp"
        );
    }
}
