//! Loaded textures keyed by string IDs (`"<skin>/<part>"`).

use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use raylib::prelude::{RaylibHandle, RaylibThread, Texture2D};
use rustc_hash::FxHashMap;
use std::path::Path;

#[derive(Resource, Default)]
pub struct TextureStore {
    pub map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the image at `path` under `key`. Returns false (and logs) on
    /// failure.
    pub fn load(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        key: impl Into<String>,
        path: &Path,
    ) -> bool {
        let key = key.into();
        let Some(path_str) = path.to_str() else {
            warn!("Texture path is not valid UTF-8: {:?}", path);
            return false;
        };
        match rl.load_texture(th, path_str) {
            Ok(texture) => {
                debug!("Loaded texture '{}' from {}", key, path_str);
                self.map.insert(key, texture);
                true
            }
            Err(e) => {
                warn!("Failed to load texture '{}' from {}: {}", key, path_str, e);
                false
            }
        }
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&Texture2D> {
        self.map.get(key.as_ref())
    }

    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.map.contains_key(key.as_ref())
    }

    /// Drop every texture whose key starts with `prefix`.
    pub fn remove_prefix(&mut self, prefix: &str) {
        self.map.retain(|k, _| !k.starts_with(prefix));
    }
}
