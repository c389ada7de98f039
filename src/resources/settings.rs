//! Player settings persisted between sessions (`settings.json`).
//!
//! Only `skin_name` and `auto_cycle` are interpreted. Saving merges them into
//! whatever object is already on disk so unrelated keys survive.

use log::warn;
use serde_json::{Map, Value};
use std::path::Path;

use crate::persist::{StorageResult, read_json, write_json_atomic};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub skin_name: Option<String>,
    pub auto_cycle: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skin_name: None,
            auto_cycle: true,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Self {
        let obj = read_object(path);
        Self {
            skin_name: obj
                .get("skin_name")
                .and_then(Value::as_str)
                .map(str::to_string),
            auto_cycle: obj
                .get("auto_cycle")
                .and_then(Value::as_bool)
                .unwrap_or(true),
        }
    }

    pub fn save(&self, path: &Path) -> StorageResult<()> {
        let mut obj = read_object(path);
        if let Some(name) = &self.skin_name {
            obj.insert("skin_name".to_string(), Value::String(name.clone()));
        }
        obj.insert("auto_cycle".to_string(), Value::Bool(self.auto_cycle));
        write_json_atomic(path, &Value::Object(obj))
    }
}

fn read_object(path: &Path) -> Map<String, Value> {
    if !path.exists() {
        return Map::new();
    }
    match read_json::<Value>(path) {
        Ok(Value::Object(obj)) => obj,
        Ok(_) => Map::new(),
        Err(e) => {
            warn!("Ignoring settings file: {}", e);
            Map::new()
        }
    }
}
