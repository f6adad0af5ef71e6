/*
ShootemUp - Arcade Shooter
*/
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SETTINGS_FILE: &str = "settings.ron";
const LEVELS_PATH_ENV: &str = "SHOOTEMUP_LEVELS_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct GameSettings {
    /// Level Definition File (levelNumber,name,spawnRate,speed,health,required)
    pub levels_path: PathBuf,
    /// Handed to Bevy's LogPlugin
    pub log_filter: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            levels_path: PathBuf::from("assets/levels.txt"),
            log_filter: "wgpu=error,naga=warn".into(),
        }
    }
}

impl GameSettings {
    fn config_path() -> Option<PathBuf> {
        #[cfg(debug_assertions)]
        {
            // Debug builds: read from project directory
            let mut p = std::env::current_dir().ok()?;
            p.push(SETTINGS_FILE);
            Some(p)
        }
        #[cfg(not(debug_assertions))]
        {
            // Release builds: read from AppData
            dirs::config_dir().and_then(|mut p| {
                p.push("ShootemUp");
                std::fs::create_dir_all(&p).ok()?;
                p.push(SETTINGS_FILE);
                Some(p)
            })
        }
    }

    /// Missing File Gets Written Out With Defaults, Broken File Falls Back to Defaults
    /// Env Var Wins Over Both
    pub fn load() -> Self {
        let stored = Self::config_path().and_then(|path| std::fs::read_to_string(path).ok());

        let settings = match stored {
            Some(contents) => Self::from_ron(&contents).unwrap_or_default(),
            None => {
                let s = Self::default();
                s.save();
                s
            }
        };

        settings.with_env_override(std::env::var_os(LEVELS_PATH_ENV).map(PathBuf::from))
    }

    pub fn from_ron(contents: &str) -> Option<Self> {
        ron::from_str(contents).ok()
    }

    pub fn with_env_override(mut self, levels_path: Option<PathBuf>) -> Self {
        if let Some(p) = levels_path {
            self.levels_path = p;
        }
        self
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Ok(contents) = ron::ser::to_string_pretty(self, Default::default()) {
                let _ = std::fs::write(path, contents);
            }
        }
    }
}
