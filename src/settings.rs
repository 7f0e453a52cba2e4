use crate::error::SettingsError;
use crate::life::EdgePolicy;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub life: LifeSettings,
}

/// `[life]` section; every key is optional
#[derive(Debug, Default, Deserialize)]
pub struct LifeSettings {
    pub time_step: Option<f32>,
    pub draw_char: Option<String>,
    pub cell_size: Option<u16>,
    pub spacing: Option<u16>,
    pub randomness: Option<u8>,
    pub brush_size: Option<u16>,
    pub edge: Option<EdgePolicy>,
    pub corpses: Option<bool>,
    pub grid_lines: Option<bool>,
    /// Name of a built-in palette, used when `palette` is absent
    pub preset: Option<String>,
    /// Hex colors, `#rrggbb` or `rrggbb`
    pub palette: Option<Vec<String>>,
}

impl Settings {
    /// Load the user's settings, falling back to defaults on any problem
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        Self::from_file(&path).unwrap_or_else(|e| {
            warn!("{e}; using default settings");
            Self::default()
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termlife")
            .join("config.toml")
    }
}
