use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy::prelude::{IVec3, Resource};
use serde::Deserialize;
use tracing::warn;

pub const DECOR_SETTINGS_ENV: &str = "RS_DECOR_SETTINGS";
pub const DECOR_MAX_SCAN_HEIGHT_ENV: &str = "RS_DECOR_MAX_SCAN_HEIGHT";

/// Vertical extent of the tallest vanilla world (-64..320).
pub const DEFAULT_MAX_SCAN_HEIGHT: u32 = 384;

#[derive(Resource, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecorSettings {
    /// Most cells the dirt walk may climb before giving up with the plain texture.
    /// Loading rejects 0 and `with_max_scan_height` raises it to 1; set directly, 0 means
    /// any dirt above the base gives the plain texture.
    pub max_scan_height: u32,
    /// Block whose classification is traced step by step.
    pub trace_pos: Option<[i32; 3]>,
}

impl Default for DecorSettings {
    fn default() -> Self {
        Self {
            max_scan_height: DEFAULT_MAX_SCAN_HEIGHT,
            trace_pos: None,
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(PathBuf, io::Error),
    Toml(toml::de::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(path, err) => write!(f, "failed to read {}: {err}", path.display()),
            Self::Toml(err) => write!(f, "invalid toml settings: {err}"),
            Self::Json(err) => write!(f, "invalid json settings: {err}"),
            Self::Invalid(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, err) => Some(err),
            Self::Toml(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl DecorSettings {
    pub fn traces(&self, pos: IVec3) -> bool {
        self.trace_pos.is_some_and(|p| IVec3::from_array(p) == pos)
    }

    pub fn with_trace_pos(mut self, pos: IVec3) -> Self {
        self.trace_pos = Some(pos.to_array());
        self
    }

    pub fn with_max_scan_height(mut self, height: u32) -> Self {
        self.max_scan_height = height.max(1);
        self
    }

    pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(input).map_err(SettingsError::Toml)?;
        settings.validate()
    }

    pub fn from_json_str(input: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(input).map_err(SettingsError::Json)?;
        settings.validate()
    }

    /// Format follows the extension: `.json` is JSON, anything else TOML.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text =
            fs::read_to_string(path).map_err(|err| SettingsError::Io(path.to_path_buf(), err))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("falling back to default decor settings: {err}");
                Self::default()
            }
        }
    }

    /// Reads the file named by `RS_DECOR_SETTINGS` (if any), then applies
    /// `RS_DECOR_MAX_SCAN_HEIGHT`.
    pub fn from_env() -> Self {
        let base = match std::env::var(DECOR_SETTINGS_ENV) {
            Ok(path) => Self::load_or_default(Path::new(&path)),
            Err(_) => Self::default(),
        };
        base.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(DECOR_MAX_SCAN_HEIGHT_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(height) if height > 0 => self.max_scan_height = height,
                _ => warn!("ignoring {DECOR_MAX_SCAN_HEIGHT_ENV}={raw:?}: expected a positive integer"),
            }
        }
        self
    }

    fn validate(self) -> Result<Self, SettingsError> {
        if self.max_scan_height == 0 {
            return Err(SettingsError::Invalid(
                "max_scan_height must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}
