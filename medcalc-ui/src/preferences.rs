//! Persisted cosmetic preferences.
//!
//! Read once at startup and written on every change. A missing or unreadable
//! file falls back to defaults, and write failures are only logged.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::logging::{app_name, log_background_error};

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("cannot write preferences: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Color of the title bar. Any name understood by the front end; unknown
    /// names are stored but rendered uncolored.
    pub app_bar_color: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            app_bar_color: "green".to_string(),
        }
    }
}

/// Default preferences location: `<app name>.prefs.toml` in the working directory.
pub fn default_path() -> PathBuf {
    PathBuf::from(format!("{}.prefs.toml", app_name()))
}

#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    current: Preferences,
}

impl PreferenceStore {
    /// Load preferences from `path`, or defaults when it is missing or invalid.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), "ignoring unreadable preferences: {}", e);
                Preferences::default()
            }),
            Err(e) => {
                debug!(path = %path.display(), "no stored preferences: {}", e);
                Preferences::default()
            }
        };

        Self { path, current }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn preferences(&self) -> &Preferences {
        &self.current
    }

    /// Change the title bar color and persist it immediately.
    pub fn set_app_bar_color(
        &mut self,
        color: impl Into<String>,
    ) {
        self.current = Preferences {
            app_bar_color: color.into(),
        };
        log_background_error("save preferences", self.save());
    }

    fn save(&self) -> Result<(), PreferencesError> {
        let content = toml::to_string_pretty(&self.current)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }
}
