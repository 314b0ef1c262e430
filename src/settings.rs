use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ShellError;
use crate::modules::navigation::BLANK_PAGE;

pub const SETTINGS_FILE: &str = "settings.json";

/// Which of the two shells the app boots into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Variant {
    /// A list of named panels with add/edit/delete.
    Panels,
    /// One persisted URL with a setup/reset flow.
    SingleUrl,
}

impl Default for Variant {
    fn default() -> Self {
        Self::Panels
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    /// Page loaded into the surface before leaving the browse view.
    pub blank_page: String,
    /// Ask before deleting a panel.
    pub confirm_delete: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            blank_page: BLANK_PAGE.to_string(),
            confirm_delete: true,
        }
    }
}

impl Settings {
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(SETTINGS_FILE)
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("[Settings] Failed to parse settings: {}, returning defaults", e);
                    Self::default()
                }),
                Err(e) => {
                    log::warn!("[Settings] Failed to read file: {}, returning defaults", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ShellError> {
        let json = serde_json::to_string_pretty(self)?;
        crate::prefs::write_atomic(path, &json)
    }

    /// Like `load_from`, but writes the defaults out on first run so the
    /// file exists to be edited.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::load_from(path);
        }

        let settings = Self::default();
        match settings.save_to(path) {
            Ok(()) => log::info!("[Settings] Wrote defaults to {:?}", path),
            Err(e) => log::warn!("[Settings] Failed to write defaults: {}", e),
        }
        settings
    }
}

#[cfg(feature = "shell")]
impl Settings {
    pub fn get_path(app: &tauri::AppHandle) -> Result<PathBuf, ShellError> {
        use tauri::Manager;

        let dir = app
            .path()
            .app_data_dir()
            .map_err(|e| ShellError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string())))?;
        Ok(Self::path_in(&dir))
    }

    pub fn load(app: &tauri::AppHandle) -> Self {
        match Self::get_path(app) {
            Ok(path) => Self::load_or_init(&path),
            Err(e) => {
                log::warn!("[Settings] No app data dir: {}, returning defaults", e);
                Self::default()
            }
        }
    }
}
