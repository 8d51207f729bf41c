use crate::config::config_dir;
use crate::constants::PREFERENCES_FILE_NAME;
use crate::models::Theme;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk preferences document
#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    theme: Option<Theme>,
}

/// Persists the light/dark theme choice
pub struct ThemePreferenceStore {
    path: PathBuf,
}

impl ThemePreferenceStore {
    pub fn new() -> Self {
        Self::at(config_dir().join(PREFERENCES_FILE_NAME))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        ThemePreferenceStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme, or `None` when nothing (readable) was saved
    pub fn get(&self) -> Option<Theme> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_yaml::from_str::<Preferences>(&content).ok()?.theme
    }

    pub fn set(&self, theme: Theme) -> Result<()> {
        self.ensure_dir()?;
        let prefs = Preferences { theme: Some(theme) };
        fs::write(&self.path, serde_yaml::to_string(&prefs)?)?;
        Ok(())
    }

    /// Stored theme, falling back to what the terminal reports
    pub fn initial_theme(&self) -> Theme {
        self.get().unwrap_or_else(system_theme)
    }

    fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl Default for ThemePreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Light/dark signal from the terminal environment
pub fn system_theme() -> Theme {
    system_theme_from(std::env::var("COLORFGBG").ok().as_deref())
}

/// Interpret a `COLORFGBG` value (`"fg;bg"` or `"fg;default;bg"`).
/// Background 7 or 15 is a light terminal; anything else, or no signal, is dark.
pub fn system_theme_from(colorfgbg: Option<&str>) -> Theme {
    let bg = colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(7) | Some(15) => Theme::Light,
        _ => Theme::Dark,
    }
}
