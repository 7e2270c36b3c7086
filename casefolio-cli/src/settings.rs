//! Settings file: `~/.config/casefolio/settings.toml`.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use casefolio_nav::NavConfig;

/// Content directory used when neither the CLI nor the settings name one.
pub(crate) const DEFAULT_CONTENT_DIR: &str = "content";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub content: ContentSettings,
    #[serde(default)]
    pub navigation: NavConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct ContentSettings {
    pub dir: Option<PathBuf>,
}

/// Returns `~/.config/casefolio/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("casefolio").join("settings.toml")
}

pub(crate) fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`, returning defaults if missing or corrupt.
pub(crate) fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

/// Save settings to `path` atomically (write to temp, then rename).
pub(crate) fn save_settings_to(path: &Path, settings: &Settings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(settings).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Resolve the content directory using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. `content.dir` in `settings.toml`
/// 3. `./content`
pub(crate) fn resolve_content_dir(cli_override: Option<PathBuf>, settings: &Settings) -> PathBuf {
    cli_override
        .or_else(|| settings.content.dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR))
}
