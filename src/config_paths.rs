//! Where the palette keeps its per-user files
//!
//! ```text
//! <config_dir>/
//! ├── config.yaml      host settings (PaletteConfig)
//! ├── palette.yaml     registry overrides layered over the embedded commands
//! └── logs/palette.log daily-rotated debug log
//! ```
//!
//! `<config_dir>` is `$XDG_CONFIG_HOME/palette-engine`, falling back to
//! `~/.config/palette-engine`; on Windows it is `%APPDATA%\palette-engine`.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "palette-engine";

/// Root of the palette's per-user files, if a home/config dir is known
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// Host settings read by [`crate::config::PaletteConfig::load`]
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// User registry read by [`crate::registry::load_default_registry`]
pub fn registry_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("palette.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Create the logs dir for [`crate::tracing::init`] and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}
