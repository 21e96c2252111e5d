//! Palette configuration
//!
//! Stores host settings in `~/.config/palette-engine/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::filter::FilterKind;

/// Host settings for the palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Base URL that site-relative navigation paths resolve against
    #[serde(default = "default_site_url")]
    pub site_url: String,
    /// Label filter used by the search box
    #[serde(default)]
    pub filter: FilterKind,
}

fn default_site_url() -> String {
    "http://localhost:4321".to_string()
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            filter: FilterKind::default(),
        }
    }
}

impl PaletteConfig {
    /// Load config from the user config dir, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
