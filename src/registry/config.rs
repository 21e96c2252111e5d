//! YAML configuration parsing for registries
//!
//! Parses palette.yaml files into commands.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use super::command::{Action, Command};
use super::{Registry, RegistryError};
use crate::keymap::{parse_chord, parse_chord_str, Chord};

/// Root structure of a registry YAML file
#[derive(Debug, Deserialize)]
pub struct RegistryConfig {
    pub commands: Vec<CommandConfig>,
}

/// A single command entry from YAML
#[derive(Debug, Deserialize)]
pub struct CommandConfig {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub chord: Option<ChordConfig>,
    #[serde(default = "default_group")]
    pub group: String,
    /// `navigate: /blog` style single-entry map, or a bare `copy_location`
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub action: ActionConfig,
}

fn default_group() -> String {
    "General".to_string()
}

/// A chord written either as a token list or a `+`-joined string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ChordConfig {
    Tokens(Vec<String>),
    Spec(String),
}

impl ChordConfig {
    fn resolve(&self) -> Result<Chord, crate::keymap::ChordError> {
        match self {
            ChordConfig::Tokens(tokens) => parse_chord(tokens),
            ChordConfig::Spec(spec) => parse_chord_str(spec),
        }
    }
}

/// Declarative actions available from YAML
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionConfig {
    Navigate(String),
    OpenExternal(String),
    CopyText(String),
    CopyLocation,
    /// Removes a command with the same id from the layer below
    Unbound,
}

/// A parsed registry entry: a command, or the removal of one
#[derive(Debug, Clone)]
pub enum CommandEntry {
    Command(Command),
    Unbound(String),
}

/// Load a registry from a YAML file
pub fn load_registry_file(path: &Path) -> Result<Registry, RegistryError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| RegistryError::IoError(e.to_string()))?;

    parse_registry_yaml(&content)
}

/// Load raw entries (including `unbound` removals) from a YAML file
pub fn load_entries_file(path: &Path) -> Result<Vec<CommandEntry>, RegistryError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| RegistryError::IoError(e.to_string()))?;

    parse_entries_yaml(&content)
}

/// Parse and validate a registry from a YAML string.
///
/// `unbound` entries have nothing to remove in a standalone file and are skipped.
pub fn parse_registry_yaml(yaml: &str) -> Result<Registry, RegistryError> {
    let commands = parse_entries_yaml(yaml)?
        .into_iter()
        .filter_map(|entry| match entry {
            CommandEntry::Command(command) => Some(command),
            CommandEntry::Unbound(_) => None,
        })
        .collect();

    Registry::new(commands)
}

/// Parse registry entries from a YAML string.
///
/// Ids must be unique within the file; chord conflicts are checked when the
/// entries are built into a [`Registry`].
pub fn parse_entries_yaml(yaml: &str) -> Result<Vec<CommandEntry>, RegistryError> {
    let config: RegistryConfig =
        serde_yaml::from_str(yaml).map_err(|e| RegistryError::ParseError(e.to_string()))?;

    let mut seen = HashSet::with_capacity(config.commands.len());
    for entry in &config.commands {
        if !seen.insert(entry.id.as_str()) {
            return Err(RegistryError::DuplicateId(entry.id.clone()));
        }
    }

    config.commands.into_iter().map(parse_entry).collect()
}

fn parse_entry(entry: CommandConfig) -> Result<CommandEntry, RegistryError> {
    let action = match entry.action {
        ActionConfig::Unbound => return Ok(CommandEntry::Unbound(entry.id)),
        ActionConfig::Navigate(path) => Action::Navigate(path),
        ActionConfig::OpenExternal(url) => Action::OpenExternal(url),
        ActionConfig::CopyText(text) => Action::CopyText(text),
        ActionConfig::CopyLocation => Action::CopyCurrentLocation,
    };

    if entry.label.trim().is_empty() {
        return Err(RegistryError::MissingLabel(entry.id));
    }

    let chord = match &entry.chord {
        Some(spec) => Some(spec.resolve().map_err(|error| RegistryError::InvalidChord {
            id: entry.id.clone(),
            error,
        })?),
        None => None,
    };

    Ok(CommandEntry::Command(Command {
        id: entry.id,
        label: entry.label,
        chord,
        group: entry.group,
        action,
    }))
}
