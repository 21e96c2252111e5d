//! Default registry for the palette
//!
//! The standard commands ship embedded from palette.yaml at the crate root,
//! with hardcoded fallbacks if that ever fails to parse.

use std::path::Path;

use super::command::{Action, Command};
use super::config::{load_entries_file, parse_entries_yaml, CommandEntry};
use super::{Registry, RegistryError};
use crate::keymap::{Chord, Modifiers};

/// Default registry YAML embedded at compile time
const DEFAULT_REGISTRY_YAML: &str = include_str!("../../palette.yaml");

/// Load the effective registry: embedded defaults + user overrides
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default registry (compiled into binary)
/// 2. User file at ~/.config/palette-engine/palette.yaml
pub fn load_default_registry() -> Result<Registry, RegistryError> {
    let user_path = crate::config_paths::registry_file();
    load_layered_registry(user_path.as_deref())
}

/// Layer the file at `user_path` (if it exists) over the embedded defaults.
///
/// A user file that fails to load, or whose merged result fails validation,
/// is an error; nothing from it is silently dropped.
pub fn load_layered_registry(user_path: Option<&Path>) -> Result<Registry, RegistryError> {
    let base = embedded_commands();

    let Some(path) = user_path.filter(|p| p.exists()) else {
        return Registry::new(base);
    };

    let user_entries = load_entries_file(path).inspect_err(|e| {
        tracing::error!("Failed to load user registry from {}: {}", path.display(), e)
    })?;
    tracing::info!(
        "Merging user registry from {} ({} entries)",
        path.display(),
        user_entries.len()
    );

    Registry::new(merge_commands(base, user_entries)).inspect_err(|e| {
        tracing::error!("User registry at {} is invalid: {}", path.display(), e)
    })
}

fn embedded_commands() -> Vec<Command> {
    match parse_entries_yaml(DEFAULT_REGISTRY_YAML) {
        Ok(entries) => {
            let commands = merge_commands(Vec::new(), entries);
            tracing::debug!("Loaded embedded default registry ({} commands)", commands.len());
            commands
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded registry: {}, using hardcoded defaults",
                e
            );
            default_commands()
        }
    }
}

/// Merge user entries into base commands
///
/// - A user command with an existing id replaces it in place
/// - An `unbound` entry removes the command with that id
/// - Otherwise the user command is appended
pub fn merge_commands(base: Vec<Command>, user: Vec<CommandEntry>) -> Vec<Command> {
    let mut result = base;

    for entry in user {
        match entry {
            CommandEntry::Unbound(id) => result.retain(|c| c.id != id),
            CommandEntry::Command(command) => {
                if let Some(existing) = result.iter_mut().find(|c| c.id == command.id) {
                    *existing = command;
                } else {
                    result.push(command);
                }
            }
        }
    }

    result
}

/// Hardcoded default commands (fallback if palette.yaml fails to parse)
pub fn default_commands() -> Vec<Command> {
    let shift = |key: &str| Chord::new(key, Modifiers::SHIFT);
    let navigate = |path: &str| Action::Navigate(path.to_string());
    let open = |url: &str| Action::OpenExternal(url.to_string());

    vec![
        Command::new("home", "Go to Home", "Navigation", navigate("/")).with_chord(shift("h")),
        Command::new("projects", "Go to Projects", "Navigation", navigate("/project"))
            .with_chord(shift("p")),
        Command::new("blog", "Go to Blog", "Navigation", navigate("/blog"))
            .with_chord(shift("b")),
        Command::new("about", "Go to About", "Navigation", navigate("/about"))
            .with_chord(shift("a")),
        Command::new("contact", "Go to Contact", "Navigation", navigate("/contact"))
            .with_chord(shift("c")),
        Command::new(
            "twitter",
            "X Profile",
            "Links",
            open("https://twitter.com/JudeTejada2"),
        )
        .with_chord(shift("x")),
        Command::new(
            "linkedin",
            "LinkedIn Profile",
            "Links",
            open("https://www.linkedin.com/in/jude-tejada-696051199/"),
        )
        .with_chord(shift("l")),
        Command::new(
            "github",
            "GitHub Profile",
            "Links",
            open("https://github.com/JudeTejada"),
        )
        .with_chord(shift("g")),
        Command::new("copy", "Copy Link", "General", Action::CopyCurrentLocation)
            .with_chord(shift("y")),
    ]
}
