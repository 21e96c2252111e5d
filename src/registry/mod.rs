//! The command registry
//!
//! An ordered, immutable catalog of palette commands. Construction validates
//! the whole set up front so an engine is never started on a registry with
//! conflicting shortcuts:
//! - ids are unique
//! - every chord has exactly one non-modifier key
//! - no two commands resolve to the same chord
//! - no command chord shadows the reserved toggle hotkey
//!
//! # Loading
//!
//! ```ignore
//! // Embedded defaults layered with ~/.config/palette-engine/palette.yaml
//! let registry = load_default_registry()?;
//!
//! // Or a single YAML file
//! let registry = load_registry_file(Path::new("palette.yaml"))?;
//! ```

mod command;
mod config;
mod defaults;

use std::collections::HashMap;

use crate::keymap::{conflicts_with_toggle, Chord, ChordError};

pub use command::{Action, ActionFn, Command};
pub use config::{
    load_entries_file, load_registry_file, parse_entries_yaml, parse_registry_yaml, CommandEntry,
};
pub use defaults::{
    default_commands, load_default_registry, load_layered_registry, merge_commands,
};

/// Validated, read-only command catalog
#[derive(Debug, Clone)]
pub struct Registry {
    commands: Vec<Command>,
    by_id: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry, rejecting duplicate ids and conflicting chords
    pub fn new(commands: Vec<Command>) -> Result<Self, RegistryError> {
        let mut by_id = HashMap::with_capacity(commands.len());
        let mut by_chord: HashMap<&Chord, &str> = HashMap::new();

        for (idx, command) in commands.iter().enumerate() {
            if by_id.insert(command.id.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateId(command.id.clone()));
            }

            let Some(chord) = &command.chord else {
                continue;
            };

            chord
                .validate()
                .map_err(|error| RegistryError::InvalidChord {
                    id: command.id.clone(),
                    error,
                })?;

            if conflicts_with_toggle(chord) {
                return Err(RegistryError::ReservedChord {
                    id: command.id.clone(),
                    chord: chord.clone(),
                });
            }

            if let Some(first) = by_chord.insert(chord, &command.id) {
                return Err(RegistryError::DuplicateChord {
                    chord: chord.clone(),
                    first: first.to_string(),
                    second: command.id.clone(),
                });
            }
        }

        tracing::debug!("Built registry with {} commands", commands.len());
        Ok(Self { commands, by_id })
    }

    /// All commands in registry order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Look up a command by id
    pub fn get(&self, id: &str) -> Option<&Command> {
        self.index_of(id).map(|idx| &self.commands[idx])
    }

    /// Position of a command in registry order
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Command at a registry position
    pub fn at(&self, idx: usize) -> Option<&Command> {
        self.commands.get(idx)
    }

    /// Group names in first-seen order
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for command in &self.commands {
            if !groups.contains(&command.group.as_str()) {
                groups.push(&command.group);
            }
        }
        groups
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// Errors that can occur when building or loading a registry
#[derive(Debug, Clone)]
pub enum RegistryError {
    IoError(String),
    ParseError(String),
    InvalidChord { id: String, error: ChordError },
    MissingLabel(String),
    DuplicateId(String),
    DuplicateChord {
        chord: Chord,
        first: String,
        second: String,
    },
    ReservedChord { id: String, chord: Chord },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::IoError(e) => write!(f, "IO error: {}", e),
            RegistryError::ParseError(e) => write!(f, "Parse error: {}", e),
            RegistryError::InvalidChord { id, error } => {
                write!(f, "Invalid chord for command '{}': {}", id, error)
            }
            RegistryError::MissingLabel(id) => write!(f, "Command '{}' has no label", id),
            RegistryError::DuplicateId(id) => write!(f, "Duplicate command id: {}", id),
            RegistryError::DuplicateChord {
                chord,
                first,
                second,
            } => write!(
                f,
                "Chord {} is bound to both '{}' and '{}'",
                chord, first, second
            ),
            RegistryError::ReservedChord { id, chord } => write!(
                f,
                "Command '{}' uses {}, which is reserved for the palette hotkey",
                id, chord
            ),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::InvalidChord { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::Modifiers;

    fn nav(id: &str, label: &str, key: &str) -> Command {
        Command::new(id, label, "Navigation", Action::Navigate(format!("/{}", id)))
            .with_chord(Chord::new(key, Modifiers::SHIFT))
    }

    #[test]
    fn test_registry_preserves_order_and_lookup() {
        let registry = Registry::new(vec![
            nav("home", "Go to Home", "h"),
            nav("blog", "Go to Blog", "b"),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.commands()[0].id, "home");
        assert_eq!(registry.get("blog").unwrap().label, "Go to Blog");
        assert_eq!(registry.index_of("blog"), Some(1));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_chord_is_rejected() {
        let result = Registry::new(vec![
            nav("home", "Go to Home", "h"),
            nav("help", "Help", "H"),
        ]);

        match result {
            Err(RegistryError::DuplicateChord { first, second, .. }) => {
                assert_eq!(first, "home");
                assert_eq!(second, "help");
            }
            other => panic!("Expected DuplicateChord, got {:?}", other),
        }
    }

    #[test]
    fn test_same_key_different_modifiers_is_allowed() {
        let alt_h = Command::new("hist", "History", "General", Action::Navigate("/h".into()))
            .with_chord(Chord::new("h", Modifiers::ALT));
        assert!(Registry::new(vec![nav("home", "Go to Home", "h"), alt_h]).is_ok());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let result = Registry::new(vec![
            nav("home", "Go to Home", "h"),
            nav("home", "Home Again", "j"),
        ]);
        assert!(matches!(result, Err(RegistryError::DuplicateId(id)) if id == "home"));
    }

    #[test]
    fn test_reserved_chord_is_rejected() {
        let cmd = Command::new("k", "Kill", "General", Action::CopyCurrentLocation)
            .with_chord(Chord::new("k", Modifiers::META));
        assert!(matches!(
            Registry::new(vec![cmd]),
            Err(RegistryError::ReservedChord { .. })
        ));
    }

    #[test]
    fn test_malformed_chords_are_rejected() {
        let blank = Command::new("blank", "Blank", "General", Action::Navigate("/x".into()))
            .with_chord(Chord::new("  ", Modifiers::NONE));
        assert!(matches!(
            Registry::new(vec![blank]),
            Err(RegistryError::InvalidChord {
                ref id,
                error: ChordError::EmptyToken(_),
            }) if id == "blank"
        ));

        let shift_only = Command::new("s", "Shift", "General", Action::CopyCurrentLocation)
            .with_chord(Chord::new("shift", Modifiers::SHIFT));
        assert!(matches!(
            Registry::new(vec![shift_only]),
            Err(RegistryError::InvalidChord {
                error: ChordError::MissingKey(_),
                ..
            })
        ));
    }

    #[test]
    fn test_commands_without_chords_never_conflict() {
        let a = Command::new("a", "A", "General", Action::CopyCurrentLocation);
        let b = Command::new("b", "B", "General", Action::CopyCurrentLocation);
        assert!(Registry::new(vec![a, b]).is_ok());
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let copy = Command::new("copy", "Copy Link", "General", Action::CopyCurrentLocation);
        let gh = Command::new("gh", "GitHub", "Links", Action::OpenExternal("u".into()));
        let registry =
            Registry::new(vec![copy, nav("home", "Go to Home", "h"), gh]).unwrap();
        assert_eq!(registry.groups(), vec!["General", "Navigation", "Links"]);
    }
}
