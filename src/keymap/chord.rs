//! Chord specification parsing
//!
//! Turns token lists like `["shift", "H"]` or strings like `"cmd+k"` into a
//! resolved [`Chord`].

use std::str::FromStr;

use super::normalize_token;
use super::types::{Chord, Modifiers};

/// Parse a chord from its tokens.
///
/// Every token is normalized and modifier aliases are canonicalized. The chord
/// must contain exactly one non-modifier token.
pub fn parse_chord<S: AsRef<str>>(tokens: &[S]) -> Result<Chord, ChordError> {
    let spec = tokens
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join("+");

    let mut mods = Modifiers::NONE;
    let mut key: Option<String> = None;

    for token in tokens {
        let normalized = normalize_token(token.as_ref());
        if normalized.is_empty() {
            return Err(ChordError::EmptyToken(spec));
        }

        if let Some(flag) = Modifiers::from_token(&normalized) {
            mods |= flag;
            continue;
        }

        if key.is_some() {
            return Err(ChordError::MultipleKeys(spec));
        }
        key = Some(normalized);
    }

    let key = key.ok_or_else(|| ChordError::MissingKey(spec))?;
    Ok(Chord { key, mods })
}

/// Parse a `+`-joined chord string like `"shift+h"`
pub fn parse_chord_str(spec: &str) -> Result<Chord, ChordError> {
    let tokens: Vec<&str> = spec.split('+').collect();
    parse_chord(&tokens)
}

impl Chord {
    /// Check that the chord holds exactly one non-modifier key.
    ///
    /// Chords built through [`parse_chord`] always pass; hand-built ones
    /// from [`Chord::new`] may not.
    pub fn validate(&self) -> Result<(), ChordError> {
        let error: fn(String) -> ChordError = if self.key.is_empty() {
            ChordError::EmptyToken
        } else if Modifiers::from_token(&self.key).is_some() {
            ChordError::MissingKey
        } else if self.key.contains('+') {
            ChordError::MultipleKeys
        } else {
            return Ok(());
        };
        Err(error(self.to_string()))
    }
}

impl FromStr for Chord {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_chord_str(s)
    }
}

/// A malformed chord specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordError {
    /// Only modifiers were given
    MissingKey(String),
    /// More than one non-modifier token was given
    MultipleKeys(String),
    /// A token was blank after trimming
    EmptyToken(String),
}

impl std::fmt::Display for ChordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChordError::MissingKey(s) => write!(f, "No key found in chord: {}", s),
            ChordError::MultipleKeys(s) => write!(f, "Multiple keys in chord: {}", s),
            ChordError::EmptyToken(s) => write!(f, "Empty token in chord: {}", s),
        }
    }
}

impl std::error::Error for ChordError {}
