//! Live keyboard events as delivered by the rendering surface

use super::chord::{parse_chord_str, ChordError};
use super::types::Modifiers;

/// A keydown event.
///
/// `key` is the logical key value (`"H"`, `"Escape"`, `"Shift"`), `code` the
/// physical key (`"KeyK"`) when the host knows it. Handlers mark the event
/// with [`KeyEvent::prevent_default`] and [`KeyEvent::stop_propagation`] the
/// same way a DOM listener would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub code: Option<String>,
    pub mods: Modifiers,
    /// An IME composition is in progress
    pub is_composing: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, mods: Modifiers) -> Self {
        Self {
            key: key.into(),
            code: None,
            mods,
            is_composing: false,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// A key press with no modifiers held
    pub fn key(key: impl Into<String>) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Attach the physical key code (builder pattern)
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Mark the event as part of an IME composition (builder pattern)
    pub fn composing(mut self) -> Self {
        self.is_composing = true;
        self
    }

    /// Synthesize the event a user would produce by pressing `spec`
    /// (e.g. `"meta+k"`, `"shift+H"`, `"ArrowDown"`).
    pub fn from_chord_str(spec: &str) -> Result<Self, ChordError> {
        let chord = parse_chord_str(spec)?;
        let key = spec
            .rsplit('+')
            .map(str::trim)
            .find(|token| Modifiers::from_token(&token.to_lowercase()).is_none())
            .unwrap_or(chord.key.as_str())
            .to_string();
        Ok(Self::new(key, chord.mods))
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_start_clear() {
        let event = KeyEvent::key("a");
        assert!(!event.is_default_prevented());
        assert!(!event.is_propagation_stopped());
        assert!(!event.is_composing);
    }

    #[test]
    fn test_prevent_and_stop() {
        let mut event = KeyEvent::key("a");
        event.prevent_default();
        event.stop_propagation();
        assert!(event.is_default_prevented());
        assert!(event.is_propagation_stopped());
    }

    #[test]
    fn test_from_chord_str_keeps_key_case() {
        let event = KeyEvent::from_chord_str("shift+H").unwrap();
        assert_eq!(event.key, "H");
        assert_eq!(event.mods, Modifiers::SHIFT);

        let event = KeyEvent::from_chord_str("ArrowDown").unwrap();
        assert_eq!(event.key, "ArrowDown");
        assert!(event.mods.is_empty());
    }
}
