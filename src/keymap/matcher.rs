//! Shortcut matching against live keyboard events

use super::chord::parse_chord;
use super::event::KeyEvent;
use super::normalize_token;
use super::types::{Chord, Modifiers};

/// Physical code of the toggle hotkey, for layouts where `K` is not Latin
const TOGGLE_CODE: &str = "KeyK";
const TOGGLE_KEY: &str = "k";

/// Whether a key token names a modifier (`Shift`, `Control`, `Option`, ...)
pub fn is_modifier_token(token: &str) -> bool {
    Modifiers::from_token(&normalize_token(token)).is_some()
}

/// Events that no handler should act on.
///
/// IME compositions and events an earlier handler already claimed are skipped,
/// as are bare modifier presses that arrive while a chord is being held down.
pub fn should_ignore(event: &KeyEvent) -> bool {
    event.is_composing || event.is_default_prevented() || is_modifier_token(&event.key)
}

/// Test a resolved chord against an event.
///
/// Requires key equality and exact modifier-set equality: a superset or a
/// subset of the chord's modifiers never matches. Malformed chords never match.
pub fn matches(chord: &Chord, event: &KeyEvent) -> bool {
    if is_modifier_token(&event.key) || chord.validate().is_err() {
        return false;
    }

    normalize_token(&event.key) == chord.key && event.mods == chord.mods
}

/// Test a raw chord specification against an event; invalid specs never match
pub fn matches_tokens<S: AsRef<str>>(tokens: &[S], event: &KeyEvent) -> bool {
    match parse_chord(tokens) {
        Ok(chord) => matches(&chord, event),
        Err(e) => {
            tracing::trace!("Ignoring invalid chord: {}", e);
            false
        }
    }
}

/// The reserved open/close hotkey: `meta` or `ctrl` held with `K`.
///
/// Other modifiers are not checked here, and the physical `KeyK` code counts
/// as `K` regardless of the active layout.
pub fn is_toggle_hotkey(event: &KeyEvent) -> bool {
    if !(event.mods.meta() || event.mods.ctrl()) {
        return false;
    }

    normalize_token(&event.key) == TOGGLE_KEY || event.code.as_deref() == Some(TOGGLE_CODE)
}

/// Whether a command chord would be swallowed by the toggle hotkey
pub fn conflicts_with_toggle(chord: &Chord) -> bool {
    (chord.mods.meta() || chord.mods.ctrl()) && chord.key == TOGGLE_KEY
}
