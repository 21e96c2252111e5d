//! Keyboard chord matching
//!
//! This module turns chord specifications into resolved [`Chord`]s and tests
//! them against live [`KeyEvent`]s:
//! - Tokens are trimmed and lower-cased, modifier aliases canonicalized
//! - A chord is a modifier set plus exactly one non-modifier key
//! - Matching requires exact modifier-set equality
//!
//! # Architecture
//!
//! ```text
//! ["shift", "H"] → parse_chord() → Chord ─┐
//!                                         ├→ matches() → bool
//! host keydown   →       KeyEvent  ───────┘
//! ```

mod chord;
mod event;
mod matcher;
mod types;

pub use chord::{parse_chord, parse_chord_str, ChordError};
pub use event::KeyEvent;
pub use matcher::{
    conflicts_with_toggle, is_modifier_token, is_toggle_hotkey, matches, matches_tokens,
    should_ignore,
};
pub use types::{Chord, Modifiers};

/// Normalize a key or modifier token for comparison
pub fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase()
}
