//! Core types for chord matching: Modifiers and Chord

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Resolve a modifier token (already trimmed and lower-cased) to its flag.
    ///
    /// Aliases: `option` is `alt`, `cmd`/`command` is `meta`, `control` is `ctrl`.
    pub fn from_token(token: &str) -> Option<Modifiers> {
        match token {
            "shift" => Some(Modifiers::SHIFT),
            "alt" | "option" => Some(Modifiers::ALT),
            "meta" | "cmd" | "command" => Some(Modifiers::META),
            "ctrl" | "control" => Some(Modifiers::CTRL),
            _ => None,
        }
    }

    /// Canonical token names for the held modifiers, in display order
    pub fn tokens(self) -> Vec<&'static str> {
        let mut parts = Vec::with_capacity(4);
        if self.ctrl() {
            parts.push("ctrl");
        }
        if self.alt() {
            parts.push("alt");
        }
        if self.shift() {
            parts.push("shift");
        }
        if self.meta() {
            parts.push("meta");
        }
        parts
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens().join(" + "))
    }
}

/// A resolved key chord: a modifier set plus exactly one non-modifier key.
///
/// The key is stored trimmed and lower-cased, so two chords are equal iff they
/// would match the same keyboard events.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Chord {
    pub(super) key: String,
    pub(super) mods: Modifiers,
}

impl Chord {
    /// Create a chord, normalizing the key.
    ///
    /// The shape is not checked here; see [`Chord::validate`].
    pub fn new(key: &str, mods: Modifiers) -> Self {
        Self {
            key: super::normalize_token(key),
            mods,
        }
    }

    /// The normalized key
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mods(&self) -> Modifiers {
        self.mods
    }

    /// Display string for the rendering surface, e.g. `shift + H`
    pub fn display_string(&self) -> String {
        let mut parts: Vec<String> = self
            .mods
            .tokens()
            .into_iter()
            .map(str::to_string)
            .collect();
        parts.push(display_key(&self.key));
        parts.join(" + ")
    }
}

fn display_key(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if chars.as_str().is_empty() => first.to_uppercase().to_string(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.mods.tokens().join("+"), self.key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_empty() {
        let mods = Modifiers::NONE;
        assert!(mods.is_empty());
        assert!(!mods.ctrl());
        assert!(!mods.shift());
        assert!(!mods.alt());
        assert!(!mods.meta());
    }

    #[test]
    fn test_modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(mods.ctrl());
        assert!(mods.shift());
        assert!(!mods.alt());
        assert!(!mods.meta());
    }

    #[test]
    fn test_modifier_aliases() {
        assert_eq!(Modifiers::from_token("option"), Some(Modifiers::ALT));
        assert_eq!(Modifiers::from_token("cmd"), Some(Modifiers::META));
        assert_eq!(Modifiers::from_token("command"), Some(Modifiers::META));
        assert_eq!(Modifiers::from_token("control"), Some(Modifiers::CTRL));
        assert_eq!(Modifiers::from_token("h"), None);
    }

    #[test]
    fn test_chord_key_is_lowercased() {
        assert_eq!(
            Chord::new("H", Modifiers::SHIFT),
            Chord::new("h", Modifiers::SHIFT)
        );
    }

    #[test]
    fn test_chord_display_string() {
        assert_eq!(Chord::new("H", Modifiers::SHIFT).display_string(), "shift + H");
        assert_eq!(
            Chord::new("escape", Modifiers::NONE).display_string(),
            "Escape"
        );
        assert_eq!(
            Chord::new("k", Modifiers::META | Modifiers::SHIFT).to_string(),
            "shift+meta+k"
        );
    }
}
