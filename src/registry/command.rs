//! Command and action types

use std::rc::Rc;

use crate::keymap::Chord;
use crate::platform::Platform;

/// Callback behind [`Action::Custom`]
pub type ActionFn = Rc<dyn Fn() -> anyhow::Result<()>>;

/// What a command does when invoked.
///
/// Declarative variants are executed against the host [`Platform`]; `Custom`
/// runs an arbitrary callback. All of them are opaque to the engine.
#[derive(Clone)]
pub enum Action {
    /// Full-page transition to a site path
    Navigate(String),
    /// Open a URL in a new browsing context
    OpenExternal(String),
    /// Write fixed text to the clipboard
    CopyText(String),
    /// Write the current location to the clipboard
    CopyCurrentLocation,
    Custom(ActionFn),
}

impl Action {
    /// Wrap a callback as an action
    pub fn custom(f: impl Fn() -> anyhow::Result<()> + 'static) -> Self {
        Action::Custom(Rc::new(f))
    }

    /// Perform the side effect
    pub fn run<P: Platform + ?Sized>(&self, platform: &mut P) -> anyhow::Result<()> {
        match self {
            Action::Navigate(path) => platform.navigate(path)?,
            Action::OpenExternal(url) => platform.open_external(url)?,
            Action::CopyText(text) => platform.write_text(text)?,
            Action::CopyCurrentLocation => {
                let location = platform.current_location();
                platform.write_text(&location)?
            }
            Action::Custom(f) => f()?,
        }
        Ok(())
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Navigate(path) => f.debug_tuple("Navigate").field(path).finish(),
            Action::OpenExternal(url) => f.debug_tuple("OpenExternal").field(url).finish(),
            Action::CopyText(text) => f.debug_tuple("CopyText").field(text).finish(),
            Action::CopyCurrentLocation => write!(f, "CopyCurrentLocation"),
            Action::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// A named, invocable palette entry
#[derive(Debug, Clone)]
pub struct Command {
    /// Stable identifier, unique within a registry
    pub id: String,
    pub label: String,
    pub chord: Option<Chord>,
    /// Display category ("Navigation", "Links", ...)
    pub group: String,
    pub action: Action,
}

impl Command {
    /// Create a command without a chord
    pub fn new(id: &str, label: &str, group: &str, action: Action) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            chord: None,
            group: group.to_string(),
            action,
        }
    }

    /// Bind a chord (builder pattern)
    pub fn with_chord(mut self, chord: Chord) -> Self {
        self.chord = Some(chord);
        self
    }

    /// Display string for this command's chord, if bound
    pub fn chord_display(&self) -> Option<String> {
        self.chord.as_ref().map(Chord::display_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::Modifiers;
    use crate::platform::{DryRunPlatform, Effect};
    use std::cell::Cell;

    #[test]
    fn test_copy_current_location_uses_platform_location() {
        let mut platform = DryRunPlatform::new("https://example.com/blog");
        Action::CopyCurrentLocation.run(&mut platform).unwrap();
        assert_eq!(
            platform.effects(),
            &[Effect::WriteText("https://example.com/blog".to_string())]
        );
    }

    #[test]
    fn test_custom_action_runs_callback() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let action = Action::custom(move || {
            counter.set(counter.get() + 1);
            Ok(())
        });

        let mut platform = DryRunPlatform::default();
        action.run(&mut platform).unwrap();
        action.run(&mut platform).unwrap();
        assert_eq!(calls.get(), 2);
        assert!(platform.effects().is_empty());
    }

    #[test]
    fn test_custom_action_error_is_returned() {
        let action = Action::custom(|| anyhow::bail!("denied"));
        let err = action.run(&mut DryRunPlatform::default()).unwrap_err();
        assert_eq!(err.to_string(), "denied");
    }

    #[test]
    fn test_chord_display() {
        let cmd = Command::new("home", "Go to Home", "Navigation", Action::Navigate("/".into()))
            .with_chord(Chord::new("h", Modifiers::SHIFT));
        assert_eq!(cmd.chord_display().as_deref(), Some("shift + H"));

        let cmd = Command::new("x", "X", "General", Action::CopyCurrentLocation);
        assert_eq!(cmd.chord_display(), None);
    }
}
