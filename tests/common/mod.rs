//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::rc::Rc;

use palette_engine::engine::DispatchEngine;
use palette_engine::filter::SubstringFilter;
use palette_engine::keymap::{Chord, KeyEvent, Modifiers};
use palette_engine::platform::{Platform, PlatformError};
use palette_engine::registry::{Action, Command, Registry};

/// A platform call as seen by [`RecordingPlatform`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Navigate(String),
    OpenExternal(String),
    WriteText(String),
}

/// Records every platform call and can be told to fail clipboard writes
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    pub location: String,
    pub calls: Vec<Call>,
    pub deny_clipboard: bool,
}

impl RecordingPlatform {
    pub fn at(location: &str) -> Self {
        Self {
            location: location.to_string(),
            ..Default::default()
        }
    }
}

impl Platform for RecordingPlatform {
    fn navigate(&mut self, path: &str) -> Result<(), PlatformError> {
        self.calls.push(Call::Navigate(path.to_string()));
        self.location = path.to_string();
        Ok(())
    }

    fn open_external(&mut self, url: &str) -> Result<(), PlatformError> {
        self.calls.push(Call::OpenExternal(url.to_string()));
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), PlatformError> {
        self.calls.push(Call::WriteText(text.to_string()));
        if self.deny_clipboard {
            return Err(PlatformError::Clipboard("permission denied".to_string()));
        }
        Ok(())
    }

    fn current_location(&self) -> String {
        self.location.clone()
    }
}

/// Two-command registry: "Go to Home" (shift+H) and "Copy Link" (shift+Y)
pub fn sample_registry() -> Registry {
    Registry::new(vec![
        Command::new(
            "home",
            "Go to Home",
            "Navigation",
            Action::Navigate("/".to_string()),
        )
        .with_chord(Chord::new("h", Modifiers::SHIFT)),
        Command::new("copy", "Copy Link", "General", Action::CopyCurrentLocation)
            .with_chord(Chord::new("y", Modifiers::SHIFT)),
    ])
    .unwrap()
}

/// Engine over [`sample_registry`] with a substring filter
pub fn sample_engine() -> DispatchEngine<RecordingPlatform> {
    engine_with(sample_registry())
}

pub fn engine_with(registry: Registry) -> DispatchEngine<RecordingPlatform> {
    DispatchEngine::new(
        Rc::new(registry),
        RecordingPlatform::at("https://example.com/blog"),
        Box::new(SubstringFilter),
    )
}

/// Build a keydown from a chord string such as `meta+k` or `ArrowDown`
pub fn key(spec: &str) -> KeyEvent {
    KeyEvent::from_chord_str(spec).unwrap()
}

/// Labels of the visible rows, in display order
pub fn visible_labels<P: Platform>(engine: &DispatchEngine<P>) -> Vec<String> {
    engine
        .state()
        .visible_commands()
        .iter()
        .filter_map(|idx| engine.registry().at(idx))
        .map(|c| c.label.clone())
        .collect()
}

/// Group names of the visible view, in display order
pub fn visible_groups<P: Platform>(engine: &DispatchEngine<P>) -> Vec<String> {
    engine
        .state()
        .visible_commands()
        .groups()
        .iter()
        .map(|g| g.name.clone())
        .collect()
}
