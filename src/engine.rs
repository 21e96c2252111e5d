//! Command palette dispatch engine
//!
//! Owns the overlay's open/closed state and routes keyboard events:
//!
//! ```text
//!            toggle / hotkey
//!   CLOSED ───────────────────▶ OPEN
//!     ▲                          │
//!     └──────────────────────────┘
//!   toggle / hotkey / escape / backdrop / dismiss / command invoked
//! ```
//!
//! Reopening always starts a fresh session. Actions run synchronously against
//! the [`Platform`] and the overlay closes whether they succeed or not.

use std::rc::Rc;

use crate::filter::ListFilter;
use crate::keymap::{is_toggle_hotkey, matches, normalize_token, should_ignore, KeyEvent};
use crate::platform::Platform;
use crate::registry::Registry;
use crate::session::OverlayState;

/// Why the overlay closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// A command was invoked
    Invoked,
    /// The toggle hotkey or trigger was pressed while open
    Toggle,
    Escape,
    Backdrop,
    /// Explicit close button
    Dismissed,
}

/// Result of invoking a command.
///
/// Action failures are logged and swallowed; this records what happened
/// without giving callers an error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Completed { id: String },
    Failed { id: String, error: String },
}

impl Invocation {
    pub fn id(&self) -> &str {
        match self {
            Invocation::Completed { id } | Invocation::Failed { id, .. } => id,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, Invocation::Completed { .. })
    }
}

/// What a keyboard handler did with an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Composing, already handled, or a bare modifier press
    Ignored,
    /// The handler is inactive or nothing matched
    Unhandled,
    /// The overlay was toggled; carries the new open state
    Toggled { is_open: bool },
    Invoked(Invocation),
    Closed(CloseReason),
    /// The highlight moved to this row (`None` when nothing is visible)
    SelectionMoved(Option<usize>),
    /// Enter was pressed with no visible commands
    NothingSelected,
}

impl KeyOutcome {
    /// Whether the event was consumed
    pub fn is_handled(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored | KeyOutcome::Unhandled)
    }
}

/// Routes keyboard events to registry commands and owns the overlay state
pub struct DispatchEngine<P: Platform> {
    registry: Rc<Registry>,
    state: OverlayState,
    platform: P,
    filter: Box<dyn ListFilter>,
}

impl<P: Platform> DispatchEngine<P> {
    pub fn new(registry: Rc<Registry>, platform: P, filter: Box<dyn ListFilter>) -> Self {
        Self {
            registry,
            state: OverlayState::default(),
            platform,
            filter,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Read-only overlay state for the rendering surface
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    // ------------------------------------------------------------------
    // Open/close
    // ------------------------------------------------------------------

    /// Flip the overlay; opening always starts a fresh session
    pub fn toggle(&mut self) -> bool {
        if self.state.is_open() {
            self.close(CloseReason::Toggle);
        } else {
            self.open();
        }
        self.state.is_open()
    }

    /// Open with a fresh session. No-op if already open.
    pub fn open(&mut self) {
        if self.state.is_open() {
            return;
        }
        self.state.open(&self.registry, self.filter.as_mut());
        tracing::debug!(
            "Palette opened ({} commands visible)",
            self.state.visible_commands().len()
        );
    }

    /// Close and discard the session. No-op if already closed.
    pub fn close(&mut self, reason: CloseReason) {
        if !self.state.is_open() {
            return;
        }
        self.state.close();
        tracing::debug!(?reason, "Palette closed");
    }

    /// Close via the close button
    pub fn dismiss(&mut self) {
        self.close(CloseReason::Dismissed);
    }

    /// Close via a click outside the dialog
    pub fn dismiss_backdrop(&mut self) {
        self.close(CloseReason::Backdrop);
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    /// Document-level handler, active whether or not the overlay is open.
    ///
    /// Only the reserved toggle hotkey is recognized here; per-command chords
    /// do nothing while the overlay is closed.
    pub fn handle_global_keydown(&mut self, event: &mut KeyEvent) -> KeyOutcome {
        if event.is_composing || event.is_default_prevented() {
            return KeyOutcome::Ignored;
        }
        if !is_toggle_hotkey(event) {
            return KeyOutcome::Unhandled;
        }

        event.prevent_default();
        let is_open = self.toggle();
        KeyOutcome::Toggled { is_open }
    }

    /// Overlay-scoped handler, active only while open.
    ///
    /// Command chords are tested in registry order and the first match fires.
    /// Otherwise the overlay's own keys apply when pressed without modifiers:
    /// Escape closes, arrows and Home/End move the highlight, Enter confirms.
    pub fn handle_overlay_keydown(&mut self, event: &mut KeyEvent) -> KeyOutcome {
        if !self.state.is_open() {
            return KeyOutcome::Unhandled;
        }
        if should_ignore(event) {
            tracing::trace!("Ignoring keydown {:?}", event.key);
            return KeyOutcome::Ignored;
        }

        let matched = self.registry.iter().position(|command| {
            command
                .chord
                .as_ref()
                .is_some_and(|chord| matches(chord, event))
        });

        if let Some(idx) = matched {
            event.prevent_default();
            event.stop_propagation();
            return KeyOutcome::Invoked(self.invoke_index(idx));
        }

        // Overlay keys only act unmodified
        if !event.mods.is_empty() {
            return KeyOutcome::Unhandled;
        }

        let outcome = match normalize_token(&event.key).as_str() {
            "escape" => {
                self.close(CloseReason::Escape);
                KeyOutcome::Closed(CloseReason::Escape)
            }
            "arrowdown" => {
                self.move_selection(1);
                KeyOutcome::SelectionMoved(self.state.highlighted_index())
            }
            "arrowup" => {
                self.move_selection(-1);
                KeyOutcome::SelectionMoved(self.state.highlighted_index())
            }
            "home" => {
                self.state.select_edge(false);
                KeyOutcome::SelectionMoved(self.state.highlighted_index())
            }
            "end" => {
                self.state.select_edge(true);
                KeyOutcome::SelectionMoved(self.state.highlighted_index())
            }
            "enter" => match self.confirm_selection() {
                Some(invocation) => KeyOutcome::Invoked(invocation),
                None => KeyOutcome::NothingSelected,
            },
            _ => return KeyOutcome::Unhandled,
        };

        event.prevent_default();
        outcome
    }

    /// Run both handlers in capture order: global first, then the overlay
    /// unless the global handler already consumed the event.
    pub fn handle_keydown(&mut self, event: &mut KeyEvent) -> KeyOutcome {
        let global = self.handle_global_keydown(event);
        if global.is_handled() {
            return global;
        }
        self.handle_overlay_keydown(event)
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Replace the search text. No-op while closed.
    pub fn set_query(&mut self, text: &str) {
        if !self.state.is_open() {
            return;
        }
        self.state
            .set_query(&self.registry, self.filter.as_mut(), text);
        tracing::trace!(
            "Query {:?} -> {} visible",
            text,
            self.state.visible_commands().len()
        );
    }

    /// Move the highlight, wrapping at both ends. No-op while closed.
    pub fn move_selection(&mut self, delta: isize) {
        if self.state.is_open() {
            self.state.move_selection(delta);
        }
    }

    /// Invoke the highlighted command; `None` when closed or nothing is visible
    pub fn confirm_selection(&mut self) -> Option<Invocation> {
        if !self.state.is_open() {
            return None;
        }
        let idx = self.state.confirm_selection()?;
        Some(self.invoke_index(idx))
    }

    /// Pointer selection: invoke a visible command by id
    pub fn select(&mut self, id: &str) -> Option<Invocation> {
        if !self.state.is_open() {
            return None;
        }
        let idx = self.registry.index_of(id)?;
        if !self.state.highlight(idx) {
            return None;
        }
        Some(self.invoke_index(idx))
    }

    /// Pointer hover: highlight a visible command by id
    pub fn hover(&mut self, id: &str) -> bool {
        match self.registry.index_of(id) {
            Some(idx) if self.state.is_open() => self.state.highlight(idx),
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Invocation
    // ------------------------------------------------------------------

    fn invoke_index(&mut self, idx: usize) -> Invocation {
        let registry = Rc::clone(&self.registry);
        let Some(command) = registry.at(idx) else {
            self.close(CloseReason::Invoked);
            return Invocation::Failed {
                id: String::new(),
                error: format!("no command at index {}", idx),
            };
        };

        tracing::debug!("Invoking '{}' ({:?})", command.id, command.action);
        let invocation = match command.action.run(&mut self.platform) {
            Ok(()) => Invocation::Completed {
                id: command.id.clone(),
            },
            Err(e) => {
                tracing::warn!("Command '{}' failed: {:#}", command.id, e);
                Invocation::Failed {
                    id: command.id.clone(),
                    error: e.to_string(),
                }
            }
        };

        self.close(CloseReason::Invoked);
        invocation
    }
}

impl<P: Platform + std::fmt::Debug> std::fmt::Debug for DispatchEngine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchEngine")
            .field("state", &self.state)
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}
