//! Command palette dispatch engine
//!
//! This crate provides the core of a command palette overlay: a validated
//! command registry, a keyboard chord matcher, and the engine that owns the
//! overlay's open/closed state and routes keydowns to command actions.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod engine;
pub mod filter;
pub mod keymap;
pub mod listeners;
pub mod platform;
pub mod registry;
pub mod session;
pub mod tracing;

// Re-export commonly used types
pub use config::PaletteConfig;
pub use engine::{CloseReason, DispatchEngine, Invocation, KeyOutcome};
pub use keymap::{Chord, KeyEvent, Modifiers};
pub use platform::Platform;
pub use registry::{Action, Command, Registry, RegistryError};
pub use session::OverlayState;
