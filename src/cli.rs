//! Command-line argument parsing for the palette tool
//!
//! Supports:
//! - Validating a registry file
//! - Listing the grouped commands, optionally filtered by a query
//! - Replaying key presses through the engine without side effects

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::keymap::{ChordError, KeyEvent};

/// Command palette dispatch engine
#[derive(Parser, Debug)]
#[command(name = "palette", version, about = "Command palette dispatch engine")]
pub struct CliArgs {
    /// Registry file to use instead of the embedded defaults + user overrides
    #[arg(short, long, value_name = "FILE", global = true)]
    pub registry: Option<PathBuf>,

    /// Config file to use instead of ~/.config/palette-engine/config.yaml
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Validate a registry and report conflicts
    Check {
        /// Registry file (defaults to the effective registry)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Print the grouped command list
    List {
        /// Only show commands matching this search text
        #[arg(short, long)]
        query: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Replay key presses, e.g. `press meta+k =copy Enter`
    ///
    /// Each step is a chord (`meta+k`, `shift+H`, `ArrowDown`) or, when it
    /// starts with `=`, the new search text.
    Press {
        #[arg(value_name = "STEPS", required = true, allow_hyphen_values = true)]
        steps: Vec<String>,
    },
}

/// One replayed input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Key(KeyEvent),
    Query(String),
}

impl Step {
    pub fn parse(raw: &str) -> Result<Self, ChordError> {
        match raw.strip_prefix('=') {
            Some(text) => Ok(Step::Query(text.to_string())),
            None => KeyEvent::from_chord_str(raw).map(Step::Key),
        }
    }
}
