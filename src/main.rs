//! `palette`: inspect and exercise a command registry from the terminal

use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;

use palette_engine::cli::{CliArgs, CliCommand, Step};
use palette_engine::config::PaletteConfig;
use palette_engine::engine::{DispatchEngine, KeyOutcome};
use palette_engine::platform::DryRunPlatform;
use palette_engine::registry::{load_default_registry, load_registry_file, Registry};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    palette_engine::tracing::init();

    let config = match &args.config {
        Some(path) => PaletteConfig::load_from(path),
        None => PaletteConfig::load(),
    };

    match args.command {
        CliCommand::Check { ref file } => {
            let path = file.as_ref().or(args.registry.as_ref());
            let registry = match path {
                Some(path) => load_registry_file(path)
                    .with_context(|| format!("Invalid registry {}", path.display()))?,
                None => load_default_registry().context("Invalid registry (embedded defaults + user palette.yaml)")?,
            };
            println!(
                "OK: {} commands in {} groups",
                registry.len(),
                registry.groups().len()
            );
        }
        CliCommand::List { ref query, json } => {
            let registry = load_registry(&args)?;
            let mut engine = build_engine(registry, &config);
            engine.open();
            if let Some(query) = query {
                engine.set_query(query);
            }
            print_visible(&engine, json)?;
        }
        CliCommand::Press { ref steps } => {
            let registry = load_registry(&args)?;
            let mut engine = build_engine(registry, &config);
            for raw in steps {
                let step = Step::parse(raw).with_context(|| format!("Bad step {:?}", raw))?;
                replay(&mut engine, raw, step);
            }
            println!("open: {}", engine.is_open());
        }
    }

    Ok(())
}

fn load_registry(args: &CliArgs) -> Result<Registry> {
    match &args.registry {
        Some(path) => load_registry_file(path)
            .with_context(|| format!("Invalid registry {}", path.display())),
        None => load_default_registry().context("Invalid registry (embedded defaults + user palette.yaml)"),
    }
}

fn build_engine(registry: Registry, config: &PaletteConfig) -> DispatchEngine<DryRunPlatform> {
    let location = format!("{}/", config.site_url.trim_end_matches('/'));
    DispatchEngine::new(
        Rc::new(registry),
        DryRunPlatform::new(&location),
        config.filter.build(),
    )
}

fn replay(engine: &mut DispatchEngine<DryRunPlatform>, raw: &str, step: Step) {
    match step {
        Step::Query(text) => {
            engine.set_query(&text);
            println!(
                "{:<12} query {:?} ({} visible)",
                raw,
                text,
                engine.state().visible_commands().len()
            );
        }
        Step::Key(mut event) => {
            let outcome = engine.handle_keydown(&mut event);
            let summary = match &outcome {
                KeyOutcome::Ignored => "ignored".to_string(),
                KeyOutcome::Unhandled => "no effect".to_string(),
                KeyOutcome::Toggled { is_open: true } => "opened".to_string(),
                KeyOutcome::Toggled { is_open: false } => "closed".to_string(),
                KeyOutcome::Invoked(invocation) if invocation.succeeded() => {
                    format!("invoked {}", invocation.id())
                }
                KeyOutcome::Invoked(invocation) => format!("{} failed", invocation.id()),
                KeyOutcome::Closed(reason) => format!("closed ({:?})", reason),
                KeyOutcome::SelectionMoved(Some(row)) => format!("highlight row {}", row),
                KeyOutcome::SelectionMoved(None) | KeyOutcome::NothingSelected => {
                    "nothing selected".to_string()
                }
            };
            println!("{:<12} {}", raw, summary);
            for effect in engine.platform_mut().take_effects() {
                println!("{:<12}   -> {}", "", effect);
            }
        }
    }
}

fn print_visible(engine: &DispatchEngine<DryRunPlatform>, json: bool) -> Result<()> {
    let registry = engine.registry();
    let visible = engine.state().visible_commands();

    if json {
        let groups: Vec<serde_json::Value> = visible
            .groups()
            .iter()
            .map(|group| {
                let commands: Vec<serde_json::Value> = group
                    .commands
                    .iter()
                    .filter_map(|&idx| registry.at(idx))
                    .map(|c| {
                        serde_json::json!({
                            "id": c.id,
                            "label": c.label,
                            "chord": c.chord_display(),
                        })
                    })
                    .collect();
                serde_json::json!({ "group": group.name, "commands": commands })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if visible.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    for group in visible.groups() {
        println!("{}", group.name.to_uppercase());
        for command in group.commands.iter().filter_map(|&idx| registry.at(idx)) {
            println!(
                "  {:<12} {:<20} {}",
                command.id,
                command.label,
                command.chord_display().unwrap_or_default()
            );
        }
    }
    Ok(())
}
