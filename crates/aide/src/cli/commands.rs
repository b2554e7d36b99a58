//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Flow of one invocation
//!
//! 1. Parse arguments (clap).
//! 2. Commands that need no data (`completions`, `config template`) run right away.
//! 3. Load configuration, start file logging, open the stores.
//! 4. Dispatch one `(feature, keyword, args)` command.
//! 5. Save every store the command changed, then render the result. Output can
//!    no longer cost a change once it is on disk.

use super::complete::write_completions;
use super::render;
use super::setup::{Cli, Commands, ConfigCommands};
use aideapp::config::{default_config_file, AideConfig};
use aideapp::init::{initialize, resolve_data_dir, AideContext};
use aideapp::logging::{init_logging, logging_status};
use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // No config, logging or stores needed for these
    match &cli.command {
        Commands::Completions { shell } => {
            write_completions(*shell, &mut std::io::stdout());
            return Ok(());
        }
        Commands::Config {
            action: Some(ConfigCommands::Template),
        } => {
            render::print_text(&AideConfig::template())?;
            return Ok(());
        }
        _ => {}
    }

    let config = AideConfig::load().context("failed to load configuration")?;
    let data_dir = resolve_data_dir(cli.data.as_deref(), &config)?;
    start_logging(&cli, &config, &data_dir);

    let mut ctx = initialize(cli.data.as_deref(), config)?;
    render::eprint_messages(&ctx.notices());

    match cli.command {
        Commands::Contacts { keyword, args } => {
            run_feature(&mut ctx, "contacts", &keyword, &args, cli.json)
        }
        Commands::Notes { keyword, args } => run_feature(&mut ctx, "notes", &keyword, &args, cli.json),
        Commands::Catalog => {
            let catalog = ctx.assistant.catalog();
            if cli.json {
                render::print_json(&catalog)?;
            } else {
                render::print_text(&render::format_catalog(&catalog))?;
            }
            Ok(())
        }
        Commands::Config { .. } => show_config(&ctx, cli.json),
        Commands::Completions { .. } => Ok(()),
    }
}

fn start_logging(cli: &Cli, config: &AideConfig, data_dir: &Path) {
    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    // Running without logs beats not running
    if let Err(e) = init_logging(level, &data_dir.join("logs")) {
        if cli.verbose {
            eprintln!("{}", format!("Logging disabled: {}", e).yellow());
        }
    }
}

fn run_feature(
    ctx: &mut AideContext,
    feature: &str,
    keyword: &str,
    args: &[String],
    json: bool,
) -> Result<()> {
    let result = ctx.assistant.dispatch(feature, keyword, args)?;
    let report = ctx.assistant.flush();
    let printed = render::print_result(&result, json, Local::now().date_naive());

    if !report.is_ok() {
        for (path, err) in &report.failed {
            eprintln!(
                "{}",
                format!(
                    "Warning: changes were NOT saved to {} ({}). They are lost.",
                    path.display(),
                    err
                )
                .red()
                .bold()
            );
        }
        bail!("{} store(s) could not be saved", report.failed.len());
    }
    Ok(printed?)
}

#[derive(Serialize)]
struct ConfigView<'a> {
    config_file: Option<PathBuf>,
    data_dir: &'a Path,
    log_dir: Option<PathBuf>,
    log_level: &'a str,
    contacts_file: &'a str,
    notes_file: &'a str,
}

fn show_config(ctx: &AideContext, json: bool) -> Result<()> {
    let view = ConfigView {
        config_file: default_config_file(),
        data_dir: &ctx.data_dir,
        log_dir: logging_status().map(|(_, dir)| dir),
        log_level: &ctx.config.log_level,
        contacts_file: &ctx.config.contacts_file,
        notes_file: &ctx.config.notes_file,
    };
    if json {
        render::print_json(&view)?;
        return Ok(());
    }

    let config_file = match &view.config_file {
        Some(path) if path.exists() => path.display().to_string(),
        Some(path) => format!("{} (not present)", path.display()),
        None => "(none)".to_string(),
    };
    let log_dir = match &view.log_dir {
        Some(dir) => dir.display().to_string(),
        None => "(logging disabled)".to_string(),
    };
    let lines = [
        ("config_file", config_file),
        ("data_dir", view.data_dir.display().to_string()),
        ("log_dir", log_dir),
        ("log_level", view.log_level.to_string()),
        ("contacts_file", view.contacts_file.to_string()),
        ("notes_file", view.notes_file.to_string()),
    ];
    let text: String = lines
        .iter()
        .map(|(key, value)| format!("{} = {}\n", key.bold(), value))
        .collect();
    render::print_text(&text)?;
    Ok(())
}
