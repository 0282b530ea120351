#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod cli;
mod commands;
mod error_fmt;
mod logging;
mod report;

use clap::Parser;
use eyre::{Result, WrapErr};
use winding_config::Config;

use crate::cli::{Cli, Commands, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let _ = color_eyre::install();

    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = run(cli) {
        let json = JSON_MODE.get().copied().unwrap_or(false);
        if json {
            println!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

fn load_config(cli: &Cli) -> Result<Option<Config>> {
    let Some(path) = cli.config.as_deref() else {
        return Ok(None);
    };
    let cfg = winding_config::load_file(path)?;
    cfg.validate()
        .wrap_err_with(|| format!("invalid config {}", path.display()))?;
    Ok(Some(cfg))
}

fn run(cli: Cli) -> Result<()> {
    let cfg = load_config(&cli)?;
    // Held until `run` returns so the file writer flushes.
    let _guard = logging::init_tracing(
        cli.json,
        cli.log_level.as_deref(),
        cfg.as_ref().map(|c| &c.logging),
    )?;
    if let Some(path) = &cli.config {
        tracing::debug!(config = %path.display(), "config loaded");
    }

    let cfg = cfg.as_ref();
    match &cli.cmd {
        Commands::Calc { machine } => commands::run_calc(cfg, machine, cli.json),
        Commands::Table {
            machine,
            phase,
            layer,
        } => commands::run_table(
            cfg,
            machine,
            phase.as_deref(),
            layer.as_deref(),
            cli.json,
        ),
        Commands::Chains { machine, phase } => {
            commands::run_chains(cfg, machine, phase.as_deref(), cli.json)
        }
        Commands::Animate { machine, steps } => {
            commands::run_animate(cfg, machine, *steps, cli.json)
        }
        Commands::Batch { csv } => commands::run_batch(csv, cli.json),
    }
}
