//! `todo` binary: terminal front-end over `todo_core`.
//!
//! # Responsibility
//! - Load the list once, run one action (or an interactive session), and
//!   flush pending changes before exiting.
//! - Refuse to overwrite a storage file that exists but could not be read.

mod action;
mod cli;
mod shell;

use action::{execute, Action, CliError};
use clap::Parser;
use cli::{Cli, Command};
use log::info;
use std::io::{self, Write};
use todo_core::{init_logging, AppConfig, TodoApp};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        init_logging(&cli.log_level, log_dir)?;
    }
    info!("event=cli_start module=cli status=ok version={}", todo_core::core_version());

    let config = AppConfig {
        storage_path: cli.file.clone(),
        ..AppConfig::default()
    };
    let (mut app, report) = TodoApp::from_config(&config);

    let load_error = report.load_error.as_ref().map(ToString::to_string);
    if let Some(reason) = &load_error {
        eprintln!("warning: {reason}; starting with an empty list");
    }
    if !report.skipped.is_empty() {
        eprintln!(
            "warning: skipped {} malformed record(s) in `{}`",
            report.skipped.len(),
            config.storage_path.display()
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let action = match cli.command {
        Command::Shell => {
            if let Some(reason) = load_error {
                return Err(CliError::ReadOnly(reason).into());
            }
            shell::run_shell(&mut app, io::stdin().lock(), &mut out)?;
            return Ok(());
        }
        Command::List { hide_done, json } => {
            app.set_show_completed(!hide_done);
            Action::List { json }
        }
        Command::Add { text } => Action::Add(text.join(" ")),
        Command::Toggle { number } => Action::Toggle(number.get() - 1),
        Command::Remove { number } => Action::Remove(number.get() - 1),
        Command::ClearCompleted => Action::ClearCompleted,
        Command::ClearAll => Action::ClearAll,
        Command::Summary => Action::Summary,
    };

    if action.is_mutation() {
        if let Some(reason) = load_error {
            return Err(CliError::ReadOnly(reason).into());
        }
    }

    execute(&mut app, action, &mut out)?;
    out.flush()?;
    app.maybe_save()?;
    Ok(())
}
