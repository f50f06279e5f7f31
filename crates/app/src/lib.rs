//! Front end for the boredom-busters activity recommender.
//!
//! [`run`] parses the command line, initialises logging, applies the config
//! file, and dispatches to a subcommand or the interactive menu. The model
//! pipeline is async; each action is driven to completion on a
//! current-thread runtime before the next one starts.

pub mod cli;
pub mod commands;
pub mod config;
pub mod interactive;
pub mod render;
pub mod session;

use anyhow::{Context, Result};
use busters_backend::BackendKind;
use busters_intelligence::RetryPolicy;
use busters_model::{Constraints, Rating};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::cli::{CatalogCommand, Cli, Commands};
use crate::session::Session;

/// The main entry point for the `busters` application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    config::apply_config_to_env(cli.backend.map(BackendKind::from));

    let kind = resolve_backend(&cli)?;
    let data_dir = resolve_data_dir(&cli)?;
    let policy = RetryPolicy::from_env();
    tracing::debug!(
        backend = %kind,
        data_dir = %data_dir.display(),
        max_attempts = policy.max_attempts(),
        "starting session"
    );
    let session = Session::new(&data_dir, kind, cli.model.clone(), policy);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let mut out = std::io::stdout();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => interactive::run_menu(&session, &rt),
        Commands::Save {
            user,
            responses,
            budget,
            time,
            people,
        } => {
            let constraints = Constraints::new(budget, time, people);
            report(rt.block_on(commands::save(
                &session,
                &mut out,
                &user,
                &responses,
                constraints,
            )))
        }
        Commands::Suggest { user, rating } => {
            let ask = move || -> Result<Rating> {
                match rating {
                    Some(value) => Ok(Rating::new(value)?),
                    None => interactive::prompt_rating(),
                }
            };
            report(rt.block_on(commands::suggest(&session, &mut out, &user, ask)))
        }
        Commands::History { user, limit } => {
            report(commands::history(&session, &mut out, &user, limit))
        }
        Commands::Catalog { action } => match action {
            CatalogCommand::Init { force } => commands::catalog_init(&session, &mut out, force),
            CatalogCommand::List => commands::catalog_list(&session, &mut out),
        },
    }
}

/// Print a failed command the way the menu does and exit non-zero.
fn report(result: Result<()>) -> Result<()> {
    if let Err(e) = result {
        tracing::error!(error = %format!("{e:#}"), "command failed");
        eprintln!("{}", render::error(&e));
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "busters=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `--backend` (or `BUSTERS_BACKEND` at parse time), then a value the config
/// file put in the environment, then Groq.
fn resolve_backend(cli: &Cli) -> Result<BackendKind> {
    if let Some(arg) = cli.backend {
        return Ok(arg.into());
    }
    match std::env::var("BUSTERS_BACKEND") {
        Ok(raw) => Ok(raw.parse()?),
        Err(_) => Ok(BackendKind::default()),
    }
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => busters_state::data_dir(),
    }
}
