//! routebook CLI - track the shops on a sales route from the terminal
//!
//! Customers and regions live in a local `SQLite` file. When Supabase
//! credentials are configured, every change is mirrored to the hosted tables.

mod cli;
mod commands;
mod config_profiles;
mod error;
#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::app_context;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::dashboard::run_dashboard;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::import::run_import;
use crate::commands::list::run_list;
use crate::commands::mark::run_mark;
use crate::commands::regions::run_regions;
use crate::commands::reset::run_reset;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        if let Some(hint) = error.hint() {
            eprintln!("Hint: {hint}");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("routebook=info".parse().map_err(|error| {
                    CliError::Config(format!("invalid log directive: {error}"))
                })?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let profile = cli.profile.as_deref();
    let db_path = cli.db_path;

    match command {
        Commands::List { filter, json } => {
            run_list(&filter, json, &app_context(db_path, profile)?).await?;
        }
        Commands::Add { fields, status } => {
            run_add(&fields, status, &app_context(db_path, profile)?).await?;
        }
        Commands::Edit { id, fields } => {
            run_edit(&id, &fields, &app_context(db_path, profile)?).await?;
        }
        Commands::Mark { id, status } => {
            run_mark(&id, status, &app_context(db_path, profile)?).await?;
        }
        Commands::Delete { id } => run_delete(&id, &app_context(db_path, profile)?).await?,
        Commands::Regions { command } => {
            run_regions(command, &app_context(db_path, profile)?).await?;
        }
        Commands::Dashboard { json } => {
            run_dashboard(json, &app_context(db_path, profile)?).await?;
        }
        Commands::Reset { yes } => run_reset(yes, &app_context(db_path, profile)?).await?,
        Commands::Import { path } => {
            run_import(&path, &app_context(db_path, profile)?).await?;
        }
        Commands::Export {
            filter,
            format,
            output,
            stdout,
        } => {
            let ctx = app_context(db_path, profile)?;
            run_export(&filter, format, output.as_deref(), stdout, &ctx).await?;
        }
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
        Commands::Config { command } => run_config(command, profile)?,
    }

    Ok(())
}
