//! Notetaker CLI - read and edit notes from the terminal
//!
//! Talks to the Notetaker REST API through the same controllers every other
//! front end uses.

mod cli;
mod commands;
mod error;

#[cfg(test)]
mod tests;

use std::io;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::{connect, resolve_note_content, EditorPrompt, TerminalConfirm};
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::show::run_show;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("notetaker=info")),
        )
        .init();

    let cli = Cli::parse();
    let api_url = cli.api_url.as_deref();
    let mut out = io::stdout();

    match cli.command {
        Some(Commands::Add { content }) => {
            let content = resolve_note_content(&content)?;
            run_add(connect(api_url)?, &content, &mut out).await?;
        }
        Some(Commands::List { page, json }) => {
            run_list(connect(api_url)?, page, json, &mut out).await?;
        }
        Some(Commands::Show { id }) => run_show(connect(api_url)?, &id, &mut out).await?,
        Some(Commands::Edit { id, page, content }) => {
            let client = connect(api_url)?;
            run_edit(client, &id, page, content.as_deref(), &EditorPrompt, &mut out).await?;
        }
        Some(Commands::Delete { id, page, yes }) => {
            let client = connect(api_url)?;
            if yes {
                let always = |_: &str| -> bool { true };
                run_delete(client, &id, page, &always, &mut out).await?;
            } else {
                run_delete(client, &id, page, &TerminalConfirm, &mut out).await?;
            }
        }
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref(), &mut out)?;
        }
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
