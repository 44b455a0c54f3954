use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "notetaker")]
#[command(about = "Read and edit notes stored behind the Notetaker REST API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the notes API (defaults to NOTETAKER_API_URL or http://localhost:5000/api)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note and show the first page
    #[command(alias = "new")]
    Add {
        /// Note content (read from stdin or $EDITOR when omitted)
        content: Vec<String>,
    },
    /// Show one page of notes, newest first
    List {
        /// Page to show
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single note
    Show {
        /// Note ID
        id: String,
    },
    /// Edit an existing note
    Edit {
        /// Note ID
        id: String,
        /// Page to show afterwards
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// New content; opens $VISUAL/$EDITOR when omitted
        #[arg(long, value_name = "TEXT")]
        content: Option<String>,
    },
    /// Delete an existing note
    Delete {
        /// Note ID
        id: String,
        /// Page to show afterwards
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
