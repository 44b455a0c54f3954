use std::io;

use notetaker_core::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{notice} ({source})")]
    Operation {
        notice: &'static str,
        #[source]
        source: notetaker_core::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No note content provided")]
    EmptyContent,
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Invalid note ID: {0}")]
    InvalidNoteId(String),
    #[error("{0}")]
    NoteUnavailable(String),
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
}
