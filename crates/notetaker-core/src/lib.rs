//! notetaker-core - Core library for Notetaker
//!
//! This crate contains the shared models, the REST client, and the view
//! controllers used by every Notetaker interface (CLI, reference API, tests).

pub mod client;
pub mod config;
pub mod detail;
pub mod error;
pub mod list;
pub mod models;
pub mod observer;
pub mod pagination;
pub mod prompt;
pub mod routes;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpNoteClient, NoteService};
pub use config::ClientConfig;
pub use detail::{DetailState, NoteDetailController};
pub use error::{Error, ErrorKind, Result};
pub use list::{ActionOutcome, ListIntent, ListOperation, ListView, LoadOutcome, NoteListController};
pub use models::{Note, NoteId, Page};
pub use routes::Route;
