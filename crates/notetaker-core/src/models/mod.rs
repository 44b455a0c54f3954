//! Data models for Notetaker

mod note;
mod page;

pub use note::{Note, NoteId};
pub use page::{total_pages_for, Page};
