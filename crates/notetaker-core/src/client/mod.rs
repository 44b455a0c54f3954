//! Remote note service.
//!
//! [`NoteService`] is the seam the controllers depend on; [`HttpNoteClient`]
//! implements it against the REST backend and classifies every failure into
//! one of the [`ErrorKind`](crate::ErrorKind)s before it reaches a caller.

mod http;

pub use http::{classify_status, HttpNoteClient};

use crate::models::{Note, NoteId, Page};
use crate::Result;

/// The five remote operations on the note collection.
///
/// Each call resolves once the backend has answered; nothing is buffered
/// locally.
#[allow(async_fn_in_trait)]
pub trait NoteService {
    /// Fetch one page (1-based) of notes.
    async fn list_page(&self, page: u32) -> Result<Page>;

    /// Create a note. Content must already be non-blank.
    async fn create(&self, content: &str) -> Result<Note>;

    /// Fetch a single note.
    async fn fetch_by_id(&self, id: NoteId) -> Result<Note>;

    /// Replace a note's content.
    async fn update(&self, id: NoteId, content: &str) -> Result<Note>;

    /// Delete a note. Only the acknowledgement matters.
    async fn delete(&self, id: NoteId) -> Result<()>;
}
