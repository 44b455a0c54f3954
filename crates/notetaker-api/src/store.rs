//! In-memory note storage.

use chrono::Utc;
use notetaker_core::{Note, NoteId, Page};
use tokio::sync::RwLock;

#[derive(Debug)]
struct Inner {
    /// Insertion order, oldest first
    notes: Vec<Note>,
    next_id: u64,
}

/// Notes kept in process memory. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct NoteStore {
    inner: RwLock<Inner>,
    page_size: usize,
}

impl NoteStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                notes: Vec::new(),
                next_id: 1,
            }),
            page_size: page_size.max(1),
        }
    }

    /// Newest-first window for `page`. Pages past the end come back empty.
    pub async fn page(&self, page: u32) -> Page {
        let inner = self.inner.read().await;
        Page::from_oldest_first(&inner.notes, page, self.page_size)
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.notes.len()
    }

    pub async fn create(&self, content: &str) -> Note {
        let mut inner = self.inner.write().await;
        let note = Note::new(
            NoteId::new(inner.next_id),
            content,
            Utc::now().naive_utc(),
        );
        inner.next_id += 1;
        inner.notes.push(note.clone());
        note
    }

    pub async fn get(&self, id: NoteId) -> Option<Note> {
        let inner = self.inner.read().await;
        inner.notes.iter().find(|note| note.id == id).cloned()
    }

    /// Replace the content of `id`. The creation timestamp is left alone.
    pub async fn update(&self, id: NoteId, content: &str) -> Option<Note> {
        let mut inner = self.inner.write().await;
        let note = inner.notes.iter_mut().find(|note| note.id == id)?;
        content.clone_into(&mut note.content);
        Some(note.clone())
    }

    /// Returns whether a note was removed.
    pub async fn delete(&self, id: NoteId) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.notes.len();
        inner.notes.retain(|note| note.id != id);
        inner.notes.len() != before
    }
}
