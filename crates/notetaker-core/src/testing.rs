//! In-memory [`NoteService`] for controller tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDateTime;

use crate::client::NoteService;
use crate::models::{Note, NoteId, Page};
use crate::util::lock;
use crate::{Error, ErrorKind, Result};

#[derive(Debug, Default)]
struct Inner {
    notes: Vec<Note>,
    next_id: u64,
    per_page: usize,
    list_delays: HashMap<u32, Duration>,
    fetch_delays: HashMap<NoteId, Duration>,
    fail_next: Option<ErrorKind>,
    calls: usize,
    list_calls: Vec<u32>,
}

/// Behaves like the reference backend: newest first, ceiling page count.
#[derive(Debug, Clone)]
pub struct FakeNoteService {
    inner: Arc<Mutex<Inner>>,
}

pub fn timestamp() -> NaiveDateTime {
    "2024-05-01T10:00:00".parse().unwrap()
}

pub fn error_of(kind: ErrorKind) -> Error {
    match kind {
        ErrorKind::Validation => Error::validation("rejected"),
        ErrorKind::NotFound => Error::NotFound("Note not found (404)".to_string()),
        ErrorKind::ServerTransient => Error::ServerTransient {
            status: 500,
            message: "HTTP 500".to_string(),
        },
        ErrorKind::Transport => Error::Transport("connection reset".to_string()),
        ErrorKind::UnknownClient => Error::UnknownClient("HTTP 418".to_string()),
    }
}

impl FakeNoteService {
    pub fn new(per_page: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_id: 1,
                per_page,
                ..Inner::default()
            })),
        }
    }

    /// Service pre-filled with notes "Note 1".."Note {count}".
    pub fn with_notes(per_page: usize, count: usize) -> Self {
        let service = Self::new(per_page);
        for index in 1..=count {
            service.insert(&format!("Note {index}"));
        }
        service
    }

    pub fn insert(&self, content: &str) -> Note {
        let mut inner = lock(&self.inner);
        let note = Note::new(NoteId::new(inner.next_id), content, timestamp());
        inner.next_id += 1;
        inner.notes.push(note.clone());
        note
    }

    /// Remove a note behind the controller's back.
    pub fn remove(&self, id: NoteId) {
        lock(&self.inner).notes.retain(|note| note.id != id);
    }

    pub fn delay_list(&self, page: u32, delay: Duration) {
        lock(&self.inner).list_delays.insert(page, delay);
    }

    pub fn delay_fetch(&self, id: NoteId, delay: Duration) {
        lock(&self.inner).fetch_delays.insert(id, delay);
    }

    pub fn fail_next(&self, kind: ErrorKind) {
        lock(&self.inner).fail_next = Some(kind);
    }

    pub fn calls(&self) -> usize {
        lock(&self.inner).calls
    }

    pub fn list_calls(&self) -> Vec<u32> {
        lock(&self.inner).list_calls.clone()
    }

    pub fn note_ids(&self) -> Vec<NoteId> {
        lock(&self.inner).notes.iter().map(|note| note.id).collect()
    }

    /// Count the call and surface a queued failure, if any.
    fn begin_call(&self) -> Result<()> {
        let mut inner = lock(&self.inner);
        inner.calls += 1;
        inner.fail_next.take().map_or(Ok(()), |kind| Err(error_of(kind)))
    }
}

impl NoteService for FakeNoteService {
    async fn list_page(&self, page: u32) -> Result<Page> {
        let delay = {
            let mut inner = lock(&self.inner);
            inner.list_calls.push(page);
            inner.list_delays.get(&page).copied()
        };
        self.begin_call()?;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let inner = lock(&self.inner);
        Ok(Page::from_oldest_first(&inner.notes, page, inner.per_page))
    }

    async fn create(&self, content: &str) -> Result<Note> {
        self.begin_call()?;
        Ok(self.insert(content))
    }

    async fn fetch_by_id(&self, id: NoteId) -> Result<Note> {
        let delay = lock(&self.inner).fetch_delays.get(&id).copied();
        self.begin_call()?;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        lock(&self.inner)
            .notes
            .iter()
            .find(|note| note.id == id)
            .cloned()
            .ok_or_else(|| error_of(ErrorKind::NotFound))
    }

    async fn update(&self, id: NoteId, content: &str) -> Result<Note> {
        self.begin_call()?;
        let mut inner = lock(&self.inner);
        let note = inner
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or_else(|| error_of(ErrorKind::NotFound))?;
        note.content = content.to_string();
        Ok(note.clone())
    }

    async fn delete(&self, id: NoteId) -> Result<()> {
        self.begin_call()?;
        self.remove(id);
        Ok(())
    }
}
