//! Detail view controller for a single note.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::client::NoteService;
use crate::list::LoadOutcome;
use crate::models::{Note, NoteId};
use crate::observer::{SubscriptionId, Subscribers};
use crate::routes::Route;
use crate::util::lock;
use crate::{Error, ErrorKind};

pub const NOT_FOUND_REASON: &str = "Failed to load note. It may not exist.";
pub const RETRY_REASON: &str = "Failed to load note. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded(Note),
    Error { reason: String, kind: ErrorKind },
}

impl DetailState {
    /// Map a fetch failure to the message shown in place of the note.
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        let reason = match error.kind() {
            ErrorKind::NotFound => NOT_FOUND_REASON,
            _ => RETRY_REASON,
        };
        Self::Error {
            reason: reason.to_string(),
            kind: error.kind(),
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn note(&self) -> Option<&Note> {
        match self {
            Self::Loaded(note) => Some(note),
            _ => None,
        }
    }

    /// The back-to-list affordance, offered once loading has settled.
    #[must_use]
    pub const fn back_to_list(&self) -> Option<Route> {
        match self {
            Self::Loading => None,
            Self::Loaded(_) | Self::Error { .. } => Some(Route::List),
        }
    }
}

pub struct NoteDetailController<S> {
    service: S,
    state: Mutex<DetailState>,
    latest_ticket: AtomicU64,
    subscribers: Subscribers<DetailState>,
}

impl<S> std::fmt::Debug for NoteDetailController<S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("NoteDetailController")
            .field("state", &*lock(&self.state))
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}

impl<S: NoteService> NoteDetailController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: Mutex::new(DetailState::Loading),
            latest_ticket: AtomicU64::new(0),
            subscribers: Subscribers::new(),
        }
    }

    /// Construct and immediately fetch `id`.
    pub async fn for_note(service: S, id: NoteId) -> Self {
        let controller = Self::new(service);
        controller.open(id).await;
        controller
    }

    pub fn state(&self) -> DetailState {
        lock(&self.state).clone()
    }

    pub fn subscribe(
        &self,
        callback: impl Fn(&DetailState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Show `id`, replacing whatever was shown before.
    ///
    /// Failures become [`DetailState::Error`]; only a newer `open` can
    /// keep this one from settling.
    pub async fn open(&self, id: NoteId) -> LoadOutcome {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_state(DetailState::Loading);

        let result = self.service.fetch_by_id(id).await;
        if self.latest_ticket.load(Ordering::SeqCst) != ticket {
            tracing::debug!(%id, ticket, "Discarding superseded note fetch");
            return LoadOutcome::Superseded;
        }

        let next = match result {
            Ok(note) => DetailState::Loaded(note),
            Err(error) => {
                tracing::error!(%id, kind = %error.kind(), "Error loading note: {error}");
                DetailState::from_error(&error)
            }
        };
        self.set_state(next);
        LoadOutcome::Applied
    }

    fn set_state(&self, state: DetailState) {
        *lock(&self.state) = state.clone();
        self.subscribers.notify(&state);
    }
}
