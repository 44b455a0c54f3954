//! List view controller.
//!
//! Keeps the visible page consistent with the remote, paginated collection.
//! Every mutation is followed by a fresh load; nothing fetched before a
//! mutation is trusted after it.
//!
//! Loads are tagged with tickets from a monotonic counter. A response is
//! applied only if no newer load was issued while it was in flight, so a slow
//! response can never overwrite a faster, later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::client::NoteService;
use crate::models::{Note, NoteId, Page};
use crate::observer::{SubscriptionId, Subscribers};
use crate::pagination::PaginationModel;
use crate::prompt::{Confirm, PromptForText};
use crate::routes::Route;
use crate::util::{has_content, lock};
use crate::{Error, ErrorKind, Result};

pub const EMPTY_NOTE_MESSAGE: &str = "Note cannot be empty!";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this note?";

/// Whether a load reached the visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was issued before this one resolved; its result was dropped.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Cancelled,
    Superseded,
    /// The presentation layer should show this route.
    Navigate(Route),
}

impl From<LoadOutcome> for ActionOutcome {
    fn from(outcome: LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Applied => Self::Applied,
            LoadOutcome::Superseded => Self::Superseded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOperation {
    Load,
    Add,
    Update,
    Delete,
}

impl ListOperation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Text for the blocking notification shown after a failed operation.
    #[must_use]
    pub const fn failure_notice(self, error: &Error) -> &'static str {
        if matches!(error.kind(), ErrorKind::Validation) {
            return EMPTY_NOTE_MESSAGE;
        }
        match self {
            Self::Load => "Failed to load notes. Please try again.",
            Self::Add => "Failed to add note. Please try again.",
            Self::Update => "Failed to update note. Please try again.",
            Self::Delete => "Failed to delete note. Please try again.",
        }
    }
}

/// Intents the presentation layer sends to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListIntent {
    LoadPage(u32),
    AddNote(String),
    UpdateNote { id: NoteId, content: String },
    DeleteNote { id: NoteId, confirmed: bool },
    OpenNote(NoteId),
}

/// Render-model of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub notes: Vec<Note>,
    pub pagination: PaginationModel,
}

impl ListView {
    #[must_use]
    pub fn from_page(page: &Page) -> Self {
        Self {
            notes: page.notes.clone(),
            pagination: PaginationModel::new(page.current_page, page.total_pages),
        }
    }
}

pub struct NoteListController<S> {
    service: S,
    page: Mutex<Page>,
    latest_ticket: AtomicU64,
    subscribers: Subscribers<ListView>,
}

impl<S> std::fmt::Debug for NoteListController<S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("NoteListController")
            .field("page", &*lock(&self.page))
            .field("latest_ticket", &self.latest_ticket.load(Ordering::SeqCst))
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}

impl<S: NoteService> NoteListController<S> {
    /// A controller on page 1 with nothing loaded yet.
    pub fn new(service: S) -> Self {
        Self {
            service,
            page: Mutex::new(Page::empty(1)),
            latest_ticket: AtomicU64::new(0),
            subscribers: Subscribers::new(),
        }
    }

    pub const fn service(&self) -> &S {
        &self.service
    }

    pub fn current_page(&self) -> u32 {
        lock(&self.page).current_page
    }

    /// The most recently applied page.
    pub fn page(&self) -> Page {
        lock(&self.page).clone()
    }

    pub fn view(&self) -> ListView {
        ListView::from_page(&lock(&self.page))
    }

    /// Register a callback run with the new view after every applied change.
    pub fn subscribe(
        &self,
        callback: impl Fn(&ListView) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Fetch `page` and make it the visible state.
    ///
    /// On failure the visible state is untouched. If the backend reports fewer
    /// pages than `page`, the last existing page (or page 1 when there are no
    /// notes) is loaded instead.
    pub async fn load(&self, page: u32) -> Result<LoadOutcome> {
        if page == 0 {
            return Err(Error::validation("Page numbers start at 1"));
        }

        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let mut target = page;
        loop {
            let fetched = self
                .service
                .list_page(target)
                .await
                .inspect_err(|error| log_failure(ListOperation::Load, error))?;

            if self.latest_ticket.load(Ordering::SeqCst) != ticket {
                tracing::debug!(page = target, ticket, "Discarding superseded notes page");
                return Ok(LoadOutcome::Superseded);
            }

            // An empty collection still shows page 1.
            let last_page = fetched.total_pages.max(1);
            if target > last_page {
                tracing::debug!(
                    requested = target,
                    total_pages = fetched.total_pages,
                    "Requested page is past the end, loading the last page"
                );
                target = last_page;
                continue;
            }

            self.apply(Page {
                current_page: target,
                ..fetched
            });
            return Ok(LoadOutcome::Applied);
        }
    }

    /// Navigate to another page.
    pub async fn set_current_page(&self, page: u32) -> Result<LoadOutcome> {
        self.load(page).await
    }

    /// Re-fetch the current page.
    pub async fn reload(&self) -> Result<LoadOutcome> {
        self.load(self.current_page()).await
    }

    /// Create a note and jump to page 1, where the backend puts new notes.
    ///
    /// Blank content is rejected without contacting the backend.
    pub async fn add_note(&self, content: &str) -> Result<Note> {
        if !has_content(content) {
            return Err(Error::validation(EMPTY_NOTE_MESSAGE));
        }

        let note = self
            .service
            .create(content)
            .await
            .inspect_err(|error| log_failure(ListOperation::Add, error))?;
        tracing::info!(id = %note.id, "Created note");

        self.load(1).await?;
        Ok(note)
    }

    /// Replace a note's content and refresh the current page in place.
    pub async fn update_note(&self, id: NoteId, new_content: &str) -> Result<Note> {
        if !has_content(new_content) {
            return Err(Error::validation(EMPTY_NOTE_MESSAGE));
        }

        let page = self.current_page();
        let note = self
            .service
            .update(id, new_content)
            .await
            .inspect_err(|error| log_failure(ListOperation::Update, error))?;
        tracing::info!(%id, "Updated note");

        self.load(page).await?;
        Ok(note)
    }

    /// Delete a note and refresh, stepping back a page if this one emptied.
    pub async fn delete_note(&self, id: NoteId) -> Result<()> {
        let page = self.current_page();
        self.service
            .delete(id)
            .await
            .inspect_err(|error| log_failure(ListOperation::Delete, error))?;
        tracing::info!(%id, "Deleted note");

        if self.load(page).await? == LoadOutcome::Superseded {
            return Ok(());
        }

        let (is_empty, current_page) = {
            let state = lock(&self.page);
            (state.is_empty(), state.current_page)
        };
        if is_empty && current_page > 1 {
            tracing::debug!(current_page, "Page emptied by delete, stepping back");
            self.load(current_page - 1).await?;
        }
        Ok(())
    }

    /// Ask for new content and update; cancelled or blank input does nothing.
    pub async fn edit_note_with(
        &self,
        id: NoteId,
        current_content: &str,
        prompt: &impl PromptForText,
    ) -> Result<ActionOutcome> {
        let Some(new_content) = prompt
            .prompt_for_text(current_content)
            .filter(|content| has_content(content))
        else {
            return Ok(ActionOutcome::Cancelled);
        };

        self.update_note(id, &new_content).await?;
        Ok(ActionOutcome::Applied)
    }

    /// Confirm, then delete.
    pub async fn delete_note_with(
        &self,
        id: NoteId,
        confirm: &impl Confirm,
    ) -> Result<ActionOutcome> {
        if !confirm.confirm(DELETE_CONFIRMATION) {
            return Ok(ActionOutcome::Cancelled);
        }

        self.delete_note(id).await?;
        Ok(ActionOutcome::Applied)
    }

    pub async fn dispatch(&self, intent: ListIntent) -> Result<ActionOutcome> {
        match intent {
            ListIntent::LoadPage(page) => self.load(page).await.map(Into::into),
            ListIntent::AddNote(content) => {
                self.add_note(&content).await?;
                Ok(ActionOutcome::Applied)
            }
            ListIntent::UpdateNote { id, content } => {
                self.update_note(id, &content).await?;
                Ok(ActionOutcome::Applied)
            }
            ListIntent::DeleteNote { id, confirmed } => {
                if !confirmed {
                    return Ok(ActionOutcome::Cancelled);
                }
                self.delete_note(id).await?;
                Ok(ActionOutcome::Applied)
            }
            ListIntent::OpenNote(id) => Ok(ActionOutcome::Navigate(Route::Detail(id))),
        }
    }

    fn apply(&self, page: Page) {
        let view = ListView::from_page(&page);
        *lock(&self.page) = page;
        self.subscribers.notify(&view);
    }
}

fn log_failure(operation: ListOperation, error: &Error) {
    tracing::warn!(
        operation = operation.as_str(),
        kind = %error.kind(),
        "Error during note {} operation: {}",
        operation.as_str(),
        error
    );
}
