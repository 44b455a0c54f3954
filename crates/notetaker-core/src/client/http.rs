//! `reqwest`-backed implementation of [`NoteService`].

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::NoteService;
use crate::config::{ClientConfig, ConfigError};
use crate::models::{Note, NoteId, Page};
use crate::util::{compact_text, has_content};
use crate::{Error, Result};

/// HTTP client for the notes REST API.
#[derive(Debug, Clone)]
pub struct HttpNoteClient {
    base_url: String,
    client: Client,
}

impl HttpNoteClient {
    pub fn new(config: &ClientConfig) -> std::result::Result<Self, ConfigError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    /// Builds a client for an explicit API base URL with default settings.
    pub fn from_base_url(base_url: impl AsRef<str>) -> std::result::Result<Self, ConfigError> {
        Self::new(&ClientConfig::new(base_url)?)
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: NoteId) -> String {
        format!("{}/notes/{id}", self.base_url)
    }

    /// Send a request and return the body of a successful response.
    ///
    /// Failing to get a response, or losing the connection while reading it,
    /// is a transport error; a non-success status is classified from the body.
    async fn execute(&self, request: RequestBuilder) -> Result<String> {
        let response = request.header("Accept", "application/json").send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(classify_status(status, &body));
        }
        Ok(body)
    }
}

impl NoteService for HttpNoteClient {
    async fn list_page(&self, page: u32) -> Result<Page> {
        if page == 0 {
            return Err(Error::validation("Page numbers start at 1"));
        }

        tracing::debug!(page, "Fetching notes page");
        let body = self
            .execute(self.client.get(self.notes_url()).query(&[("page", page)]))
            .await?;
        let payload: PageResponse = decode(&body, "notes page")?;
        Ok(payload.into_page(page))
    }

    async fn create(&self, content: &str) -> Result<Note> {
        ensure_content(content)?;

        let body = self
            .execute(
                self.client
                    .post(self.notes_url())
                    .json(&serde_json::json!({ "content": content })),
            )
            .await?;
        let payload: NoteResponse = decode(&body, "created note")?;
        Ok(payload.into_note())
    }

    async fn fetch_by_id(&self, id: NoteId) -> Result<Note> {
        tracing::debug!(%id, "Fetching note");
        let body = self.execute(self.client.get(self.note_url(id))).await?;
        let payload: NoteResponse = decode(&body, "note")?;
        Ok(payload.into_note())
    }

    async fn update(&self, id: NoteId, content: &str) -> Result<Note> {
        ensure_content(content)?;

        let body = self
            .execute(
                self.client
                    .put(self.note_url(id))
                    .json(&serde_json::json!({ "content": content })),
            )
            .await?;
        let payload: NoteResponse = decode(&body, "updated note")?;
        Ok(payload.into_note())
    }

    async fn delete(&self, id: NoteId) -> Result<()> {
        self.execute(self.client.delete(self.note_url(id))).await?;
        Ok(())
    }
}

/// Map a non-success status and its body to an error.
pub fn classify_status(status: StatusCode, body: &str) -> Error {
    let message = parse_api_error(status, body);
    if status == StatusCode::NOT_FOUND {
        Error::NotFound(message)
    } else if status.is_server_error() {
        Error::ServerTransient {
            status: status.as_u16(),
            message,
        }
    } else {
        Error::UnknownClient(message)
    }
}

fn ensure_content(content: &str) -> Result<()> {
    if has_content(content) {
        Ok(())
    } else {
        Err(Error::validation("Note content cannot be empty"))
    }
}

fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|error| Error::UnknownClient(format!("Failed to parse {what} response: {error}")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse {
    notes: Vec<Note>,
    total_pages: u32,
    #[serde(default)]
    total_notes: Option<u64>,
}

impl PageResponse {
    fn into_page(self, requested: u32) -> Page {
        Page {
            notes: self.notes,
            current_page: requested,
            total_pages: self.total_pages,
            total_notes: self.total_notes,
        }
    }
}

/// Mutations answer either with the note or with `{message, note}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NoteResponse {
    Envelope { note: Note },
    Bare(Note),
}

impl NoteResponse {
    fn into_note(self) -> Note {
        match self {
            Self::Envelope { note } | Self::Bare(note) => note,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.error.or(payload.message) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}
