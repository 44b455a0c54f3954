use std::env;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{NaiveDateTime, Utc};
use notetaker_core::list::ListOperation;
use notetaker_core::prompt::{Confirm, PromptForText};
use notetaker_core::{ClientConfig, HttpNoteClient, ListView, Note, NoteId, Route};
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: u64,
    pub preview: String,
    pub content: String,
    pub timestamp: String,
    pub relative_time: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageListing {
    pub notes: Vec<NoteListItem>,
    pub current_page: u32,
    pub total_pages: u32,
}

/// HTTP client for `--api-url`, falling back to the environment.
pub fn connect(api_url: Option<&str>) -> Result<HttpNoteClient, CliError> {
    let env_config = ClientConfig::from_env()?;
    let config = match api_url {
        Some(url) => ClientConfig::new(url)?.with_timeout(env_config.timeout),
        None => env_config,
    };
    tracing::debug!(base_url = %config.base_url, "Using notes API");
    Ok(HttpNoteClient::new(&config)?)
}

/// Wrap a controller failure with the notice shown to the user.
pub fn operation_failed(operation: ListOperation) -> impl Fn(notetaker_core::Error) -> CliError {
    move |source| CliError::Operation {
        notice: operation.failure_notice(&source),
        source,
    }
}

pub fn parse_note_id(raw: &str) -> Result<NoteId, CliError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyNoteId);
    }
    trimmed
        .parse()
        .map_err(|_| CliError::InvalidNoteId(trimmed.to_string()))
}

pub fn write_view(out: &mut impl Write, view: &ListView, as_json: bool) -> Result<(), CliError> {
    if as_json {
        let listing = PageListing {
            notes: view.notes.iter().map(note_to_list_item).collect(),
            current_page: view.pagination.current_page,
            total_pages: view.pagination.total_pages,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&listing)?)?;
    } else {
        for line in render_view(view) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

pub fn render_view(view: &ListView) -> Vec<String> {
    if view.notes.is_empty() {
        return vec!["No notes yet.".to_string()];
    }

    let mut lines = format_note_lines(&view.notes);
    lines.push(String::new());
    lines.push(format!(
        "Page {} of {}  {}",
        view.pagination.current_page, view.pagination.total_pages, view.pagination
    ));
    lines
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    let now = Utc::now().naive_utc();
    notes
        .iter()
        .map(|note| {
            let preview = note_preview(note, 40);
            let relative_time = format_relative_time(note.created_at, now);
            format!("{:>5}  {preview:<40}  {relative_time}", note.id)
        })
        .collect()
}

pub fn render_note_detail(note: &Note) -> Vec<String> {
    let mut lines = vec![
        format!("Note {}", note.id),
        format!("Created {}", note.created_at.format("%Y-%m-%d %H:%M:%S")),
        String::new(),
    ];
    lines.extend(note.content.lines().map(str::to_string));
    lines
}

/// Command that takes the user to `route`.
pub fn route_hint(route: Route) -> String {
    match route {
        Route::List => "notetaker list".to_string(),
        Route::Detail(id) => format!("notetaker show {id}"),
    }
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    let now = Utc::now().naive_utc();
    NoteListItem {
        id: note.id.get(),
        preview: note_preview(note, 80),
        content: note.content.clone(),
        timestamp: note.created_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        relative_time: format_relative_time(note.created_at, now),
    }
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let collapsed = note
        .title_preview(usize::MAX)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp: NaiveDateTime, now: NaiveDateTime) -> String {
    let diff = (now - timestamp).num_milliseconds().max(0);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn resolve_note_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    if let Some(content) = capture_editor_input_with_initial("")? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("notetaker-note-{}-{now}.md", std::process::id()))
}

/// Seeds `$VISUAL`/`$EDITOR` with the current content.
#[derive(Debug, Default, Clone, Copy)]
pub struct EditorPrompt;

impl PromptForText for EditorPrompt {
    fn prompt_for_text(&self, initial: &str) -> Option<String> {
        match capture_editor_input_with_initial(initial) {
            Ok(content) => content,
            Err(error) => {
                tracing::warn!("Editor failed, leaving note unchanged: {error}");
                None
            }
        }
    }
}

/// Asks on the terminal; anything but "y" or "yes" declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, question: &str) -> bool {
        let mut stderr = io::stderr();
        if write!(stderr, "{question} [y/N] ").and_then(|()| stderr.flush()).is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(error) => {
                tracing::warn!("Failed to read confirmation: {error}");
                false
            }
        }
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
