use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{NaiveDateTime, TimeDelta};
use clap::Parser;
use notetaker_api::AppConfig;
use notetaker_core::{HttpNoteClient, ListView, Note, NoteId, NoteService, Page, Route};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::cli::{Cli, Commands, CompletionShell};
use crate::commands::add::run_add;
use crate::commands::common::{
    default_editor, format_relative_time, is_affirmative, normalize_content, note_preview,
    parse_note_id, render_view, route_hint,
};
use crate::commands::completions::render_completions;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::show::run_show;
use crate::error::CliError;

fn timestamp() -> NaiveDateTime {
    "2024-05-01T10:00:00".parse().unwrap()
}

fn output_of(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).unwrap()
}

async fn start_server(page_size: usize) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = Arc::new(AppConfig {
        bind_addr: addr,
        page_size,
    });
    let (shutdown, stopped) = oneshot::channel::<()>();
    tokio::spawn(async move {
        notetaker_api::serve(listener, config, async move {
            stopped.await.ok();
        })
        .await
        .unwrap();
    });
    (addr, shutdown)
}

fn client_for(addr: SocketAddr) -> HttpNoteClient {
    HttpNoteClient::from_base_url(format!("http://{addr}/api")).unwrap()
}

#[test]
fn normalize_content_trims_and_rejects_empty() {
    assert_eq!(normalize_content("  hello  "), Some("hello".to_string()));
    assert_eq!(normalize_content(" \n\t "), None);
}

#[test]
fn normalize_content_keeps_multiline_text() {
    assert_eq!(
        normalize_content("line 1\nline 2\n"),
        Some("line 1\nline 2".to_string())
    );
}

#[test]
fn default_editor_is_defined() {
    assert!(!default_editor().is_empty());
}

#[test]
fn format_relative_time_units() {
    let now = timestamp();
    assert_eq!(format_relative_time(now - TimeDelta::seconds(30), now), "just now");
    assert_eq!(format_relative_time(now - TimeDelta::minutes(2), now), "2m ago");
    assert_eq!(format_relative_time(now - TimeDelta::hours(2), now), "2h ago");
    assert_eq!(format_relative_time(now + TimeDelta::minutes(5), now), "just now");
}

#[test]
fn note_preview_truncates_with_ellipsis() {
    let note = Note::new(
        NoteId::new(1),
        "This is a very long sentence that should be shortened",
        timestamp(),
    );
    assert_eq!(note_preview(&note, 20), "This is a very lo...");
}

#[test]
fn note_preview_uses_first_line_only() {
    let note = Note::new(NoteId::new(1), "Groceries\nmilk\neggs", timestamp());
    assert_eq!(note_preview(&note, 40), "Groceries");
}

#[test]
fn parse_note_id_rejects_blank_and_garbage() {
    assert_eq!(parse_note_id(" 7 ").unwrap(), NoteId::new(7));
    assert!(matches!(parse_note_id("  "), Err(CliError::EmptyNoteId)));
    assert!(matches!(parse_note_id("abc"), Err(CliError::InvalidNoteId(_))));
}

#[test]
fn affirmative_answers() {
    assert!(is_affirmative("y\n"));
    assert!(is_affirmative(" YES "));
    assert!(!is_affirmative(""));
    assert!(!is_affirmative("n"));
    assert!(!is_affirmative("yep"));
}

#[test]
fn route_hints_point_at_commands() {
    assert_eq!(route_hint(Route::List), "notetaker list");
    assert_eq!(route_hint(Route::Detail(NoteId::new(4))), "notetaker show 4");
}

#[test]
fn empty_view_renders_placeholder() {
    let view = ListView::from_page(&Page::empty(1));
    assert_eq!(render_view(&view), vec!["No notes yet.".to_string()]);
}

#[test]
fn view_ends_with_pagination_line() {
    let page = Page {
        notes: vec![Note::new(NoteId::new(3), "Third", timestamp())],
        current_page: 2,
        total_pages: 2,
        total_notes: Some(3),
    };
    let lines = render_view(&ListView::from_page(&page));

    assert!(lines[0].contains("Third"));
    assert_eq!(lines.last().unwrap(), "Page 2 of 2  Prev 1 [2] (Next)");
}

#[test]
fn cli_rejects_page_zero() {
    assert!(Cli::try_parse_from(["notetaker", "list", "--page", "0"]).is_err());
}

#[test]
fn cli_parses_delete_with_global_api_url() {
    let cli = Cli::try_parse_from([
        "notetaker",
        "delete",
        "3",
        "--yes",
        "--api-url",
        "http://example.test/api",
    ])
    .unwrap();

    assert_eq!(cli.api_url.as_deref(), Some("http://example.test/api"));
    assert!(matches!(
        cli.command,
        Some(Commands::Delete { ref id, page: 1, yes: true }) if id == "3"
    ));
}

#[test]
fn completions_name_the_binary() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("notetaker"));
}

#[tokio::test]
async fn add_then_list_as_json() {
    let (addr, _shutdown) = start_server(2).await;

    let mut added = Vec::new();
    run_add(client_for(addr), "first", &mut added).await.unwrap();
    run_add(client_for(addr), "second", &mut added).await.unwrap();
    run_add(client_for(addr), "third", &mut added).await.unwrap();
    assert!(output_of(added).contains("Created note 3"));

    let mut listed = Vec::new();
    run_list(client_for(addr), 2, true, &mut listed).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&output_of(listed)).unwrap();

    assert_eq!(json["currentPage"], 2);
    assert_eq!(json["totalPages"], 2);
    assert_eq!(json["notes"][0]["content"], "first");
}

#[tokio::test]
async fn list_past_the_end_shows_last_page() {
    let (addr, _shutdown) = start_server(2).await;
    let client = client_for(addr);
    for content in ["a", "b", "c"] {
        client.create(content).await.unwrap();
    }

    let mut out = Vec::new();
    run_list(client, 9, false, &mut out).await.unwrap();

    assert!(output_of(out).contains("Page 2 of 2"));
}

#[tokio::test]
async fn declined_delete_keeps_note() {
    let (addr, _shutdown) = start_server(5).await;
    let client = client_for(addr);
    client.create("keep me").await.unwrap();

    let mut out = Vec::new();
    let decline = |_: &str| -> bool { false };
    run_delete(client.clone(), "1", 1, &decline, &mut out)
        .await
        .unwrap();

    assert!(output_of(out).starts_with("Delete cancelled"));
    assert_eq!(client.fetch_by_id(NoteId::new(1)).await.unwrap().content, "keep me");
}

#[tokio::test]
async fn confirmed_delete_removes_note() {
    let (addr, _shutdown) = start_server(5).await;
    let client = client_for(addr);
    client.create("bye").await.unwrap();

    let mut out = Vec::new();
    let accept = |_: &str| -> bool { true };
    run_delete(client.clone(), "1", 1, &accept, &mut out)
        .await
        .unwrap();

    let output = output_of(out);
    assert!(output.starts_with("Deleted note 1"));
    assert!(output.contains("No notes yet."));
}

#[tokio::test]
async fn edit_seeds_prompt_with_current_content() {
    let (addr, _shutdown) = start_server(5).await;
    let client = client_for(addr);
    client.create("draft").await.unwrap();

    let mut out = Vec::new();
    let prompt = |initial: &str| -> Option<String> { Some(format!("{initial} v2")) };
    run_edit(client.clone(), "1", 1, None, &prompt, &mut out)
        .await
        .unwrap();

    assert_eq!(client.fetch_by_id(NoteId::new(1)).await.unwrap().content, "draft v2");
}

#[tokio::test]
async fn blank_edit_content_is_rejected() {
    let (addr, _shutdown) = start_server(5).await;
    let client = client_for(addr);
    client.create("original").await.unwrap();

    let mut out = Vec::new();
    let prompt = |_: &str| -> Option<String> { None };
    let err = run_edit(client, "1", 1, Some("   "), &prompt, &mut out)
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Note cannot be empty!"));
}

#[tokio::test]
async fn show_missing_note_points_back_to_list() {
    let (addr, _shutdown) = start_server(5).await;

    let mut out = Vec::new();
    let err = run_show(client_for(addr), "12", &mut out).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Failed to load note. It may not exist."));
    assert!(message.contains("notetaker list"));
}

#[tokio::test]
async fn show_prints_note_content() {
    let (addr, _shutdown) = start_server(5).await;
    let client = client_for(addr);
    client.create("line one\nline two").await.unwrap();

    let mut out = Vec::new();
    run_show(client, "1", &mut out).await.unwrap();

    let output = output_of(out);
    assert!(output.starts_with("Note 1\n"));
    assert!(output.contains("line two"));
}
