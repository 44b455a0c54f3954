use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use notetaker_core::util::has_content;
use notetaker_core::{Note, NoteId, Page};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::{AppError, EMPTY_CONTENT};
use crate::store::NoteStore;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    store: Arc<NoteStore>,
}

impl AppState {
    pub fn from_config(config: Arc<AppConfig>) -> Self {
        Self {
            store: Arc::new(NoteStore::new(config.page_size)),
            config,
        }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }
}

pub fn app_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(welcome))
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        );

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
    notes: usize,
}

async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
        notes: state.store.count().await,
    })
}

async fn welcome() -> Html<&'static str> {
    Html("<h1>Welcome to the Note Taker App!</h1>")
}

#[derive(Debug, Deserialize)]
struct ContentRequest {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct NoteEnvelope {
    message: &'static str,
    note: Note,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

/// `page` from the query string. Missing or unparsable values mean page 1.
fn requested_page(query: &HashMap<String, String>) -> u32 {
    query
        .get("page")
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

fn note_id(raw: &str) -> Result<NoteId, AppError> {
    raw.parse().map_err(|_| AppError::note_not_found())
}

fn required_content(
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<String, AppError> {
    let Json(request) = payload?;
    if !has_content(&request.content) {
        return Err(AppError::bad_request(EMPTY_CONTENT));
    }
    Ok(request.content)
}

async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Page> {
    let page = requested_page(&query);
    Json(state.store.page(page).await)
}

async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NoteEnvelope>), AppError> {
    let content = required_content(payload)?;
    let note = state.store.create(&content).await;
    tracing::info!(id = %note.id, "Created note");
    Ok((
        StatusCode::CREATED,
        Json(NoteEnvelope {
            message: "Note created",
            note,
        }),
    ))
}

async fn get_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Note>, AppError> {
    let id = note_id(&raw_id)?;
    state
        .store
        .get(id)
        .await
        .map(Json)
        .ok_or_else(AppError::note_not_found)
}

async fn update_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Result<Json<NoteEnvelope>, AppError> {
    let id = note_id(&raw_id)?;
    let content = required_content(payload)?;
    let note = state
        .store
        .update(id, &content)
        .await
        .ok_or_else(AppError::note_not_found)?;
    tracing::info!(%id, "Updated note");
    Ok(Json(NoteEnvelope {
        message: "Note updated",
        note,
    }))
}

async fn delete_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = note_id(&raw_id)?;
    let removed = state.store.delete(id).await;
    tracing::info!(%id, removed, "Deleted note");
    Ok(Json(MessageResponse {
        message: format!("Note with id {id} deleted"),
    }))
}
