use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use snipman_core::{Snippet, SnippetDraft};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_snippets(
    State(state): State<AppState>,
) -> Result<Json<Vec<Snippet>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.list_snippets()))
}

pub async fn get_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Snippet>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.get_snippet(&id)?))
}

pub async fn create_snippet(
    State(state): State<AppState>,
    Json(draft): Json<SnippetDraft>,
) -> Result<(StatusCode, Json<Snippet>), ApiError> {
    let mut store = state.store.lock().await;
    let snippet = store.create_snippet(&draft)?;
    tracing::info!(id = %snippet.id, "snippet created");
    Ok((StatusCode::CREATED, Json(snippet)))
}

pub async fn update_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<SnippetDraft>,
) -> Result<Json<Snippet>, ApiError> {
    let mut store = state.store.lock().await;
    Ok(Json(store.update_snippet(&id, &draft)?))
}

pub async fn delete_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.lock().await;
    store.delete_snippet(&id)?;
    tracing::info!(id = %id, "snippet deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn attach_tag(
    State(state): State<AppState>,
    Path((id, tag_id)): Path<(String, String)>,
) -> Result<Json<Snippet>, ApiError> {
    let mut store = state.store.lock().await;
    Ok(Json(store.attach_tag(&id, &tag_id)?))
}

pub async fn detach_tag(
    State(state): State<AppState>,
    Path((id, tag_id)): Path<(String, String)>,
) -> Result<Json<Snippet>, ApiError> {
    let mut store = state.store.lock().await;
    Ok(Json(store.detach_tag(&id, &tag_id)?))
}
