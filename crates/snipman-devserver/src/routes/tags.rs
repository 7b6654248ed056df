use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use snipman_core::{NewTag, Tag};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.list_tags()))
}

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Tag>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.get_tag(&id)?))
}

pub async fn create_tag(
    State(state): State<AppState>,
    Json(tag): Json<NewTag>,
) -> Result<(StatusCode, Json<Tag>), ApiError> {
    let mut store = state.store.lock().await;
    Ok((StatusCode::CREATED, Json(store.create_or_get_tag(&tag)?)))
}

pub async fn rename_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(tag): Json<NewTag>,
) -> Result<Json<Tag>, ApiError> {
    let mut store = state.store.lock().await;
    Ok(Json(store.rename_tag(&id, &tag)?))
}

pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.lock().await;
    store.delete_tag(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
