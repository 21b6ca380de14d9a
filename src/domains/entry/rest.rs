use axum::{
  extract::{Json, Path, State},
  http::{HeaderMap, StatusCode},
  response::Json as JsonResponse,
  routing::{post, put},
  Router,
};
use serde_json::json;

use super::model::{CreateEntryRequest, EntriesResponse, Entry, EntryWithAuthor, UpdateEntryRequest};
use crate::{
  middleware::auth::auth_middleware,
  state::{AppState, SharedAppState},
  AppError,
};

pub fn entry_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/entries", post(create_entry_handler).get(list_entries_handler))
    .route("/entries/{entry_id}", put(update_entry_handler).delete(delete_entry_handler))
}

pub async fn create_entry_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  Json(payload): Json<CreateEntryRequest>,
) -> Result<(StatusCode, JsonResponse<EntryWithAuthor>), AppError> {
  let claims = auth_middleware(headers).await?;

  let entry = state.create_entry(claims.user_id, payload).await?;
  Ok((StatusCode::CREATED, JsonResponse(entry)))
}

pub async fn list_entries_handler(
  State(state): State<SharedAppState>,
) -> Result<JsonResponse<EntriesResponse>, AppError> {
  state.list_entries().await.map(JsonResponse).map_err(Into::into)
}

pub async fn update_entry_handler(
  State(state): State<SharedAppState>,
  Path(entry_id): Path<i32>,
  headers: HeaderMap,
  Json(payload): Json<UpdateEntryRequest>,
) -> Result<JsonResponse<Entry>, AppError> {
  let claims = auth_middleware(headers).await?;

  // existence first (404), ownership second (403)
  let entry = state.get_entry_by_id(entry_id).await?;
  if entry.owner_id != claims.user_id {
    return Err(AppError::forbidden("You're not authorized to update this blog entry"));
  }

  let updated = state.update_entry(entry_id, payload).await?;
  Ok(JsonResponse(updated))
}

pub async fn delete_entry_handler(
  State(state): State<SharedAppState>,
  Path(entry_id): Path<i32>,
  headers: HeaderMap,
) -> Result<JsonResponse<serde_json::Value>, AppError> {
  let claims = auth_middleware(headers).await?;

  let entry = state.get_entry_by_id(entry_id).await?;
  if entry.owner_id != claims.user_id {
    return Err(AppError::forbidden("You're not authorized to delete this blog entry"));
  }

  state.delete_entry(entry_id).await?;
  Ok(JsonResponse(json!({ "message": "Entry deleted successfully" })))
}
