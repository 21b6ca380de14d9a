use axum::{
  extract::{Json, Path, State},
  http::{HeaderMap, StatusCode},
  response::Json as JsonResponse,
  routing::{post, put},
  Router,
};
use serde_json::json;

use super::model::{CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest, User, UsersResponse};
use crate::{
  middleware::auth::auth_middleware,
  state::{AppState, SharedAppState},
  AppError,
};

pub fn user_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/users", post(create_user_handler).get(list_users_handler))
    .route("/users/{username}", put(update_user_handler).delete(delete_user_handler))
    .route("/auth/login", post(login_handler))
}

pub async fn create_user_handler(
  State(state): State<SharedAppState>,
  Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, JsonResponse<User>), AppError> {
  let user = state.create_user(payload).await?;
  Ok((StatusCode::CREATED, JsonResponse(user)))
}

pub async fn list_users_handler(State(state): State<SharedAppState>) -> Result<JsonResponse<UsersResponse>, AppError> {
  let users = state.list_users().await?;
  Ok(JsonResponse(UsersResponse {
    users: users.into_iter().map(|user| user.username).collect(),
  }))
}

pub async fn login_handler(
  State(state): State<SharedAppState>,
  Json(payload): Json<LoginRequest>,
) -> Result<JsonResponse<LoginResponse>, AppError> {
  state.login(payload).await.map(JsonResponse).map_err(Into::into)
}

pub async fn update_user_handler(
  State(state): State<SharedAppState>,
  Path(username): Path<String>,
  headers: HeaderMap,
  Json(payload): Json<UpdateUserRequest>,
) -> Result<JsonResponse<User>, AppError> {
  let claims = auth_middleware(headers).await?;

  // existence first (404), ownership second (403)
  let user = state.get_user_by_username(&username).await?;
  if user.id != claims.user_id {
    return Err(AppError::forbidden("You're not authorized to update this user"));
  }

  let updated = state.update_user(&username, payload).await?;
  Ok(JsonResponse(updated))
}

pub async fn delete_user_handler(
  State(state): State<SharedAppState>,
  Path(username): Path<String>,
  headers: HeaderMap,
) -> Result<JsonResponse<serde_json::Value>, AppError> {
  let claims = auth_middleware(headers).await?;

  let user = state.get_user_by_username(&username).await?;
  if user.id != claims.user_id {
    return Err(AppError::forbidden("You're not authorized to delete this user"));
  }

  state.delete_user(&username).await?;
  Ok(JsonResponse(json!({ "message": "User deleted successfully" })))
}
