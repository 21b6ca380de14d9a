use axum::{
  body::{Body, Bytes},
  http::{Request, StatusCode},
  Router,
};
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use crate::{app::create_app, state::SharedAppState};

pub async fn app_with_pool(pool: PgPool) -> Router {
  if std::env::var("JWT_SECRET").is_err() {
    std::env::set_var("JWT_SECRET", "test-secret");
  }
  let state = SharedAppState::new(pool).await;
  create_app(state)
}

async fn send(app: Router, method: &str, uri: &str, token: Option<&str>, body: Option<Vec<u8>>) -> (StatusCode, Bytes) {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(token) = token {
    builder = builder.header("authorization", format!("Bearer {}", token));
  }
  let request = match body {
    Some(bytes) => builder
      .header("content-type", "application/json")
      .body(Body::from(bytes))
      .expect("build request"),
    None => builder.body(Body::empty()).expect("build request"),
  };

  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, body)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
  send(app, "GET", uri, None, None).await
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  let bytes = serde_json::to_vec(body).expect("serialize request body");
  send(app, "POST", uri, None, Some(bytes)).await
}

pub async fn post_json_auth<T: Serialize>(app: Router, uri: &str, token: &str, body: &T) -> (StatusCode, Bytes) {
  let bytes = serde_json::to_vec(body).expect("serialize request body");
  send(app, "POST", uri, Some(token), Some(bytes)).await
}

pub async fn put_json_auth<T: Serialize>(app: Router, uri: &str, token: &str, body: &T) -> (StatusCode, Bytes) {
  let bytes = serde_json::to_vec(body).expect("serialize request body");
  send(app, "PUT", uri, Some(token), Some(bytes)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> (StatusCode, Bytes) {
  send(app, "DELETE", uri, Some(token), None).await
}

pub async fn signup(app: Router, email: &str, username: &str, name: &str) -> serde_json::Value {
  let payload = json!({
    "email": email,
    "password": "password123",
    "username": username,
    "name": name
  });
  let (status, body) = post_json(app, "/users", &payload).await;
  assert_eq!(status, StatusCode::CREATED, "signup should succeed");
  serde_json::from_slice(&body).expect("deserialize created user")
}

pub async fn signup_and_login(app: Router, email: &str, username: &str, name: &str) -> (i32, String) {
  signup(app.clone(), email, username, name).await;

  let payload = json!({ "email": email, "password": "password123" });
  let (status, body) = post_json(app, "/auth/login", &payload).await;
  assert_eq!(status, StatusCode::OK, "login should succeed");

  let response: serde_json::Value = serde_json::from_slice(&body).expect("deserialize login response");
  let user_id = response["userId"].as_i64().expect("user id") as i32;
  let token = response["token"].as_str().expect("token").to_string();
  (user_id, token)
}
