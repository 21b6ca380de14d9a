use axum::{response::Html, routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::{
  domains::{entry::rest::entry_routes, user::rest::user_routes},
  state::SharedAppState,
};

pub fn create_app(state: SharedAppState) -> Router {
  Router::new()
    .route("/", get(index_handler))
    .merge(user_routes())
    .merge(entry_routes())
    .with_state(state)
    .layer(CorsLayer::permissive())
}

pub async fn index_handler() -> Html<String> {
  Html("<h1>Codenet API</h1>".to_string())
}
