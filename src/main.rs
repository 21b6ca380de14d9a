use tokio::signal;

use dotenvy::dotenv;

use codenet_api::app::create_app;
use codenet_api::db::pool::create_pool;
use codenet_api::state::SharedAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt::init();

  let pool = create_pool().await.expect("Failed to create database pool");

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("database migrations applied");

  let app_state = SharedAppState::new(pool).await;
  let app = create_app(app_state);

  let port = std::env::var("APP_PORT").unwrap_or_else(|_| "8000".to_string());
  let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

  tracing::info!("server running on http://0.0.0.0:{}", port);

  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("Failed to install signal handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("received termination signal, shutting down gracefully...");
}
