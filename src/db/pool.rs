use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub async fn create_pool() -> anyhow::Result<PgPool> {
  let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL environment variable must be set.");

  let pool = PgPoolOptions::new()
    .max_connections(10)
    .connect(&database_url)
    .await?;

  Ok(pool)
}
