use async_trait::async_trait;
use sqlx::PgPool;

use super::model::{NewUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(&self, new_user: NewUser) -> Result<User, sqlx::Error>;
  async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
  async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;
  async fn find_by_id(&self, id: i32) -> Result<Option<User>, sqlx::Error>;
  async fn find_all(&self) -> Result<Vec<User>, sqlx::Error>;
  async fn update(&self, user: &User) -> Result<User, sqlx::Error>;
  async fn delete(&self, id: i32) -> Result<(), sqlx::Error>;
  fn get_pool(&self) -> &PgPool;
}

pub struct SqlxUserRepository {
  pub pool: PgPool,
}

impl SqlxUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
  async fn create(&self, new_user: NewUser) -> Result<User, sqlx::Error> {
    User::create(&self.pool, new_user).await
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
    User::find_by_email(&self.pool, email).await
  }

  async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
    User::find_by_username(&self.pool, username).await
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<User>, sqlx::Error> {
    User::find_by_id(&self.pool, id).await
  }

  async fn find_all(&self) -> Result<Vec<User>, sqlx::Error> {
    User::find_all(&self.pool).await
  }

  async fn update(&self, user: &User) -> Result<User, sqlx::Error> {
    User::update(&self.pool, user).await
  }

  async fn delete(&self, id: i32) -> Result<(), sqlx::Error> {
    User::delete(&self.pool, id).await
  }

  fn get_pool(&self) -> &PgPool {
    &self.pool
  }
}
