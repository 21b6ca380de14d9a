use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres};
use validator::Validate;

#[derive(Debug, Clone, FromRow, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: i32,
  pub email: String,
  #[serde(skip_serializing, default)]
  pub password: String,
  pub username: String,
  pub name: String,
  pub bio: Option<String>,
  pub profile_picture: Option<String>,
  pub member_since: Option<DateTime<Utc>>,
}

/// Column-ready values for an INSERT. The password is already hashed by the
/// time it gets here.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email: String,
  pub password: String,
  pub username: String,
  pub name: String,
  pub bio: Option<String>,
  pub profile_picture: Option<String>,
  pub member_since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
  #[validate(length(max = 30, message = "email must be at most 30 characters"))]
  pub email: Option<String>,
  pub password: Option<String>,
  #[validate(length(max = 10, message = "username must be at most 10 characters"))]
  pub username: Option<String>,
  #[validate(length(max = 50, message = "name must be at most 50 characters"))]
  pub name: Option<String>,
  #[validate(length(max = 300, message = "bio must be at most 300 characters"))]
  pub bio: Option<String>,
  #[validate(length(max = 300, message = "profilePicture must be at most 300 characters"))]
  pub profile_picture: Option<String>,
  pub member_since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
  #[validate(length(max = 30, message = "email must be at most 30 characters"))]
  pub email: Option<String>,
  pub password: Option<String>,
  #[validate(length(max = 10, message = "username must be at most 10 characters"))]
  pub username: Option<String>,
  #[validate(length(max = 50, message = "name must be at most 50 characters"))]
  pub name: Option<String>,
  #[validate(length(max = 300, message = "bio must be at most 300 characters"))]
  pub bio: Option<String>,
  #[validate(length(max = 300, message = "profilePicture must be at most 300 characters"))]
  pub profile_picture: Option<String>,
  pub member_since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
  pub email: Option<String>,
  pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
  pub token: String,
  pub user_id: i32,
  pub username: String,
  pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UsersResponse {
  pub users: Vec<String>,
}

const USER_COLUMNS: &str = "id, email, password, username, name, bio, profile_picture, member_since";

impl User {
  pub async fn create(db: &PgPool, new_user: NewUser) -> Result<User, sqlx::Error> {
    Self::create_with_executor(db, new_user).await
  }

  pub async fn create_with_executor<'e, E>(executor: E, new_user: NewUser) -> Result<User, sqlx::Error>
  where
    E: sqlx::Executor<'e, Database = Postgres>,
  {
    // member_since falls back to the insertion time when the client omits it
    let user = sqlx::query_as::<_, User>(
      r#"
        INSERT INTO users (email, password, username, name, bio, profile_picture, member_since)
        VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, CURRENT_TIMESTAMP))
        RETURNING id, email, password, username, name, bio, profile_picture, member_since
      "#,
    )
    .bind(new_user.email)
    .bind(new_user.password)
    .bind(new_user.username)
    .bind(new_user.name)
    .bind(new_user.bio)
    .bind(new_user.profile_picture)
    .bind(new_user.member_since)
    .fetch_one(executor)
    .await?;

    Ok(user)
  }

  pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
  where
    E: sqlx::Executor<'e, Database = Postgres>,
  {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
      .bind(email)
      .fetch_optional(executor)
      .await
  }

  pub async fn find_by_username<'e, E>(executor: E, username: &str) -> Result<Option<User>, sqlx::Error>
  where
    E: sqlx::Executor<'e, Database = Postgres>,
  {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS))
      .bind(username)
      .fetch_optional(executor)
      .await
  }

  pub async fn find_by_id<'e, E>(executor: E, id: i32) -> Result<Option<User>, sqlx::Error>
  where
    E: sqlx::Executor<'e, Database = Postgres>,
  {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
      .bind(id)
      .fetch_optional(executor)
      .await
  }

  pub async fn find_all(db: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))
      .fetch_all(db)
      .await
  }

  pub async fn update(db: &PgPool, user: &User) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
      r#"
        UPDATE users
        SET email = $1, password = $2, username = $3, name = $4, bio = $5, profile_picture = $6, member_since = $7
        WHERE id = $8
        RETURNING id, email, password, username, name, bio, profile_picture, member_since
      "#,
    )
    .bind(&user.email)
    .bind(&user.password)
    .bind(&user.username)
    .bind(&user.name)
    .bind(&user.bio)
    .bind(&user.profile_picture)
    .bind(user.member_since)
    .bind(user.id)
    .fetch_one(db)
    .await
  }

  pub async fn delete(db: &PgPool, id: i32) -> Result<(), sqlx::Error> {
    // entries owned by this user go with it (ON DELETE CASCADE)
    sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(db).await?;
    Ok(())
  }
}
