use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::error::Error;
use validator::Validate;

use super::{
  model::{CreateUserRequest, LoginRequest, LoginResponse, NewUser, UpdateUserRequest, User},
  repository::UserRepository,
};
use crate::impl_service_error_conversions;
use crate::utils::jwt::{encode_jwt, Claims};
use crate::utils::{hash_password, verify_password};

#[derive(Debug)]
pub enum UserServiceError {
  ValidationError(String),
  Unauthorized(String),
  NotFound(String),
  Conflict(String),
  InternalServerError(String),
}

impl Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UserServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      UserServiceError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
      UserServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
      UserServiceError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      UserServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

impl_service_error_conversions!(UserServiceError, InternalServerError, NotFound, Conflict);

fn require_field(value: Option<String>, name: &str) -> Result<String, UserServiceError> {
  value.ok_or_else(|| UserServiceError::ValidationError(format!("The field '{}' is required", name)))
}

#[async_trait]
pub trait UserService: Send + Sync {
  async fn create_user(&self, req: CreateUserRequest) -> Result<User, UserServiceError>;
  async fn login(&self, req: LoginRequest) -> Result<LoginResponse, UserServiceError>;
  async fn list_users(&self) -> Result<Vec<User>, UserServiceError>;
  async fn get_user_by_username(&self, username: &str) -> Result<User, UserServiceError>;
  async fn update_user(&self, username: &str, req: UpdateUserRequest) -> Result<User, UserServiceError>;
  async fn delete_user(&self, username: &str) -> Result<(), UserServiceError>;
}

pub struct UserServiceImpl<R> {
  user_repository: R,
}

impl<R> UserServiceImpl<R>
where
  R: UserRepository,
{
  pub fn new(user_repository: R) -> Self {
    Self { user_repository }
  }

  /// Pre-check for friendlier 409 messages. The unique constraints on
  /// users.email and users.username remain the final authority under
  /// concurrent registration; a constraint violation that slips past this
  /// check still maps to Conflict through the sqlx error conversion.
  async fn check_uniqueness(&self, email: &str, username: &str, exclude_id: Option<i32>) -> Result<(), UserServiceError> {
    if let Some(existing) = self.user_repository.find_by_email(email).await? {
      if exclude_id != Some(existing.id) {
        return Err(UserServiceError::Conflict("Email already in use".to_string()));
      }
    }
    if let Some(existing) = self.user_repository.find_by_username(username).await? {
      if exclude_id != Some(existing.id) {
        return Err(UserServiceError::Conflict("Username already taken".to_string()));
      }
    }
    Ok(())
  }
}

#[async_trait]
impl<R> UserService for UserServiceImpl<R>
where
  R: UserRepository,
{
  async fn create_user(&self, req: CreateUserRequest) -> Result<User, UserServiceError> {
    req
      .validate()
      .map_err(|e| UserServiceError::ValidationError(format!("Validation failed: {}", e)))?;

    let email = require_field(req.email, "email")?;
    let password = require_field(req.password, "password")?;
    let username = require_field(req.username, "username")?;
    let name = require_field(req.name, "name")?;

    self.check_uniqueness(&email, &username, None).await?;

    let hashed_password =
      hash_password(&password).map_err(|e| UserServiceError::InternalServerError(e.to_string()))?;

    let user = self
      .user_repository
      .create(NewUser {
        email,
        password: hashed_password,
        username,
        name,
        bio: req.bio,
        profile_picture: req.profile_picture,
        member_since: req.member_since,
      })
      .await?;

    tracing::info!("user {} registered", user.username);
    Ok(user)
  }

  async fn login(&self, req: LoginRequest) -> Result<LoginResponse, UserServiceError> {
    let email = require_field(req.email, "email")?;
    let password = require_field(req.password, "password")?;

    let user = self
      .user_repository
      .find_by_email(&email)
      .await?
      .ok_or_else(|| UserServiceError::Unauthorized("Invalid credentials".to_string()))?;

    let password_matches =
      verify_password(&password, &user.password).map_err(|e| UserServiceError::InternalServerError(e.to_string()))?;
    if !password_matches {
      return Err(UserServiceError::Unauthorized("Invalid credentials".to_string()));
    }

    let expiration = Utc::now()
      .checked_add_signed(Duration::hours(24))
      .ok_or_else(|| UserServiceError::InternalServerError("Failed to calculate expiration time".to_string()))?
      .timestamp() as usize;

    let claims = Claims {
      sub: user.id.to_string(),
      exp: expiration,
      user_id: user.id,
    };

    let token =
      encode_jwt(claims).map_err(|e| UserServiceError::InternalServerError(format!("JWT encoding failed: {}", e)))?;

    Ok(LoginResponse {
      token,
      user_id: user.id,
      username: user.username,
      name: user.name,
    })
  }

  async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
    let users = self.user_repository.find_all().await?;
    Ok(users)
  }

  async fn get_user_by_username(&self, username: &str) -> Result<User, UserServiceError> {
    self
      .user_repository
      .find_by_username(username)
      .await?
      .ok_or_else(|| UserServiceError::NotFound("User not found".to_string()))
  }

  async fn update_user(&self, username: &str, req: UpdateUserRequest) -> Result<User, UserServiceError> {
    req
      .validate()
      .map_err(|e| UserServiceError::ValidationError(format!("Validation failed: {}", e)))?;

    let mut user = self.get_user_by_username(username).await?;

    self
      .check_uniqueness(
        req.email.as_deref().unwrap_or(&user.email),
        req.username.as_deref().unwrap_or(&user.username),
        Some(user.id),
      )
      .await?;

    // Presence semantics: a field is applied when it appears in the payload,
    // even when its value is empty.
    if let Some(email) = req.email {
      user.email = email;
    }
    if let Some(password) = req.password {
      user.password = hash_password(&password).map_err(|e| UserServiceError::InternalServerError(e.to_string()))?;
    }
    if let Some(new_username) = req.username {
      user.username = new_username;
    }
    if let Some(name) = req.name {
      user.name = name;
    }
    if let Some(bio) = req.bio {
      user.bio = Some(bio);
    }
    if let Some(profile_picture) = req.profile_picture {
      user.profile_picture = Some(profile_picture);
    }
    if let Some(member_since) = req.member_since {
      user.member_since = Some(member_since);
    }

    let updated = self.user_repository.update(&user).await?;
    Ok(updated)
  }

  async fn delete_user(&self, username: &str) -> Result<(), UserServiceError> {
    let user = self.get_user_by_username(username).await?;
    self.user_repository.delete(user.id).await?;
    tracing::info!("user {} deleted", username);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domains::user::repository::SqlxUserRepository;
  use sqlx::PgPool;

  fn create_request(email: &str, username: &str) -> CreateUserRequest {
    CreateUserRequest {
      email: Some(email.to_string()),
      password: Some("password123".to_string()),
      username: Some(username.to_string()),
      name: Some("Test User".to_string()),
      bio: None,
      profile_picture: None,
      member_since: None,
    }
  }

  fn service(pool: PgPool) -> UserServiceImpl<SqlxUserRepository> {
    UserServiceImpl::new(SqlxUserRepository::new(pool))
  }

  #[sqlx::test(migrations = "./migrations")]
  async fn test_create_user_hashes_password(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let service = service(pool);

    let user = service.create_user(create_request("alice@x.com", "alice")).await?;

    assert!(user.id > 0);
    assert_ne!(user.password, "password123");
    assert!(crate::utils::verify_password("password123", &user.password)?);
    assert!(user.member_since.is_some());
    Ok(())
  }

  #[sqlx::test(migrations = "./migrations")]
  async fn test_create_user_missing_field(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let service = service(pool);

    let mut req = create_request("alice@x.com", "alice");
    req.name = None;
    let result = service.create_user(req).await;

    match result {
      Err(UserServiceError::ValidationError(msg)) => assert!(msg.contains("name")),
      other => panic!("expected validation error, got {:?}", other),
    }
    Ok(())
  }

  #[sqlx::test(migrations = "./migrations")]
  async fn test_duplicate_email_conflicts(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let service = service(pool);

    service.create_user(create_request("alice@x.com", "alice")).await?;
    let result = service.create_user(create_request("alice@x.com", "bob")).await;

    assert!(matches!(result, Err(UserServiceError::Conflict(_))));
    Ok(())
  }

  #[sqlx::test(migrations = "./migrations")]
  async fn test_duplicate_username_conflicts(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let service = service(pool);

    service.create_user(create_request("alice@x.com", "alice")).await?;
    let result = service.create_user(create_request("bob@x.com", "alice")).await;

    assert!(matches!(result, Err(UserServiceError::Conflict(_))));
    Ok(())
  }

  #[sqlx::test(migrations = "./migrations")]
  async fn test_distinct_registrations_succeed(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let service = service(pool);

    service.create_user(create_request("alice@x.com", "alice")).await?;
    service.create_user(create_request("bob@x.com", "bob")).await?;

    let users = service.list_users().await?;
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "alice");
    assert_eq!(users[1].username, "bob");
    Ok(())
  }

  #[sqlx::test(migrations = "./migrations")]
  async fn test_login_success_and_rejects_wrong_password(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    std::env::set_var("JWT_SECRET", "test-secret");
    let service = service(pool);

    let user = service.create_user(create_request("alice@x.com", "alice")).await?;

    let response = service
      .login(LoginRequest {
        email: Some("alice@x.com".to_string()),
        password: Some("password123".to_string()),
      })
      .await?;
    assert_eq!(response.user_id, user.id);
    assert!(!response.token.is_empty());

    let result = service
      .login(LoginRequest {
        email: Some("alice@x.com".to_string()),
        password: Some("wrong".to_string()),
      })
      .await;
    assert!(matches!(result, Err(UserServiceError::Unauthorized(_))));
    Ok(())
  }

  #[sqlx::test(migrations = "./migrations")]
  async fn test_update_applies_only_present_fields(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let service = service(pool);

    let mut req = create_request("alice@x.com", "alice");
    req.bio = Some("original bio".to_string());
    let user = service.create_user(req).await?;

    let updated = service
      .update_user(
        "alice",
        UpdateUserRequest {
          bio: Some(String::new()),
          ..Default::default()
        },
      )
      .await?;

    // empty string counts as present and is applied, nothing else moves
    assert_eq!(updated.bio.as_deref(), Some(""));
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.name, user.name);
    assert_eq!(updated.password, user.password);
    Ok(())
  }

  #[sqlx::test(migrations = "./migrations")]
  async fn test_update_rehashes_password(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let service = service(pool);

    service.create_user(create_request("alice@x.com", "alice")).await?;
    let updated = service
      .update_user(
        "alice",
        UpdateUserRequest {
          password: Some("newpassword1".to_string()),
          ..Default::default()
        },
      )
      .await?;

    assert_ne!(updated.password, "newpassword1");
    assert!(crate::utils::verify_password("newpassword1", &updated.password)?);
    Ok(())
  }

  #[sqlx::test(migrations = "./migrations")]
  async fn test_update_username_collision_conflicts(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let service = service(pool);

    service.create_user(create_request("alice@x.com", "alice")).await?;
    service.create_user(create_request("bob@x.com", "bob")).await?;

    let result = service
      .update_user(
        "bob",
        UpdateUserRequest {
          username: Some("alice".to_string()),
          ..Default::default()
        },
      )
      .await;
    assert!(matches!(result, Err(UserServiceError::Conflict(_))));

    // updating without changing the username is not a collision with itself
    let updated = service
      .update_user(
        "bob",
        UpdateUserRequest {
          name: Some("Robert".to_string()),
          ..Default::default()
        },
      )
      .await?;
    assert_eq!(updated.name, "Robert");
    Ok(())
  }

  #[sqlx::test(migrations = "./migrations")]
  async fn test_update_unknown_user_not_found(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let service = service(pool);
    let result = service.update_user("ghost", UpdateUserRequest::default()).await;
    assert!(matches!(result, Err(UserServiceError::NotFound(_))));
    Ok(())
  }

  #[sqlx::test(migrations = "./migrations")]
  async fn test_delete_user_cascades_entries(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let service = service(pool.clone());

    let user = service.create_user(create_request("alice@x.com", "alice")).await?;
    crate::domains::entry::repository::create(
      &pool,
      user.id,
      crate::domains::entry::model::NewEntry {
        cover_image: "c.png".to_string(),
        title: "T".to_string(),
        description: None,
        content: "text".to_string(),
        category: "cat".to_string(),
        source_file: None,
        github_link: None,
      },
    )
    .await?;

    service.delete_user("alice").await?;

    let entries = crate::domains::entry::repository::find_all_with_author(&pool).await?;
    assert!(entries.is_empty());

    let result = service.get_user_by_username("alice").await;
    assert!(matches!(result, Err(UserServiceError::NotFound(_))));
    Ok(())
  }

  #[sqlx::test(migrations = "./migrations")]
  async fn test_delete_unknown_user_not_found(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let service = service(pool);
    let result = service.delete_user("ghost").await;
    assert!(matches!(result, Err(UserServiceError::NotFound(_))));
    Ok(())
  }

  #[sqlx::test(migrations = "./migrations")]
  async fn test_member_since_respects_client_value(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let service = service(pool);

    let member_since = "2020-01-01T00:00:00Z".parse::<chrono::DateTime<Utc>>()?;
    let mut req = create_request("alice@x.com", "alice");
    req.member_since = Some(member_since);

    let user = service.create_user(req).await?;
    assert_eq!(user.member_since, Some(member_since));
    Ok(())
  }
}
