use async_trait::async_trait;
use sqlx::PgPool;
use std::error::Error;
use validator::Validate;

use super::model::{CreateEntryRequest, EntriesResponse, Entry, EntryWithAuthor, NewEntry, UpdateEntryRequest};
use super::repository;
use crate::domains::user::model::User;
use crate::impl_service_error_conversions;

#[derive(Debug)]
pub enum EntryServiceError {
  ValidationError(String),
  NotFound(String),
  InternalServerError(String),
}

impl Error for EntryServiceError {}

impl std::fmt::Display for EntryServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      EntryServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      EntryServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
      EntryServiceError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
    }
  }
}

impl_service_error_conversions!(EntryServiceError, InternalServerError, NotFound);

/// Required entry fields must be present and non-empty.
fn require_field(value: Option<String>, name: &str) -> Result<String, EntryServiceError> {
  value
    .filter(|v| !v.is_empty())
    .ok_or_else(|| EntryServiceError::ValidationError(format!("The field '{}' is required", name)))
}

#[async_trait]
pub trait EntryService: Send + Sync {
  async fn create_entry(&self, owner_id: i32, req: CreateEntryRequest) -> Result<EntryWithAuthor, EntryServiceError>;
  async fn list_entries(&self) -> Result<EntriesResponse, EntryServiceError>;
  async fn get_entry_by_id(&self, id: i32) -> Result<Entry, EntryServiceError>;
  async fn update_entry(&self, id: i32, req: UpdateEntryRequest) -> Result<Entry, EntryServiceError>;
  async fn delete_entry(&self, id: i32) -> Result<(), EntryServiceError>;
}

pub struct EntryServiceImpl {
  db: PgPool,
}

impl EntryServiceImpl {
  pub fn new(db: PgPool) -> Self {
    Self { db }
  }
}

#[async_trait]
impl EntryService for EntryServiceImpl {
  async fn create_entry(&self, owner_id: i32, req: CreateEntryRequest) -> Result<EntryWithAuthor, EntryServiceError> {
    req
      .validate()
      .map_err(|e| EntryServiceError::ValidationError(format!("Validation failed: {}", e)))?;

    let cover_image = require_field(req.cover_image, "coverImage")?;
    let title = require_field(req.title, "title")?;
    let content = require_field(req.content, "content")?;
    let category = require_field(req.category, "category")?;

    let owner = User::find_by_id(&self.db, owner_id)
      .await?
      .ok_or_else(|| EntryServiceError::NotFound("User not found".to_string()))?;

    let entry = repository::create(
      &self.db,
      owner.id,
      NewEntry {
        cover_image,
        title,
        description: req.description,
        content,
        category,
        source_file: req.source_file,
        github_link: req.github_link,
      },
    )
    .await?;

    tracing::info!("entry {} created by user {}", entry.id, owner.username);
    Ok(EntryWithAuthor::from_entry(entry, owner.name))
  }

  async fn list_entries(&self) -> Result<EntriesResponse, EntryServiceError> {
    let entries = repository::find_all_with_author(&self.db).await?;
    Ok(EntriesResponse { entries })
  }

  async fn get_entry_by_id(&self, id: i32) -> Result<Entry, EntryServiceError> {
    repository::find_by_id(&self.db, id)
      .await?
      .ok_or_else(|| EntryServiceError::NotFound("Blog entry not found".to_string()))
  }

  async fn update_entry(&self, id: i32, req: UpdateEntryRequest) -> Result<Entry, EntryServiceError> {
    req
      .validate()
      .map_err(|e| EntryServiceError::ValidationError(format!("Validation failed: {}", e)))?;

    let mut entry = self.get_entry_by_id(id).await?;

    // Presence semantics: present fields are applied as-is, absent ones are
    // left untouched.
    if let Some(cover_image) = req.cover_image {
      entry.cover_image = cover_image;
    }
    if let Some(title) = req.title {
      entry.title = title;
    }
    if let Some(description) = req.description {
      entry.description = Some(description);
    }
    if let Some(content) = req.content {
      entry.content = content;
    }
    if let Some(category) = req.category {
      entry.category = category;
    }
    if let Some(source_file) = req.source_file {
      entry.source_file = Some(source_file);
    }
    if let Some(github_link) = req.github_link {
      entry.github_link = Some(github_link);
    }

    let updated = repository::update(&self.db, &entry).await?;
    Ok(updated)
  }

  async fn delete_entry(&self, id: i32) -> Result<(), EntryServiceError> {
    let entry = self.get_entry_by_id(id).await?;
    repository::delete(&self.db, entry.id).await?;
    tracing::info!("entry {} deleted", id);
    Ok(())
  }
}
