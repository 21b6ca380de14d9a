use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
  pub id: i32,
  pub cover_image: String,
  pub title: String,
  pub description: Option<String>,
  pub content: String,
  pub category: String,
  pub source_file: Option<String>,
  pub github_link: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
  pub owner_id: i32,
}

/// An entry joined with its owner's display name, the shape list and create
/// responses use.
#[derive(Debug, Clone, FromRow, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryWithAuthor {
  pub id: i32,
  pub cover_image: String,
  pub title: String,
  pub description: Option<String>,
  pub content: String,
  pub category: String,
  pub source_file: Option<String>,
  pub github_link: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
  pub owner_id: i32,
  pub author: String,
}

impl EntryWithAuthor {
  pub fn from_entry(entry: Entry, author: String) -> Self {
    Self {
      id: entry.id,
      cover_image: entry.cover_image,
      title: entry.title,
      description: entry.description,
      content: entry.content,
      category: entry.category,
      source_file: entry.source_file,
      github_link: entry.github_link,
      created_at: entry.created_at,
      owner_id: entry.owner_id,
      author,
    }
  }
}

/// Column-ready values for an INSERT. There is deliberately no created_at
/// here: the database sets it, client-supplied values never reach the row.
#[derive(Debug, Clone)]
pub struct NewEntry {
  pub cover_image: String,
  pub title: String,
  pub description: Option<String>,
  pub content: String,
  pub category: String,
  pub source_file: Option<String>,
  pub github_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
  #[validate(length(max = 200, message = "coverImage must be at most 200 characters"))]
  pub cover_image: Option<String>,
  #[validate(length(max = 100, message = "title must be at most 100 characters"))]
  pub title: Option<String>,
  #[validate(length(max = 500, message = "description must be at most 500 characters"))]
  pub description: Option<String>,
  #[validate(length(max = 200, message = "content must be at most 200 characters"))]
  pub content: Option<String>,
  #[validate(length(max = 15, message = "category must be at most 15 characters"))]
  pub category: Option<String>,
  #[validate(length(max = 100, message = "sourceFile must be at most 100 characters"))]
  pub source_file: Option<String>,
  #[validate(length(max = 100, message = "githubLink must be at most 100 characters"))]
  pub github_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
  #[validate(length(max = 200, message = "coverImage must be at most 200 characters"))]
  pub cover_image: Option<String>,
  #[validate(length(max = 100, message = "title must be at most 100 characters"))]
  pub title: Option<String>,
  #[validate(length(max = 500, message = "description must be at most 500 characters"))]
  pub description: Option<String>,
  #[validate(length(max = 200, message = "content must be at most 200 characters"))]
  pub content: Option<String>,
  #[validate(length(max = 15, message = "category must be at most 15 characters"))]
  pub category: Option<String>,
  #[validate(length(max = 100, message = "sourceFile must be at most 100 characters"))]
  pub source_file: Option<String>,
  #[validate(length(max = 100, message = "githubLink must be at most 100 characters"))]
  pub github_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntriesResponse {
  pub entries: Vec<EntryWithAuthor>,
}
