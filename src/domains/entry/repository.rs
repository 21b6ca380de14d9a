use sqlx::PgPool;

use super::model::{Entry, EntryWithAuthor, NewEntry};

const ENTRY_COLUMNS: &str =
  "id, cover_image, title, description, content, category, source_file, github_link, created_at, owner_id";

pub async fn create(db: &PgPool, owner_id: i32, new_entry: NewEntry) -> Result<Entry, sqlx::Error> {
  // created_at comes from the column default, never from the caller
  sqlx::query_as::<_, Entry>(
    r#"
      INSERT INTO entries (cover_image, title, description, content, category, source_file, github_link, owner_id)
      VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
      RETURNING id, cover_image, title, description, content, category, source_file, github_link, created_at, owner_id
    "#,
  )
  .bind(new_entry.cover_image)
  .bind(new_entry.title)
  .bind(new_entry.description)
  .bind(new_entry.content)
  .bind(new_entry.category)
  .bind(new_entry.source_file)
  .bind(new_entry.github_link)
  .bind(owner_id)
  .fetch_one(db)
  .await
}

pub async fn find_all_with_author(db: &PgPool) -> Result<Vec<EntryWithAuthor>, sqlx::Error> {
  sqlx::query_as::<_, EntryWithAuthor>(
    r#"
      SELECT e.id, e.cover_image, e.title, e.description, e.content, e.category,
             e.source_file, e.github_link, e.created_at, e.owner_id, u.name AS author
      FROM entries e
      JOIN users u ON u.id = e.owner_id
      ORDER BY e.id
    "#,
  )
  .fetch_all(db)
  .await
}

pub async fn find_by_id(db: &PgPool, id: i32) -> Result<Option<Entry>, sqlx::Error> {
  sqlx::query_as::<_, Entry>(&format!("SELECT {} FROM entries WHERE id = $1", ENTRY_COLUMNS))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn update(db: &PgPool, entry: &Entry) -> Result<Entry, sqlx::Error> {
  sqlx::query_as::<_, Entry>(
    r#"
      UPDATE entries
      SET cover_image = $1, title = $2, description = $3, content = $4, category = $5,
          source_file = $6, github_link = $7
      WHERE id = $8
      RETURNING id, cover_image, title, description, content, category, source_file, github_link, created_at, owner_id
    "#,
  )
  .bind(&entry.cover_image)
  .bind(&entry.title)
  .bind(&entry.description)
  .bind(&entry.content)
  .bind(&entry.category)
  .bind(&entry.source_file)
  .bind(&entry.github_link)
  .bind(entry.id)
  .fetch_one(db)
  .await
}

pub async fn delete(db: &PgPool, id: i32) -> Result<(), sqlx::Error> {
  sqlx::query("DELETE FROM entries WHERE id = $1").bind(id).execute(db).await?;
  Ok(())
}
