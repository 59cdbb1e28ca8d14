/// Note model and database operations
///
/// Notes are free-form documents scoped directly to an organization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Note record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    /// Unique note ID
    pub id: Uuid,

    /// Organization this note belongs to
    pub org_id: Uuid,

    /// Note title
    pub title: String,

    /// Note body
    pub content: Option<String>,

    /// When the note was created
    pub created_at: DateTime<Utc>,

    /// When the note was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new note
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub org_id: Uuid,
    pub title: String,
    pub content: Option<String>,
}

/// Input for updating a note
#[derive(Debug, Clone, Default)]
pub struct UpdateNote {
    /// New title (rename)
    pub title: Option<String>,

    /// New body
    pub content: Option<String>,
}

impl Note {
    /// Creates a new note
    pub async fn create(pool: &PgPool, data: CreateNote) -> Result<Self, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (org_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, org_id, title, content, created_at, updated_at
            "#,
        )
        .bind(data.org_id)
        .bind(data.title)
        .bind(data.content)
        .fetch_one(pool)
        .await?;

        Ok(note)
    }

    /// Finds a note by ID with tenant isolation
    pub async fn find_by_id_and_org(
        pool: &PgPool,
        id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, org_id, title, content, created_at, updated_at
            FROM notes
            WHERE id = $1 AND org_id = $2
            "#,
        )
        .bind(id)
        .bind(org_id)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Lists all notes in an organization, newest first
    pub async fn list_by_org(pool: &PgPool, org_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, org_id, title, content, created_at, updated_at
            FROM notes
            WHERE org_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(org_id)
        .fetch_all(pool)
        .await?;

        Ok(notes)
    }

    /// Updates a note's title and/or content, scoped by organization
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        org_id: Uuid,
        data: UpdateNote,
    ) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET title = COALESCE($3, title),
                content = COALESCE($4, content),
                updated_at = NOW()
            WHERE id = $1 AND org_id = $2
            RETURNING id, org_id, title, content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(org_id)
        .bind(data.title)
        .bind(data.content)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Deletes a note, scoped by organization
    pub async fn delete(pool: &PgPool, id: Uuid, org_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND org_id = $2")
            .bind(id)
            .bind(org_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
