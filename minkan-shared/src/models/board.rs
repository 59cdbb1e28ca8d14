/// Board model and database operations
///
/// A board is a collection of ordered lists belonging to one organization.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE boards (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     org_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     image_url TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use minkan_shared::models::board::{Board, CreateBoard};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, org_id: Uuid) -> Result<(), sqlx::Error> {
/// let board = Board::create(&pool, CreateBoard {
///     org_id,
///     title: "Roadmap".to_string(),
///     image_url: None,
/// }).await?;
///
/// // Tenant-scoped lookup: returns None if the board exists in another org.
/// let found = Board::find_by_id_and_org(&pool, board.id, org_id).await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Board record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    /// Unique board ID
    pub id: Uuid,

    /// Organization this board belongs to
    pub org_id: Uuid,

    /// Board title
    pub title: String,

    /// Optional background image URL
    pub image_url: Option<String>,

    /// When the board was created
    pub created_at: DateTime<Utc>,

    /// When the board was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new board
#[derive(Debug, Clone)]
pub struct CreateBoard {
    /// Owning organization
    pub org_id: Uuid,

    /// Board title
    pub title: String,

    /// Optional background image URL
    pub image_url: Option<String>,
}

impl Board {
    /// Creates a new board
    pub async fn create(pool: &PgPool, data: CreateBoard) -> Result<Self, sqlx::Error> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (org_id, title, image_url)
            VALUES ($1, $2, $3)
            RETURNING id, org_id, title, image_url, created_at, updated_at
            "#,
        )
        .bind(data.org_id)
        .bind(data.title)
        .bind(data.image_url)
        .fetch_one(pool)
        .await?;

        Ok(board)
    }

    /// Finds a board by ID with tenant isolation
    ///
    /// This is the only lookup API handlers should use: a board that exists
    /// in a different organization is indistinguishable from a missing one.
    pub async fn find_by_id_and_org(
        pool: &PgPool,
        id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            SELECT id, org_id, title, image_url, created_at, updated_at
            FROM boards
            WHERE id = $1 AND org_id = $2
            "#,
        )
        .bind(id)
        .bind(org_id)
        .fetch_optional(pool)
        .await?;

        Ok(board)
    }

    /// Lists all boards in an organization, newest first
    pub async fn list_by_org(pool: &PgPool, org_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let boards = sqlx::query_as::<_, Board>(
            r#"
            SELECT id, org_id, title, image_url, created_at, updated_at
            FROM boards
            WHERE org_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(org_id)
        .fetch_all(pool)
        .await?;

        Ok(boards)
    }

    /// Renames a board, scoped by organization
    ///
    /// Returns `None` when the board does not exist in this organization.
    pub async fn rename(
        pool: &PgPool,
        id: Uuid,
        org_id: Uuid,
        title: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            UPDATE boards
            SET title = $3, updated_at = NOW()
            WHERE id = $1 AND org_id = $2
            RETURNING id, org_id, title, image_url, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(org_id)
        .bind(title)
        .fetch_optional(pool)
        .await?;

        Ok(board)
    }

    /// Deletes a board, scoped by organization
    ///
    /// Lists and cards are removed by CASCADE.
    pub async fn delete(pool: &PgPool, id: Uuid, org_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1 AND org_id = $2")
            .bind(id)
            .bind(org_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
