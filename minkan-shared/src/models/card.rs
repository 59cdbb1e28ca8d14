/// Card model and database operations
///
/// A card is a unit of work within a list. A card belongs to exactly one
/// list at a time; moving it across lists is a single mutation of its
/// `list_id` plus renumbering of `"order"` in both the source and
/// destination lists (see `reorder` and [`Card::apply_order`]).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE cards (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     list_id UUID NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     "order" INTEGER NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::reorder::CardPlacement;

/// Card record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Card {
    /// Unique card ID
    pub id: Uuid,

    /// List this card currently belongs to
    pub list_id: Uuid,

    /// Card title
    pub title: String,

    /// Optional long-form description
    pub description: Option<String>,

    /// Sort position within the list
    pub order: i32,

    /// When the card was created
    pub created_at: DateTime<Utc>,

    /// When the card was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new card
#[derive(Debug, Clone)]
pub struct CreateCard {
    /// Owning list
    pub list_id: Uuid,

    /// Card title
    pub title: String,

    /// Sort position (see `list::next_order`)
    pub order: i32,
}

/// Input for updating a card
#[derive(Debug, Clone, Default)]
pub struct UpdateCard {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,
}

impl Card {
    /// Creates a new card
    pub async fn create(pool: &PgPool, data: CreateCard) -> Result<Self, sqlx::Error> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (list_id, title, "order")
            VALUES ($1, $2, $3)
            RETURNING id, list_id, title, description, "order", created_at, updated_at
            "#,
        )
        .bind(data.list_id)
        .bind(data.title)
        .bind(data.order)
        .fetch_one(pool)
        .await?;

        Ok(card)
    }

    /// Finds a card by ID with tenant isolation (via its list's board)
    pub async fn find_by_id_and_org(
        pool: &PgPool,
        id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            SELECT c.id, c.list_id, c.title, c.description, c."order", c.created_at, c.updated_at
            FROM cards c
            JOIN lists l ON l.id = c.list_id
            JOIN boards b ON b.id = l.board_id
            WHERE c.id = $1 AND b.org_id = $2
            "#,
        )
        .bind(id)
        .bind(org_id)
        .fetch_optional(pool)
        .await?;

        Ok(card)
    }

    /// Lists all cards on a board, grouped by list order then card order
    pub async fn list_by_board(pool: &PgPool, board_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT c.id, c.list_id, c.title, c.description, c."order", c.created_at, c.updated_at
            FROM cards c
            JOIN lists l ON l.id = c.list_id
            WHERE l.board_id = $1
            ORDER BY l."order" ASC, c."order" ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        Ok(cards)
    }

    /// Returns the current maximum order in a list, or `None` when empty
    pub async fn max_order(pool: &PgPool, list_id: Uuid) -> Result<Option<i32>, sqlx::Error> {
        let max: Option<i32> =
            sqlx::query_scalar(r#"SELECT MAX("order") FROM cards WHERE list_id = $1"#)
                .bind(list_id)
                .fetch_one(pool)
                .await?;

        Ok(max)
    }

    /// Updates a card's title and/or description, scoped by organization
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        org_id: Uuid,
        data: UpdateCard,
    ) -> Result<Option<Self>, sqlx::Error> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards c
            SET title = COALESCE($3, c.title),
                description = COALESCE($4, c.description),
                updated_at = NOW()
            FROM lists l
            JOIN boards b ON b.id = l.board_id
            WHERE c.id = $1 AND l.id = c.list_id AND b.org_id = $2
            RETURNING c.id, c.list_id, c.title, c.description, c."order", c.created_at, c.updated_at
            "#,
        )
        .bind(id)
        .bind(org_id)
        .bind(data.title)
        .bind(data.description)
        .fetch_optional(pool)
        .await?;

        Ok(card)
    }

    /// Deletes a card, scoped by organization
    pub async fn delete(pool: &PgPool, id: Uuid, org_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM cards c
            USING lists l, boards b
            WHERE c.id = $1 AND l.id = c.list_id AND b.id = l.board_id AND b.org_id = $2
            "#,
        )
        .bind(id)
        .bind(org_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Applies a batch of card placements inside a transaction
    ///
    /// Each placement sets both the card's `"order"` and its `list_id`, so
    /// a cross-list move and its renumbering of source and destination
    /// lists commit atomically. Updates are scoped twice: the destination
    /// list must belong to the given board and organization, and the card
    /// itself must currently belong to that organization. Returns the
    /// number of rows actually updated.
    pub async fn apply_order(
        tx: &mut Transaction<'_, Postgres>,
        board_id: Uuid,
        org_id: Uuid,
        placements: &[CardPlacement],
    ) -> Result<u64, sqlx::Error> {
        let mut updated = 0u64;

        for placement in placements {
            let result = sqlx::query(
                r#"
                UPDATE cards
                SET "order" = $2, list_id = $3, updated_at = NOW()
                WHERE id = $1
                  AND EXISTS (
                      SELECT 1 FROM lists l
                      JOIN boards b ON b.id = l.board_id
                      WHERE l.id = $3 AND b.id = $4 AND b.org_id = $5
                  )
                  AND EXISTS (
                      SELECT 1 FROM lists l2
                      JOIN boards b2 ON b2.id = l2.board_id
                      WHERE l2.id = cards.list_id AND b2.org_id = $5
                  )
                "#,
            )
            .bind(placement.id)
            .bind(placement.order)
            .bind(placement.list_id)
            .bind(board_id)
            .bind(org_id)
            .execute(&mut **tx)
            .await?;

            updated += result.rows_affected();
        }

        Ok(updated)
    }
}
