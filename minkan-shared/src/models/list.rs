/// List model and database operations
///
/// A list is an ordered collection of cards within a board. The `"order"`
/// column is a client-visible sort key: a newly created list gets
/// `max + 1` (or 1 on an empty board), and the reorder endpoint renumbers
/// all of a board's lists densely from 0.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE lists (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     "order" INTEGER NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::reorder::ListPlacement;

/// List record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct List {
    /// Unique list ID
    pub id: Uuid,

    /// Board this list belongs to
    pub board_id: Uuid,

    /// List title
    pub title: String,

    /// Sort position within the board
    pub order: i32,

    /// When the list was created
    pub created_at: DateTime<Utc>,

    /// When the list was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new list
#[derive(Debug, Clone)]
pub struct CreateList {
    /// Owning board
    pub board_id: Uuid,

    /// List title
    pub title: String,

    /// Sort position (see [`next_order`])
    pub order: i32,
}

/// Computes the order for a newly created list or card
///
/// Given the current maximum order in the container, the new entry goes
/// after everything else: `max + 1`, or 1 when the container is empty.
pub fn next_order(current_max: Option<i32>) -> i32 {
    match current_max {
        Some(max) => max + 1,
        None => 1,
    }
}

impl List {
    /// Creates a new list
    pub async fn create(pool: &PgPool, data: CreateList) -> Result<Self, sqlx::Error> {
        let list = sqlx::query_as::<_, List>(
            r#"
            INSERT INTO lists (board_id, title, "order")
            VALUES ($1, $2, $3)
            RETURNING id, board_id, title, "order", created_at, updated_at
            "#,
        )
        .bind(data.board_id)
        .bind(data.title)
        .bind(data.order)
        .fetch_one(pool)
        .await?;

        Ok(list)
    }

    /// Finds a list by ID with tenant isolation (via its board)
    pub async fn find_by_id_and_org(
        pool: &PgPool,
        id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let list = sqlx::query_as::<_, List>(
            r#"
            SELECT l.id, l.board_id, l.title, l."order", l.created_at, l.updated_at
            FROM lists l
            JOIN boards b ON b.id = l.board_id
            WHERE l.id = $1 AND b.org_id = $2
            "#,
        )
        .bind(id)
        .bind(org_id)
        .fetch_optional(pool)
        .await?;

        Ok(list)
    }

    /// Lists all lists on a board, in sort order
    pub async fn list_by_board(pool: &PgPool, board_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let lists = sqlx::query_as::<_, List>(
            r#"
            SELECT id, board_id, title, "order", created_at, updated_at
            FROM lists
            WHERE board_id = $1
            ORDER BY "order" ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        Ok(lists)
    }

    /// Returns the current maximum order on a board, or `None` when empty
    pub async fn max_order(pool: &PgPool, board_id: Uuid) -> Result<Option<i32>, sqlx::Error> {
        let max: Option<i32> =
            sqlx::query_scalar(r#"SELECT MAX("order") FROM lists WHERE board_id = $1"#)
                .bind(board_id)
                .fetch_one(pool)
                .await?;

        Ok(max)
    }

    /// Renames a list, scoped by organization
    pub async fn rename(
        pool: &PgPool,
        id: Uuid,
        org_id: Uuid,
        title: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let list = sqlx::query_as::<_, List>(
            r#"
            UPDATE lists l
            SET title = $3, updated_at = NOW()
            FROM boards b
            WHERE l.id = $1 AND b.id = l.board_id AND b.org_id = $2
            RETURNING l.id, l.board_id, l.title, l."order", l.created_at, l.updated_at
            "#,
        )
        .bind(id)
        .bind(org_id)
        .bind(title)
        .fetch_optional(pool)
        .await?;

        Ok(list)
    }

    /// Deletes a list, scoped by organization
    ///
    /// Cards are removed by CASCADE.
    pub async fn delete(pool: &PgPool, id: Uuid, org_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM lists l
            USING boards b
            WHERE l.id = $1 AND b.id = l.board_id AND b.org_id = $2
            "#,
        )
        .bind(id)
        .bind(org_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Duplicates a list and all of its cards inside a transaction
    ///
    /// The copy lands on the same board with the given title and order.
    /// Returns the new list.
    pub async fn copy_with_cards(
        tx: &mut Transaction<'_, Postgres>,
        source_id: Uuid,
        title: &str,
        order: i32,
    ) -> Result<Self, sqlx::Error> {
        let copy = sqlx::query_as::<_, List>(
            r#"
            INSERT INTO lists (board_id, title, "order")
            SELECT board_id, $2, $3 FROM lists WHERE id = $1
            RETURNING id, board_id, title, "order", created_at, updated_at
            "#,
        )
        .bind(source_id)
        .bind(title)
        .bind(order)
        .fetch_one(&mut **tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO cards (list_id, title, description, "order")
            SELECT $2, title, description, "order"
            FROM cards
            WHERE list_id = $1
            "#,
        )
        .bind(source_id)
        .bind(copy.id)
        .execute(&mut **tx)
        .await?;

        Ok(copy)
    }

    /// Applies a batch of list order updates inside a transaction
    ///
    /// Every update is scoped to the given board and organization: a
    /// placement referencing a list outside that scope updates nothing.
    /// Returns the number of rows actually updated, so callers can detect
    /// and reject partial batches before committing.
    pub async fn apply_order(
        tx: &mut Transaction<'_, Postgres>,
        board_id: Uuid,
        org_id: Uuid,
        placements: &[ListPlacement],
    ) -> Result<u64, sqlx::Error> {
        let mut updated = 0u64;

        for placement in placements {
            let result = sqlx::query(
                r#"
                UPDATE lists
                SET "order" = $2, updated_at = NOW()
                WHERE id = $1
                  AND board_id = $3
                  AND EXISTS (SELECT 1 FROM boards WHERE id = $3 AND org_id = $4)
                "#,
            )
            .bind(placement.id)
            .bind(placement.order)
            .bind(board_id)
            .bind(org_id)
            .execute(&mut **tx)
            .await?;

            updated += result.rows_affected();
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_order_appends_after_max() {
        assert_eq!(next_order(Some(5)), 6);
        assert_eq!(next_order(Some(0)), 1);
    }

    #[test]
    fn test_next_order_starts_at_one_for_empty_container() {
        assert_eq!(next_order(None), 1);
    }
}
