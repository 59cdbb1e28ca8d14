/// Audit log model: append-only activity records
///
/// Every create/rename/delete of a board, list, card or note records an
/// audit row with the acting user's name denormalized, so activity stays
/// readable after the user is deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE audit_logs (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     org_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
///     user_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     user_name VARCHAR(255) NOT NULL,
///     entity_id UUID NOT NULL,
///     entity_type VARCHAR(20) NOT NULL,
///     entity_title VARCHAR(255) NOT NULL,
///     action VARCHAR(20) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Kind of entity an audit record refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Board,
    List,
    Card,
    Note,
}

impl EntityType {
    /// Converts entity type to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Board => "board",
            EntityType::List => "list",
            EntityType::Card => "card",
            EntityType::Note => "note",
        }
    }
}

/// Kind of mutation an audit record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    /// Converts action to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
        }
    }
}

/// Audit log record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditLog {
    /// Unique record ID
    pub id: Uuid,

    /// Organization the mutation happened in
    pub org_id: Uuid,

    /// Acting user (null if since deleted)
    pub user_id: Option<Uuid>,

    /// Acting user's display name at the time of the action
    pub user_name: String,

    /// ID of the affected entity
    pub entity_id: Uuid,

    /// Kind of the affected entity
    pub entity_type: String,

    /// Title of the affected entity at the time of the action
    pub entity_title: String,

    /// What happened
    pub action: String,

    /// When it happened
    pub created_at: DateTime<Utc>,
}

/// Input for recording an audit entry
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub org_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub entity_id: Uuid,
    pub entity_type: EntityType,
    pub entity_title: String,
    pub action: AuditAction,
}

impl AuditLog {
    /// Records an audit entry
    ///
    /// Takes any executor so the record can be written inside the same
    /// transaction as the mutation it describes.
    pub async fn create<'e, E>(executor: E, data: CreateAuditLog) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let log = sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_logs (org_id, user_id, user_name, entity_id, entity_type, entity_title, action)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, org_id, user_id, user_name, entity_id, entity_type, entity_title, action, created_at
            "#,
        )
        .bind(data.org_id)
        .bind(data.user_id)
        .bind(data.user_name)
        .bind(data.entity_id)
        .bind(data.entity_type.as_str())
        .bind(data.entity_title)
        .bind(data.action.as_str())
        .fetch_one(executor)
        .await?;

        Ok(log)
    }

    /// Lists audit entries for an organization, newest first, paginated
    pub async fn list_by_org<'e, E>(
        executor: E,
        org_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let logs = sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT id, org_id, user_id, user_name, entity_id, entity_type, entity_title, action, created_at
            FROM audit_logs
            WHERE org_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(org_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(logs)
    }

    /// Lists audit entries for one entity, newest first
    pub async fn list_by_entity<'e, E>(
        executor: E,
        org_id: Uuid,
        entity_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let logs = sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT id, org_id, user_id, user_name, entity_id, entity_type, entity_title, action, created_at
            FROM audit_logs
            WHERE org_id = $1 AND entity_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(org_id)
        .bind(entity_id)
        .fetch_all(executor)
        .await?;

        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_as_str() {
        assert_eq!(EntityType::Board.as_str(), "board");
        assert_eq!(EntityType::List.as_str(), "list");
        assert_eq!(EntityType::Card.as_str(), "card");
        assert_eq!(EntityType::Note.as_str(), "note");
    }

    #[test]
    fn test_audit_action_as_str() {
        assert_eq!(AuditAction::Create.as_str(), "create");
        assert_eq!(AuditAction::Update.as_str(), "update");
        assert_eq!(AuditAction::Delete.as_str(), "delete");
    }
}
