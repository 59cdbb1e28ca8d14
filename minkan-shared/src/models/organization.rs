/// Organization model and database operations
///
/// Organizations are the tenant-scoping unit. Every board, note, audit log
/// and subscription belongs to exactly one organization, and matching the
/// caller's current organization id against the record's organization id is
/// the sole authorization check in the system.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE organizations (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     image_url TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Organization (tenant) record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    /// Unique organization ID
    pub id: Uuid,

    /// Organization display name
    pub name: String,

    /// Optional avatar/logo URL
    pub image_url: Option<String>,

    /// When the organization was created
    pub created_at: DateTime<Utc>,

    /// When the organization was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new organization
#[derive(Debug, Clone)]
pub struct CreateOrganization {
    /// Organization display name
    pub name: String,

    /// Optional avatar/logo URL
    pub image_url: Option<String>,
}

impl Organization {
    /// Creates a new organization
    ///
    /// Takes any executor so the organization and its owner membership
    /// can commit together.
    pub async fn create<'e, E>(executor: E, data: CreateOrganization) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let org = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, image_url)
            VALUES ($1, $2)
            RETURNING id, name, image_url, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.image_url)
        .fetch_one(executor)
        .await?;

        Ok(org)
    }

    /// Lists all organizations a user is a member of
    ///
    /// Used by the sidebar navigation and by organization switching, which
    /// must verify membership before re-issuing tokens for another org.
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let orgs = sqlx::query_as::<_, Organization>(
            r#"
            SELECT o.id, o.name, o.image_url, o.created_at, o.updated_at
            FROM organizations o
            JOIN memberships m ON m.org_id = o.id
            WHERE m.user_id = $1
            ORDER BY o.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(orgs)
    }
}
