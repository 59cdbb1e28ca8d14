/// API route handlers
///
/// Route handlers organized by resource:
///
/// - `health`: health check endpoint
/// - `auth`: register, login, refresh
/// - `organizations`: list, create, switch
/// - `boards`: board CRUD and the cached full view
/// - `lists`: list create/rename/delete/copy and reorder
/// - `cards`: card CRUD and reorder
/// - `notes`: note CRUD
/// - `activity`: audit log queries
/// - `billing`: subscription status and provider redirects
///
/// Every mutating handler follows the same shape: validate the request,
/// resolve the target under the caller's organization (404 if it is not
/// there), persist, write the audit record, and invalidate the affected
/// cache routes before responding.

use minkan_shared::models::user::User;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

pub mod activity;
pub mod auth;
pub mod billing;
pub mod boards;
pub mod cards;
pub mod health;
pub mod lists;
pub mod notes;
pub mod organizations;

/// Resolves the acting user for audit records
///
/// A valid token for a since-deleted user is treated as unauthorized.
pub(crate) async fn audit_actor(db: &sqlx::PgPool, user_id: Uuid) -> ApiResult<User> {
    User::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))
}
