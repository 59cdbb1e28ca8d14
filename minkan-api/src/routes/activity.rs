/// Activity endpoints
///
/// Read-only views over the audit log.
///
/// # Endpoints
///
/// - `GET /v1/activity?limit=&offset=` - the organization's activity,
///   newest first
/// - `GET /v1/cards/:id/activity` - one card's history

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use minkan_shared::{
    auth::middleware::AuthContext,
    models::{audit_log::AuditLog, card::Card},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Lists the organization's audit entries, newest first
pub async fn org_activity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ActivityQuery>,
) -> ApiResult<Json<Vec<AuditLog>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let logs = AuditLog::list_by_org(&state.db, auth.org_id, limit, offset).await?;

    Ok(Json(logs))
}

/// Lists one card's audit entries, newest first
///
/// # Errors
///
/// - `404 Not Found`: the card does not exist in this organization
pub async fn card_activity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<AuditLog>>> {
    let card = Card::find_by_id_and_org(&state.db, id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    let logs = AuditLog::list_by_entity(&state.db, auth.org_id, card.id).await?;

    Ok(Json(logs))
}
