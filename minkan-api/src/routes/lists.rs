/// List endpoints
///
/// # Endpoints
///
/// - `POST /v1/boards/:board_id/lists` - create a list at the end of the
///   board (`order` = current max + 1, or 1 on an empty board)
/// - `PATCH /v1/lists/:id` - rename
/// - `DELETE /v1/lists/:id` - delete (cards cascade)
/// - `POST /v1/lists/:id/copy` - duplicate the list and its cards
/// - `PUT /v1/boards/:board_id/lists/reorder` - apply a batch of list
///   placements in one transaction
///
/// The reorder endpoint accepts the placements emitted by the reorder
/// engine. The batch is all-or-nothing: if any placement does not
/// resolve to a list on this board in this organization, the whole
/// transaction rolls back and nothing is renumbered.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use minkan_shared::{
    auth::middleware::AuthContext,
    models::{
        audit_log::{AuditAction, AuditLog, CreateAuditLog, EntityType},
        board::Board,
        list::{next_order, CreateList, List},
    },
    reorder::ListPlacement,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use super::boards::board_cache_key;
use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};

/// Create list request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateListRequest {
    /// List title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
}

/// Rename list request
#[derive(Debug, Deserialize, Validate)]
pub struct RenameListRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
}

/// Reorder request: the full set of list placements for the board
#[derive(Debug, Deserialize)]
pub struct ReorderListsRequest {
    pub placements: Vec<ListPlacement>,
}

/// Creates a list at the end of a board
///
/// # Errors
///
/// - `404 Not Found`: the board does not exist in this organization
pub async fn create_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<Uuid>,
    Json(req): Json<CreateListRequest>,
) -> ApiResult<Json<List>> {
    req.validate().map_err(validation_error)?;

    let actor = super::audit_actor(&state.db, auth.user_id).await?;

    let board = Board::find_by_id_and_org(&state.db, board_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    let max = List::max_order(&state.db, board.id).await?;
    let list = List::create(
        &state.db,
        CreateList {
            board_id: board.id,
            title: req.title,
            order: next_order(max),
        },
    )
    .await?;

    AuditLog::create(
        &state.db,
        CreateAuditLog {
            org_id: auth.org_id,
            user_id: actor.id,
            user_name: actor.display_name().to_string(),
            entity_id: list.id,
            entity_type: EntityType::List,
            entity_title: list.title.clone(),
            action: AuditAction::Create,
        },
    )
    .await?;

    state.cache.invalidate(&board_cache_key(board.id)).await;

    Ok(Json(list))
}

/// Renames a list
pub async fn rename_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameListRequest>,
) -> ApiResult<Json<List>> {
    req.validate().map_err(validation_error)?;

    let actor = super::audit_actor(&state.db, auth.user_id).await?;

    let list = List::rename(&state.db, id, auth.org_id, &req.title)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    AuditLog::create(
        &state.db,
        CreateAuditLog {
            org_id: auth.org_id,
            user_id: actor.id,
            user_name: actor.display_name().to_string(),
            entity_id: list.id,
            entity_type: EntityType::List,
            entity_title: list.title.clone(),
            action: AuditAction::Update,
        },
    )
    .await?;

    state.cache.invalidate(&board_cache_key(list.board_id)).await;

    Ok(Json(list))
}

/// Deletes a list; its cards cascade
pub async fn delete_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let actor = super::audit_actor(&state.db, auth.user_id).await?;

    let list = List::find_by_id_and_org(&state.db, id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    let deleted = List::delete(&state.db, id, auth.org_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("List not found".to_string()));
    }

    AuditLog::create(
        &state.db,
        CreateAuditLog {
            org_id: auth.org_id,
            user_id: actor.id,
            user_name: actor.display_name().to_string(),
            entity_id: list.id,
            entity_type: EntityType::List,
            entity_title: list.title,
            action: AuditAction::Delete,
        },
    )
    .await?;

    state.cache.invalidate(&board_cache_key(list.board_id)).await;

    Ok(Json(json!({ "deleted": true })))
}

/// Duplicates a list with all its cards at the end of the board
pub async fn copy_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<List>> {
    let actor = super::audit_actor(&state.db, auth.user_id).await?;

    let source = List::find_by_id_and_org(&state.db, id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    let max = List::max_order(&state.db, source.board_id).await?;
    let title = format!("{} - Copy", source.title);

    let mut tx = state.db.begin().await?;
    let copy = List::copy_with_cards(&mut tx, source.id, &title, next_order(max)).await?;

    AuditLog::create(
        &mut *tx,
        CreateAuditLog {
            org_id: auth.org_id,
            user_id: actor.id,
            user_name: actor.display_name().to_string(),
            entity_id: copy.id,
            entity_type: EntityType::List,
            entity_title: copy.title.clone(),
            action: AuditAction::Create,
        },
    )
    .await?;
    tx.commit().await?;

    state.cache.invalidate(&board_cache_key(copy.board_id)).await;

    Ok(Json(copy))
}

/// Applies a batch of list placements atomically
///
/// # Errors
///
/// - `404 Not Found`: the board does not exist in this organization
/// - `400 Bad Request`: a placement did not resolve to a list on this
///   board; nothing was changed
pub async fn reorder_lists(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<Uuid>,
    Json(req): Json<ReorderListsRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let board = Board::find_by_id_and_org(&state.db, board_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    if req.placements.is_empty() {
        return Ok(Json(json!({ "updated": 0 })));
    }

    let mut tx = state.db.begin().await?;
    let updated = List::apply_order(&mut tx, board.id, auth.org_id, &req.placements).await?;

    if updated != req.placements.len() as u64 {
        tx.rollback().await?;
        return Err(ApiError::BadRequest(
            "Reorder batch referenced lists outside this board".to_string(),
        ));
    }

    tx.commit().await?;

    state.cache.invalidate(&board_cache_key(board.id)).await;

    Ok(Json(json!({ "updated": updated })))
}
