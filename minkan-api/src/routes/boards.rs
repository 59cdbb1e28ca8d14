/// Board endpoints
///
/// # Endpoints
///
/// - `POST /v1/boards` - create a board
/// - `GET /v1/boards` - list the organization's boards
/// - `GET /v1/boards/:id` - full view (board + lists + cards), cached
/// - `PATCH /v1/boards/:id` - rename
/// - `DELETE /v1/boards/:id` - delete (lists and cards cascade)
///
/// The full view is the only cached route. Every board, list, or card
/// mutation invalidates the board's cache entry before responding.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use minkan_shared::{
    auth::middleware::AuthContext,
    models::{
        audit_log::{AuditAction, AuditLog, CreateAuditLog, EntityType},
        board::{Board, CreateBoard},
        card::Card,
        list::List,
    },
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};

/// Cache key for a board's full view
pub(crate) fn board_cache_key(board_id: Uuid) -> String {
    format!("/v1/boards/{}", board_id)
}

/// Create board request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardRequest {
    /// Board title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional cover image URL
    pub image_url: Option<String>,
}

/// Rename board request
#[derive(Debug, Deserialize, Validate)]
pub struct RenameBoardRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
}

/// One list with its cards, as rendered in the full board view
#[derive(Debug, Serialize, Deserialize)]
pub struct ListView {
    #[serde(flatten)]
    pub list: List,

    /// Cards in sort order
    pub cards: Vec<Card>,
}

/// Full board view: the board plus its lists and cards in display order
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardView {
    #[serde(flatten)]
    pub board: Board,

    /// Lists in sort order, each with its cards
    pub lists: Vec<ListView>,
}

/// Creates a board and records the audit entry
pub async fn create_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateBoardRequest>,
) -> ApiResult<Json<Board>> {
    req.validate().map_err(validation_error)?;

    let actor = super::audit_actor(&state.db, auth.user_id).await?;

    let board = Board::create(
        &state.db,
        CreateBoard {
            org_id: auth.org_id,
            title: req.title,
            image_url: req.image_url,
        },
    )
    .await?;

    AuditLog::create(
        &state.db,
        CreateAuditLog {
            org_id: auth.org_id,
            user_id: actor.id,
            user_name: actor.display_name().to_string(),
            entity_id: board.id,
            entity_type: EntityType::Board,
            entity_title: board.title.clone(),
            action: AuditAction::Create,
        },
    )
    .await?;

    Ok(Json(board))
}

/// Lists the organization's boards, newest first
pub async fn list_boards(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Board>>> {
    let boards = Board::list_by_org(&state.db, auth.org_id).await?;

    Ok(Json(boards))
}

/// Returns the full board view, served from the route cache when warm
///
/// The tenant check runs before the cache read, so a cached entry can
/// never leak across organizations.
pub async fn get_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let board = Board::find_by_id_and_org(&state.db, id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    let cache_key = board_cache_key(id);
    if let Some(cached) = state.cache.get(&cache_key).await {
        return Ok(Json(cached));
    }

    let lists = List::list_by_board(&state.db, board.id).await?;
    let mut cards = Card::list_by_board(&state.db, board.id).await?;

    let mut list_views = Vec::with_capacity(lists.len());
    for list in lists {
        let (mine, rest): (Vec<Card>, Vec<Card>) =
            cards.into_iter().partition(|c| c.list_id == list.id);
        cards = rest;
        list_views.push(ListView { list, cards: mine });
    }

    let view = json!(BoardView {
        board,
        lists: list_views,
    });

    state.cache.put(cache_key, view.clone()).await;

    Ok(Json(view))
}

/// Renames a board
pub async fn rename_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameBoardRequest>,
) -> ApiResult<Json<Board>> {
    req.validate().map_err(validation_error)?;

    let actor = super::audit_actor(&state.db, auth.user_id).await?;

    let board = Board::rename(&state.db, id, auth.org_id, &req.title)
        .await?
        .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    AuditLog::create(
        &state.db,
        CreateAuditLog {
            org_id: auth.org_id,
            user_id: actor.id,
            user_name: actor.display_name().to_string(),
            entity_id: board.id,
            entity_type: EntityType::Board,
            entity_title: board.title.clone(),
            action: AuditAction::Update,
        },
    )
    .await?;

    state.cache.invalidate(&board_cache_key(board.id)).await;

    Ok(Json(board))
}

/// Deletes a board; its lists and cards cascade
pub async fn delete_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let actor = super::audit_actor(&state.db, auth.user_id).await?;

    // Fetch first so the audit entry can carry the title.
    let board = Board::find_by_id_and_org(&state.db, id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    let deleted = Board::delete(&state.db, id, auth.org_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Board not found".to_string()));
    }

    AuditLog::create(
        &state.db,
        CreateAuditLog {
            org_id: auth.org_id,
            user_id: actor.id,
            user_name: actor.display_name().to_string(),
            entity_id: board.id,
            entity_type: EntityType::Board,
            entity_title: board.title,
            action: AuditAction::Delete,
        },
    )
    .await?;

    state.cache.invalidate(&board_cache_key(id)).await;

    Ok(Json(json!({ "deleted": true })))
}
