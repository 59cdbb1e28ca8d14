/// Card endpoints
///
/// # Endpoints
///
/// - `POST /v1/lists/:list_id/cards` - create a card at the end of the
///   list
/// - `GET /v1/cards/:id` - fetch one card
/// - `PATCH /v1/cards/:id` - update title and/or description
/// - `DELETE /v1/cards/:id` - delete
/// - `PUT /v1/boards/:board_id/cards/reorder` - apply a batch of card
///   placements in one transaction
///
/// The reorder endpoint accepts `{id, list_id, order}` placements, the
/// union both lists emit on a cross-list move, so the source list's
/// renumbering commits together with the destination's. The batch is
/// all-or-nothing.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use minkan_shared::{
    auth::middleware::AuthContext,
    models::{
        audit_log::{AuditAction, AuditLog, CreateAuditLog, EntityType},
        board::Board,
        card::{Card, CreateCard, UpdateCard},
        list::{next_order, List},
    },
    reorder::CardPlacement,
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

/// Create card request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCardRequest {
    /// Card title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
}

/// Update card request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCardRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,
}

/// Reorder request: card placements to apply
#[derive(Debug, Deserialize)]
pub struct ReorderCardsRequest {
    pub placements: Vec<CardPlacement>,
}

/// Creates a card at the end of a list
///
/// # Errors
///
/// - `404 Not Found`: the list does not exist in this organization
pub async fn create_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<Uuid>,
    Json(req): Json<CreateCardRequest>,
) -> ApiResult<Json<Card>> {
    req.validate().map_err(validation_error)?;

    let actor = super::audit_actor(&state.db, auth.user_id).await?;

    let list = List::find_by_id_and_org(&state.db, list_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("List not found".to_string()))?;

    let max = Card::max_order(&state.db, list.id).await?;
    let card = Card::create(
        &state.db,
        CreateCard {
            list_id: list.id,
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
            entity_id: card.id,
            entity_type: EntityType::Card,
            entity_title: card.title.clone(),
            action: AuditAction::Create,
        },
    )
    .await?;

    state.cache.invalidate(&board_cache_key(list.board_id)).await;

    Ok(Json(card))
}

/// Fetches one card
pub async fn get_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Card>> {
    let card = Card::find_by_id_and_org(&state.db, id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    Ok(Json(card))
}

/// Updates a card's title and/or description
pub async fn update_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCardRequest>,
) -> ApiResult<Json<Card>> {
    req.validate().map_err(validation_error)?;

    let actor = super::audit_actor(&state.db, auth.user_id).await?;

    let card = Card::update(
        &state.db,
        id,
        auth.org_id,
        UpdateCard {
            title: req.title,
            description: req.description,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    AuditLog::create(
        &state.db,
        CreateAuditLog {
            org_id: auth.org_id,
            user_id: actor.id,
            user_name: actor.display_name().to_string(),
            entity_id: card.id,
            entity_type: EntityType::Card,
            entity_title: card.title.clone(),
            action: AuditAction::Update,
        },
    )
    .await?;

    let list = List::find_by_id_and_org(&state.db, card.list_id, auth.org_id).await?;
    if let Some(list) = list {
        state.cache.invalidate(&board_cache_key(list.board_id)).await;
    }

    Ok(Json(card))
}

/// Deletes a card
pub async fn delete_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let actor = super::audit_actor(&state.db, auth.user_id).await?;

    let card = Card::find_by_id_and_org(&state.db, id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    let list = List::find_by_id_and_org(&state.db, card.list_id, auth.org_id).await?;

    let deleted = Card::delete(&state.db, id, auth.org_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Card not found".to_string()));
    }

    AuditLog::create(
        &state.db,
        CreateAuditLog {
            org_id: auth.org_id,
            user_id: actor.id,
            user_name: actor.display_name().to_string(),
            entity_id: card.id,
            entity_type: EntityType::Card,
            entity_title: card.title,
            action: AuditAction::Delete,
        },
    )
    .await?;

    if let Some(list) = list {
        state.cache.invalidate(&board_cache_key(list.board_id)).await;
    }

    Ok(Json(json!({ "deleted": true })))
}

/// Applies a batch of card placements atomically
///
/// A cross-list move arrives as one batch covering both lists; either
/// the whole batch commits, including the card's new `list_id`, or
/// nothing does.
///
/// # Errors
///
/// - `404 Not Found`: the board does not exist in this organization
/// - `400 Bad Request`: a placement did not resolve to a card in this
///   organization or a list on this board; nothing was changed
pub async fn reorder_cards(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<Uuid>,
    Json(req): Json<ReorderCardsRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let board = Board::find_by_id_and_org(&state.db, board_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    if req.placements.is_empty() {
        return Ok(Json(json!({ "updated": 0 })));
    }

    let mut tx = state.db.begin().await?;
    let updated = Card::apply_order(&mut tx, board.id, auth.org_id, &req.placements).await?;

    if updated != req.placements.len() as u64 {
        tx.rollback().await?;
        return Err(ApiError::BadRequest(
            "Reorder batch referenced cards or lists outside this board".to_string(),
        ));
    }

    tx.commit().await?;

    state.cache.invalidate(&board_cache_key(board.id)).await;

    Ok(Json(json!({ "updated": updated })))
}
