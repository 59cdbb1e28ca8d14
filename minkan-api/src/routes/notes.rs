/// Note endpoints
///
/// Notes are org-scoped documents, independent of boards.
///
/// # Endpoints
///
/// - `POST /v1/notes`
/// - `GET /v1/notes`
/// - `GET /v1/notes/:id`
/// - `PATCH /v1/notes/:id` - rename and/or replace content
/// - `DELETE /v1/notes/:id`

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use minkan_shared::{
    auth::middleware::AuthContext,
    models::{
        audit_log::{AuditAction, AuditLog, CreateAuditLog, EntityType},
        note::{CreateNote, Note, UpdateNote},
    },
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};

/// Create note request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateNoteRequest {
    /// Note title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional body
    pub content: Option<String>,
}

/// Update note request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNoteRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    /// New body
    pub content: Option<String>,
}

/// Creates a note
pub async fn create_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateNoteRequest>,
) -> ApiResult<Json<Note>> {
    req.validate().map_err(validation_error)?;

    let actor = super::audit_actor(&state.db, auth.user_id).await?;

    let note = Note::create(
        &state.db,
        CreateNote {
            org_id: auth.org_id,
            title: req.title,
            content: req.content,
        },
    )
    .await?;

    AuditLog::create(
        &state.db,
        CreateAuditLog {
            org_id: auth.org_id,
            user_id: actor.id,
            user_name: actor.display_name().to_string(),
            entity_id: note.id,
            entity_type: EntityType::Note,
            entity_title: note.title.clone(),
            action: AuditAction::Create,
        },
    )
    .await?;

    Ok(Json(note))
}

/// Lists the organization's notes, newest first
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Note>>> {
    let notes = Note::list_by_org(&state.db, auth.org_id).await?;

    Ok(Json(notes))
}

/// Fetches one note
pub async fn get_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Note>> {
    let note = Note::find_by_id_and_org(&state.db, id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(note))
}

/// Updates a note's title and/or content
pub async fn update_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> ApiResult<Json<Note>> {
    req.validate().map_err(validation_error)?;

    let actor = super::audit_actor(&state.db, auth.user_id).await?;

    let note = Note::update(
        &state.db,
        id,
        auth.org_id,
        UpdateNote {
            title: req.title,
            content: req.content,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    AuditLog::create(
        &state.db,
        CreateAuditLog {
            org_id: auth.org_id,
            user_id: actor.id,
            user_name: actor.display_name().to_string(),
            entity_id: note.id,
            entity_type: EntityType::Note,
            entity_title: note.title.clone(),
            action: AuditAction::Update,
        },
    )
    .await?;

    Ok(Json(note))
}

/// Deletes a note
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let actor = super::audit_actor(&state.db, auth.user_id).await?;

    let note = Note::find_by_id_and_org(&state.db, id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    let deleted = Note::delete(&state.db, id, auth.org_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Note not found".to_string()));
    }

    AuditLog::create(
        &state.db,
        CreateAuditLog {
            org_id: auth.org_id,
            user_id: actor.id,
            user_name: actor.display_name().to_string(),
            entity_id: note.id,
            entity_type: EntityType::Note,
            entity_title: note.title,
            action: AuditAction::Delete,
        },
    )
    .await?;

    Ok(Json(json!({ "deleted": true })))
}
