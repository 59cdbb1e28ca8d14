/// Organization endpoints
///
/// # Endpoints
///
/// - `GET /v1/organizations` - organizations the caller belongs to
/// - `POST /v1/organizations` - create an organization (caller becomes
///   owner)
/// - `POST /v1/organizations/:id/switch` - re-issue tokens scoped to
///   another organization after a membership check
///
/// Switching never mutates an existing token. The new token pair carries
/// the new `org_id` claim, and the old tokens keep working for the old
/// organization until they expire.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use minkan_shared::{
    auth::{jwt, middleware::AuthContext},
    models::{
        membership::{CreateMembership, Membership, MembershipRole},
        organization::{CreateOrganization, Organization},
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};

/// Create organization request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    /// Organization name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Optional logo image URL
    pub image_url: Option<String>,
}

/// Switch organization response
#[derive(Debug, Serialize, Deserialize)]
pub struct SwitchOrganizationResponse {
    /// Organization the new tokens are scoped to
    pub org_id: String,

    /// New access token
    pub access_token: String,

    /// New refresh token
    pub refresh_token: String,
}

/// Lists the organizations the caller is a member of
pub async fn list_organizations(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Organization>>> {
    let orgs = Organization::list_by_user(&state.db, auth.user_id).await?;

    Ok(Json(orgs))
}

/// Creates an organization with the caller as owner
///
/// The organization and the owner membership commit together; an
/// organization with no members can never exist.
pub async fn create_organization(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateOrganizationRequest>,
) -> ApiResult<Json<Organization>> {
    req.validate().map_err(validation_error)?;

    let mut tx = state.db.begin().await?;

    let org = Organization::create(
        &mut *tx,
        CreateOrganization {
            name: req.name,
            image_url: req.image_url,
        },
    )
    .await?;

    Membership::create(
        &mut *tx,
        CreateMembership {
            org_id: org.id,
            user_id: auth.user_id,
            role: MembershipRole::Owner,
        },
    )
    .await?;

    tx.commit().await?;

    Ok(Json(org))
}

/// Switches the caller's session to another organization
///
/// Verifies the caller is a member of the target organization, then
/// issues a fresh token pair scoped to it.
///
/// # Errors
///
/// - `403 Forbidden`: caller is not a member of the target organization
pub async fn switch_organization(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(org_id): Path<Uuid>,
) -> ApiResult<Json<SwitchOrganizationResponse>> {
    let membership = Membership::find(&state.db, org_id, auth.user_id).await?;
    if membership.is_none() {
        return Err(ApiError::Forbidden(
            "Not a member of this organization".to_string(),
        ));
    }

    let (access_token, refresh_token) =
        jwt::issue_token_pair(auth.user_id, org_id, state.jwt_secret())?;

    Ok(Json(SwitchOrganizationResponse {
        org_id: org_id.to_string(),
        access_token,
        refresh_token,
    }))
}
