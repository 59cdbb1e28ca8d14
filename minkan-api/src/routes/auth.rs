/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - register a new user with a personal
///   organization
/// - `POST /v1/auth/login` - login and get a token pair
/// - `POST /v1/auth/refresh` - exchange a refresh token for a new access
///   token

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, Json};
use minkan_shared::{
    auth::{jwt, password},
    models::{
        membership::{CreateMembership, Membership, MembershipRole},
        organization::{CreateOrganization, Organization},
        user::{CreateUser, User},
    },
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (also validated for strength)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    /// Optional organization name for the personal organization
    #[validate(length(max = 100, message = "Organization name must be at most 100 characters"))]
    pub organization_name: Option<String>,
}

/// Register response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// User ID
    pub user_id: String,

    /// Personal organization ID
    pub org_id: String,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// User ID
    pub user_id: String,

    /// Organization the tokens are scoped to
    pub org_id: String,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,
}

/// Registers a new user
///
/// Creates the user, a personal organization, and an owner membership in
/// one transaction, then returns a token pair scoped to that
/// organization. A failure partway through leaves no partial account:
/// either all three rows exist or none do, so the email is never claimed
/// by a user who cannot log in.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `409 Conflict`: email already exists
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate().map_err(validation_error)?;

    password::validate_password_strength(&req.password).map_err(|e| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message: e,
        }])
    })?;

    let password_hash = password::hash_password(&req.password)?;

    let mut tx = state.db.begin().await?;

    let user = User::create(
        &mut *tx,
        CreateUser {
            email: req.email.clone(),
            password_hash,
            name: req.name.clone(),
        },
    )
    .await?;

    let org_name = req
        .organization_name
        .unwrap_or_else(|| format!("{}'s Workspace", user.display_name()));

    let org = Organization::create(
        &mut *tx,
        CreateOrganization {
            name: org_name,
            image_url: None,
        },
    )
    .await?;

    Membership::create(
        &mut *tx,
        CreateMembership {
            org_id: org.id,
            user_id: user.id,
            role: MembershipRole::Owner,
        },
    )
    .await?;

    tx.commit().await?;

    let (access_token, refresh_token) =
        jwt::issue_token_pair(user.id, org.id, state.jwt_secret())?;

    Ok(Json(RegisterResponse {
        user_id: user.id.to_string(),
        org_id: org.id.to_string(),
        access_token,
        refresh_token,
    }))
}

/// Authenticates a user and returns a token pair scoped to their first
/// organization
///
/// # Errors
///
/// - `401 Unauthorized`: invalid credentials
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate().map_err(validation_error)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let memberships = Membership::list_by_user(&state.db, user.id).await?;
    let org_id = memberships
        .first()
        .map(|m| m.org_id)
        .ok_or_else(|| ApiError::InternalError("User has no organization".to_string()))?;

    User::update_last_login(&state.db, user.id).await?;

    let (access_token, refresh_token) = jwt::issue_token_pair(user.id, org_id, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        user_id: user.id.to_string(),
        org_id: org_id.to_string(),
        access_token,
        refresh_token,
    }))
}

/// Exchanges a refresh token for a new access token
///
/// # Errors
///
/// - `401 Unauthorized`: invalid or expired refresh token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let access_token = jwt::refresh_access_token(&req.refresh_token, state.jwt_secret())?;

    Ok(Json(RefreshResponse { access_token }))
}
