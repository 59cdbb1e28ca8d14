/// Application state and router builder
///
/// Defines the shared application state and builds the axum router with
/// all routes and middleware.

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, patch, post, put},
    Router,
};
use minkan_shared::{
    auth::{jwt, middleware::AuthContext},
    billing::BillingProvider,
    cache::RouteCache,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned per request via axum's `State` extractor; everything inside is
/// cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Route response cache
    pub cache: Arc<RouteCache>,

    /// Payment provider client
    pub billing: Arc<dyn BillingProvider>,
}

impl AppState {
    /// Creates application state with the given billing provider
    pub fn new(db: PgPool, config: Config, billing: Arc<dyn BillingProvider>) -> Self {
        let ttl = std::time::Duration::from_secs(config.api.cache_ttl_seconds);
        Self {
            db,
            config: Arc::new(config),
            cache: Arc::new(RouteCache::new(ttl)),
            billing,
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete axum router
///
/// # Route table
///
/// ```text
/// /
/// ├── /health                              # Liveness (public)
/// └── /v1/
///     ├── /auth/                           # Public
///     │   ├── POST /register
///     │   ├── POST /login
///     │   └── POST /refresh
///     ├── /organizations/                  # Authenticated from here down
///     │   ├── GET  /
///     │   ├── POST /
///     │   └── POST /:id/switch
///     ├── /boards/
///     │   ├── POST   /
///     │   ├── GET    /
///     │   ├── GET    /:board_id            # Full view, cached
///     │   ├── PATCH  /:board_id
///     │   ├── DELETE /:board_id
///     │   ├── POST   /:board_id/lists
///     │   ├── PUT    /:board_id/lists/reorder
///     │   └── PUT    /:board_id/cards/reorder
///     ├── /lists/
///     │   ├── PATCH  /:list_id
///     │   ├── DELETE /:list_id
///     │   ├── POST   /:list_id/copy
///     │   └── POST   /:list_id/cards
///     ├── /cards/
///     │   ├── GET    /:id
///     │   ├── PATCH  /:id
///     │   ├── DELETE /:id
///     │   └── GET    /:id/activity
///     ├── /notes/                          # CRUD
///     ├── /activity/                       # GET / (paginated)
///     └── /billing/
///         ├── GET  /                       # Subscription status
///         └── POST /redirect               # Portal or checkout URL
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Public: no token exists yet at registration/login time.
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    let organization_routes = Router::new()
        .route(
            "/",
            get(routes::organizations::list_organizations)
                .post(routes::organizations::create_organization),
        )
        .route("/:id/switch", post(routes::organizations::switch_organization));

    let board_routes = Router::new()
        .route(
            "/",
            get(routes::boards::list_boards).post(routes::boards::create_board),
        )
        .route(
            "/:board_id",
            get(routes::boards::get_board)
                .patch(routes::boards::rename_board)
                .delete(routes::boards::delete_board),
        )
        .route("/:board_id/lists", post(routes::lists::create_list))
        .route("/:board_id/lists/reorder", put(routes::lists::reorder_lists))
        .route("/:board_id/cards/reorder", put(routes::cards::reorder_cards));

    let list_routes = Router::new()
        .route(
            "/:list_id",
            patch(routes::lists::rename_list).delete(routes::lists::delete_list),
        )
        .route("/:list_id/copy", post(routes::lists::copy_list))
        .route("/:list_id/cards", post(routes::cards::create_card));

    let card_routes = Router::new()
        .route(
            "/:id",
            get(routes::cards::get_card)
                .patch(routes::cards::update_card)
                .delete(routes::cards::delete_card),
        )
        .route("/:id/activity", get(routes::activity::card_activity));

    let note_routes = Router::new()
        .route(
            "/",
            get(routes::notes::list_notes).post(routes::notes::create_note),
        )
        .route(
            "/:id",
            get(routes::notes::get_note)
                .patch(routes::notes::update_note)
                .delete(routes::notes::delete_note),
        );

    let activity_routes = Router::new().route("/", get(routes::activity::org_activity));

    let billing_routes = Router::new()
        .route("/", get(routes::billing::billing_status))
        .route("/redirect", post(routes::billing::billing_redirect));

    // Everything except health and auth requires a valid access token.
    let protected_routes = Router::new()
        .nest("/organizations", organization_routes)
        .nest("/boards", board_routes)
        .nest("/lists", list_routes)
        .nest("/cards", card_routes)
        .nest("/notes", note_routes)
        .nest("/activity", activity_routes)
        .nest("/billing", billing_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let v1_routes = Router::new().nest("/auth", auth_routes).merge(protected_routes);

    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Validates the Bearer token and injects [`AuthContext`] into request
/// extensions. Rejected requests never reach a handler, so no query and
/// no billing call runs for them.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| crate::error::ApiError::Unauthorized("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_access_token(token, state.jwt_secret())?;

    let auth_context = AuthContext {
        user_id: claims.sub,
        org_id: claims.org_id,
    };
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
