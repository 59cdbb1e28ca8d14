/// Shared test harness
///
/// Builds the full router against a lazily-connecting pool (no database
/// needs to be running; any handler that touches it fails) and a mock
/// billing provider whose calls the tests can count.

use std::sync::Arc;

use axum::Router;
use minkan_api::{
    app::{build_router, AppState},
    config::{ApiConfig, Config, DatabaseConfig, JwtConfig, StripeConfig},
};
use minkan_shared::{
    auth::jwt::{create_token, Claims, TokenType},
    billing::mock::MockBillingProvider,
};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

pub struct TestContext {
    pub app: Router,
    pub billing: Arc<MockBillingProvider>,
    pub user_id: Uuid,
    pub org_id: Uuid,
}

impl TestContext {
    pub fn new() -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                app_url: "http://localhost:3000".to_string(),
                cache_ttl_seconds: 60,
            },
            database: DatabaseConfig {
                // Nothing listens here; the pool connects lazily so the
                // router still builds.
                url: "postgresql://127.0.0.1:1/minkan_test".to_string(),
                max_connections: 2,
            },
            jwt: JwtConfig {
                secret: JWT_SECRET.to_string(),
            },
            stripe: StripeConfig {
                secret_key: "sk_test_unused".to_string(),
                price_id: "price_unused".to_string(),
            },
        };

        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            // Keep the failure fast when a test does let a handler reach
            // the (unreachable) database.
            .acquire_timeout(std::time::Duration::from_millis(500))
            .connect_lazy(&config.database.url)
            .expect("lazy pool should build without a server");

        let billing = Arc::new(MockBillingProvider::new());
        let state = AppState::new(pool, config, billing.clone());

        Self {
            app: build_router(state),
            billing,
            user_id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
        }
    }

    /// Authorization header value with a valid access token
    pub fn auth_header(&self) -> String {
        let claims = Claims::new(self.user_id, self.org_id, TokenType::Access);
        let token = create_token(&claims, JWT_SECRET).expect("token creation");
        format!("Bearer {}", token)
    }

    /// Authorization header value carrying a refresh token where an
    /// access token is expected
    pub fn refresh_as_access_header(&self) -> String {
        let claims = Claims::new(self.user_id, self.org_id, TokenType::Refresh);
        let token = create_token(&claims, JWT_SECRET).expect("token creation");
        format!("Bearer {}", token)
    }
}
