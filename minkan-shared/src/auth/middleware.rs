/// Authentication context for axum handlers
///
/// The API's auth layer validates the Bearer token and inserts an
/// [`AuthContext`] into request extensions. Handlers extract it with
/// axum's `Extension` extractor; every tenant-scoped query takes its
/// `org_id` from this context and never from request parameters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authentication context added to request extensions after a token
/// validates
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Organization the session acts in, taken from the token claims
    pub org_id: Uuid,
}
