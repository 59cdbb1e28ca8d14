/// Authentication primitives
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength validation
/// - [`jwt`]: token generation and validation, with the active
///   organization carried as a claim
/// - [`middleware`]: the [`middleware::AuthContext`] the API's auth
///   layer injects into request extensions
///
/// Every token is scoped to one organization. Switching organizations
/// means issuing a fresh token pair, never mutating an existing token.

pub mod jwt;
pub mod middleware;
pub mod password;
