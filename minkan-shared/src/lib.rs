//! # Minkan Shared Library
//!
//! This crate contains shared types, utilities, and business logic used by
//! the Minkan API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Passwords, tokens, and the request auth context
//! - `billing`: Payment provider abstraction (Stripe + mock)
//! - `cache`: In-process route cache with explicit invalidation
//! - `db`: Connection pool and migrations
//! - `reorder`: Pure drag-and-drop reorder engine

pub mod auth;
pub mod billing;
pub mod cache;
pub mod db;
pub mod models;
pub mod reorder;

/// Current version of the Minkan shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
