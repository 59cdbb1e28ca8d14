/// Database models for Minkan
///
/// This module contains all database models and their CRUD operations.
/// Every entity belongs (directly or transitively) to one organization,
/// and the `*_and_org` finders are the tenant-isolation boundary: API
/// handlers must never load an entity without scoping by the caller's
/// organization id.
///
/// # Models
///
/// - `user`: User accounts and authentication
/// - `organization`: The tenant-scoping unit
/// - `membership`: User-organization relationships with roles
/// - `board`: A collection of ordered lists
/// - `list`: An ordered collection of cards within a board
/// - `card`: A unit of work within a list
/// - `note`: Free-form organization notes
/// - `audit_log`: Append-only activity records
/// - `org_subscription`: Billing state per organization

pub mod audit_log;
pub mod board;
pub mod card;
pub mod list;
pub mod membership;
pub mod note;
pub mod org_subscription;
pub mod organization;
pub mod user;
