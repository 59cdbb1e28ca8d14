//! Minkan API server library
//!
//! HTTP API for the Minkan board application: authentication,
//! organizations, boards with lists and cards, notes, activity history,
//! and subscription billing. See [`app::build_router`] for the full route
//! table.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
