//! Request authorization for the devbook API.
//!
//! Issues and validates bearer tokens, hashes stored secrets and provides the
//! axum middleware pipeline that enforces authentication per route.

pub mod auth;
pub mod config;
pub mod error;
pub mod prelude;
pub mod web;
