pub mod auth;
pub mod auth_body;
pub mod claims;
pub mod credential_store;
pub mod jwt;
pub mod secret_hash;

use chrono::TimeDelta;

/// Lifetime of every issued token.
pub const TOKEN_LIFETIME: TimeDelta = TimeDelta::hours(6);
