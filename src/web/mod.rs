//! HTTP surface: identity extraction, middleware and route registration.

pub mod ctx;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mw_auth;
pub mod mw_logger;
pub mod routes;
pub mod state;
