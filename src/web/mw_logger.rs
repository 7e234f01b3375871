//! Request logging middleware.

use axum::{extract::Request, http::header::HOST, middleware::Next, response::Response};
use tracing::info;

/// Target of the single log event emitted per request.
pub const REQUEST_LOG_TARGET: &str = "devbook::request";

/// Logs method, host and request target, then runs the rest of the chain.
///
/// Never short-circuits and never alters the response.
pub async fn mw_logger(req: Request, next: Next) -> Response {
    {
        let host = req
            .headers()
            .get(HOST)
            .and_then(|h| h.to_str().ok())
            .or_else(|| req.uri().host())
            .unwrap_or_default();
        let target = req
            .uri()
            .path_and_query()
            .map(|p| p.as_str())
            .unwrap_or("/");

        info!(
            target: REQUEST_LOG_TARGET,
            method = %req.method(),
            host,
            uri = target,
            "{} {host}{target}",
            req.method()
        );
    }
    next.run(req).await
}
