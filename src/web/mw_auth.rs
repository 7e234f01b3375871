//! Authentication middleware for protecting routes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::auth::jwt::TokenCodec;
use crate::prelude::*;

use super::ctx::resolve_ctx;

/// Middleware that requires a valid bearer token.
///
/// On failure the request is answered with the error's rejection response and
/// the wrapped handler never runs. On success the resolved [`super::ctx::Ctx`]
/// is added to the request extensions.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use axum::{Router, middleware, routing::get};
/// use devbook::{auth::jwt::TokenCodec, config::SecretKey, web::mw_auth::mw_require_auth};
///
/// let codec = Arc::new(TokenCodec::new(&SecretKey::new("secret")));
/// let app: Router<()> = Router::new()
///     .route("/protected", get(protected_handler))
///     .route_layer(middleware::from_fn_with_state(codec, mw_require_auth));
///
/// async fn protected_handler() -> &'static str {
///     "This requires authentication"
/// }
/// ```
pub async fn mw_require_auth(
    State(codec): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let ctx = resolve_ctx(&codec, req.headers()).inspect_err(|err| {
        debug!("Rejecting {} {}: {err}", req.method(), req.uri().path());
    })?;
    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}
