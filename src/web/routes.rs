//! Route registration.
//!
//! Each [`Route`] declares whether it requires authentication. Registration
//! wraps the handler as `Logger(Authenticate(handler))` for protected routes
//! and `Logger(handler)` otherwise, so every request that reaches a route
//! produces exactly one log line regardless of the auth outcome.

use axum::{Router, http::header::AUTHORIZATION, middleware, routing::MethodRouter};
use tower_http::{
    cors::CorsLayer,
    sensitive_headers::SetSensitiveRequestHeadersLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use super::mw_auth::mw_require_auth;
use super::mw_logger::mw_logger;
use super::state::AppState;

/// A path, its handlers and its authentication requirement.
pub struct Route {
    pub uri: &'static str,
    pub handler: MethodRouter<AppState>,
    pub requires_auth: bool,
}

impl Route {
    pub fn public(uri: &'static str, handler: MethodRouter<AppState>) -> Self {
        Self {
            uri,
            handler,
            requires_auth: false,
        }
    }

    pub fn authenticated(uri: &'static str, handler: MethodRouter<AppState>) -> Self {
        Self {
            uri,
            handler,
            requires_auth: true,
        }
    }
}

/// Builds the router for `routes`, applying the middleware chain per route.
pub fn configure(routes: Vec<Route>, state: AppState) -> Router {
    let mut router = Router::new();

    for route in routes {
        let mut handler = route.handler;
        if route.requires_auth {
            handler = handler.route_layer(middleware::from_fn_with_state(
                state.codec.clone(),
                mw_require_auth,
            ));
        }
        router = router.route(route.uri, handler.route_layer(middleware::from_fn(mw_logger)));
    }

    router.with_state(state)
}

/// Wraps `router` in the service-wide HTTP layers.
///
/// The `Authorization` header is marked sensitive before tracing sees it, so
/// request spans never carry a bearer token.
pub fn with_http_layers(router: Router) -> Router {
    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION]))
}
