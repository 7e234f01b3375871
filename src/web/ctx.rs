//! Request identity.
//!
//! Reads the bearer token from the `Authorization` header and resolves it to
//! the caller's identity. On authenticated routes the resolved [`Ctx`] is
//! stored in the request extensions so handlers never verify twice.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use crate::auth::claims::Claims;
use crate::auth::jwt::TokenCodec;
use crate::prelude::*;

/// Validated identity of the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    pub user_id: u64,
    pub claims: Claims,
}

impl Ctx {
    pub fn new(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            claims,
        }
    }

    /// Fails with [`Error::Forbidden`] unless the caller is `user_id`.
    pub fn require_identity(&self, user_id: u64) -> Result<()> {
        if self.user_id != user_id {
            return Err(Error::Forbidden);
        }
        Ok(())
    }
}

/// Returns the token part of a `"<scheme> <token>"` authorization header.
///
/// Anything that is not exactly two space separated parts, including a
/// missing header, yields an empty string. The scheme itself is not checked.
pub fn extract_token(headers: &HeaderMap) -> String {
    let Some(value) = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok()) else {
        return String::new();
    };

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        [_, token] => String::from(*token),
        _ => String::new(),
    }
}

/// Verifies the request's token and builds its context.
pub fn resolve_ctx(codec: &TokenCodec, headers: &HeaderMap) -> Result<Ctx> {
    let token = extract_token(headers);
    Ok(Ctx::new(codec.verify(&token)?))
}

/// Verifies the request's token and returns the caller's identity.
pub fn extract_identity(codec: &TokenCodec, headers: &HeaderMap) -> Result<u64> {
    Ok(resolve_ctx(codec, headers)?.user_id)
}

/// Verifies the request's token, discarding the identity.
pub fn validate_only(codec: &TokenCodec, headers: &HeaderMap) -> Result<()> {
    resolve_ctx(codec, headers).map(|_| ())
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts.extensions.get::<Ctx>().cloned().ok_or(Error::CtxMissing)
    }
}
