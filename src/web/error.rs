//! Error responses.
//!
//! Every failure is answered as `{"erro": "<message>"}` with a JSON content
//! type. All token failures share one message so a client cannot tell a
//! forged token from an expired or malformed one.

use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::{debug, error};

use crate::prelude::*;

pub const INVALID_TOKEN_MESSAGE: &str = "invalid authentication token";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid credentials";
pub const MALFORMED_BODY_MESSAGE: &str = "malformed request body";

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            // Auth-related errors
            Error::InvalidToken
            | Error::TokenExpired
            | Error::MalformedClaims(_)
            | Error::CtxMissing => (StatusCode::UNAUTHORIZED, INVALID_TOKEN_MESSAGE),
            Error::CredentialMismatch => (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS_MESSAGE),

            Error::BadRequest(_) => (StatusCode::BAD_REQUEST, MALFORMED_BODY_MESSAGE),

            // Permission-related errors
            Error::Forbidden => (StatusCode::FORBIDDEN, "access forbidden"),
            Error::UnknownIdentity(_) => (StatusCode::NOT_FOUND, "unknown identity"),

            // Internal errors - hide details
            Error::HashingFailure(_)
            | Error::SigningFailure
            | Error::Jwt(_)
            | Error::IO(_)
            | Error::MissingEnv(_)
            | Error::InvalidEnv(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        };

        if status.is_server_error() {
            error!("Creating API error response for error: {:?}", self);
        } else {
            debug!("Creating API error response for error: {:?}", self);
        }

        (status, Json(json!({ "erro": message }))).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}
