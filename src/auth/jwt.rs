//! Signed token issuance and verification.
//!
//! Tokens are compact JWS strings (`header.payload.signature`, base64url)
//! signed with HMAC-SHA256 under the process [`SecretKey`]. Verification pins
//! the algorithm, so a token declaring anything other than HS256 is rejected
//! before its signature is even considered.
//!
//! # Examples
//!
//! ```rust
//! use devbook::auth::jwt::TokenCodec;
//! use devbook::config::SecretKey;
//!
//! let codec = TokenCodec::new(&SecretKey::new("MySuperSecret"));
//! let token = codec.issue(42).unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.user_id, 42);
//! assert!(claims.authorized);
//! ```

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::auth::TOKEN_LIFETIME;
use crate::auth::claims::Claims;
use crate::config::SecretKey;
use crate::prelude::*;

/// Signing algorithm for every token this service issues or accepts.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Key pair for JWT signing and verification.
struct Keys {
    /// Key used for signing new tokens.
    encoding: EncodingKey,
    /// Key used for verifying presented tokens.
    decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Issues and verifies tokens with an injected signing key.
///
/// Holds no mutable state, so a single instance can be shared across every
/// in-flight request.
pub struct TokenCodec {
    keys: Keys,
    has_key: bool,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &SecretKey) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Claims are checked by `Claims::try_from` and `verify_at` so that
        // float-encoded numbers and a caller-supplied clock are handled.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            keys: Keys::new(secret.as_bytes()),
            has_key: !secret.is_empty(),
            validation,
        }
    }

    /// Issues a token for `user_id` expiring [`TOKEN_LIFETIME`] from now.
    pub fn issue(&self, user_id: u64) -> Result<String> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, user_id: u64, now: DateTime<Utc>) -> Result<String> {
        let expires_at = now
            .checked_add_signed(TOKEN_LIFETIME)
            .ok_or(Error::SigningFailure)?;
        self.sign(&Claims::new(user_id, expires_at))
    }

    /// Signs an arbitrary claims record.
    pub fn sign(&self, claims: &Claims) -> Result<String> {
        if !self.has_key {
            error!("Refusing to sign a token with an empty secret key");
            return Err(Error::SigningFailure);
        }

        encode(&Header::new(ALGORITHM), claims, &self.keys.encoding).map_err(|err| {
            error!("Failed to encode JWT {err}");
            Error::Jwt(err)
        })
    }

    /// Verifies `token` against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies `token` as if the current time were `now`.
    ///
    /// Structural, algorithm and signature failures are all reported as
    /// [`Error::InvalidToken`]; a correctly signed token past its expiration is
    /// [`Error::TokenExpired`].
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        if !self.has_key {
            return Err(Error::InvalidToken);
        }

        let raw = decode::<Map<String, Value>>(token, &self.keys.decoding, &self.validation)
            .map_err(|err| {
                match err.kind() {
                    ErrorKind::InvalidAlgorithm => debug!("Rejected token algorithm {err}"),
                    _ => debug!("Failed to decode jwt token {err}"),
                }
                Error::InvalidToken
            })?
            .claims;

        let claims = Claims::try_from(raw)?;
        if claims.is_expired_at(now) {
            return Err(Error::TokenExpired);
        }
        Ok(claims)
    }
}
