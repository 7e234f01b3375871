//! Token claims.
//!
//! Claims travel as a JSON object where numbers may have been written as
//! floating point by other issuers. They are coerced once, here, into a typed
//! record; anything that does not coerce exactly is rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::prelude::*;

/// Largest integer every issuer can write as a JSON number without loss.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_991.0;

pub const AUTHORIZED_CLAIM: &str = "authorized";
pub const USER_ID_CLAIM: &str = "usuarioId";
pub const EXPIRATION_CLAIM: &str = "exp";

/// Assertions bound into a signed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Always `true` for tokens issued by this service.
    pub authorized: bool,
    /// Identity of the caller.
    #[serde(rename = "usuarioId")]
    pub user_id: u64,
    /// Expiration as a Unix timestamp in seconds.
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: u64, expires_at: DateTime<Utc>) -> Self {
        Self {
            authorized: true,
            user_id,
            exp: expires_at.timestamp(),
        }
    }

    /// A token stays valid up to and including its expiration second.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp < now.timestamp()
    }
}

impl TryFrom<Map<String, Value>> for Claims {
    type Error = Error;

    fn try_from(raw: Map<String, Value>) -> Result<Self> {
        let authorized = match raw.get(AUTHORIZED_CLAIM) {
            Some(Value::Bool(true)) => true,
            _ => return Err(Error::MalformedClaims(AUTHORIZED_CLAIM)),
        };

        let user_id = match raw.get(USER_ID_CLAIM) {
            Some(Value::Number(n)) => number_to_u64(n),
            _ => None,
        }
        .ok_or(Error::MalformedClaims(USER_ID_CLAIM))?;

        let exp = match raw.get(EXPIRATION_CLAIM) {
            Some(Value::Number(n)) => number_to_i64(n),
            _ => None,
        }
        .ok_or(Error::MalformedClaims(EXPIRATION_CLAIM))?;

        Ok(Self {
            authorized,
            user_id,
            exp,
        })
    }
}

fn exact_float(n: &Number) -> Option<f64> {
    let f = n.as_f64()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT_INT).then_some(f)
}

fn number_to_u64(n: &Number) -> Option<u64> {
    n.as_u64().or_else(|| {
        if n.is_i64() {
            return None;
        }
        exact_float(n).filter(|f| *f >= 0.0).map(|f| f as u64)
    })
}

fn number_to_i64(n: &Number) -> Option<i64> {
    n.as_i64()
        .or_else(|| if n.is_u64() { None } else { exact_float(n).map(|f| f as i64) })
}
