//! Login response body.

use serde::{Deserialize, Serialize};

/// Token handed back to a client after a successful login.
///
/// # JSON Format
///
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct AuthBody {
    pub token: String,
}

impl AuthBody {
    pub fn new(token: String) -> Self {
        Self { token }
    }
}
