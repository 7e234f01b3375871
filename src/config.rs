//! Process configuration.
//!
//! The signing key and listener address are read once at start and handed to
//! the components that need them.

use std::fmt::{Debug, Display};

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{RngCore, rngs::OsRng};

use crate::prelude::*;

const SECRET_KEY_ENV: &str = "SECRET_KEY";
const API_PORT_ENV: &str = "API_PORT";
const API_HOST_ENV: &str = "API_HOST";

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_HOST: &str = "127.0.0.1";

/// Size in bytes of a freshly generated signing key.
pub const GENERATED_KEY_LEN: usize = 64;

/// Symmetric key used to sign and verify tokens.
///
/// The raw bytes are never printed; both `Debug` and `Display` redact them.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Draws a new random key from the OS RNG.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; GENERATED_KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretKey(REDACTED)")
    }
}

impl Display for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub secret_key: SecretKey,
    pub port: u16,
    pub host: String,
}

impl ApiConfig {
    /// Loads the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {err}");
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_KEY_ENV)
            .ok_or_else(|| Error::MissingEnv(String::from(SECRET_KEY_ENV)))?;
        if secret.is_empty() {
            return Err(Error::InvalidEnv(String::from(SECRET_KEY_ENV)));
        }

        let port = match lookup(API_PORT_ENV).map(|p| p.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(err)) => {
                tracing::warn!("Invalid {API_PORT_ENV} ({err}), using {DEFAULT_PORT}");
                DEFAULT_PORT
            }
            None => DEFAULT_PORT,
        };

        let host = lookup(API_HOST_ENV)
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| String::from(DEFAULT_HOST));

        Ok(Self {
            secret_key: SecretKey::new(secret.into_bytes()),
            port,
            host,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Display for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (secret key REDACTED)", self.bind_address())
    }
}
