//! Main Crate Error

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("Missing environment variable '{0}'")]
    MissingEnv(String),

    #[error("Invalid environment variable '{0}'")]
    InvalidEnv(String),

    /* Credential Errors */
    #[error("Error hashing secret {0}")]
    HashingFailure(argon2::password_hash::Error),

    #[error("Credential Mismatch")]
    CredentialMismatch,

    #[error("Unknown identity {0}")]
    UnknownIdentity(u64),

    /* Token Errors */
    #[error("Token Signing Failure")]
    SigningFailure,

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid Token")]
    InvalidToken,

    #[error("Token Expired")]
    TokenExpired,

    #[error("Malformed Claims: {0}")]
    MalformedClaims(&'static str),

    /* Api Errors */
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("API Forbidden")]
    Forbidden,

    #[error("Context Missing")]
    CtxMissing,
}

