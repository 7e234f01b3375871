//! Secret hashing and verification using Argon2.
//!
//! Stored hashes are PHC strings carrying the algorithm, its parameters and a
//! per-hash random salt, so two hashes of the same secret never match
//! byte-for-byte while both still verify.
//!
//! # Examples
//!
//! ```rust
//! use devbook::auth::secret_hash::{generate_secret_hash, verify_secret};
//!
//! let hash = generate_secret_hash("user_password_123").unwrap();
//! assert!(verify_secret(&hash, "user_password_123").is_ok());
//! assert!(verify_secret(&hash, "wrong_password").is_err());
//! ```

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHash, SaltString},
};
use rand::rngs::OsRng;

use crate::prelude::*;

/// Hashes `secret` with a freshly generated salt.
///
/// Only fails if the hashing primitive itself cannot complete.
pub fn generate_secret_hash(secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(secret.as_bytes(), &salt)?.to_string())
}

/// Checks `candidate` against a stored hash.
///
/// The comparison is done by the hashing scheme on the derived outputs, never
/// on the plaintext. A mismatch is reported as [`Error::CredentialMismatch`];
/// a stored hash that cannot be parsed is a [`Error::HashingFailure`].
pub fn verify_secret(stored_hash: &str, candidate: &str) -> Result<()> {
    let hash = PasswordHash::new(stored_hash)?;

    match Argon2::default().verify_password(candidate.as_bytes(), &hash) {
        Ok(()) => Ok(()),
        Err(password_hash::Error::Password) => Err(Error::CredentialMismatch),
        Err(err) => Err(err.into()),
    }
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::HashingFailure(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_hash_is_salted() {
        let first = generate_secret_hash("pw1").unwrap();
        let second = generate_secret_hash("pw1").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_both_hashes() {
        let first = generate_secret_hash("pw1").unwrap();
        let second = generate_secret_hash("pw1").unwrap();
        assert!(verify_secret(&first, "pw1").is_ok());
        assert!(verify_secret(&second, "pw1").is_ok());
    }

    #[test]
    fn test_wrong_secret() {
        let hash = generate_secret_hash("pw1").unwrap();
        assert!(matches!(
            verify_secret(&hash, "pw2"),
            Err(Error::CredentialMismatch)
        ));
        assert!(matches!(
            verify_secret(&hash, ""),
            Err(Error::CredentialMismatch)
        ));
    }

    #[test]
    fn test_known_hash() {
        let hash = "$argon2id$v=19$m=19456,t=2,p=1$C4ZIwZW3k3Lec4ml/LlXhg$o5GwzCUQKicsKHfJvLAyL2GSyx9topN12vgZA4avM+g";
        assert!(verify_secret(hash, "my_super_secret").is_ok());
    }

    #[test]
    fn test_corrupted_hash() {
        assert!(matches!(
            verify_secret("not-a-phc-string", "pw1"),
            Err(Error::HashingFailure(_))
        ));
    }
}
