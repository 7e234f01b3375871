use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auth::auth_body::AuthBody;
use crate::auth::credential_store::CredentialStore;
use crate::auth::jwt::TokenCodec;
use crate::auth::secret_hash::{generate_secret_hash, verify_secret};
use crate::prelude::*;

/// Credentials presented at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "senha")]
    pub secret: String,
}

impl LoginRequest {
    pub fn new(email: &str, secret: &str) -> Self {
        Self {
            email: String::from(email),
            secret: String::from(secret),
        }
    }
}

/// Secret replacement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretChangeRequest {
    #[serde(rename = "atual")]
    pub current: String,
    #[serde(rename = "nova")]
    pub new: String,
}

/// Verifies login credentials and returns the matching identity.
///
/// An unknown email and a wrong secret are indistinguishable to the caller.
pub fn authenticate(auth: &LoginRequest, store: &dyn CredentialStore) -> Result<u64> {
    if auth.secret.is_empty() {
        return Err(Error::CredentialMismatch);
    }
    let Some(stored) = store.lookup_stored_hash(&auth.email)? else {
        debug!("Login attempt for unknown email");
        return Err(Error::CredentialMismatch);
    };
    verify_secret(&stored.hash, &auth.secret)?;
    Ok(stored.user_id)
}

/// Authenticates the caller and issues a token for it.
pub fn login(
    auth: &LoginRequest,
    store: &dyn CredentialStore,
    codec: &TokenCodec,
) -> Result<AuthBody> {
    let user_id = authenticate(auth, store)?;
    let token = codec.issue(user_id)?;
    info!(user_id, "Issued token");
    Ok(AuthBody::new(token))
}

/// Replaces the stored secret of `user_id` once the current one is confirmed.
pub fn change_secret(
    user_id: u64,
    request: &SecretChangeRequest,
    store: &dyn CredentialStore,
) -> Result<()> {
    let stored = store.stored_hash_by_id(user_id)?;
    verify_secret(&stored.hash, &request.current)?;
    let hash = generate_secret_hash(&request.new)?;
    store.update_stored_hash(user_id, hash)?;
    info!(user_id, "Secret updated");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auth::credential_store::InMemoryCredentialStore;
    use crate::config::SecretKey;

    fn store() -> InMemoryCredentialStore {
        let store = InMemoryCredentialStore::new();
        store.register(5, "root@devbook.io", "my_super_secret").unwrap();
        store
    }

    #[test]
    fn test_authenticate() {
        let store = store();
        let id = authenticate(&LoginRequest::new("root@devbook.io", "my_super_secret"), &store)
            .unwrap();
        assert_eq!(id, 5);
    }

    #[test]
    fn test_authenticate_failures() {
        let store = store();
        for request in [
            LoginRequest::new("root@devbook.io", "wrong"),
            LoginRequest::new("root@devbook.io", ""),
            LoginRequest::new("nobody@devbook.io", "my_super_secret"),
        ] {
            assert!(matches!(
                authenticate(&request, &store),
                Err(Error::CredentialMismatch)
            ));
        }
    }

    #[test]
    fn test_login_issues_verifiable_token() {
        let store = store();
        let codec = TokenCodec::new(&SecretKey::new("login-test-key"));
        let body = login(
            &LoginRequest::new("root@devbook.io", "my_super_secret"),
            &store,
            &codec,
        )
        .unwrap();
        assert_eq!(codec.verify(&body.token).unwrap().user_id, 5);
    }

    #[test]
    fn test_change_secret() {
        let store = store();
        let request = SecretChangeRequest {
            current: String::from("my_super_secret"),
            new: String::from("brand_new"),
        };
        change_secret(5, &request, &store).unwrap();

        assert!(authenticate(&LoginRequest::new("root@devbook.io", "brand_new"), &store).is_ok());
        assert!(matches!(
            authenticate(&LoginRequest::new("root@devbook.io", "my_super_secret"), &store),
            Err(Error::CredentialMismatch)
        ));
    }

    #[test]
    fn test_change_secret_wrong_current() {
        let store = store();
        let request = SecretChangeRequest {
            current: String::from("guess"),
            new: String::from("brand_new"),
        };
        assert!(matches!(
            change_secret(5, &request, &store),
            Err(Error::CredentialMismatch)
        ));
        assert!(matches!(
            change_secret(6, &request, &store),
            Err(Error::UnknownIdentity(6))
        ));
    }

    #[test]
    fn test_login_request_wire_names() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.c","senha":"pw"}"#).unwrap();
        assert_eq!(request.secret, "pw");
        let change: SecretChangeRequest =
            serde_json::from_str(r#"{"atual":"old","nova":"new"}"#).unwrap();
        assert_eq!(change.current, "old");
        assert_eq!(change.new, "new");
    }
}
