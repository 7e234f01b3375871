//! Access to persisted secret hashes.
//!
//! Persistence of identities lives outside this crate. The auth flows only
//! need to look a stored hash up and to replace it after a secret change.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::auth::secret_hash::generate_secret_hash;
use crate::prelude::*;

/// A stored hash together with the identity it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub user_id: u64,
    pub hash: String,
}

/// Lookup of stored secret hashes.
pub trait CredentialStore: Send + Sync {
    /// Finds the credential registered for a login name, if any.
    fn lookup_stored_hash(&self, email: &str) -> Result<Option<StoredCredential>>;

    /// Finds the credential registered for an identity.
    fn stored_hash_by_id(&self, user_id: u64) -> Result<StoredCredential>;

    /// Replaces the stored hash of an identity.
    fn update_stored_hash(&self, user_id: u64, hash: String) -> Result<()>;
}

#[derive(Debug, Clone)]
struct Entry {
    email: String,
    hash: String,
}

/// Process-local credential store, used by the demo server and tests.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    entries: RwLock<HashMap<u64, Entry>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `email` under `user_id`, hashing `secret` for storage.
    pub fn register(&self, user_id: u64, email: &str, secret: &str) -> Result<()> {
        let hash = generate_secret_hash(secret)?;
        self.write().insert(
            user_id,
            Entry {
                email: String::from(email),
                hash,
            },
        );
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<u64, Entry>> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<u64, Entry>> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn lookup_stored_hash(&self, email: &str) -> Result<Option<StoredCredential>> {
        Ok(self
            .read()
            .iter()
            .find(|(_, entry)| entry.email == email)
            .map(|(user_id, entry)| StoredCredential {
                user_id: *user_id,
                hash: entry.hash.clone(),
            }))
    }

    fn stored_hash_by_id(&self, user_id: u64) -> Result<StoredCredential> {
        self.read()
            .get(&user_id)
            .map(|entry| StoredCredential {
                user_id,
                hash: entry.hash.clone(),
            })
            .ok_or(Error::UnknownIdentity(user_id))
    }

    fn update_stored_hash(&self, user_id: u64, hash: String) -> Result<()> {
        let mut entries = self.write();
        let entry = entries
            .get_mut(&user_id)
            .ok_or(Error::UnknownIdentity(user_id))?;
        entry.hash = hash;
        Ok(())
    }
}
