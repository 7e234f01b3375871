use std::sync::Arc;

use crate::auth::credential_store::CredentialStore;
use crate::auth::jwt::TokenCodec;
use crate::config::ApiConfig;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub store: Arc<dyn CredentialStore>,
}

impl AppState {
    pub fn new(config: &ApiConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self::with_codec(TokenCodec::new(&config.secret_key), store)
    }

    pub fn with_codec(codec: TokenCodec, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            codec: Arc::new(codec),
            store,
        }
    }
}
