//! In-Memory Credential Store

use std::sync::{Arc, RwLock};

use crate::application::ports::{CredentialError, CredentialStorePort};
use crate::domain::Credentials;

/// 内存凭据存储
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<Option<Credentials>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl CredentialStorePort for InMemoryCredentialStore {
    fn load(&self) -> Option<Credentials> {
        self.credentials
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn save(&self, credentials: &Credentials) -> Result<(), CredentialError> {
        *self.credentials.write().unwrap_or_else(|e| e.into_inner()) = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self.credentials.write().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
