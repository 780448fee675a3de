//! In-memory TokenStore. For hosts with their own secure storage bridge, and for tests.

use crate::domain::AuthError;
use crate::ports::TokenStore;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    access: RwLock<Option<String>>,
    refresh: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access: RwLock::new(Some(token.into())),
            refresh: RwLock::new(None),
        }
    }
}

#[async_trait::async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Result<Option<String>, AuthError> {
        Ok(self.access.read().await.clone())
    }

    async fn set(&self, token: &str) -> Result<(), AuthError> {
        *self.access.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AuthError> {
        *self.access.write().await = None;
        *self.refresh.write().await = None;
        Ok(())
    }

    async fn get_refresh(&self) -> Result<Option<String>, AuthError> {
        Ok(self.refresh.read().await.clone())
    }

    async fn set_refresh(&self, token: &str) -> Result<(), AuthError> {
        *self.refresh.write().await = Some(token.to_string());
        Ok(())
    }
}
