//! Implements TokenStore using a JSON file.
//!
//! Holds the access and refresh tokens between runs.

use crate::domain::AuthError;
use crate::ports::TokenStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct TokenData {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// JSON file-based token cache.
pub struct TokenJson {
    path: PathBuf,
    cache: RwLock<TokenData>,
}

impl TokenJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: RwLock::new(TokenData::default()),
        }
    }

    /// Load tokens from disk. A missing or corrupt file means "signed out".
    pub async fn load(&self) -> Result<(), AuthError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
            Err(_) => TokenData::default(),
        };
        *self.cache.write().await = data;
        Ok(())
    }

    /// Write-replace: temp file, fsync, rename.
    async fn save(&self, data: &TokenData) -> Result<(), AuthError> {
        let json =
            serde_json::to_string_pretty(data).map_err(|e| AuthError::Storage(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AuthError::Storage(format!("create token dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| AuthError::Storage(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| AuthError::Storage(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| AuthError::Storage(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| AuthError::Storage(format!("atomic rename failed: {}", e)))?;
        Ok(())
    }

    /// Apply `update` and persist while holding the write lock, so writers never interleave.
    async fn update(&self, update: impl FnOnce(&mut TokenData)) -> Result<(), AuthError> {
        let mut cache = self.cache.write().await;
        let mut next = cache.clone();
        update(&mut next);
        self.save(&next).await?;
        *cache = next;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TokenStore for TokenJson {
    async fn get(&self) -> Result<Option<String>, AuthError> {
        Ok(self.cache.read().await.access_token.clone())
    }

    async fn set(&self, token: &str) -> Result<(), AuthError> {
        self.update(|d| d.access_token = Some(token.to_string()))
            .await
    }

    async fn clear(&self) -> Result<(), AuthError> {
        self.update(|d| *d = TokenData::default()).await
    }

    async fn get_refresh(&self) -> Result<Option<String>, AuthError> {
        Ok(self.cache.read().await.refresh_token.clone())
    }

    async fn set_refresh(&self, token: &str) -> Result<(), AuthError> {
        self.update(|d| d.refresh_token = Some(token.to_string()))
            .await
    }
}
