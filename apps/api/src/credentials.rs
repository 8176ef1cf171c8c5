//! Storage for the user-supplied chat-completion key.
//!
//! The key lives in memory behind a lock and is written through to a small
//! JSON file under the fixed entry `openai_api_key`. Presence of a key is the
//! only thing that changes AI behaviour (real call vs canned text).

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Entry name the key is stored under.
pub const STORAGE_KEY: &str = "openai_api_key";
const KEY_PREFIX: &str = "sk-";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Введіть ваш OpenAI API ключ")]
    Empty,

    #[error("API ключ має починатися з 'sk-'")]
    BadPrefix,

    #[error("Credential file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// A chat-completion key that passed the prefix check.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CredentialError::Empty);
        }
        if !trimmed.starts_with(KEY_PREFIX) {
            return Err(CredentialError::BadPrefix);
        }
        Ok(ApiKey(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

#[derive(Clone)]
pub struct CredentialStore {
    path: PathBuf,
    key: Arc<RwLock<Option<ApiKey>>>,
}

impl CredentialStore {
    /// Opens the store at `path`. A missing file means no key.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, CredentialError> {
        let path = path.into();
        let key = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let entries: BTreeMap<String, String> = serde_json::from_slice(&bytes)?;
                // A stored value that no longer passes validation is ignored.
                entries
                    .get(STORAGE_KEY)
                    .and_then(|raw| ApiKey::parse(raw).ok())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        info!(
            "Credential store opened at {} (key present: {})",
            path.display(),
            key.is_some()
        );

        Ok(Self {
            path,
            key: Arc::new(RwLock::new(key)),
        })
    }

    pub async fn has_credential(&self) -> bool {
        self.key.read().await.is_some()
    }

    pub async fn current(&self) -> Option<ApiKey> {
        self.key.read().await.clone()
    }

    /// Validates and stores `raw`. Returns the new presence state.
    pub async fn set(&self, raw: &str) -> Result<bool, CredentialError> {
        let key = ApiKey::parse(raw)?;
        let mut guard = self.key.write().await;
        persist(&self.path, Some(&key)).await?;
        *guard = Some(key);
        info!("OpenAI API key stored");
        Ok(true)
    }

    /// Removes the stored key. Returns the new presence state.
    pub async fn clear(&self) -> Result<bool, CredentialError> {
        let mut guard = self.key.write().await;
        persist(&self.path, None).await?;
        *guard = None;
        info!("OpenAI API key removed");
        Ok(false)
    }
}

async fn persist(path: &Path, key: Option<&ApiKey>) -> Result<(), CredentialError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut entries = BTreeMap::new();
    if let Some(key) = key {
        entries.insert(STORAGE_KEY.to_string(), key.expose().to_string());
    }
    let json = serde_json::to_vec_pretty(&entries)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
