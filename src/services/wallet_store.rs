use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum WalletStoreError {
    #[error("wallet store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("wallet store is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWallet {
    #[serde(default)]
    saved_wallet: Option<String>,
}

/// The last wallet address the user looked up, kept in a small JSON file.
/// Last write wins; the value is stored even when it is empty.
#[derive(Debug)]
pub struct WalletStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl WalletStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored address, `None` when nothing (or an empty string) is saved.
    pub async fn load(&self) -> Result<Option<String>, WalletStoreError> {
        let _guard = self.lock.lock().await;
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredWallet = serde_json::from_slice(&raw)?;
        Ok(stored.saved_wallet.filter(|w| !w.is_empty()))
    }

    /// Replace the stored address. Writes a sibling temp file and renames it
    /// over the old one so a crash never leaves a half-written file.
    pub async fn save(&self, address: &str) -> Result<(), WalletStoreError> {
        let _guard = self.lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(&StoredWallet {
            saved_wallet: Some(address.to_string()),
        })?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), "Saved wallet updated");
        Ok(())
    }
}
