use crate::domain::model::DeckCode;
use crate::domain::ports::DeckStore;
use crate::utils::error::{CardcastError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes deck documents as `<base_path>/<code>.json`.
///
/// Each write goes to a temporary file that is renamed over the target, so a
/// reader sees either the old or the new document, never a partial one.
#[derive(Debug, Clone)]
pub struct LocalCacheStorage {
    base_path: PathBuf,
}

impl LocalCacheStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn deck_path(&self, code: &DeckCode) -> Result<PathBuf> {
        deck_file_path(&self.base_path, code)
    }
}

/// `<cache_dir>/<code>.json`. Codes that would escape `cache_dir` are refused.
pub fn deck_file_path(cache_dir: &Path, code: &DeckCode) -> Result<PathBuf> {
    let raw = code.as_str();
    if raw.contains(['/', '\\', '\0']) {
        return Err(CardcastError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Deck code {:?} does not name a cache file", raw),
        )));
    }
    Ok(cache_dir.join(format!("{}.json", raw)))
}

#[async_trait]
impl DeckStore for LocalCacheStorage {
    async fn write_deck(&self, code: &DeckCode, data: &[u8]) -> Result<()> {
        let full_path = self.deck_path(code)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = full_path.with_extension(format!(
            "json.{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        if let Err(e) = tokio::fs::write(&temp_path, data).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&temp_path, &full_path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }
}
