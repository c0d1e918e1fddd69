use crate::adapters::storage::deck_file_path;
use crate::domain::model::{Deck, DeckCode, DeckDocument, CODE_LENGTH};
use crate::domain::ports::DeckRegistry;
use crate::utils::error::{CardcastError, Result};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Deck registry backed by the cache directory the importer writes to.
///
/// Decks are read from `<cache_dir>/<code>.json` on `load` and kept in memory
/// until evicted. Featured decks are a fixed list of codes from config.
pub struct FileDeckRegistry {
    cache_dir: PathBuf,
    featured: Vec<DeckCode>,
    loaded: RwLock<HashMap<DeckCode, Deck>>,
}

impl FileDeckRegistry {
    /// Featured codes of the wrong length are dropped with a warning.
    pub fn new(cache_dir: impl Into<PathBuf>, featured: &[String]) -> Self {
        let featured = featured
            .iter()
            .filter_map(|raw| match DeckCode::parse(Some(raw.as_str()), CODE_LENGTH) {
                Ok(code) => Some(code),
                Err(e) => {
                    tracing::warn!("Ignoring featured deck '{}': {}", raw, e);
                    None
                }
            })
            .collect();

        Self {
            cache_dir: cache_dir.into(),
            featured,
            loaded: RwLock::new(HashMap::new()),
        }
    }

    /// Loads every featured deck, returning how many succeeded.
    pub async fn preload_featured(&self) -> usize {
        let mut count = 0;
        for code in &self.featured {
            match self.load(code).await {
                Ok(_) => count += 1,
                Err(e) => tracing::warn!("Failed to preload featured deck {}: {}", code, e),
            }
        }
        tracing::info!("Preloaded {}/{} featured decks", count, self.featured.len());
        count
    }

    async fn read_document(&self, code: &DeckCode) -> Result<DeckDocument> {
        let path = deck_file_path(&self.cache_dir, code)?;
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CardcastError::not_found(code.as_str()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&data)?)
    }

    async fn cached_codes(&self) -> BTreeSet<DeckCode> {
        let mut codes = BTreeSet::new();

        let mut entries = match tokio::fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Cache directory {} unreadable: {}", self.cache_dir.display(), e);
                return codes;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to read cache directory entry: {}", e);
                    break;
                }
            };

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let stem = path.file_stem().and_then(|stem| stem.to_str());
            if let Ok(code) = DeckCode::parse(stem, self.code_length()) {
                codes.insert(code);
            }
        }

        codes
    }
}

#[async_trait]
impl DeckRegistry for FileDeckRegistry {
    fn code_length(&self) -> usize {
        CODE_LENGTH
    }

    async fn load(&self, code: &DeckCode) -> Result<Deck> {
        let document = self.read_document(code).await?;
        let deck = Deck::from_document(code.clone(), &document);

        tracing::debug!(
            "Loaded deck {} ({} black, {} white)",
            code,
            deck.black_cards.len(),
            deck.white_cards.len()
        );

        self.loaded.write().await.insert(code.clone(), deck.clone());
        Ok(deck)
    }

    async fn find(&self, code: &DeckCode) -> Option<Deck> {
        self.loaded.read().await.get(code).cloned()
    }

    async fn evict(&self, deck: &Deck) {
        if self.loaded.write().await.remove(&deck.code).is_some() {
            tracing::info!("Evicted deck {}", deck.code);
        }
    }

    async fn list_cached(&self) -> Vec<DeckCode> {
        self.cached_codes().await.into_iter().collect()
    }

    async fn list_featured(&self) -> Vec<Deck> {
        let loaded = self.loaded.read().await;
        self.featured
            .iter()
            .filter_map(|code| loaded.get(code).cloned())
            .collect()
    }

    async fn list_loaded(&self) -> Vec<DeckCode> {
        let mut codes: Vec<DeckCode> = self.loaded.read().await.keys().cloned().collect();
        codes.sort();
        codes
    }

    async fn list_not_loaded(&self) -> Vec<DeckCode> {
        let mut known = self.cached_codes().await;
        known.extend(self.featured.iter().cloned());

        let loaded = self.loaded.read().await;
        known
            .into_iter()
            .filter(|code| !loaded.contains_key(code))
            .collect()
    }
}
