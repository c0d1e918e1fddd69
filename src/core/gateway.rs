use crate::domain::model::{
    CachedDeckEntry, Deck, DeckCode, DeckDocument, DeckEntry, DeckSummary, ProbeResponse, CODE_LENGTH,
};
use crate::domain::ports::{CardcastApi, DeckRegistry, DeckStore};
use crate::utils::error::{CardcastError, Result};
use serde_json::Value;
use std::sync::Arc;

/// Result of an import that did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// Cache file written and the registry reloaded it.
    Imported(DeckSummary),
    /// The deck-info endpoint answered with a non-200 status.
    NotFound,
}

/// Admin operations over the remote CardCast service and the deck registry.
///
/// Holds no per-request state. Concurrent imports of the same code are not
/// serialized: both write the same cache file and the last write wins.
pub struct CardcastGateway {
    api: Arc<dyn CardcastApi>,
    registry: Arc<dyn DeckRegistry>,
    store: Arc<dyn DeckStore>,
}

impl CardcastGateway {
    pub fn new(
        api: Arc<dyn CardcastApi>,
        registry: Arc<dyn DeckRegistry>,
        store: Arc<dyn DeckStore>,
    ) -> Self {
        debug_assert_eq!(registry.code_length(), CODE_LENGTH);
        Self {
            api,
            registry,
            store,
        }
    }

    /// Looks a deck up on the remote service without importing it.
    pub async fn probe_deck(&self, code: Option<&str>) -> Result<ProbeResponse> {
        let code = DeckCode::parse(code, CODE_LENGTH)?;
        tracing::debug!("Probing CardCast deck {}", code);

        let info = self.api.deck_info(&code).await.inspect_err(|e| {
            tracing::warn!("Failed to probe CardCast deck {}: {}", code, e);
        })?;
        tracing::debug!("Probed CardCast deck {}: {}", code, info.status);

        if !info.is_ok() {
            return Ok(ProbeResponse::not_found());
        }

        let metadata: Value = serde_json::from_str(&info.body).inspect_err(|e| {
            tracing::warn!("Failed to parse metadata for deck {}: {}", code, e);
        })?;
        tracing::debug!("Deck metadata successfully probed");

        Ok(ProbeResponse::found(metadata))
    }

    /// Downloads a deck's metadata and cards, writes the merged document to
    /// the cache and has the registry (re)load it.
    pub async fn import_deck(&self, code: Option<&str>) -> Result<ImportOutcome> {
        let code = DeckCode::parse(code, CODE_LENGTH)?;
        tracing::debug!("Importing CardCast deck {}", code);

        let info = self.api.deck_info(&code).await.inspect_err(|e| {
            tracing::warn!("Failed to probe CardCast deck {}: {}", code, e);
        })?;
        tracing::debug!("Probed CardCast deck {}: {}", code, info.status);

        if !info.is_ok() {
            return Ok(ImportOutcome::NotFound);
        }

        let metadata: Value = serde_json::from_str(&info.body).inspect_err(|e| {
            tracing::warn!("Failed to parse metadata for deck {}: {}", code, e);
        })?;
        let mut document = DeckDocument::from_metadata(metadata)?;
        tracing::debug!("Deck metadata successfully downloaded");

        let cards = self.api.deck_cards(&code).await.inspect_err(|e| {
            tracing::info!("Failed to import CardCast deck {}: {}", code, e);
        })?;
        tracing::debug!("Importing CardCast deck {}: {}", code, cards.status);

        if !cards.is_ok() {
            return Err(CardcastError::UnexpectedStatus {
                status: cards.status,
            });
        }
        tracing::trace!("Deck {} successfully downloaded", code);

        let cards: Value = serde_json::from_str(&cards.body).inspect_err(|e| {
            tracing::warn!("Failed to parse JSON: {}", e);
        })?;

        document.merge_cards(&cards, chrono::Utc::now());

        let data = document.to_json_bytes()?;
        self.store.write_deck(&code, &data).await.inspect_err(|e| {
            tracing::warn!("Failed to save deck {}: {}", code, e);
        })?;
        tracing::info!("Successfully saved deck {}", code);

        let deck = self.reload(&code).await?;

        Ok(ImportOutcome::Imported(deck.summary()))
    }

    /// Drops a deck from the registry's memory. Unknown codes are `NotFound`.
    pub async fn unload_deck(&self, code: Option<&str>) -> Result<()> {
        let code = DeckCode::parse(code, self.registry.code_length())?;

        let deck = self
            .registry
            .find(&code)
            .await
            .ok_or_else(|| CardcastError::not_found(code.as_str()))?;

        self.registry.evict(&deck).await;
        Ok(())
    }

    pub async fn load_deck(&self, code: Option<&str>) -> Result<DeckSummary> {
        let code = DeckCode::parse(code, self.registry.code_length())?;

        let deck = self.reload(&code).await?;

        Ok(deck.summary())
    }

    /// Any registry failure, a missing cache file included, is a server error.
    async fn reload(&self, code: &DeckCode) -> Result<Deck> {
        self.registry.load(code).await.map_err(|e| {
            tracing::warn!("Failed to load deck {}: {}", code, e);
            match e {
                CardcastError::RegistryError { .. } => e,
                other => CardcastError::RegistryError {
                    message: other.to_string(),
                },
            }
        })
    }

    pub async fn list_cached(&self) -> Vec<CachedDeckEntry> {
        let mut decks = Vec::new();
        for code in self.registry.list_cached().await {
            let found = self.registry.find(&code).await;
            let entry = match found {
                Some(deck) => CachedDeckEntry {
                    entry: DeckEntry::Deck(deck.summary()),
                    loaded: true,
                },
                None => CachedDeckEntry {
                    entry: DeckEntry::Code { code },
                    loaded: false,
                },
            };
            decks.push(entry);
        }
        decks
    }

    pub async fn list_featured(&self) -> Vec<DeckSummary> {
        self.registry
            .list_featured()
            .await
            .iter()
            .map(|deck| deck.summary())
            .collect()
    }

    /// Codes evicted between listing and lookup are skipped.
    pub async fn list_loaded(&self) -> Vec<DeckSummary> {
        let mut decks = Vec::new();
        for code in self.registry.list_loaded().await {
            if let Some(deck) = self.registry.find(&code).await {
                decks.push(deck.summary());
            }
        }
        decks
    }

    pub async fn list_not_loaded(&self) -> Vec<DeckEntry> {
        let mut decks = Vec::new();
        for code in self.registry.list_not_loaded().await {
            let found = self.registry.find(&code).await;
            let entry = match found {
                Some(deck) => DeckEntry::Deck(deck.summary()),
                None => DeckEntry::Code { code },
            };
            decks.push(entry);
        }
        decks
    }
}
