use crate::domain::model::{Deck, DeckCode, RemoteResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The remote CardCast deck service.
#[async_trait]
pub trait CardcastApi: Send + Sync {
    /// GET the deck-info document. Only transport failures are errors;
    /// any HTTP status comes back in the response.
    async fn deck_info(&self, code: &DeckCode) -> Result<RemoteResponse>;

    /// GET the deck-cards document.
    async fn deck_cards(&self, code: &DeckCode) -> Result<RemoteResponse>;
}

/// Where imported deck documents are persisted.
#[async_trait]
pub trait DeckStore: Send + Sync {
    async fn write_deck(&self, code: &DeckCode, data: &[u8]) -> Result<()>;
}

/// Tracks which decks are cached on disk, loaded in memory, or featured.
#[async_trait]
pub trait DeckRegistry: Send + Sync {
    fn code_length(&self) -> usize;

    /// (Re)reads the cached document for `code` into memory.
    async fn load(&self, code: &DeckCode) -> Result<Deck>;

    async fn find(&self, code: &DeckCode) -> Option<Deck>;

    async fn evict(&self, deck: &Deck);

    async fn list_cached(&self) -> Vec<DeckCode>;

    async fn list_featured(&self) -> Vec<Deck>;

    async fn list_loaded(&self) -> Vec<DeckCode>;

    async fn list_not_loaded(&self) -> Vec<DeckCode>;
}
