pub mod gateway;
pub mod template;

pub use crate::domain::model::{Deck, DeckCode, DeckSummary, ProbeResponse};
pub use crate::domain::ports::{CardcastApi, DeckRegistry, DeckStore};
pub use crate::utils::error::Result;
pub use gateway::{CardcastGateway, ImportOutcome};
