use crate::utils::error::{CardcastError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Length of every CardCast deck code.
pub const CODE_LENGTH: usize = 5;

/// A deck identifier. Only its length is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckCode(String);

impl DeckCode {
    /// Accepts `raw` iff it is present and exactly `expected_len` long.
    ///
    /// Length is measured in UTF-16 code units, the unit the deck service and
    /// its web clients count in, so `"😀abc"` is a valid 5-unit code.
    pub fn parse(raw: Option<&str>, expected_len: usize) -> Result<Self> {
        let raw = raw.ok_or_else(|| CardcastError::validation("Missing deck code"))?;
        let len = raw.encode_utf16().count();
        if len != expected_len {
            return Err(CardcastError::validation(format!(
                "Deck code must be {} characters, got {}",
                expected_len, len
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeckCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw outcome of one call to the remote deck service.
#[derive(Debug, Clone)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: String,
}

impl RemoteResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Body of a probe (or soft not-found import) response: `{"response": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResponse {
    pub response: Value,
}

impl ProbeResponse {
    pub fn found(metadata: Value) -> Self {
        Self { response: metadata }
    }

    pub fn not_found() -> Self {
        Self {
            response: serde_json::json!({ "id": "not_found", "message": "Deck not found" }),
        }
    }
}

/// Deck metadata merged with its cards, as written to `<cache>/<code>.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckDocument {
    pub metadata: Map<String, Value>,
}

impl DeckDocument {
    pub fn from_metadata(metadata: Value) -> Result<Self> {
        match metadata {
            Value::Object(metadata) => Ok(Self { metadata }),
            other => Err(CardcastError::malformed(format!(
                "deck metadata must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Copies `calls`/`responses` from the cards document into
    /// `black_cards`/`white_cards` and stamps `cache_updated_at`.
    /// A field missing from `cards` is left out rather than written as null.
    pub fn merge_cards(&mut self, cards: &Value, updated_at: chrono::DateTime<chrono::Utc>) {
        match cards.get("calls") {
            Some(calls) => {
                self.metadata.insert("black_cards".to_string(), calls.clone());
            }
            None => {
                self.metadata.remove("black_cards");
            }
        }
        match cards.get("responses") {
            Some(responses) => {
                self.metadata.insert("white_cards".to_string(), responses.clone());
            }
            None => {
                self.metadata.remove("white_cards");
            }
        }
        self.metadata.insert(
            "cache_updated_at".to_string(),
            Value::String(updated_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A deck held in memory by a registry.
#[derive(Debug, Clone)]
pub struct Deck {
    pub code: DeckCode,
    pub name: String,
    pub description: String,
    pub author: Option<String>,
    pub black_cards: Vec<Value>,
    pub white_cards: Vec<Value>,
    pub cache_updated_at: Option<String>,
}

impl Deck {
    /// Builds a deck from a cache document. `code` wins over any `code` field
    /// inside the document.
    pub fn from_document(code: DeckCode, document: &DeckDocument) -> Self {
        let meta = &document.metadata;
        let text = |key: &str| meta.get(key).and_then(Value::as_str).map(str::to_string);
        let cards = |key: &str| {
            meta.get(key)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };

        Self {
            name: text("name").unwrap_or_else(|| code.to_string()),
            description: text("description").unwrap_or_default(),
            author: meta
                .get("author")
                .and_then(|a| a.get("username"))
                .and_then(Value::as_str)
                .map(str::to_string),
            black_cards: cards("black_cards"),
            white_cards: cards("white_cards"),
            cache_updated_at: text("cache_updated_at"),
            code,
        }
    }

    pub fn summary(&self) -> DeckSummary {
        DeckSummary {
            code: self.code.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            author: self.author.clone(),
            black_card_count: self.black_cards.len(),
            white_card_count: self.white_cards.len(),
            cache_updated_at: self.cache_updated_at.clone(),
        }
    }
}

/// JSON projection of a loaded deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub code: DeckCode,
    pub name: String,
    pub description: String,
    pub author: Option<String>,
    pub black_card_count: usize,
    pub white_card_count: usize,
    pub cache_updated_at: Option<String>,
}

/// One row of a deck listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeckEntry {
    Deck(DeckSummary),
    Code { code: DeckCode },
}

impl DeckEntry {
    pub fn code(&self) -> &DeckCode {
        match self {
            DeckEntry::Deck(summary) => &summary.code,
            DeckEntry::Code { code } => code,
        }
    }
}

/// A cached deck row, annotated with whether the registry holds it in memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachedDeckEntry {
    #[serde(flatten)]
    pub entry: DeckEntry,
    pub loaded: bool,
}
