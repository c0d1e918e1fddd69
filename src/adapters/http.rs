use crate::config::CardcastConfig;
use crate::core::template::render_deck_path;
use crate::domain::model::{DeckCode, RemoteResponse};
use crate::domain::ports::CardcastApi;
use crate::utils::error::{CardcastError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// HTTP client for the CardCast deck API.
pub struct CardcastClient {
    config: CardcastConfig,
    client: Client,
}

impl CardcastClient {
    pub fn new(config: CardcastConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    /// Full URL for a deck path template.
    pub fn deck_url(&self, template: &str, code: &DeckCode) -> Result<Url> {
        let base = format!(
            "{}://{}:{}",
            self.config.scheme, self.config.host, self.config.port
        );
        let mut url = Url::parse(&base).map_err(|e| CardcastError::InvalidConfigValueError {
            field: "cardcast".to_string(),
            value: base.clone(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let rendered = render_deck_path(template, code.as_str());
        match rendered.split_once('?') {
            Some((path, query)) => {
                url.set_path(path);
                url.set_query(Some(query));
            }
            None => url.set_path(&rendered),
        }

        Ok(url)
    }

    async fn get(&self, template: &str, code: &DeckCode) -> Result<RemoteResponse> {
        let url = self.deck_url(template, code)?;
        tracing::debug!("Making CardCast request to: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        tracing::debug!("CardCast response status: {}", status);

        let body = response.text().await?;
        Ok(RemoteResponse { status, body })
    }
}

#[async_trait]
impl CardcastApi for CardcastClient {
    async fn deck_info(&self, code: &DeckCode) -> Result<RemoteResponse> {
        self.get(&self.config.deck_info, code).await
    }

    async fn deck_cards(&self, code: &DeckCode) -> Result<RemoteResponse> {
        self.get(&self.config.deck_cards, code).await
    }
}
