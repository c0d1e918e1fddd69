//! Wiring: turns an `AppConfig` into a running admin server.

use std::sync::Arc;

use crate::adapters::{CardcastClient, FileDeckRegistry, LocalCacheStorage};
use crate::config::AppConfig;
use crate::core::CardcastGateway;
use crate::utils::error::Result;

/// Everything a server needs, built from one config value.
pub struct AdminApp {
    pub gateway: Arc<CardcastGateway>,
    pub registry: Arc<FileDeckRegistry>,
}

impl AdminApp {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api = Arc::new(CardcastClient::new(config.cardcast.clone())?);
        let registry = Arc::new(FileDeckRegistry::new(
            config.cache_dir(),
            &config.decks.featured,
        ));
        let store = Arc::new(LocalCacheStorage::new(config.cache_dir()));

        let gateway = Arc::new(CardcastGateway::new(api, registry.clone(), store));

        Ok(Self { gateway, registry })
    }

    pub fn router(&self) -> axum::Router {
        crate::web::create_router(self.gateway.clone())
    }

    /// Serves the admin routes on `bind` until the process is stopped.
    pub async fn serve(&self, bind: &str) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(bind).await?;
        tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
