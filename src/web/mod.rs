//! HTTP surface for the CardCast admin operations.

pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::core::CardcastGateway;

pub use error::AppError;

/// Builds the admin router. Authentication is left to whatever sits in front.
pub fn create_router(gateway: Arc<CardcastGateway>) -> Router {
    Router::new()
        .route("/ajax/admin/cardcast/probe", post(handlers::probe_deck))
        .route("/ajax/admin/cardcast/import", post(handlers::import_deck))
        .route("/ajax/admin/cardcast/unload", post(handlers::unload_deck))
        .route("/ajax/admin/cardcast/load", post(handlers::load_deck))
        .route("/ajax/admin/cardcast/decks/cached", get(handlers::list_cached))
        .route("/ajax/admin/cardcast/decks/featured", get(handlers::list_featured))
        .route("/ajax/admin/cardcast/decks/loaded", get(handlers::list_loaded))
        .route("/ajax/admin/cardcast/decks/unloaded", get(handlers::list_not_loaded))
        .with_state(gateway)
}
