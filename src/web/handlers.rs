use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::core::{CardcastGateway, ImportOutcome, ProbeResponse};
use crate::domain::model::{CachedDeckEntry, DeckEntry, DeckSummary};
use crate::web::error::AppError;
use crate::web::extract::CodeParam;

/// POST /ajax/admin/cardcast/probe
///
/// Looks a deck up on CardCast. A deck the service does not know is still a
/// 200, with `{"response": {"id": "not_found", ...}}` as the body.
pub async fn probe_deck(
    State(gateway): State<Arc<CardcastGateway>>,
    param: CodeParam,
) -> Result<Json<ProbeResponse>, AppError> {
    Ok(Json(gateway.probe_deck(param.as_deref()).await?))
}

/// POST /ajax/admin/cardcast/import
pub async fn import_deck(
    State(gateway): State<Arc<CardcastGateway>>,
    param: CodeParam,
) -> Result<Response, AppError> {
    match gateway.import_deck(param.as_deref()).await? {
        ImportOutcome::Imported(summary) => {
            tracing::debug!("Imported deck {}", summary.code);
            Ok(StatusCode::OK.into_response())
        }
        ImportOutcome::NotFound => Ok(Json(ProbeResponse::not_found()).into_response()),
    }
}

/// POST /ajax/admin/cardcast/unload
pub async fn unload_deck(
    State(gateway): State<Arc<CardcastGateway>>,
    param: CodeParam,
) -> Result<StatusCode, AppError> {
    gateway.unload_deck(param.as_deref()).await?;
    Ok(StatusCode::OK)
}

/// POST /ajax/admin/cardcast/load
pub async fn load_deck(
    State(gateway): State<Arc<CardcastGateway>>,
    param: CodeParam,
) -> Result<StatusCode, AppError> {
    gateway.load_deck(param.as_deref()).await?;
    Ok(StatusCode::OK)
}

/// GET /ajax/admin/cardcast/decks/cached
pub async fn list_cached(
    State(gateway): State<Arc<CardcastGateway>>,
) -> Json<Vec<CachedDeckEntry>> {
    Json(gateway.list_cached().await)
}

/// GET /ajax/admin/cardcast/decks/featured
pub async fn list_featured(
    State(gateway): State<Arc<CardcastGateway>>,
) -> Json<Vec<DeckSummary>> {
    Json(gateway.list_featured().await)
}

/// GET /ajax/admin/cardcast/decks/loaded
pub async fn list_loaded(State(gateway): State<Arc<CardcastGateway>>) -> Json<Vec<DeckSummary>> {
    Json(gateway.list_loaded().await)
}

/// GET /ajax/admin/cardcast/decks/unloaded
pub async fn list_not_loaded(
    State(gateway): State<Arc<CardcastGateway>>,
) -> Json<Vec<DeckEntry>> {
    Json(gateway.list_not_loaded().await)
}
