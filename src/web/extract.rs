use crate::web::error::AppError;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::Deserialize;

/// The `code` field of an admin POST body, sent either as JSON or as a
/// urlencoded form. A missing field is left for the gateway to reject.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeParam {
    #[serde(default)]
    pub code: Option<String>,
}

impl CodeParam {
    pub fn as_deref(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

impl<S> FromRequest<S> for CodeParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let Json(param) = Json::<CodeParam>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
            Ok(param)
        } else {
            let Form(param) = Form::<CodeParam>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
            Ok(param)
        }
    }
}
