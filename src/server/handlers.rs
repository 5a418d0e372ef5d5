//! Request handlers for the inbound HTTP surface.

use axum::{
    extract::{RawQuery, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::AppState;
use crate::error::LookupError;

/// Query parameter carrying the raw player tag.
pub const TAG_PARAM: &str = "tag";

/// First `tag` value in a raw query string, percent-decoded.
///
/// Later repeats are ignored and malformed pairs never reject the request,
/// so every failure reaches the caller as a `LookupError` body.
pub fn first_tag(raw_query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(raw_query?.as_bytes())
        .find(|(key, _)| key == TAG_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// `GET /api/player?tag=...`
///
/// Success answers with the upstream document as-is; failures answer with
/// `{ "error": ..., "details"?: ... }` and the status of the failure kind.
pub async fn get_player(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Value>, LookupError> {
    let tag = first_tag(raw_query.as_deref());
    match state.client.lookup(tag.as_deref()).await {
        Ok(player) => {
            info!(tag = tag.as_deref().unwrap_or_default(), "player lookup succeeded");
            Ok(Json(player))
        }
        Err(err) => {
            warn!(
                tag = tag.as_deref().unwrap_or_default(),
                kind = err.kind(),
                status = err.status_code().as_u16(),
                "player lookup failed: {err}"
            );
            Err(err)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
