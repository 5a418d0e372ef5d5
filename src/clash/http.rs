//! Authenticated player lookup against the upstream API.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    clash::transport::{RawResponse, ReqwestTransport, Transport},
    config::{BearerToken, UpstreamConfig},
    error::{LookupError, MALFORMED_RESPONSE_MESSAGE, MALFORMED_RESPONSE_STATUS},
    tag::PlayerTag,
    Result,
};

#[cfg(test)]
mod tests;

/// Authenticated client for the upstream player endpoint.
///
/// Holds no per-request state; one instance can serve any number of
/// concurrent lookups.
#[derive(Clone)]
pub struct UpstreamClient {
    transport: Arc<dyn Transport>,
    token: BearerToken,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        token: BearerToken,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            token,
            base_url,
        }
    }

    /// Build a client with the production `reqwest` transport.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::new(
            Arc::new(transport),
            config.token.clone(),
            config.base_url.clone(),
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn player_url(&self, tag: &PlayerTag) -> String {
        format!("{}/players/{}", self.base_url, tag.encoded())
    }

    fn headers(&self) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(ACCEPT, HeaderValue::from_static("application/json"));
        h.insert(AUTHORIZATION, self.token.header_value().clone());
        h
    }

    /// Normalize raw caller input and fetch the player it names.
    ///
    /// Missing input fails with [`LookupError::MissingInput`] without touching
    /// the network.
    pub async fn lookup(&self, raw_tag: Option<&str>) -> std::result::Result<Value, LookupError> {
        let tag = PlayerTag::parse(raw_tag)?;
        self.fetch_player(&tag).await
    }

    /// Fetch one player document. Exactly one upstream request is made.
    ///
    /// The request runs on its own task: dropping the returned future does
    /// not abort it, the response is just discarded.
    pub async fn fetch_player(&self, tag: &PlayerTag) -> std::result::Result<Value, LookupError> {
        let url = self.player_url(tag);
        debug!(tag = %tag.encoded(), "normalized player tag");
        debug!(%url, "requesting player from upstream");

        let transport = Arc::clone(&self.transport);
        let headers = self.headers();
        let request_url = url.clone();
        let response = tokio::spawn(async move { transport.get(&request_url, headers).await })
            .await
            .map_err(|err| err.to_string())
            .and_then(|result| result.map_err(|err| err.to_string()))
            .map_err(|description| {
                error!(%url, error = %description, "upstream request failed");
                LookupError::Network { description }
            })?;

        classify_response(response)
    }
}

/// Turn an upstream response into the player document or a classified failure.
pub fn classify_response(response: RawResponse) -> std::result::Result<Value, LookupError> {
    let data: Value = match serde_json::from_slice(&response.body) {
        Ok(data) => data,
        Err(err) => {
            warn!(status = response.status, error = %err, "upstream body is not valid JSON");
            let raw = String::from_utf8_lossy(&response.body).into_owned();
            return Err(LookupError::Upstream {
                status: MALFORMED_RESPONSE_STATUS,
                message: MALFORMED_RESPONSE_MESSAGE.to_string(),
                details: (!raw.is_empty()).then_some(Value::String(raw)),
            });
        }
    };

    match response.status {
        200..=299 => Ok(data),
        403 => Err(LookupError::Forbidden {
            details: Some(data),
        }),
        404 => Err(LookupError::NotFound {
            details: Some(data),
        }),
        429 => Err(LookupError::RateLimited {
            details: Some(data),
        }),
        status => {
            let message = data
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string();
            Err(LookupError::Upstream {
                status,
                message,
                details: Some(data),
            })
        }
    }
}
